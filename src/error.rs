//! Error types for the icon-crop library.
//!
//! Every failure is fatal: a single unreadable or corrupt PNG aborts the
//! whole run. There is no per-file error type and no partial-success result.
//!
//! Each variant carries the path it failed on; the underlying cause is kept
//! as a `#[source]` so `anyhow` chains print both.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the icon-crop library.
#[derive(Debug, Error)]
pub enum IconCropError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// The input root is missing or is not a directory.
    #[error("Input dir does not exist or is not a directory: {}", path.display())]
    InputDirNotFound { path: PathBuf },

    /// Directory traversal failed (permission denied, symlink loop, …).
    #[error("Failed to walk '{}': {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// A PNG could not be opened or read.
    #[error("Failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A scanned file does not sit under the input root, so it has no
    /// mirrored output path.
    #[error("'{}' is not under the input dir {}", path.display(), root.display())]
    OutsideInputRoot { path: PathBuf, root: PathBuf },

    // ── Codec errors ──────────────────────────────────────────────────────
    /// The file is not a valid PNG or its data stream is corrupt.
    #[error("Failed to decode PNG '{}': {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: png::DecodingError,
    },

    /// Decoded pixel data does not match the header's geometry.
    #[error("Malformed image '{}': {detail}", path.display())]
    MalformedImage { path: PathBuf, detail: String },

    /// The cropped image could not be PNG-encoded.
    #[error("Failed to encode PNG '{}': {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: png::EncodingError,
    },

    // ── Output errors ─────────────────────────────────────────────────────
    /// Could not create an output directory or write an output file.
    #[error("Failed to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn input_dir_not_found_display() {
        let e = IconCropError::InputDirNotFound {
            path: PathBuf::from("/no/such/icons"),
        };
        let msg = e.to_string();
        assert!(msg.contains("does not exist"), "got: {msg}");
        assert!(msg.contains("/no/such/icons"), "got: {msg}");
    }

    #[test]
    fn write_error_keeps_source() {
        let e = IconCropError::Write {
            path: PathBuf::from("out/a.png"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(e.to_string().contains("out/a.png"));
        assert!(e.source().is_some());
    }

    #[test]
    fn malformed_image_display() {
        let e = IconCropError::MalformedImage {
            path: PathBuf::from("bad.png"),
            detail: "expected 40 bytes, got 12".into(),
        };
        assert!(e.to_string().contains("expected 40 bytes"));
    }
}
