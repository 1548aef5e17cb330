//! Directory-level entry points: scan an input tree, crop every PNG, mirror
//! the layout under the output root.
//!
//! Processing is sequential and fail-fast. The first file that cannot be
//! read, decoded or written aborts the run with its error; files already
//! written stay on disk. Output directories are created lazily, only for
//! subtrees that actually contain PNGs.

use crate::config::CropConfig;
use crate::error::IconCropError;
use crate::output::{CropStats, FileReport};
use crate::pipeline::{crop, decode, encode};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Crop every PNG under `input_dir` into the same relative path under
/// `output_dir`.
///
/// # Errors
/// - [`IconCropError::InputDirNotFound`] if `input_dir` is missing or not a
///   directory.
/// - Any walk, read, decode, encode or write error, which aborts the run.
pub fn crop_directory(
    input_dir: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
    config: &CropConfig,
) -> Result<CropStats, IconCropError> {
    let start = Instant::now();
    let input_dir = resolve_input_dir(input_dir.as_ref())?;
    let output_dir = resolve_output_dir(output_dir.as_ref())?;
    info!(
        "Cropping PNGs under {} → {} (margin {}px)",
        input_dir.display(),
        output_dir.display(),
        config.margin
    );

    // Earlier outputs nested inside the input tree must not be cropped again.
    let nested_output = output_dir != input_dir && output_dir.starts_with(&input_dir);
    if nested_output {
        warn!(
            "Output dir {} is inside the input dir; excluding it from the scan",
            output_dir.display()
        );
    }
    let files = list_pngs(
        &input_dir,
        nested_output.then_some(output_dir.as_path()),
        config,
    )?;
    let total = files.len();
    debug!("Found {} PNG(s)", total);

    if let Some(ref cb) = config.progress_callback {
        cb.on_run_start(total);
    }

    let mut stats = CropStats {
        output_dir: output_dir.clone(),
        ..CropStats::default()
    };

    for (i, src) in files.iter().enumerate() {
        let dst = mirror_path(src, &input_dir, &output_dir)?;
        let index = i + 1;

        if let Some(ref cb) = config.progress_callback {
            cb.on_file_start(index, total, src);
        }

        let report = crop_file(src, &dst, config)?;
        stats.record(&report);

        if let Some(ref cb) = config.progress_callback {
            cb.on_file_complete(index, total, &report);
        }
    }

    stats.duration_ms = start.elapsed().as_millis() as u64;
    info!(
        "Cropped {} PNG(s) ({} trimmed, {} fully transparent) in {}ms",
        stats.processed, stats.trimmed, stats.fully_transparent, stats.duration_ms
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_run_complete(stats.processed);
    }

    Ok(stats)
}

/// Crop a single PNG from `src` into `dst`, creating `dst`'s parent
/// directories as needed.
pub fn crop_file(src: &Path, dst: &Path, config: &CropConfig) -> Result<FileReport, IconCropError> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent).map_err(|source| IconCropError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let image = decode::read_png(src)?;
    let original_size = image.dimensions();
    let (cropped, outcome) = crop::crop_to_content(image, config.margin);
    encode::write_png(&cropped, dst)?;

    debug!(
        "{} {}x{} → {}x{}",
        src.display(),
        original_size.0,
        original_size.1,
        cropped.width,
        cropped.height
    );

    Ok(FileReport {
        source: src.to_path_buf(),
        destination: dst.to_path_buf(),
        original_size,
        output_size: cropped.dimensions(),
        outcome,
    })
}

/// All `.png` files (any letter case) under `root`, sorted by file name
/// within each directory. Entries under `exclude` are skipped.
///
/// Symlinked files are included; symlinked directories are only descended
/// into when [`CropConfig::follow_links`] is set.
pub fn list_pngs(
    root: &Path,
    exclude: Option<&Path>,
    config: &CropConfig,
) -> Result<Vec<PathBuf>, IconCropError> {
    let walker = WalkDir::new(root)
        .follow_links(config.follow_links)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| exclude.is_none_or(|ex| !e.path().starts_with(ex)));

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|source| {
            let path = source.path().unwrap_or(root).to_path_buf();
            IconCropError::Walk { path, source }
        })?;

        let is_file = entry.file_type().is_file()
            || (entry.path_is_symlink() && entry.path().is_file());
        if is_file && is_png(entry.path()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Path under `output_dir` at the same position `src` has under `input_dir`.
fn mirror_path(
    src: &Path,
    input_dir: &Path,
    output_dir: &Path,
) -> Result<PathBuf, IconCropError> {
    let relative = src
        .strip_prefix(input_dir)
        .map_err(|_| IconCropError::OutsideInputRoot {
            path: src.to_path_buf(),
            root: input_dir.to_path_buf(),
        })?;
    Ok(output_dir.join(relative))
}

/// Case-insensitive `.png` extension check.
pub fn is_png(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|s| s.eq_ignore_ascii_case("png"))
        .unwrap_or(false)
}

/// Canonical path of an existing input directory.
fn resolve_input_dir(path: &Path) -> Result<PathBuf, IconCropError> {
    if !path.is_dir() {
        return Err(IconCropError::InputDirNotFound {
            path: std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf()),
        });
    }
    path.canonicalize().map_err(|source| IconCropError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Absolute path of the output root, which may not exist yet.
///
/// The deepest existing ancestor is canonicalized so the result compares
/// correctly against the canonical input root.
fn resolve_output_dir(path: &Path) -> Result<PathBuf, IconCropError> {
    let to_err = |source| IconCropError::Write {
        path: path.to_path_buf(),
        source,
    };
    let absolute = std::path::absolute(path).map_err(to_err)?;

    let mut existing = absolute.as_path();
    let mut missing = Vec::new();
    while !existing.exists() {
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name);
                existing = parent;
            }
            _ => return Ok(absolute.clone()),
        }
    }

    let mut resolved = existing.canonicalize().map_err(to_err)?;
    resolved.extend(missing.iter().rev().copied());
    Ok(resolved)
}
