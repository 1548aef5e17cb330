//! PNG decoding: file → [`IconImage`] at native color type and bit depth.
//!
//! The decoder runs with [`png::Transformations::IDENTITY`]: no palette
//! expansion, no tRNS-to-alpha conversion, no 16→8 stripping. Bounds
//! detection then works on the real color mode and the encoder can write the
//! crop back without changing it. Interlaced files are de-interlaced by the
//! decoder; for animated PNGs only the default image is read.

use crate::error::IconCropError;
use crate::raster::{IconImage, PngMetadata};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

/// Open and decode the PNG at `path`.
///
/// The file handle is closed before this function returns.
pub fn read_png(path: &Path) -> Result<IconImage, IconCropError> {
    let file = File::open(path).map_err(|source| IconCropError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    decode_png(BufReader::new(file), path)
}

/// Decode a PNG stream. `path` is only used for error reporting.
pub fn decode_png<R: Read>(reader: R, path: &Path) -> Result<IconImage, IconCropError> {
    let decode_err = |source| IconCropError::Decode {
        path: path.to_path_buf(),
        source,
    };

    let mut decoder = png::Decoder::new(reader);
    decoder.set_transformations(png::Transformations::IDENTITY);
    let mut reader = decoder.read_info().map_err(decode_err)?;

    let mut data = vec![0; reader.output_buffer_size()];
    let frame = reader.next_frame(&mut data).map_err(decode_err)?;
    data.truncate(frame.buffer_size());

    let info = reader.info();
    let image = IconImage {
        width: frame.width,
        height: frame.height,
        color_type: frame.color_type,
        bit_depth: frame.bit_depth,
        palette: info.palette.as_ref().map(|p| p.to_vec()),
        trns: info.trns.as_ref().map(|t| t.to_vec()),
        metadata: PngMetadata {
            srgb: info.srgb,
            gamma: info.source_gamma,
            pixel_dims: info.pixel_dims,
        },
        data,
    };

    let expected = image.stride(image.width) * image.height as usize;
    if image.data.len() != expected {
        return Err(IconCropError::MalformedImage {
            path: path.to_path_buf(),
            detail: format!(
                "expected {} bytes of pixel data for {}x{} {:?}/{:?}, got {}",
                expected,
                image.width,
                image.height,
                image.color_type,
                image.bit_depth,
                image.data.len()
            ),
        });
    }

    debug!(
        "Decoded {} → {}x{} {:?} {:?}{}",
        path.display(),
        image.width,
        image.height,
        image.color_type,
        image.bit_depth,
        if image.trns.is_some() { " +tRNS" } else { "" }
    );

    Ok(image)
}
