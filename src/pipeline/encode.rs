//! PNG encoding: [`IconImage`] → file, in the image's own color mode.
//!
//! The header repeats the source color type and bit depth, PLTE and tRNS are
//! written back verbatim, and sRGB/gAMA/pHYs are carried over. Output is
//! always non-interlaced. The encoder settings are fixed, so the same image
//! always produces the same bytes and re-running a crop is idempotent.

use crate::error::IconCropError;
use crate::raster::IconImage;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Encode `image` to a new file at `path`, replacing any existing file.
///
/// The parent directory must already exist.
pub fn write_png(image: &IconImage, path: &Path) -> Result<(), IconCropError> {
    let write_err = |source| IconCropError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(write_err)?;
    let mut out = BufWriter::new(file);
    encode_png(image, &mut out, path)?;
    out.flush().map_err(write_err)?;

    debug!(
        "Wrote {} ({}x{} {:?})",
        path.display(),
        image.width,
        image.height,
        image.color_type
    );
    Ok(())
}

/// Encode `image` into `writer`. `path` is only used for error reporting.
pub fn encode_png<W: Write>(
    image: &IconImage,
    writer: W,
    path: &Path,
) -> Result<(), IconCropError> {
    let encode_err = |source| IconCropError::Encode {
        path: path.to_path_buf(),
        source,
    };

    let mut encoder = png::Encoder::new(writer, image.width, image.height);
    encoder.set_color(image.color_type);
    encoder.set_depth(image.bit_depth);
    if let Some(palette) = &image.palette {
        encoder.set_palette(palette.as_slice());
    }
    if let Some(trns) = &image.trns {
        encoder.set_trns(trns.as_slice());
    }
    // set_source_srgb also writes the fallback gAMA/cHRM chunks.
    if let Some(intent) = image.metadata.srgb {
        encoder.set_source_srgb(intent);
    } else if let Some(gamma) = image.metadata.gamma {
        encoder.set_source_gamma(gamma);
    }
    encoder.set_pixel_dims(image.metadata.pixel_dims);

    let mut png_writer = encoder.write_header().map_err(encode_err)?;
    png_writer
        .write_image_data(&image.data)
        .map_err(encode_err)?;
    png_writer.finish().map_err(encode_err)
}
