//! In-memory PNG raster at its native color type and bit depth.
//!
//! Icons arrive in every flavour a PNG optimiser can produce: 8-bit RGBA,
//! 16-bit gray+alpha, 4-bit palettes with a tRNS table. Expanding everything
//! to RGBA8 would make bounds detection trivial but would silently rewrite a
//! 2 KB palette icon as a 10 KB truecolor one. [`IconImage`] keeps the packed
//! scanlines exactly as decoded so a crop can be written back in the same
//! mode.

use png::{BitDepth, ColorType, PixelDimensions, ScaledFloat, SrgbRenderingIntent};

/// Ancillary chunks carried from the source file to the cropped output.
#[derive(Debug, Clone, Default)]
pub struct PngMetadata {
    /// sRGB rendering intent (sRGB chunk).
    pub srgb: Option<SrgbRenderingIntent>,
    /// Source gamma (gAMA chunk); written only when there is no sRGB chunk.
    pub gamma: Option<ScaledFloat>,
    /// Physical pixel dimensions (pHYs chunk).
    pub pixel_dims: Option<PixelDimensions>,
}

/// A decoded PNG with packed, non-interlaced scanlines.
///
/// `data` holds `height` rows of [`IconImage::stride`] bytes each, at the
/// image's own bit depth (sub-byte samples packed MSB first).
#[derive(Debug, Clone)]
pub struct IconImage {
    pub width: u32,
    pub height: u32,
    pub color_type: ColorType,
    pub bit_depth: BitDepth,
    /// PLTE entries as RGB triplets. Present for indexed images.
    pub palette: Option<Vec<u8>>,
    /// tRNS chunk: per-index alpha for indexed images, a color key otherwise.
    pub trns: Option<Vec<u8>>,
    pub metadata: PngMetadata,
    pub data: Vec<u8>,
}

/// How transparency is expressed, one variant per bounds strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode<'a> {
    /// Grayscale or RGB. A tRNS color key is kept on save but not treated as alpha.
    Opaque,
    /// RGBA.
    Alpha,
    /// Grayscale + alpha.
    LumaAlpha,
    /// Palette-indexed with a tRNS table of per-index alpha values.
    PaletteKeyed(&'a [u8]),
    /// Palette-indexed without transparency.
    Palette,
}

impl IconImage {
    /// Which transparency model applies to this image.
    pub fn color_mode(&self) -> ColorMode<'_> {
        match self.color_type {
            ColorType::Grayscale | ColorType::Rgb => ColorMode::Opaque,
            ColorType::Rgba => ColorMode::Alpha,
            ColorType::GrayscaleAlpha => ColorMode::LumaAlpha,
            ColorType::Indexed => match self.trns.as_deref() {
                Some(trns) => ColorMode::PaletteKeyed(trns),
                None => ColorMode::Palette,
            },
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Bits occupied by one pixel across all channels.
    pub fn bits_per_pixel(&self) -> usize {
        self.color_type.samples() * depth_bits(self.bit_depth)
    }

    /// Row length in bytes for an image of `width` pixels in this mode.
    pub fn stride(&self, width: u32) -> usize {
        (width as usize * self.bits_per_pixel()).div_ceil(8)
    }

    /// Packed bytes of scanline `y`.
    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.stride(self.width);
        let start = y as usize * stride;
        &self.data[start..start + stride]
    }
}

/// Number of bits in one sample at `depth`.
pub fn depth_bits(depth: BitDepth) -> usize {
    match depth {
        BitDepth::One => 1,
        BitDepth::Two => 2,
        BitDepth::Four => 4,
        BitDepth::Eight => 8,
        BitDepth::Sixteen => 16,
    }
}

/// Read the `bits`-wide sample of pixel `x` from a packed row (`bits` ≤ 8).
pub(crate) fn read_sample(row: &[u8], x: u32, bits: usize) -> u8 {
    let offset = x as usize * bits;
    let shift = 8 - bits - offset % 8;
    let mask = ((1u16 << bits) - 1) as u8;
    (row[offset / 8] >> shift) & mask
}

/// Write `value` as the `bits`-wide sample of pixel `x` (`bits` ≤ 8).
pub(crate) fn write_sample(row: &mut [u8], x: u32, bits: usize, value: u8) {
    let offset = x as usize * bits;
    let shift = 8 - bits - offset % 8;
    let mask = (((1u16 << bits) - 1) as u8) << shift;
    let byte = &mut row[offset / 8];
    *byte = (*byte & !mask) | ((value << shift) & mask);
}
