//! Alpha-bounds detection: the smallest rectangle holding every visible pixel.
//!
//! One strategy per [`ColorMode`]:
//!
//! | Mode | Visible when |
//! |------|--------------|
//! | `Alpha`, `LumaAlpha` | alpha sample ≠ 0 (either byte, for 16-bit) |
//! | `PaletteKeyed` | `trns[index]` ≠ 0; indices past the table are opaque |
//! | `Palette`, `Opaque` | always, so the full frame is returned |

use crate::raster::{depth_bits, read_sample, ColorMode, IconImage};

/// Pixel rectangle with exclusive `right`/`bottom` edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl BoundingBox {
    /// The whole `width × height` frame.
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            left: 0,
            top: 0,
            right: width,
            bottom: height,
        }
    }

    pub fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }

    /// Grow by `margin` on every side, clamped to `[0, width] × [0, height]`.
    pub fn expand(self, margin: u32, width: u32, height: u32) -> Self {
        Self {
            left: self.left.saturating_sub(margin),
            top: self.top.saturating_sub(margin),
            right: self.right.saturating_add(margin).min(width),
            bottom: self.bottom.saturating_add(margin).min(height),
        }
    }
}

/// Bounding box of all pixels with non-zero alpha, or `None` when the image
/// is fully transparent.
pub fn alpha_bounds(image: &IconImage) -> Option<BoundingBox> {
    match image.color_mode() {
        ColorMode::Opaque | ColorMode::Palette => {
            Some(BoundingBox::full(image.width, image.height))
        }
        ColorMode::Alpha | ColorMode::LumaAlpha => {
            let sample_bytes = depth_bits(image.bit_depth) / 8;
            let pixel_bytes = image.color_type.samples() * sample_bytes;
            let alpha_offset = pixel_bytes - sample_bytes;
            scan(image, |row, x| {
                let start = x as usize * pixel_bytes + alpha_offset;
                row[start..start + sample_bytes].iter().any(|&b| b != 0)
            })
        }
        ColorMode::PaletteKeyed(trns) => {
            let bits = depth_bits(image.bit_depth);
            scan(image, |row, x| {
                let index = read_sample(row, x, bits) as usize;
                trns.get(index).copied().unwrap_or(u8::MAX) != 0
            })
        }
    }
}

/// Row-by-row scan; `visible(row, x)` decides whether pixel `x` counts.
fn scan(image: &IconImage, visible: impl Fn(&[u8], u32) -> bool) -> Option<BoundingBox> {
    let mut bounds: Option<BoundingBox> = None;

    for y in 0..image.height {
        let row = image.row(y);
        let Some(first) = (0..image.width).find(|&x| visible(row, x)) else {
            continue;
        };
        let last = (first..image.width)
            .rev()
            .find(|&x| visible(row, x))
            .unwrap_or(first);

        bounds = Some(match bounds {
            None => BoundingBox {
                left: first,
                top: y,
                right: last + 1,
                bottom: y + 1,
            },
            Some(b) => BoundingBox {
                left: b.left.min(first),
                top: b.top,
                right: b.right.max(last + 1),
                bottom: y + 1,
            },
        });
    }

    bounds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::PngMetadata;
    use png::{BitDepth, ColorType};

    fn image(
        width: u32,
        height: u32,
        color_type: ColorType,
        bit_depth: BitDepth,
        trns: Option<Vec<u8>>,
        data: Vec<u8>,
    ) -> IconImage {
        IconImage {
            width,
            height,
            color_type,
            bit_depth,
            palette: (color_type == ColorType::Indexed).then(|| vec![0; 16 * 3]),
            trns,
            metadata: PngMetadata::default(),
            data,
        }
    }

    /// RGBA8 canvas with opaque pixels at the given coordinates.
    fn rgba_with(width: u32, height: u32, opaque: &[(u32, u32)]) -> IconImage {
        let mut data = vec![0u8; (width * height * 4) as usize];
        for &(x, y) in opaque {
            let i = ((y * width + x) * 4) as usize;
            data[i..i + 4].copy_from_slice(&[10, 20, 30, 255]);
        }
        image(width, height, ColorType::Rgba, BitDepth::Eight, None, data)
    }

    #[test]
    fn rgba_bounds_cover_scattered_pixels() {
        let img = rgba_with(10, 8, &[(3, 2), (6, 5), (4, 4)]);
        assert_eq!(
            alpha_bounds(&img),
            Some(BoundingBox {
                left: 3,
                top: 2,
                right: 7,
                bottom: 6
            })
        );
    }

    #[test]
    fn single_pixel_bounds() {
        let img = rgba_with(5, 5, &[(0, 4)]);
        assert_eq!(
            alpha_bounds(&img),
            Some(BoundingBox {
                left: 0,
                top: 4,
                right: 1,
                bottom: 5
            })
        );
    }

    #[test]
    fn fully_transparent_rgba_has_no_bounds() {
        let img = rgba_with(4, 4, &[]);
        assert_eq!(alpha_bounds(&img), None);
    }

    #[test]
    fn color_under_zero_alpha_is_invisible() {
        let mut img = rgba_with(3, 3, &[]);
        img.data.iter_mut().enumerate().for_each(|(i, b)| {
            if i % 4 != 3 {
                *b = 200;
            }
        });
        assert_eq!(alpha_bounds(&img), None);
    }

    #[test]
    fn luma_alpha_sixteen_bit_low_byte_counts() {
        // 3x1 LA16: only pixel 1 has alpha 0x0001
        let data = vec![
            0xFF, 0xFF, 0, 0, //
            0xFF, 0xFF, 0, 1, //
            0xFF, 0xFF, 0, 0,
        ];
        let img = image(3, 1, ColorType::GrayscaleAlpha, BitDepth::Sixteen, None, data);
        assert_eq!(
            alpha_bounds(&img),
            Some(BoundingBox {
                left: 1,
                top: 0,
                right: 2,
                bottom: 1
            })
        );
    }

    #[test]
    fn opaque_rgb_is_full_frame_even_with_color_key() {
        let img = image(
            4,
            3,
            ColorType::Rgb,
            BitDepth::Eight,
            Some(vec![0, 0, 0, 0, 0, 0]),
            vec![0; 4 * 3 * 3],
        );
        assert_eq!(alpha_bounds(&img), Some(BoundingBox::full(4, 3)));
    }

    #[test]
    fn palette_without_trns_is_full_frame() {
        let img = image(8, 2, ColorType::Indexed, BitDepth::One, None, vec![0; 2]);
        assert_eq!(alpha_bounds(&img), Some(BoundingBox::full(8, 2)));
    }

    #[test]
    fn palette_keyed_uses_trns_lookup() {
        // 4x2 at 4 bits, index 0 transparent, index 5 past the table (opaque)
        let data = vec![
            0x00, 0x00, //
            0x00, 0x50,
        ];
        let img = image(4, 2, ColorType::Indexed, BitDepth::Four, Some(vec![0, 128]), data);
        assert_eq!(
            alpha_bounds(&img),
            Some(BoundingBox {
                left: 2,
                top: 1,
                right: 3,
                bottom: 2
            })
        );
    }

    #[test]
    fn palette_all_transparent_index_has_no_bounds() {
        let img = image(
            6,
            3,
            ColorType::Indexed,
            BitDepth::Eight,
            Some(vec![255, 0]),
            vec![1; 6 * 3],
        );
        assert_eq!(alpha_bounds(&img), None);
    }

    #[test]
    fn expand_adds_margin_and_clamps() {
        let b = BoundingBox {
            left: 3,
            top: 1,
            right: 7,
            bottom: 9,
        };
        assert_eq!(
            b.expand(2, 20, 20),
            BoundingBox {
                left: 1,
                top: 0,
                right: 9,
                bottom: 11
            }
        );
        assert_eq!(b.expand(100, 10, 12), BoundingBox::full(10, 12));
        assert_eq!(b.expand(0, 10, 12), b);
    }
}
