//! Cropping: cut a rectangle out of an [`IconImage`] without changing its mode.
//!
//! Byte-aligned pixels (8 bits and up) are copied as row slices. 1-, 2- and
//! 4-bit grayscale or palette pixels do not start on byte boundaries once the
//! left edge moves, so those rows are repacked sample by sample.

use crate::output::CropOutcome;
use crate::pipeline::bounds::{alpha_bounds, BoundingBox};
use crate::raster::{read_sample, write_sample, IconImage};
use tracing::debug;

/// Copy `rect` out of `image`.
///
/// `rect` is clamped to the image first; an empty or inverted rect yields a
/// zero-sized image. Color type, bit depth, palette, tRNS and metadata carry
/// over unchanged.
pub fn crop(image: &IconImage, rect: BoundingBox) -> IconImage {
    let right = rect.right.min(image.width);
    let bottom = rect.bottom.min(image.height);
    let rect = BoundingBox {
        left: rect.left.min(right),
        top: rect.top.min(bottom),
        right,
        bottom,
    };
    let width = rect.width();
    let height = rect.height();
    let bits = image.bits_per_pixel();
    let stride = image.stride(width);

    let mut data = Vec::with_capacity(stride * height as usize);
    for y in rect.top..rect.bottom {
        let row = image.row(y);
        if bits % 8 == 0 {
            let bytes = bits / 8;
            data.extend_from_slice(&row[rect.left as usize * bytes..rect.right as usize * bytes]);
        } else {
            let mut packed = vec![0u8; stride];
            for x in 0..width {
                write_sample(&mut packed, x, bits, read_sample(row, rect.left + x, bits));
            }
            data.extend_from_slice(&packed);
        }
    }

    IconImage {
        width,
        height,
        color_type: image.color_type,
        bit_depth: image.bit_depth,
        palette: image.palette.clone(),
        trns: image.trns.clone(),
        metadata: image.metadata.clone(),
        data,
    }
}

/// Detect the visible region, grow it by `margin` and crop.
///
/// A fully transparent image is returned as-is with
/// [`CropOutcome::FullyTransparent`].
pub fn crop_to_content(image: IconImage, margin: u32) -> (IconImage, CropOutcome) {
    let Some(bounds) = alpha_bounds(&image) else {
        debug!("No visible pixels; keeping {}x{} frame", image.width, image.height);
        return (image, CropOutcome::FullyTransparent);
    };

    let rect = bounds.expand(margin, image.width, image.height);
    debug!(
        "Content {:?} → crop ({}, {}, {}, {}) with margin {}",
        bounds, rect.left, rect.top, rect.right, rect.bottom, margin
    );

    if rect == BoundingBox::full(image.width, image.height) {
        return (image, CropOutcome::Cropped(rect));
    }
    (crop(&image, rect), CropOutcome::Cropped(rect))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::PngMetadata;
    use png::{BitDepth, ColorType};

    /// RGBA8 canvas; pixels inside `[x0,x1)×[y0,y1)` get a position-coded color.
    fn canvas(width: u32, height: u32, x0: u32, y0: u32, x1: u32, y1: u32) -> IconImage {
        let mut data = vec![0u8; (width * height * 4) as usize];
        for y in y0..y1 {
            for x in x0..x1 {
                let i = ((y * width + x) * 4) as usize;
                data[i..i + 4].copy_from_slice(&[x as u8, y as u8, 7, 255]);
            }
        }
        IconImage {
            width,
            height,
            color_type: ColorType::Rgba,
            bit_depth: BitDepth::Eight,
            palette: None,
            trns: None,
            metadata: PngMetadata::default(),
            data,
        }
    }

    fn pixel(img: &IconImage, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * img.width + x) * 4) as usize;
        [img.data[i], img.data[i + 1], img.data[i + 2], img.data[i + 3]]
    }

    #[test]
    fn margin_expands_crop_around_rectangle() {
        let (out, outcome) = crop_to_content(canvas(32, 32, 10, 12, 18, 15), 2);
        assert_eq!(out.dimensions(), (8 + 4, 3 + 4));
        assert_eq!(
            outcome,
            CropOutcome::Cropped(BoundingBox {
                left: 8,
                top: 10,
                right: 20,
                bottom: 17
            })
        );
        // original top-left content pixel now sits at (m, m)
        assert_eq!(pixel(&out, 2, 2), [10, 12, 7, 255]);
        assert_eq!(pixel(&out, 0, 0), [0, 0, 0, 0]);
        assert_eq!(pixel(&out, 9, 4), [17, 14, 7, 255]);
    }

    #[test]
    fn margin_clamps_at_canvas_edge() {
        let (out, _) = crop_to_content(canvas(16, 16, 1, 0, 5, 3), 4);
        // left clamps to 0 (offset 1), top clamps to 0 (offset 0)
        assert_eq!(out.dimensions(), (9, 7));
        assert_eq!(pixel(&out, 1, 0), [1, 0, 7, 255]);
    }

    #[test]
    fn zero_margin_is_tight() {
        let (out, _) = crop_to_content(canvas(16, 16, 4, 5, 6, 9), 0);
        assert_eq!(out.dimensions(), (2, 4));
        assert_eq!(pixel(&out, 0, 0), [4, 5, 7, 255]);
    }

    #[test]
    fn huge_margin_keeps_full_frame() {
        let (out, outcome) = crop_to_content(canvas(10, 6, 4, 2, 5, 3), u32::MAX);
        assert_eq!(out.dimensions(), (10, 6));
        assert_eq!(outcome, CropOutcome::Cropped(BoundingBox::full(10, 6)));
    }

    #[test]
    fn fully_transparent_passes_through() {
        let img = canvas(7, 5, 0, 0, 0, 0);
        let before = img.data.clone();
        let (out, outcome) = crop_to_content(img, 4);
        assert_eq!(outcome, CropOutcome::FullyTransparent);
        assert_eq!(out.dimensions(), (7, 5));
        assert_eq!(out.data, before);
    }

    #[test]
    fn sub_byte_palette_rows_are_repacked() {
        // 6x2 at 2 bits: row 0 = 0 1 2 3 0 1, row 1 = 3 3 3 3 3 3
        let img = IconImage {
            width: 6,
            height: 2,
            color_type: ColorType::Indexed,
            bit_depth: BitDepth::Two,
            palette: Some(vec![0; 12]),
            trns: Some(vec![0]),
            metadata: PngMetadata::default(),
            data: vec![0b0001_1011, 0b0001_0000, 0xFF, 0xF0],
        };
        let out = crop(
            &img,
            BoundingBox {
                left: 1,
                top: 0,
                right: 6,
                bottom: 1,
            },
        );
        assert_eq!(out.dimensions(), (5, 1));
        // 1 2 3 0 1 → 01 10 11 00 | 01 00 00 00
        assert_eq!(out.data, vec![0b0110_1100, 0b0100_0000]);
        assert_eq!(out.color_type, ColorType::Indexed);
        assert_eq!(out.bit_depth, BitDepth::Two);
        assert_eq!(out.trns, Some(vec![0]));
    }

    #[test]
    fn out_of_range_rect_is_clamped() {
        let img = canvas(4, 4, 0, 0, 4, 4);
        let out = crop(
            &img,
            BoundingBox {
                left: 2,
                top: 2,
                right: 40,
                bottom: 40,
            },
        );
        assert_eq!(out.dimensions(), (2, 2));
        assert_eq!(pixel(&out, 0, 0), [2, 2, 7, 255]);
    }

    #[test]
    fn rect_starting_past_the_edge_is_empty() {
        let img = canvas(4, 4, 0, 0, 4, 4);
        let out = crop(
            &img,
            BoundingBox {
                left: 10,
                top: 0,
                right: 12,
                bottom: 2,
            },
        );
        assert_eq!(out.dimensions(), (0, 2));
        assert!(out.data.is_empty());

        let below = crop(
            &img,
            BoundingBox {
                left: 0,
                top: 9,
                right: 4,
                bottom: 11,
            },
        );
        assert_eq!(below.dimensions(), (4, 0));
    }

    #[test]
    fn inverted_rect_is_empty() {
        let img = canvas(8, 8, 0, 0, 8, 8);
        let out = crop(
            &img,
            BoundingBox {
                left: 5,
                top: 6,
                right: 2,
                bottom: 3,
            },
        );
        assert_eq!(out.dimensions(), (0, 0));
        assert!(out.data.is_empty());
    }
}
