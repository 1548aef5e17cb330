//! # icon-crop
//!
//! Crop transparent padding from PNG icons across a whole directory tree.
//!
//! Icon sets exported from design tools usually sit on a generous transparent
//! canvas. Rendered at small sizes that padding makes glyphs look tiny and
//! misaligned. This crate trims each icon to its visible pixels plus a fixed
//! margin and writes the result to a mirrored output tree, keeping the
//! original PNG color mode (palette icons stay palette icons).
//!
//! ## Pipeline Overview
//!
//! ```text
//! input root
//!  │
//!  ├─ 1. Walk    recursive scan for *.png (any case), stable order
//!  ├─ 2. Decode  raw PNG: color type, bit depth, PLTE, tRNS untouched
//!  ├─ 3. Bounds  rectangle of non-zero alpha, per color mode
//!  ├─ 4. Crop    bounds + margin, clamped to the image
//!  └─ 5. Encode  same color mode, same relative path under the output root
//! ```
//!
//! Fully transparent icons are copied through unchanged; images without any
//! transparency information are treated as fully opaque and keep their size.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use icon_crop::{crop_directory, CropConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = CropConfig::builder().margin(4).build();
//!     let stats = crop_directory("icons_raw", "icons_cropped", &config)?;
//!     println!("Cropped {} PNG(s). Output: {}", stats.processed, stats.output_dir.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `icon-crop` binary (clap + anyhow + tracing-subscriber + indicatif) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod raster;
pub mod walk;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{CropConfig, CropConfigBuilder, DEFAULT_MARGIN};
pub use error::IconCropError;
pub use output::{CropOutcome, CropStats, FileReport};
pub use pipeline::bounds::{alpha_bounds, BoundingBox};
pub use progress::{CropProgressCallback, NoopProgressCallback, ProgressCallback};
pub use raster::{ColorMode, IconImage, PngMetadata};
pub use walk::{crop_directory, crop_file, is_png, list_pngs};
