//! Per-file pipeline stages.
//!
//! Each submodule implements exactly one transformation step, so each can be
//! tested on in-memory images without touching the file system.
//!
//! ## Data Flow
//!
//! ```text
//! decode ──▶ bounds ──▶ crop ──▶ encode
//! (png)      (alpha)    (rect)   (png)
//! ```
//!
//! 1. [`decode`] — read the PNG at its native color type and bit depth
//! 2. [`bounds`] — find the rectangle of pixels with non-zero alpha, one
//!    strategy per [`crate::raster::ColorMode`]
//! 3. [`crop`]   — grow the rectangle by the margin and cut it out
//! 4. [`encode`] — write the result back in the same color mode

pub mod bounds;
pub mod crop;
pub mod decode;
pub mod encode;
