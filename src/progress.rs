//! Progress-callback trait for per-file crop events.
//!
//! Inject an [`Arc<dyn CropProgressCallback>`] via
//! [`crate::config::CropConfigBuilder::progress_callback`] to receive events
//! as the walker processes each PNG. The CLI uses this to drive its progress
//! bar; library callers can log, count, or ignore the events.
//!
//! # Example
//!
//! ```rust
//! use icon_crop::{CropConfig, CropProgressCallback, FileReport};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct TrimCounter {
//!     trimmed: AtomicUsize,
//! }
//!
//! impl CropProgressCallback for TrimCounter {
//!     fn on_file_complete(&self, _index: usize, _total: usize, report: &FileReport) {
//!         if report.was_trimmed() {
//!             self.trimmed.fetch_add(1, Ordering::SeqCst);
//!         }
//!     }
//! }
//!
//! let config = CropConfig::builder()
//!     .progress_callback(Arc::new(TrimCounter { trimmed: AtomicUsize::new(0) }))
//!     .build();
//! ```

use crate::output::FileReport;
use std::path::Path;
use std::sync::Arc;

/// Called by [`crate::crop_directory`] as it processes each file.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. Files are processed sequentially, so events arrive
/// in order, but the trait is `Send + Sync` so a callback can be shared with
/// other threads (e.g. a progress-bar ticker).
pub trait CropProgressCallback: Send + Sync {
    /// Called once after the input tree has been scanned.
    ///
    /// # Arguments
    /// * `total_files` — number of PNGs that will be processed
    fn on_run_start(&self, total_files: usize) {
        let _ = total_files;
    }

    /// Called before a file is decoded.
    ///
    /// # Arguments
    /// * `index`  — 1-indexed position in the run
    /// * `total`  — total files in the run
    /// * `source` — input path
    fn on_file_start(&self, index: usize, total: usize, source: &Path) {
        let _ = (index, total, source);
    }

    /// Called after a file has been written.
    fn on_file_complete(&self, index: usize, total: usize, report: &FileReport) {
        let _ = (index, total, report);
    }

    /// Called once after every file has been written.
    ///
    /// Not called when the run aborts on an error.
    fn on_run_complete(&self, processed: usize) {
        let _ = processed;
    }
}

/// A no-op implementation for callers that don't need progress events.
///
/// This is the default when no callback is configured.
pub struct NoopProgressCallback;

impl CropProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::CropConfig`].
pub type ProgressCallback = Arc<dyn CropProgressCallback>;
