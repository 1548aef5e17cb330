//! Result types for per-file and per-run reporting.

use crate::pipeline::bounds::BoundingBox;
use std::path::PathBuf;

/// What happened to a single PNG.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropOutcome {
    /// Cropped to this rectangle (margin included). Opaque images report the
    /// full frame.
    Cropped(BoundingBox),
    /// No visible pixels; written back unchanged.
    FullyTransparent,
}

/// Per-file result passed to progress callbacks.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub source: PathBuf,
    pub destination: PathBuf,
    /// `(width, height)` of the input image.
    pub original_size: (u32, u32),
    /// `(width, height)` of the written image.
    pub output_size: (u32, u32),
    pub outcome: CropOutcome,
}

impl FileReport {
    /// True when the output is smaller than the input in either dimension.
    pub fn was_trimmed(&self) -> bool {
        self.output_size != self.original_size
    }
}

/// Summary of a [`crate::crop_directory`] run.
#[derive(Debug, Clone, Default)]
pub struct CropStats {
    /// PNGs read and written.
    pub processed: usize,
    /// Files whose output is smaller than the input.
    pub trimmed: usize,
    /// Fully transparent files copied through unchanged.
    pub fully_transparent: usize,
    /// Wall-clock time for the whole run.
    pub duration_ms: u64,
    /// Absolute output root the files were written under.
    pub output_dir: PathBuf,
}

impl CropStats {
    pub(crate) fn record(&mut self, report: &FileReport) {
        self.processed += 1;
        if report.was_trimmed() {
            self.trimmed += 1;
        }
        if report.outcome == CropOutcome::FullyTransparent {
            self.fully_transparent += 1;
        }
    }
}
