//! Configuration for a crop run.
//!
//! All behaviour is controlled through [`CropConfig`], built via its
//! [`CropConfigBuilder`]. The builder normalises inputs instead of rejecting
//! them: a negative margin from the command line simply becomes zero.

use crate::progress::ProgressCallback;
use std::fmt;

/// Default padding kept around the visible pixels.
pub const DEFAULT_MARGIN: u32 = 4;

/// Configuration for [`crate::crop_directory`] and [`crate::crop_file`].
///
/// # Example
/// ```rust
/// use icon_crop::CropConfig;
///
/// let config = CropConfig::builder().margin(-3).build();
/// assert_eq!(config.margin, 0);
/// ```
#[derive(Clone)]
pub struct CropConfig {
    /// Extra pixels kept on every side of the visible region. Default: 4.
    ///
    /// The expanded box is clamped to the image, so a margin larger than the
    /// image leaves the frame uncropped.
    pub margin: u32,

    /// Follow symbolic links while walking the input tree. Default: false.
    pub follow_links: bool,

    /// Per-file progress events. Default: none.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            margin: DEFAULT_MARGIN,
            follow_links: false,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for CropConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CropConfig")
            .field("margin", &self.margin)
            .field("follow_links", &self.follow_links)
            .field(
                "progress_callback",
                &self
                    .progress_callback
                    .as_ref()
                    .map(|_| "<dyn CropProgressCallback>"),
            )
            .finish()
    }
}

impl CropConfig {
    /// Create a new builder for `CropConfig`.
    pub fn builder() -> CropConfigBuilder {
        CropConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`CropConfig`].
#[derive(Debug)]
pub struct CropConfigBuilder {
    config: CropConfig,
}

impl CropConfigBuilder {
    /// Negative values clamp to 0, values above `u32::MAX` to `u32::MAX`.
    pub fn margin(mut self, margin: i64) -> Self {
        self.config.margin = margin.clamp(0, u32::MAX as i64) as u32;
        self
    }

    pub fn follow_links(mut self, v: bool) -> Self {
        self.config.follow_links = v;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    pub fn build(self) -> CropConfig {
        self.config
    }
}
