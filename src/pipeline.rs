//! The 4x smoothing pipeline
//!
//! Each stage runs two independent branches over the same input and averages
//! them:
//!
//! ```text
//!            ┌─ smooth(corner tol) ─ leftover_pixels ──────────────┐
//!   input ───┤                                                     ├─ overlay
//!            └─ upscale ─────────── leftover_pixels2(average tol) ─┘
//! ```
//!
//! [`low_res_upscale`] and [`extra_smoothing`] each double the size;
//! [`high_res_upscale`] chains them and brightens the result.

use std::time::Instant;

use clap::ValueEnum;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::buffer::{PixelBuffer, PixelError};
use crate::smoothing::{
    brighten, leftover_pixels, leftover_pixels2, overlay, smooth, upscale, EdgeMode, OverflowMode,
};

/// Corner tolerance of the first (2x) stage.
pub const DEFAULT_LOW_CORNER_TOLERANCE: u16 = 10;
/// Pair-averaging tolerance of the first (2x) stage.
pub const DEFAULT_LOW_AVERAGE_TOLERANCE: u16 = 20;
/// Corner tolerance of the second (4x) stage.
pub const DEFAULT_EXTRA_CORNER_TOLERANCE: u16 = 40;
/// Pair-averaging tolerance of the second (4x) stage.
pub const DEFAULT_EXTRA_AVERAGE_TOLERANCE: u16 = 100;
/// Offset added to every channel of the final image.
pub const DEFAULT_BRIGHTEN_DELTA: u8 = 4;

/// Tuning knobs for the pipeline.
///
/// Loaded from the `[smoothing]` table of `pxs.toml`; missing keys take the
/// `DEFAULT_*` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingConfig {
    pub low_corner_tolerance: u16,
    pub low_average_tolerance: u16,
    pub extra_corner_tolerance: u16,
    pub extra_average_tolerance: u16,
    pub brighten_delta: u8,
    /// How the upscaler treats writes past the top/left border
    pub edge_mode: EdgeMode,
    /// How brightening treats channels that exceed 255
    pub overflow: OverflowMode,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            low_corner_tolerance: DEFAULT_LOW_CORNER_TOLERANCE,
            low_average_tolerance: DEFAULT_LOW_AVERAGE_TOLERANCE,
            extra_corner_tolerance: DEFAULT_EXTRA_CORNER_TOLERANCE,
            extra_average_tolerance: DEFAULT_EXTRA_AVERAGE_TOLERANCE,
            brighten_delta: DEFAULT_BRIGHTEN_DELTA,
            edge_mode: EdgeMode::default(),
            overflow: OverflowMode::default(),
        }
    }
}

/// A named pipeline stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// 2x with the low tolerances
    Low,
    /// 2x with the extra tolerances
    Extra,
    /// Low, then extra, then brighten (4x)
    #[default]
    High,
}

impl Stage {
    /// Output size relative to the input, per axis.
    pub fn scale_factor(&self) -> u32 {
        match self {
            Stage::Low | Stage::Extra => 2,
            Stage::High => 4,
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Low => write!(f, "low"),
            Stage::Extra => write!(f, "extra"),
            Stage::High => write!(f, "high"),
        }
    }
}

/// First 2x stage: tight corner tolerance, moderate averaging.
pub fn low_res_upscale(
    image: &PixelBuffer,
    config: &SmoothingConfig,
) -> Result<PixelBuffer, PixelError> {
    smoothing_step(
        image,
        config.low_corner_tolerance,
        config.low_average_tolerance,
        config.edge_mode,
    )
}

/// Second 2x stage, meant for an already doubled buffer.
pub fn extra_smoothing(
    image: &PixelBuffer,
    config: &SmoothingConfig,
) -> Result<PixelBuffer, PixelError> {
    smoothing_step(
        image,
        config.extra_corner_tolerance,
        config.extra_average_tolerance,
        config.edge_mode,
    )
}

/// Full 4x pipeline: [`low_res_upscale`], [`extra_smoothing`], then brighten.
pub fn high_res_upscale(
    image: &PixelBuffer,
    config: &SmoothingConfig,
) -> Result<PixelBuffer, PixelError> {
    let low = low_res_upscale(image, config)?;
    let extra = extra_smoothing(&low, config)?;
    Ok(brighten(&extra, config.brighten_delta, config.overflow))
}

/// Run a single named stage.
pub fn run_stage(
    stage: Stage,
    image: &PixelBuffer,
    config: &SmoothingConfig,
) -> Result<PixelBuffer, PixelError> {
    image.validate()?;
    match stage {
        Stage::Low => low_res_upscale(image, config),
        Stage::Extra => extra_smoothing(image, config),
        Stage::High => high_res_upscale(image, config),
    }
}

/// Upscale `image` 4x with the default tuning.
///
/// Output is `4 * width` by `4 * height`. Inputs narrower or shorter than 3
/// pixels skip the corner and patch passes and still succeed.
pub fn transform(image: &PixelBuffer) -> Result<PixelBuffer, PixelError> {
    transform_with(image, &SmoothingConfig::default())
}

/// [`transform`] with injected tuning.
pub fn transform_with(
    image: &PixelBuffer,
    config: &SmoothingConfig,
) -> Result<PixelBuffer, PixelError> {
    run_stage(Stage::High, image, config)
}

fn smoothing_step(
    image: &PixelBuffer,
    corner_tolerance: u16,
    average_tolerance: u16,
    edge_mode: EdgeMode,
) -> Result<PixelBuffer, PixelError> {
    let start = Instant::now();
    let (smoothed, averaged) = rayon::join(
        || leftover_pixels(&smooth(image, corner_tolerance, edge_mode)),
        || leftover_pixels2(&upscale(image, edge_mode), average_tolerance),
    );
    let out = overlay(&smoothed, &averaged)?;

    debug!(
        "smoothing step (corner {}, average {}): {}x{} -> {}x{}",
        corner_tolerance,
        average_tolerance,
        image.width(),
        image.height(),
        out.width(),
        out.height()
    );
    trace!("smoothing step took {:?}", start.elapsed());
    Ok(out)
}
