//! Buffer-to-buffer smoothing passes
//!
//! Each pass borrows its input and returns a new [`PixelBuffer`]:
//!
//! - [`upscale`] - nearest-neighbor 2x expansion with a shifted 2x2 write pattern
//! - [`corners`] - fills diagonal gaps next to near-uniform L-shaped corners
//! - [`patch`] - exact-match and tolerance-based gap patching
//! - [`blend`] - per-channel averaging of two buffers and brightness offset
//!
//! [`PixelBuffer`]: crate::buffer::PixelBuffer

pub mod blend;
pub mod corners;
pub mod patch;
pub mod upscale;

pub use blend::{brighten, overlay};
pub use corners::smooth;
pub use patch::{leftover_pixels, leftover_pixels2};
pub use upscale::upscale;

use crate::buffer::Color;
use clap::ValueEnum;
use image::Rgb;
use serde::{Deserialize, Serialize};

/// How the upscaler resolves writes that land left of column 0 or above row 0.
///
/// Source pixel `(x, y)` writes to `(2x-1, 2y-1)` among others, which is
/// negative along the top and left borders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EdgeMode {
    /// Negative coordinates wrap to the last column/row (default)
    #[default]
    Wrap,
    /// Negative coordinates clamp to 0; the last column and row keep the fill color
    Clamp,
}

impl std::fmt::Display for EdgeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EdgeMode::Wrap => write!(f, "wrap"),
            EdgeMode::Clamp => write!(f, "clamp"),
        }
    }
}

/// What happens when brightening pushes a channel past 255.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OverflowMode {
    /// Saturate at 255 (default)
    #[default]
    Clamp,
    /// Wrap modulo 256
    Wrap,
}

impl std::fmt::Display for OverflowMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OverflowMode::Clamp => write!(f, "clamp"),
            OverflowMode::Wrap => write!(f, "wrap"),
        }
    }
}

/// True when `i` is neither the first nor the last index of `len`.
#[inline]
pub(crate) fn is_interior(i: u32, len: u32) -> bool {
    i >= 1 && i + 1 < len
}

/// Per-channel mean of two colors, rounded half away from zero.
#[inline]
pub(crate) fn average(a: Color, b: Color) -> Color {
    Rgb([
        average_channel(a.0[0], b.0[0]),
        average_channel(a.0[1], b.0[1]),
        average_channel(a.0[2], b.0[2]),
    ])
}

#[inline]
fn average_channel(a: u8, b: u8) -> u8 {
    ((a as f32 + b as f32) / 2.0).round() as u8
}
