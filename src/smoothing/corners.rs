//! Corner-detection smoothing.
//!
//! After a 2x [`upscale`], every interior source pixel owns a 2x2 block whose
//! four cells are its diagonal gaps. For each gap the pass samples the
//! L-shaped corner pointing away from the block:
//!
//! ```text
//!   gap  p1          p1 = vertical neighbor of the gap
//!   p3   p2          p2 = diagonal neighbor (corner middle)
//!                    p3 = horizontal neighbor of the gap
//! ```
//!
//! (shown for the bottom-right gap; the other three are mirrored). When the
//! mean of `p1`, `p2` and `p3` is within `tolerance` of `p2` on every channel,
//! the corner is treated as one region and the gap takes `p2`'s color.

use super::{is_interior, upscale, EdgeMode};
use crate::buffer::{Color, PixelBuffer};

/// Upscale `src` by 2x and fill diagonal gaps next to near-uniform corners.
///
/// Only gaps owned by interior source pixels (`1 <= x < width - 1`,
/// `1 <= y < height - 1`) are considered; every other pixel is the plain
/// upscale. All four gaps of a pixel are evaluated independently.
pub fn smooth(src: &PixelBuffer, tolerance: u16, edge_mode: EdgeMode) -> PixelBuffer {
    let sample = upscale(src, edge_mode);
    let (width, height) = src.dimensions();

    PixelBuffer::from_fn(sample.width(), sample.height(), |x, y| {
        let current = sample.at(x, y);
        // Scaled cells 2n - 1 and 2n belong to source pixel n.
        if !is_interior((x + 1) / 2, width) || !is_interior((y + 1) / 2, height) {
            return current;
        }

        // Even cells are the right/bottom half of their block, so their
        // corner extends right/down; odd cells extend left/up.
        let cx = if x % 2 == 0 { x + 1 } else { x - 1 };
        let cy = if y % 2 == 0 { y + 1 } else { y - 1 };

        let p1 = sample.at(x, cy);
        let p2 = sample.at(cx, cy);
        let p3 = sample.at(cx, y);
        if corner_matches(p1, p2, p3, tolerance) {
            p2
        } else {
            current
        }
    })
}

/// True when the channel-wise mean of the corner is within `tolerance` of
/// its middle point `p2`.
fn corner_matches(p1: Color, p2: Color, p3: Color, tolerance: u16) -> bool {
    let tolerance = f32::from(tolerance);
    (0..3).all(|c| {
        let mean = (p1.0[c] as f32 + p2.0[c] as f32 + p3.0[c] as f32) / 3.0;
        (mean - p2.0[c] as f32).abs() < tolerance
    })
}
