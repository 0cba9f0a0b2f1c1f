//! Nearest-neighbor 2x expansion.
//!
//! Every source pixel `(x, y)` is written to the 2x2 block that sits up and
//! to the left of its nominal position:
//!
//! ```text
//!   (2x-1, 2y-1)  (2x, 2y-1)
//!   (2x-1, 2y)    (2x, 2y)
//! ```
//!
//! Along the top and left borders the block reaches coordinate -1, which is
//! resolved by [`EdgeMode`]. The smoothing passes depend on this exact
//! alignment: a source pixel's gaps sit at its four corners in the scaled
//! image.

use super::EdgeMode;
use crate::buffer::{PixelBuffer, FILL};

/// Scale `src` by 2x in both axes.
///
/// Under [`EdgeMode::Wrap`] every output pixel is written exactly once.
/// Under [`EdgeMode::Clamp`] the last output column and row are not
/// covered by any source pixel and keep [`FILL`].
pub fn upscale(src: &PixelBuffer, edge_mode: EdgeMode) -> PixelBuffer {
    let (width, height) = src.dimensions();
    PixelBuffer::from_fn(width * 2, height * 2, |x, y| {
        match (source_index(x, width, edge_mode), source_index(y, height, edge_mode)) {
            (Some(sx), Some(sy)) => src.at(sx, sy),
            _ => FILL,
        }
    })
}

/// Map an output column (or row) back to the source index that writes it.
///
/// Source index `n` writes outputs `2n - 1` and `2n`, so output `i` belongs to
/// `(i + 1) / 2`. The last output (`2 * len - 1`) is only reachable as the
/// wrapped `-1` written by index 0.
fn source_index(i: u32, len: u32, edge_mode: EdgeMode) -> Option<u32> {
    let n = (i + 1) / 2;
    if n < len {
        return Some(n);
    }
    match edge_mode {
        EdgeMode::Wrap => Some(0),
        EdgeMode::Clamp => None,
    }
}
