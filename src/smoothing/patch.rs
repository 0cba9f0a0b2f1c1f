//! Diagonal gap patching on an already upscaled buffer.
//!
//! Both passes look at the 4-neighborhood of every interior pixel and fill
//! it from a pair of orthogonal neighbors:
//!
//! | order | pair         | guard (exact variant only) |
//! |-------|--------------|----------------------------|
//! | 1     | right, down  | down-right differs         |
//! | 2     | left, up     | up-left differs            |
//! | 3     | left, down   | down-left differs          |
//! | 4     | right, up    | up-right differs           |
//!
//! [`leftover_pixels`] stops at the first exact match. [`leftover_pixels2`]
//! runs all four tests and the last passing one decides the color. The two
//! rules are intentionally different and must not be merged.

use super::{average, is_interior};
use crate::buffer::{Color, PixelBuffer};

/// The eight neighbors of an interior pixel.
#[derive(Debug, Clone, Copy)]
struct Neighborhood {
    center: Color,
    left: Color,
    right: Color,
    up: Color,
    down: Color,
    up_left: Color,
    up_right: Color,
    down_left: Color,
    down_right: Color,
}

impl Neighborhood {
    /// Caller guarantees `(x, y)` is interior.
    fn around(src: &PixelBuffer, x: u32, y: u32) -> Self {
        Self {
            center: src.at(x, y),
            left: src.at(x - 1, y),
            right: src.at(x + 1, y),
            up: src.at(x, y - 1),
            down: src.at(x, y + 1),
            up_left: src.at(x - 1, y - 1),
            up_right: src.at(x + 1, y - 1),
            down_left: src.at(x - 1, y + 1),
            down_right: src.at(x + 1, y + 1),
        }
    }

    /// Neighbor pairs in evaluation order.
    fn pairs(&self) -> [(Color, Color); 4] {
        [
            (self.right, self.down),
            (self.left, self.up),
            (self.left, self.down),
            (self.right, self.up),
        ]
    }
}

/// Exact-match gap patching.
///
/// A pixel takes the color of the first neighbor pair (in table order) whose
/// members are identical while the diagonal between them differs. Pixels
/// with no matching pair, and all border pixels, are copied unchanged.
pub fn leftover_pixels(src: &PixelBuffer) -> PixelBuffer {
    patch_interior(src, |n| exact_fill(&n))
}

/// Tolerance-based gap patching.
///
/// Every neighbor pair whose channels all differ by less than `tolerance`
/// writes its rounded mean; later pairs overwrite earlier ones. Pixels with
/// no passing pair, and all border pixels, are copied unchanged.
pub fn leftover_pixels2(src: &PixelBuffer, tolerance: u16) -> PixelBuffer {
    patch_interior(src, |n| averaged_fill(&n, tolerance))
}

fn patch_interior<F>(src: &PixelBuffer, fill: F) -> PixelBuffer
where
    F: Fn(Neighborhood) -> Option<Color> + Sync,
{
    let (width, height) = src.dimensions();
    PixelBuffer::from_fn(width, height, |x, y| {
        if !is_interior(x, width) || !is_interior(y, height) {
            return src.at(x, y);
        }
        let n = Neighborhood::around(src, x, y);
        fill(n).unwrap_or(n.center)
    })
}

fn exact_fill(n: &Neighborhood) -> Option<Color> {
    if n.right == n.down && n.down != n.down_right {
        Some(n.right)
    } else if n.left == n.up && n.up != n.up_left {
        Some(n.left)
    } else if n.left == n.down && n.down != n.down_left {
        Some(n.left)
    } else if n.right == n.up && n.up != n.up_right {
        Some(n.right)
    } else {
        None
    }
}

fn averaged_fill(n: &Neighborhood, tolerance: u16) -> Option<Color> {
    let mut fill = None;
    for (p, q) in n.pairs() {
        if within_tolerance(p, q, tolerance) {
            fill = Some(average(p, q));
        }
    }
    fill
}

fn within_tolerance(p: Color, q: Color, tolerance: u16) -> bool {
    (0..3).all(|c| u16::from(p.0[c].abs_diff(q.0[c])) < tolerance)
}
