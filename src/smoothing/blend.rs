//! Blending and brightness passes.

use super::{average, OverflowMode};
use crate::buffer::{Color, PixelBuffer, PixelError};
use image::Rgb;

/// Average two equally sized buffers channel by channel.
///
/// Each channel is `round((a + b) / 2)`, rounding halves away from zero.
/// The result is the same whichever buffer comes first.
pub fn overlay(a: &PixelBuffer, b: &PixelBuffer) -> Result<PixelBuffer, PixelError> {
    if a.dimensions() != b.dimensions() {
        return Err(PixelError::DimensionMismatch { left: a.dimensions(), right: b.dimensions() });
    }
    let (width, height) = a.dimensions();
    Ok(PixelBuffer::from_fn(width, height, |x, y| average(a.at(x, y), b.at(x, y))))
}

/// Add `delta` to every channel of every pixel.
pub fn brighten(src: &PixelBuffer, delta: u8, overflow: OverflowMode) -> PixelBuffer {
    let (width, height) = src.dimensions();
    PixelBuffer::from_fn(width, height, |x, y| brighten_color(src.at(x, y), delta, overflow))
}

fn brighten_color(color: Color, delta: u8, overflow: OverflowMode) -> Color {
    let add: fn(u8, u8) -> u8 = match overflow {
        OverflowMode::Clamp => u8::saturating_add,
        OverflowMode::Wrap => u8::wrapping_add,
    };
    Rgb([add(color.0[0], delta), add(color.0[1], delta), add(color.0[2], delta)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smoothing::fixtures::{checkerboard, grid, A, B, C};
    use crate::smoothing::{leftover_pixels, leftover_pixels2, smooth, upscale, EdgeMode};

    #[test]
    fn test_overlay_checkerboard_branches() {
        let src = checkerboard();
        let smoothed = leftover_pixels(&smooth(&src, 10, EdgeMode::Wrap));
        let averaged = leftover_pixels2(&upscale(&src, EdgeMode::Wrap), 20);

        let out = overlay(&smoothed, &averaged).unwrap();
        let expected = grid(&[
            "ABBAABBA", //
            "BBBAABBB",
            "BCCCCCCB",
            "AAABBAAA",
            "ACCCCCCA",
            "BBBAABBB",
            "BCCCCCCB",
            "ABBAABBA",
        ]);
        assert_eq!(out, expected);
    }

    #[test]
    fn test_overlay_commutative() {
        let a = grid(&["AB", "BA"]);
        let b = grid(&["BB", "CA"]);
        assert_eq!(overlay(&a, &b).unwrap(), overlay(&b, &a).unwrap());
        assert_eq!(overlay(&a, &b).unwrap().get(0, 0), Ok(C));
    }

    #[test]
    fn test_overlay_self_is_identity() {
        let src = checkerboard();
        assert_eq!(overlay(&src, &src).unwrap(), src);
    }

    #[test]
    fn test_overlay_mean_of_a_and_b() {
        let a = PixelBuffer::new(1, 1, A).unwrap();
        let b = PixelBuffer::new(1, 1, B).unwrap();
        assert_eq!(overlay(&a, &b).unwrap().get(0, 0), Ok(C));
    }

    #[test]
    fn test_overlay_rounds_half_up() {
        let a = PixelBuffer::new(1, 1, Rgb([0, 1, 254])).unwrap();
        let b = PixelBuffer::new(1, 1, Rgb([255, 2, 255])).unwrap();
        assert_eq!(overlay(&a, &b).unwrap().get(0, 0), Ok(Rgb([128, 2, 255])));
    }

    #[test]
    fn test_overlay_dimension_mismatch() {
        let a = PixelBuffer::new(2, 2, A).unwrap();
        let b = PixelBuffer::new(2, 3, A).unwrap();
        assert_eq!(
            overlay(&a, &b),
            Err(PixelError::DimensionMismatch { left: (2, 2), right: (2, 3) })
        );
    }

    #[test]
    fn test_brighten_adds_delta() {
        let src = PixelBuffer::new(2, 2, Rgb([10, 20, 30])).unwrap();
        let out = brighten(&src, 4, OverflowMode::Clamp);
        assert!(out.pixels().iter().all(|p| *p == Rgb([14, 24, 34])));
    }

    #[test]
    fn test_brighten_overflow_modes() {
        let src = PixelBuffer::new(1, 1, Rgb([253, 0, 255])).unwrap();
        assert_eq!(brighten(&src, 4, OverflowMode::Clamp).get(0, 0), Ok(Rgb([255, 4, 255])));
        assert_eq!(brighten(&src, 4, OverflowMode::Wrap).get(0, 0), Ok(Rgb([1, 4, 3])));
    }
}
