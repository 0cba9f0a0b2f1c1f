//! RGB pixel buffer shared by every smoothing pass
//!
//! A [`PixelBuffer`] is a row-major grid of 8-bit RGB pixels. Passes never
//! mutate a buffer they read from: they borrow their input and return a
//! freshly allocated buffer.

use image::{Rgb, RgbImage};
use rayon::prelude::*;
use thiserror::Error;

/// A single 8-bit RGB pixel.
pub type Color = Rgb<u8>;

/// Value of every pixel that no pass has written yet.
pub const FILL: Color = Rgb([0, 0, 0]);

/// Errors raised by buffer construction, pixel access and blending.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PixelError {
    /// Malformed dimensions or pixel data
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// Coordinates outside the buffer
    #[error("Pixel ({x}, {y}) is out of bounds for a {width}x{height} buffer")]
    OutOfBounds { x: u32, y: u32, width: u32, height: u32 },
    /// Two operands that must share dimensions do not
    #[error("Buffer dimensions differ: {}x{} vs {}x{}", .left.0, .left.1, .right.0, .right.1)]
    DimensionMismatch { left: (u32, u32), right: (u32, u32) },
}

/// Rectangular grid of RGB pixels stored row-major.
///
/// Invariant: `width > 0`, `height > 0` and `pixels.len() == width * height`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl PixelBuffer {
    /// Create a buffer with every pixel set to `fill`.
    pub fn new(width: u32, height: u32, fill: Color) -> Result<Self, PixelError> {
        let len = pixel_count(width, height)?;
        Ok(Self { width, height, pixels: vec![fill; len] })
    }

    /// Create a buffer from row-major pixel data.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Color>) -> Result<Self, PixelError> {
        let len = pixel_count(width, height)?;
        if pixels.len() != len {
            return Err(PixelError::InvalidArgument(format!(
                "expected {} pixels for a {}x{} buffer, got {}",
                len,
                width,
                height,
                pixels.len()
            )));
        }
        Ok(Self { width, height, pixels })
    }

    /// Build a buffer by evaluating `pixel` at every coordinate.
    ///
    /// Rows are computed in parallel, so `pixel` must only read from
    /// buffers it borrows. Dimensions come from an existing valid buffer.
    pub(crate) fn from_fn<F>(width: u32, height: u32, pixel: F) -> Self
    where
        F: Fn(u32, u32) -> Color + Sync,
    {
        let mut pixels = vec![FILL; width as usize * height as usize];
        pixels.par_chunks_mut(width as usize).enumerate().for_each(|(y, row)| {
            for (x, px) in row.iter_mut().enumerate() {
                *px = pixel(x as u32, y as u32);
            }
        });
        Self { width, height, pixels }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Row-major pixel data.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Read the pixel at `(x, y)`.
    pub fn get(&self, x: u32, y: u32) -> Result<Color, PixelError> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Overwrite the pixel at `(x, y)`.
    pub fn set(&mut self, x: u32, y: u32, color: Color) -> Result<(), PixelError> {
        let i = self.index(x, y)?;
        self.pixels[i] = color;
        Ok(())
    }

    /// Re-check the buffer invariants.
    pub fn validate(&self) -> Result<(), PixelError> {
        let len = pixel_count(self.width, self.height)?;
        if self.pixels.len() != len {
            return Err(PixelError::InvalidArgument(format!(
                "pixel data holds {} entries, {}x{} needs {}",
                self.pixels.len(),
                self.width,
                self.height,
                len
            )));
        }
        Ok(())
    }

    /// Convert into an `image` crate RGB image.
    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width, self.height, |x, y| self.at(x, y))
    }

    /// Unchecked-by-contract read used inside passes, where coordinates
    /// are derived from the buffer's own dimensions.
    #[inline]
    pub(crate) fn at(&self, x: u32, y: u32) -> Color {
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    fn index(&self, x: u32, y: u32) -> Result<usize, PixelError> {
        if x >= self.width || y >= self.height {
            return Err(PixelError::OutOfBounds { x, y, width: self.width, height: self.height });
        }
        Ok(y as usize * self.width as usize + x as usize)
    }
}

impl TryFrom<&RgbImage> for PixelBuffer {
    type Error = PixelError;

    fn try_from(image: &RgbImage) -> Result<Self, Self::Error> {
        let (width, height) = image.dimensions();
        Self::from_pixels(width, height, image.pixels().copied().collect())
    }
}

fn pixel_count(width: u32, height: u32) -> Result<usize, PixelError> {
    if width == 0 || height == 0 {
        return Err(PixelError::InvalidArgument(format!(
            "dimensions must be positive, got {}x{}",
            width, height
        )));
    }
    (width as usize).checked_mul(height as usize).ok_or_else(|| {
        PixelError::InvalidArgument(format!("{}x{} buffer is too large", width, height))
    })
}
