//! Pixelsmooth - 4x pixel art upscaler
//!
//! This library provides functionality to:
//! - Upscale RGB images 4x while smoothing stairstep diagonals
//! - Assemble upscaled frames into animated GIFs
//! - Answer JSON image-processing requests with base64 PNG data URLs

pub mod buffer;
pub mod cli;
pub mod config;
pub mod gif;
pub mod output;
pub mod pipeline;
pub mod request;
pub mod smoothing;

pub use buffer::{Color, PixelBuffer, PixelError};
pub use pipeline::{transform, transform_with, SmoothingConfig, Stage};
