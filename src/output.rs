//! Image decoding, PNG output and file path generation

use crate::buffer::{PixelBuffer, PixelError};
use image::{DynamicImage, ImageOutputFormat};
use std::io::{self, Cursor};
use std::path::{Path, PathBuf};

/// Error type for image input/output operations
#[derive(Debug)]
pub enum OutputError {
    /// IO error during file operations
    Io(io::Error),
    /// Image decoding or encoding error
    Image(image::ImageError),
    /// Decoded image cannot form a pixel buffer, or the pipeline rejected it
    Pixel(PixelError),
}

impl std::fmt::Display for OutputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputError::Io(e) => write!(f, "IO error: {}", e),
            OutputError::Image(e) => write!(f, "Image error: {}", e),
            OutputError::Pixel(e) => write!(f, "Pixel error: {}", e),
        }
    }
}

impl std::error::Error for OutputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OutputError::Io(e) => Some(e),
            OutputError::Image(e) => Some(e),
            OutputError::Pixel(e) => Some(e),
        }
    }
}

impl From<io::Error> for OutputError {
    fn from(e: io::Error) -> Self {
        OutputError::Io(e)
    }
}

impl From<image::ImageError> for OutputError {
    fn from(e: image::ImageError) -> Self {
        OutputError::Image(e)
    }
}

impl From<PixelError> for OutputError {
    fn from(e: PixelError) -> Self {
        OutputError::Pixel(e)
    }
}

/// Open an image file in any supported format as an RGB buffer.
///
/// Alpha is discarded; transparent pixels keep their stored color.
pub fn load_image(path: &Path) -> Result<PixelBuffer, OutputError> {
    let image = image::open(path)?;
    to_buffer(image)
}

/// Decode in-memory image bytes as an RGB buffer.
pub fn decode_image(bytes: &[u8]) -> Result<PixelBuffer, OutputError> {
    let image = image::load_from_memory(bytes)?;
    to_buffer(image)
}

fn to_buffer(image: DynamicImage) -> Result<PixelBuffer, OutputError> {
    let rgb = image.to_rgb8();
    Ok(PixelBuffer::try_from(&rgb)?)
}

/// Encode a buffer as PNG bytes.
pub fn encode_png(buffer: &PixelBuffer) -> Result<Vec<u8>, OutputError> {
    let mut bytes = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(buffer.to_rgb_image()).write_to(&mut bytes, ImageOutputFormat::Png)?;
    Ok(bytes.into_inner())
}

/// Save a buffer to a PNG file.
///
/// # Arguments
///
/// * `buffer` - The image to save
/// * `path` - The output file path
///
/// # Returns
///
/// * `Ok(())` on success
/// * `Err(OutputError)` on failure
pub fn save_png(buffer: &PixelBuffer, path: &Path) -> Result<(), OutputError> {
    // Create parent directories if they don't exist
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    buffer.to_rgb_image().save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}

/// Generate the output path for an upscaled image.
///
/// | Scenario | Output |
/// |----------|--------|
/// | No `-o` | `{input_stem}_{suffix}.png` next to the input |
/// | `-o out.png` | `out.png` |
/// | `-o dir/` (or existing directory) | `dir/{input_stem}_{suffix}.png` |
pub fn generate_output_path(input: &Path, output_arg: Option<&Path>, suffix: &str) -> PathBuf {
    let input_stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("output");
    let file_name = format!("{}_{}.png", input_stem, suffix);

    match output_arg {
        Some(output) => {
            let is_dir = output.as_os_str().to_string_lossy().ends_with('/') || output.is_dir();
            if is_dir {
                output.join(file_name)
            } else {
                output.to_path_buf()
            }
        }
        None => {
            let parent = input.parent().unwrap_or(Path::new(""));
            if parent.as_os_str().is_empty() {
                PathBuf::from(file_name)
            } else {
                parent.join(file_name)
            }
        }
    }
}
