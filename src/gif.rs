//! Animated GIF assembly from upscaled frames

use crate::buffer::PixelBuffer;
use crate::config::GifConfig;
use crate::output::{load_image, OutputError};
use crate::pipeline::{transform_with, SmoothingConfig};
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Frame, Rgba, RgbaImage};
use log::{info, warn};
use rayon::prelude::*;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Render a sequence of frames as an animated GIF.
///
/// # Arguments
///
/// * `frames` - The frames to include in the animation
/// * `duration_ms` - Duration per frame in milliseconds
/// * `loop_anim` - Whether the animation should loop infinitely
/// * `path` - Output file path
///
/// # Returns
///
/// * `Ok(())` on success
/// * `Err(OutputError)` on failure
pub fn render_gif(
    frames: &[PixelBuffer],
    duration_ms: u32,
    loop_anim: bool,
    path: &Path,
) -> Result<(), OutputError> {
    if frames.is_empty() {
        return Ok(());
    }

    // Create parent directories if they don't exist
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let mut encoder = GifEncoder::new(writer);

    let repeat = if loop_anim { Repeat::Infinite } else { Repeat::Finite(0) };
    encoder.set_repeat(repeat)?;

    // GIF delays are stored in centiseconds
    let delay_cs = (duration_ms / 10).max(1);

    for buffer in frames {
        let delay = image::Delay::from_numer_denom_ms(delay_cs * 10, 1);
        let frame = Frame::from_parts(opaque_rgba(buffer), 0, 0, delay);
        encoder.encode_frame(frame)?;
    }

    Ok(())
}

/// Upscale each input image and write them as one animated GIF.
///
/// Missing inputs are skipped with a warning, as are frames whose size
/// differs from the first loaded frame. Frames are upscaled in parallel.
///
/// # Returns
///
/// * `Ok(Some(n))` with the number of frames written
/// * `Ok(None)` when no input could be used; nothing is written
pub fn upscale_gif(
    inputs: &[PathBuf],
    smoothing: &SmoothingConfig,
    gif: &GifConfig,
    path: &Path,
) -> Result<Option<usize>, OutputError> {
    let mut sources = Vec::with_capacity(inputs.len());
    for input in inputs {
        if !input.exists() {
            warn!("Image file not found: {}", input.display());
            continue;
        }
        sources.push(load_image(input)?);
    }

    let Some(first) = sources.first() else {
        warn!("No valid images found to create GIF");
        return Ok(None);
    };
    let size = first.dimensions();
    let sources: Vec<PixelBuffer> = sources
        .into_iter()
        .filter(|frame| {
            let keep = frame.dimensions() == size;
            if !keep {
                warn!(
                    "Skipping {}x{} frame, animation is {}x{}",
                    frame.width(),
                    frame.height(),
                    size.0,
                    size.1
                );
            }
            keep
        })
        .collect();

    let frames = sources
        .par_iter()
        .map(|frame| transform_with(frame, smoothing))
        .collect::<Result<Vec<_>, _>>()?;

    render_gif(&frames, gif.frame_duration_ms, gif.loop_forever, path)?;
    info!("Wrote {} frames to {}", frames.len(), path.display());
    Ok(Some(frames.len()))
}

fn opaque_rgba(buffer: &PixelBuffer) -> RgbaImage {
    let rgb = buffer.to_rgb_image();
    RgbaImage::from_fn(buffer.width(), buffer.height(), |x, y| {
        let [r, g, b] = rgb.get_pixel(x, y).0;
        Rgba([r, g, b, 255])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::save_png;
    use image::{AnimationDecoder, Rgb};
    use tempfile::tempdir;

    /// Create a simple test frame with a solid color
    fn create_test_frame(width: u32, height: u32, color: Rgb<u8>) -> PixelBuffer {
        PixelBuffer::new(width, height, color).unwrap()
    }

    fn count_frames(path: &Path) -> usize {
        let file = File::open(path).unwrap();
        let decoder = image::codecs::gif::GifDecoder::new(std::io::BufReader::new(file)).unwrap();
        decoder.into_frames().count()
    }

    #[test]
    fn test_render_gif_creates_valid_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.gif");

        let frames = vec![
            create_test_frame(2, 2, Rgb([255, 0, 0])),
            create_test_frame(2, 2, Rgb([0, 255, 0])),
        ];

        render_gif(&frames, 100, true, &path).unwrap();
        assert!(path.exists());
        assert!(image::open(&path).is_ok());
        assert_eq!(count_frames(&path), 2);
    }

    #[test]
    fn test_render_gif_loop_setting() {
        let dir = tempdir().unwrap();
        let frames = vec![
            create_test_frame(2, 2, Rgb([255, 0, 0])),
            create_test_frame(2, 2, Rgb([0, 0, 255])),
        ];

        let loop_path = dir.path().join("loop.gif");
        render_gif(&frames, 100, true, &loop_path).unwrap();

        let no_loop_path = dir.path().join("no_loop.gif");
        render_gif(&frames, 100, false, &no_loop_path).unwrap();

        assert!(image::open(&loop_path).is_ok());
        assert!(image::open(&no_loop_path).is_ok());
    }

    #[test]
    fn test_render_gif_empty_frames() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.gif");

        render_gif(&[], 100, true, &path).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_render_gif_creates_parent_dirs_and_minimum_delay() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/dirs/test.gif");

        let frames = vec![create_test_frame(2, 2, Rgb([255, 0, 0]))];
        // Below one centisecond is rounded up to one
        render_gif(&frames, 5, true, &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_upscale_gif_scales_frames_and_skips_missing() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("1.png");
        let second = dir.path().join("2.png");
        save_png(&create_test_frame(3, 2, Rgb([200, 0, 0])), &first).unwrap();
        save_png(&create_test_frame(3, 2, Rgb([0, 0, 200])), &second).unwrap();

        let inputs = vec![first, dir.path().join("missing.png"), second];
        let out = dir.path().join("anim.gif");
        let written =
            upscale_gif(&inputs, &SmoothingConfig::default(), &GifConfig::default(), &out).unwrap();

        assert_eq!(written, Some(2));
        let image = image::open(&out).unwrap();
        assert_eq!((image.width(), image.height()), (12, 8));
        assert_eq!(count_frames(&out), 2);
    }

    #[test]
    fn test_upscale_gif_skips_mismatched_frames() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("a.png");
        let second = dir.path().join("b.png");
        save_png(&create_test_frame(2, 2, Rgb([1, 2, 3])), &first).unwrap();
        save_png(&create_test_frame(4, 4, Rgb([1, 2, 3])), &second).unwrap();

        let out = dir.path().join("anim.gif");
        let written = upscale_gif(
            &[first, second],
            &SmoothingConfig::default(),
            &GifConfig::default(),
            &out,
        )
        .unwrap();
        assert_eq!(written, Some(1));
    }

    #[test]
    fn test_upscale_gif_no_inputs() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("anim.gif");
        let written = upscale_gif(
            &[dir.path().join("nope.png")],
            &SmoothingConfig::default(),
            &GifConfig::default(),
            &out,
        )
        .unwrap();

        assert_eq!(written, None);
        assert!(!out.exists());
    }
}
