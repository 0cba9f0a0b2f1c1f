//! End-to-end pipeline fixtures
//!
//! Runs the public pipeline API on small hand-made images and compares the
//! result pixel for pixel against known-good output.

use image::Rgb;
use pixelsmooth::pipeline::{high_res_upscale, low_res_upscale, run_stage};
use pixelsmooth::smoothing::{EdgeMode, OverflowMode};
use pixelsmooth::{transform, transform_with, Color, PixelBuffer, SmoothingConfig, Stage};

const RED: Color = Rgb([200, 40, 40]);
const BLUE: Color = Rgb([40, 40, 200]);

/// Build a buffer from rows of 'A' (red) and 'B' (blue)
fn two_color(rows: &[&str]) -> PixelBuffer {
    let width = rows[0].len() as u32;
    let pixels = rows
        .iter()
        .flat_map(|row| row.chars())
        .map(|c| if c == 'A' { RED } else { BLUE })
        .collect();
    PixelBuffer::from_pixels(width, rows.len() as u32, pixels).unwrap()
}

/// Render a buffer back to rows of palette letters, '?' for unknown colors
fn render(buffer: &PixelBuffer, palette: &[(char, Color)]) -> Vec<String> {
    buffer
        .pixels()
        .chunks(buffer.width() as usize)
        .map(|row| {
            row.iter()
                .map(|p| palette.iter().find(|(_, c)| c == p).map_or('?', |(name, _)| *name))
                .collect()
        })
        .collect()
}

fn staircase() -> PixelBuffer {
    two_color(&["AAAA", "AAAB", "AABB", "ABBB"])
}

#[test]
fn test_low_res_staircase() {
    let purple = Rgb([120, 40, 120]);
    let palette = [('A', RED), ('B', BLUE), ('C', purple)];
    let result = low_res_upscale(&staircase(), &SmoothingConfig::default()).unwrap();

    assert_eq!(
        render(&result, &palette),
        vec![
            "AAAAAAAA", "AAAAACCA", "AAAACBBA", "AAAABBBA", "AACBBBBA", "ACBBBBBA", "ABBBBBBA",
            "AAAAAAAA",
        ]
    );
}

#[test]
fn test_high_res_staircase_golden() {
    // Blends of red and blue after the +4 brighten, from blue-most to red-most
    let palette: Vec<(char, Color)> = ('a'..='i')
        .enumerate()
        .map(|(i, name)| {
            let step = 20 * i as u8;
            (name, Rgb([44 + step, 44, 204 - step]))
        })
        .collect();

    let result = high_res_upscale(&staircase(), &SmoothingConfig::default()).unwrap();
    assert_eq!(result.dimensions(), (16, 16));
    assert_eq!(
        render(&result, &palette),
        vec![
            "iiiiiiiiiiiiiiii",
            "iiiiiiiihhhhiiii",
            "iiiiiiiifceefiii",
            "iiiiiihfedbdfiii",
            "iiiiiifgdaaaaiii",
            "iiiiigidbaaaaiii",
            "iiiigigaaaaaaiii",
            "iihfgdaaaaaaaiii",
            "iifedaaaaaaaaiii",
            "ifedbaaaaaaaaiii",
            "iedaaaaaaaaaaiii",
            "ifbaaaaaaaaaaiii",
            "ieaaaaaaaaaaeiii",
            "iiiiiiiiiiiiiiii",
            "iiiiiiiiiiiiiiii",
            "iiiiiiiiiiiiiiii",
        ]
    );
    assert_eq!(transform(&staircase()).unwrap(), result);
}

#[test]
fn test_uniform_image_only_brightens() {
    let color = Rgb([10, 120, 250]);
    let image = PixelBuffer::new(5, 3, color).unwrap();

    let clamped = transform(&image).unwrap();
    assert_eq!(clamped.dimensions(), (20, 12));
    assert!(clamped.pixels().iter().all(|p| *p == Rgb([14, 124, 254])));

    let config = SmoothingConfig { brighten_delta: 8, overflow: OverflowMode::Wrap, ..Default::default() };
    let wrapped = transform_with(&image, &config).unwrap();
    assert!(wrapped.pixels().iter().all(|p| *p == Rgb([18, 128, 2])));
}

#[test]
fn test_tiny_images_still_scale() {
    for (w, h) in [(1, 1), (2, 1), (1, 5), (2, 2)] {
        let image = PixelBuffer::new(w, h, RED).unwrap();
        let result = transform(&image).unwrap();
        assert_eq!(result.dimensions(), (w * 4, h * 4), "input {}x{}", w, h);
    }
}

#[test]
fn test_clamp_edge_leaves_fill_at_far_border() {
    let config = SmoothingConfig { edge_mode: EdgeMode::Clamp, ..Default::default() };
    let image = PixelBuffer::new(3, 3, RED).unwrap();
    let result = low_res_upscale(&image, &config).unwrap();

    assert_eq!(result.get(5, 5), Ok(Rgb([0, 0, 0])));
    assert_eq!(result.get(0, 0), Ok(RED));
}

#[test]
fn test_stages_compose_to_transform() {
    let config = SmoothingConfig::default();
    let image = staircase();

    let low = run_stage(Stage::Low, &image, &config).unwrap();
    let extra = run_stage(Stage::Extra, &low, &config).unwrap();
    assert_eq!(extra.dimensions(), (16, 16));

    let high = run_stage(Stage::High, &image, &config).unwrap();
    let brightened: Vec<Color> =
        extra.pixels().iter().map(|p| Rgb([p[0] + 4, p[1] + 4, p[2] + 4])).collect();
    assert_eq!(high.pixels(), brightened.as_slice());
}
