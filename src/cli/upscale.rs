//! Upscale command implementation

use std::path::Path;
use std::process::ExitCode;

use log::debug;

use crate::config::PxsConfig;
use crate::output::{generate_output_path, load_image, save_png};
use crate::pipeline::{run_stage, Stage};

use super::{EXIT_ERROR, EXIT_SUCCESS};

/// Execute the upscale command
pub fn run_upscale(
    input: &Path,
    output: Option<&Path>,
    stage: Stage,
    config: &PxsConfig,
) -> ExitCode {
    let image = match load_image(input) {
        Ok(image) => image,
        Err(e) => {
            eprintln!("Error: Cannot open '{}': {}", input.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
    };
    debug!("Loaded {} ({}x{})", input.display(), image.width(), image.height());

    let upscaled = match run_stage(stage, &image, &config.smoothing) {
        Ok(upscaled) => upscaled,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let suffix = match stage {
        Stage::High => "smooth".to_string(),
        other => format!("smooth_{}", other),
    };
    let output_path = generate_output_path(input, output, &suffix);
    if let Err(e) = save_png(&upscaled, &output_path) {
        eprintln!("Error: Failed to save '{}': {}", output_path.display(), e);
        return ExitCode::from(EXIT_ERROR);
    }

    println!(
        "Saved: {} ({}x{} -> {}x{})",
        output_path.display(),
        image.width(),
        image.height(),
        upscaled.width(),
        upscaled.height()
    );
    ExitCode::from(EXIT_SUCCESS)
}
