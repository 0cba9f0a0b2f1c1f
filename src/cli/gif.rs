//! GIF command implementation

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::PxsConfig;
use crate::gif::upscale_gif;

use super::{EXIT_ERROR, EXIT_SUCCESS};

/// Execute the gif command
pub fn run_gif(inputs: &[PathBuf], output: &Path, config: &PxsConfig) -> ExitCode {
    match upscale_gif(inputs, &config.smoothing, &config.gif, output) {
        Ok(Some(frames)) => {
            println!("Saved: {} ({} frames)", output.display(), frames);
            ExitCode::from(EXIT_SUCCESS)
        }
        Ok(None) => {
            eprintln!("Error: No valid images found to create GIF");
            ExitCode::from(EXIT_ERROR)
        }
        Err(e) => {
            eprintln!("Error: Failed to create '{}': {}", output.display(), e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
