//! Pixelsmooth - Command-line tool for 4x pixel art upscaling

use std::process::ExitCode;

use pixelsmooth::cli;

fn main() -> ExitCode {
    cli::run()
}
