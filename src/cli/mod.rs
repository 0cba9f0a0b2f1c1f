//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod gif;
mod process;
mod upscale;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use glob::glob;

use crate::config::{load_config, merge_cli_overrides, CliOverrides, ConfigError, PxsConfig};
use crate::pipeline::Stage;
use crate::smoothing::{EdgeMode, OverflowMode};

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Pixelsmooth - 4x pixel art upscaler with corner smoothing
#[derive(Parser)]
#[command(name = "pxs")]
#[command(about = "Pixelsmooth - Upscale pixel art 4x while smoothing stairstep diagonals")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Upscale a single image and save it as PNG
    Upscale {
        /// Input image (any format the image crate decodes; alpha is dropped)
        input: PathBuf,

        /// Output file or directory.
        /// If omitted: {input}_smooth.png
        /// If directory (ends with /): dir/{input}_smooth.png
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pipeline stage to run (low: 2x, extra: 2x, high: 4x)
        #[arg(long, value_enum, default_value = "high")]
        stage: Stage,

        /// Path to pxs.toml (default: search upward from the current directory)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Border policy for the upscaler (wrap, clamp)
        #[arg(long, value_enum)]
        edge_mode: Option<EdgeMode>,

        /// Channel overflow policy for brightening (clamp, wrap)
        #[arg(long, value_enum)]
        overflow: Option<OverflowMode>,
    },

    /// Upscale several images and assemble them into an animated GIF
    Gif {
        /// Frame images in order; glob patterns are expanded and sorted
        #[arg(required = true)]
        inputs: Vec<String>,

        /// Output GIF path
        #[arg(short, long)]
        output: PathBuf,

        /// Frame duration in milliseconds (default: 75, or pxs.toml)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        duration: Option<u32>,

        /// Play the animation once instead of looping
        #[arg(long)]
        no_loop: bool,

        /// Path to pxs.toml (default: search upward from the current directory)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Border policy for the upscaler (wrap, clamp)
        #[arg(long, value_enum)]
        edge_mode: Option<EdgeMode>,
    },

    /// Read a JSON request from stdin and write the JSON response to stdout
    ///
    /// Request: {"image": "data:image/png;base64,..."}
    /// Response: {"success": true, "processedImage": "data:image/png;base64,..."}
    Process {
        /// Path to pxs.toml (default: search upward from the current directory)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Upscale { input, output, stage, config, edge_mode, overflow } => {
            let overrides = CliOverrides { edge_mode, overflow, ..Default::default() };
            match resolve_config(config.as_deref(), &overrides) {
                Ok(config) => upscale::run_upscale(&input, output.as_deref(), stage, &config),
                Err(code) => code,
            }
        }
        Commands::Gif { inputs, output, duration, no_loop, config, edge_mode } => {
            let overrides = CliOverrides {
                edge_mode,
                frame_duration_ms: duration,
                loop_forever: no_loop.then_some(false),
                ..Default::default()
            };
            match resolve_config(config.as_deref(), &overrides) {
                Ok(config) => gif::run_gif(&expand_inputs(&inputs), &output, &config),
                Err(code) => code,
            }
        }
        Commands::Process { config } => {
            match resolve_config(config.as_deref(), &CliOverrides::default()) {
                Ok(config) => process::run_process(&config),
                Err(code) => code,
            }
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .try_init();
}

/// Load pxs.toml and apply CLI overrides, reporting failures on stderr.
fn resolve_config(path: Option<&Path>, overrides: &CliOverrides) -> Result<PxsConfig, ExitCode> {
    match load_config(path) {
        Ok(mut config) => {
            merge_cli_overrides(&mut config, overrides);
            Ok(config)
        }
        Err(e @ ConfigError::Validation(_)) => {
            eprintln!("Error: {}", e);
            Err(ExitCode::from(EXIT_INVALID_ARGS))
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            Err(ExitCode::from(EXIT_ERROR))
        }
    }
}

/// Expand glob patterns among the inputs; plain paths pass through.
///
/// Matches of each pattern are sorted so numbered frames stay in order.
pub fn expand_inputs(inputs: &[String]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for input in inputs {
        if !input.contains(['*', '?', '[']) {
            files.push(PathBuf::from(input));
            continue;
        }
        match glob(input) {
            Ok(paths) => {
                let mut matched: Vec<PathBuf> = paths.filter_map(Result::ok).collect();
                matched.sort();
                files.extend(matched);
            }
            Err(e) => {
                log::warn!("Invalid glob pattern '{}': {}", input, e);
                files.push(PathBuf::from(input));
            }
        }
    }
    files
}
