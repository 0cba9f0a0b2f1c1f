//! Process command implementation: JSON request on stdin, response on stdout

use std::io::Read;
use std::process::ExitCode;

use crate::config::PxsConfig;
use crate::request::handle_request;

use super::{EXIT_ERROR, EXIT_SUCCESS};

/// Execute the process command
pub fn run_process(config: &PxsConfig) -> ExitCode {
    let mut body = String::new();
    if let Err(e) = std::io::stdin().read_to_string(&mut body) {
        eprintln!("Error: Failed to read stdin: {}", e);
        return ExitCode::from(EXIT_ERROR);
    }

    let response = handle_request(&body, &config.smoothing);
    match serde_json::to_string(&response) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error: Failed to serialize response: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    }

    if response.success {
        ExitCode::from(EXIT_SUCCESS)
    } else {
        ExitCode::from(EXIT_ERROR)
    }
}
