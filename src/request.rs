//! JSON image-processing requests
//!
//! Accepts `{"image": "data:image/png;base64,..."}` (the data-URL prefix is
//! optional), runs the 4x pipeline and answers with
//! `{"success": true, "processedImage": "data:image/png;base64,..."}` or
//! `{"success": false, "error": "..."}`. Transport is up to the caller.

use crate::buffer::PixelError;
use crate::output::{decode_image, encode_png, OutputError};
use crate::pipeline::{transform_with, SmoothingConfig};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use log::{error, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Incoming request body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProcessRequest {
    /// Base64 image, optionally wrapped in a `data:image/...;base64,` URL
    #[serde(default)]
    pub image: Option<String>,
}

/// Outgoing response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processed_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProcessResponse {
    fn ok(processed_image: String) -> Self {
        Self { success: true, processed_image: Some(processed_image), error: None }
    }

    fn failed(error: &RequestError) -> Self {
        Self { success: false, processed_image: None, error: Some(error.to_string()) }
    }
}

/// Failure while handling a request.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Invalid request JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("No image data provided")]
    MissingImage,
    #[error("Malformed data URL: missing ',' after the media type")]
    MalformedDataUrl,
    #[error("Invalid base64 image data: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("{0}")]
    Output(#[from] OutputError),
    #[error("{0}")]
    Pixel(#[from] PixelError),
}

/// Handle a raw JSON request body. Never fails; errors become a
/// `success: false` response.
pub fn handle_request(body: &str, config: &SmoothingConfig) -> ProcessResponse {
    let result = serde_json::from_str::<ProcessRequest>(body)
        .map_err(RequestError::from)
        .and_then(|request| process_image(&request, config));

    match result {
        Ok(data_url) => ProcessResponse::ok(data_url),
        Err(e) => {
            error!("Error processing image: {}", e);
            ProcessResponse::failed(&e)
        }
    }
}

/// Decode the request image, upscale it and return a PNG data URL.
pub fn process_image(
    request: &ProcessRequest,
    config: &SmoothingConfig,
) -> Result<String, RequestError> {
    let image_data = match request.image.as_deref() {
        Some(data) if !data.trim().is_empty() => data.trim(),
        _ => return Err(RequestError::MissingImage),
    };

    let bytes = STANDARD.decode(strip_data_url(image_data)?)?;
    let image = decode_image(&bytes)?;
    info!("Processing image: {}x{} pixels", image.width(), image.height());

    let processed = transform_with(&image, config)?;
    info!("Processing complete: {}x{} pixels", processed.width(), processed.height());

    let png = encode_png(&processed)?;
    Ok(format!("{}{}", PNG_DATA_URL_PREFIX, STANDARD.encode(png)))
}

/// Return the base64 payload of a `data:image/...` URL, or the input as is.
fn strip_data_url(data: &str) -> Result<&str, RequestError> {
    if !data.starts_with("data:image/") {
        return Ok(data);
    }
    data.split_once(',').map(|(_, payload)| payload).ok_or(RequestError::MalformedDataUrl)
}
