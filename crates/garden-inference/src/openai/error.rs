//! Mapping of failed chat calls onto the crate error.

use garden_core::Error;

use super::types::ApiErrorBody;

/// Error for a non-success HTTP status.
///
/// Credential and model problems become `Error::Config`: they persist until
/// the settings change. Everything else is an `Error::Inference`.
pub fn status_error(status: u16, body: &ApiErrorBody) -> Error {
    let detail = if body.error.message.is_empty() {
        "Unknown error"
    } else {
        body.error.message.as_str()
    };
    let message = format!("API returned {}: {}", status, detail);

    match status {
        401 | 403 => Error::Config(format!("Authentication failed: {}", message)),
        404 => Error::Config(format!("Model not found: {}", message)),
        _ if body.error.kind == "model_not_found" => {
            Error::Config(format!("Model not found: {}", message))
        }
        429 => Error::Inference(format!("Rate limit exceeded: {}", message)),
        _ => Error::Inference(message),
    }
}
