//! URL and response status validation

use haul_errors::NetworkError;
use reqwest::StatusCode;
use url::Url;

/// Parse an absolute `http`/`https` URL
///
/// # Errors
///
/// Returns `InvalidUrl` for malformed input and `UnsupportedProtocol` for any
/// other scheme.
pub fn parse_url(url: &str) -> Result<Url, NetworkError> {
    let parsed = Url::parse(url).map_err(|e| NetworkError::InvalidUrl(format!("{url}: {e}")))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(NetworkError::UnsupportedProtocol {
            protocol: scheme.to_string(),
        }),
    }
}

/// Reject any response status outside `2xx`
///
/// # Errors
///
/// Returns `HttpError` carrying the status and its canonical reason.
pub fn validate_status(status: u16) -> Result<(), NetworkError> {
    let code = StatusCode::from_u16(status).map_err(|_| NetworkError::HttpError {
        status,
        message: "invalid status code".to_string(),
    })?;

    if code.is_success() {
        Ok(())
    } else {
        Err(NetworkError::HttpError {
            status,
            message: code.canonical_reason().unwrap_or("unknown").to_string(),
        })
    }
}
