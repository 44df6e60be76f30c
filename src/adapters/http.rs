//! Shared HTTP plumbing for the content adapters.

use std::time::Duration;

/// Error type for remote content requests.
///
/// A non-200 status is not an error here; it is reported as a fetch outcome.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("response body is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid endpoint {url:?}: {reason}")]
    Endpoint { url: String, reason: String },
}

/// Build a blocking client with the configured timeout.
///
/// # Errors
/// Returns error if the TLS backend cannot be initialized.
pub fn build_client(timeout: Option<Duration>) -> Result<reqwest::blocking::Client, FetchError> {
    let builder = reqwest::blocking::Client::builder()
        .user_agent(concat!("heart-companion/", env!("CARGO_PKG_VERSION")));
    // reqwest's blocking client applies a 30s default; `None` here means no limit.
    let builder = builder.timeout(timeout);
    Ok(builder.build()?)
}

/// Parse an endpoint URL up front so a typo fails at startup, not per request.
///
/// # Errors
/// Returns `FetchError::Endpoint` if the URL is not absolute http(s).
pub fn parse_endpoint(url: &str) -> Result<reqwest::Url, FetchError> {
    let parsed = reqwest::Url::parse(url).map_err(|e| FetchError::Endpoint {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(FetchError::Endpoint {
            url: url.to_string(),
            reason: format!("unsupported scheme {other}"),
        }),
    }
}
