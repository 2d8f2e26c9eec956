//! Shared reqwest plumbing for the scraper and calendar clients.

use std::time::Duration;

use tracing::debug;
use url::Url;

use crate::error::{ProviderError, ProviderResult};

/// Builds an HTTP client with the given timeout and user agent.
pub(crate) fn build_client(timeout: Duration, user_agent: &str) -> ProviderResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(user_agent)
        .build()
        .map_err(|e| {
            ProviderError::configuration(format!("failed to create HTTP client: {}", e))
                .with_source(e)
        })
}

/// Parses `value` as an absolute http(s) URL.
pub(crate) fn parse_http_url(value: &str) -> Result<Url, String> {
    let url = Url::parse(value.trim()).map_err(|e| format!("invalid URL {:?}: {}", value, e))?;
    match url.scheme() {
        "http" | "https" if url.has_host() => Ok(url),
        "http" | "https" => Err(format!("URL has no host: {}", value)),
        scheme => Err(format!("unsupported URL scheme {:?}: {}", scheme, value)),
    }
}

/// Maps a transport-level reqwest failure to a network error.
pub(crate) fn send_error(e: reqwest::Error) -> ProviderError {
    let message = if e.is_timeout() {
        "request timeout".to_string()
    } else if e.is_connect() {
        format!("connection failed: {}", e)
    } else {
        format!("request failed: {}", e)
    };
    ProviderError::network(message).with_source(e)
}

/// Returns the body of a successful response, or an error for any non-2xx status.
pub(crate) async fn read_body(response: reqwest::Response) -> ProviderResult<String> {
    let status = response.status();

    if !status.is_success() {
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let body = response.text().await.unwrap_or_default();
        debug!(status = status.as_u16(), "request returned error status");

        let mut err = ProviderError::http_status(status.as_u16(), &body);
        if let Some(secs) = retry_after {
            err = ProviderError::new(
                err.code(),
                format!("{}, retry after {} seconds", err.message(), secs),
            );
        }
        return Err(err);
    }

    response
        .text()
        .await
        .map_err(|e| ProviderError::network(format!("failed to read response: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_http_url_accepts_http_and_https() {
        assert_eq!(
            parse_http_url("https://www.googleapis.com/calendar/v3")
                .unwrap()
                .host_str(),
            Some("www.googleapis.com")
        );
        assert!(parse_http_url(" http://127.0.0.1:8000 ").is_ok());
    }

    #[test]
    fn parse_http_url_rejects_malformed() {
        assert!(parse_http_url("http://").is_err());
        assert!(parse_http_url("http:// exa mple/upcoming").is_err());
        assert!(parse_http_url("https://[::1").is_err());
        assert!(parse_http_url("ftp://host/x").is_err());
        assert!(parse_http_url("localhost:8000").is_err());
    }
}
