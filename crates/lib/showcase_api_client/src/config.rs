//! Client configuration.

use std::time::Duration;

use log::warn;
use showcase_core::session::TokenDecoder;
use url::Url;

/// Base URL used when `SHOWCASE_API_URL` is unset.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/";

/// Request timeout used when `SHOWCASE_HTTP_TIMEOUT_SECS` is unset.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for talking to the showcase API.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// API base URL, always ending in `/`.
    pub api_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Shared secret for verifying credential signatures locally.
    pub token_secret: Option<String>,
}

impl ClientConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable                     | Default                  |
    /// |------------------------------|--------------------------|
    /// | `SHOWCASE_API_URL`           | `http://localhost:5000/` |
    /// | `SHOWCASE_HTTP_TIMEOUT_SECS` | `30`                     |
    /// | `SHOWCASE_TOKEN_SECRET`      | unset (no verification)  |
    ///
    /// An unparsable timeout falls back to the default; an unparsable URL is an error.
    pub fn from_env() -> Result<Self, url::ParseError> {
        let raw_url = std::env::var("SHOWCASE_API_URL")
            .ok()
            .filter(|v| !v.trim().is_empty());
        let api_url = parse_base_url(raw_url.as_deref().unwrap_or(DEFAULT_API_URL))?;
        let timeout_secs = match std::env::var("SHOWCASE_HTTP_TIMEOUT_SECS") {
            Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warn!("ignoring invalid SHOWCASE_HTTP_TIMEOUT_SECS '{raw}'");
                DEFAULT_TIMEOUT_SECS
            }),
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };
        Ok(Self {
            api_url,
            timeout: Duration::from_secs(timeout_secs),
            token_secret: std::env::var("SHOWCASE_TOKEN_SECRET")
                .ok()
                .filter(|s| !s.is_empty()),
        })
    }

    /// Default configuration pointed at `api_url`.
    pub fn for_url(api_url: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            api_url: parse_base_url(api_url)?,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            token_secret: None,
        })
    }

    /// Credential decoder matching this configuration.
    pub fn decoder(&self) -> TokenDecoder {
        TokenDecoder::from_secret(self.token_secret.as_deref())
    }
}

/// Parse `raw` as a base URL, adding the trailing slash `Url::join` needs.
pub fn parse_base_url(raw: &str) -> Result<Url, url::ParseError> {
    let trimmed = raw.trim();
    if trimmed.ends_with('/') {
        Url::parse(trimmed)
    } else {
        Url::parse(&format!("{trimmed}/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gets_trailing_slash() {
        let url = parse_base_url("http://api.example.org/v1").unwrap();
        assert_eq!(url.as_str(), "http://api.example.org/v1/");
        assert_eq!(
            url.join("projects/approved").unwrap().as_str(),
            "http://api.example.org/v1/projects/approved"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(ClientConfig::for_url("not a url").is_err());
    }

    #[test]
    fn default_url_parses() {
        let config = ClientConfig::for_url(DEFAULT_API_URL).unwrap();
        assert_eq!(config.api_url.as_str(), DEFAULT_API_URL);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }
}
