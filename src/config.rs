use thiserror::Error;
use url::Url;

pub const APP_NAME: &str = "docchat";

pub const API_URL_ENV: &str = "DOCCHAT_API_URL";
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;
pub const ALLOWED_EXTENSIONS: [&str; 2] = ["txt", "pdf"];

pub const DEFAULT_TITLE: &str = "New Conversation";
pub const TITLE_MAX_CHARS: usize = 30;

pub const FALLBACK_REPLY: &str = "Sorry, there was an error processing your request.";

/// Display width for file names in the pending-attachment strip.
pub const PENDING_NAME_WIDTH: usize = 25;
/// Display width for file names inside a message bubble.
pub const MESSAGE_NAME_WIDTH: usize = 40;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid API URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub api_url: Url,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = std::env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self::from_url(&raw)
    }

    pub fn from_url(raw: &str) -> Result<Self, ConfigError> {
        let api_url = Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidUrl {
            url: raw.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(api_url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl {
                url: raw.to_string(),
                reason: format!("unsupported scheme '{}'", api_url.scheme()),
            });
        }

        Ok(Self { api_url })
    }

    /// Join an endpoint name onto the base URL, e.g. `chat` -> `{api_url}/chat`.
    pub fn endpoint(&self, name: &str) -> String {
        format!(
            "{}/{}",
            self.api_url.as_str().trim_end_matches('/'),
            name.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoints() {
        let config = ApiConfig::from_url(DEFAULT_API_URL).unwrap();
        assert_eq!(config.endpoint("chat"), "http://localhost:8000/api/chat");
        assert_eq!(config.endpoint("upload"), "http://localhost:8000/api/upload");
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = ApiConfig::from_url("https://chat.example.com/v1/").unwrap();
        assert_eq!(config.endpoint("/chat"), "https://chat.example.com/v1/chat");
    }

    #[test]
    fn test_invalid_url_rejected() {
        assert!(matches!(
            ApiConfig::from_url("not a url"),
            Err(ConfigError::InvalidUrl { .. })
        ));
        assert!(ApiConfig::from_url("ftp://example.com").is_err());
    }
}
