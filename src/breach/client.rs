//! Range transport: the trait the checker talks to and its HTTP implementation.

use super::BreachError;
use std::future::Future;
use std::time::Duration;

/// Environment variable overriding [`BreachConfig::base_url`].
pub const RANGE_URL_ENV: &str = "PWD_ANALYZER_RANGE_URL";

pub const DEFAULT_RANGE_URL: &str = "https://api.pwnedpasswords.com";

/// Fetches the raw `SUFFIX:COUNT` body for a five-character hash prefix.
pub trait RangeClient: Send + Sync {
    fn fetch_range(&self, prefix: &str) -> impl Future<Output = Result<String, BreachError>> + Send;
}

#[derive(Debug, Clone, PartialEq)]
pub struct BreachConfig {
    pub base_url: String,
    /// Ask the service to pad responses with zero-count rows.
    pub add_padding: bool,
    pub timeout: Duration,
    /// Quiet period before a watcher issues a lookup.
    pub debounce: Duration,
}

impl Default for BreachConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_RANGE_URL.to_string(),
            add_padding: true,
            timeout: Duration::from_secs(10),
            debounce: Duration::from_millis(450),
        }
    }
}

impl BreachConfig {
    /// Defaults, with the base URL taken from `PWD_ANALYZER_RANGE_URL` when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var(RANGE_URL_ENV) {
            let url = url.trim();
            if !url.is_empty() {
                config.base_url = url.to_string();
            }
        }
        config
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }
}

#[cfg(feature = "http")]
pub use http::HttpRangeClient;

#[cfg(feature = "http")]
mod http {
    use super::{BreachConfig, RangeClient};
    use crate::breach::hasher::is_valid_prefix;
    use crate::breach::BreachError;
    use reqwest::StatusCode;

    #[derive(Debug, Clone)]
    pub struct HttpRangeClient {
        http: reqwest::Client,
        base_url: String,
        add_padding: bool,
    }

    impl HttpRangeClient {
        pub fn new(config: &BreachConfig) -> Result<Self, BreachError> {
            let http = reqwest::Client::builder().timeout(config.timeout).build()?;
            Ok(Self {
                http,
                base_url: config.base_url.trim_end_matches('/').to_string(),
                add_padding: config.add_padding,
            })
        }

        pub(crate) fn range_url(&self, prefix: &str) -> String {
            format!("{}/range/{}", self.base_url, prefix)
        }
    }

    impl RangeClient for HttpRangeClient {
        async fn fetch_range(&self, prefix: &str) -> Result<String, BreachError> {
            if !is_valid_prefix(prefix) {
                return Err(BreachError::InvalidPrefix(prefix.to_string()));
            }

            let mut request = self.http.get(self.range_url(prefix));
            if self.add_padding {
                request = request.header("Add-Padding", "true");
            }

            #[cfg(feature = "tracing")]
            tracing::debug!(prefix, "Requesting hash range");

            let response = request.send().await?;
            match response.status() {
                StatusCode::OK => Ok(response.text().await?),
                status => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(status = status.as_u16(), "Range endpoint refused request");
                    Err(BreachError::UnexpectedStatus(status.as_u16()))
                }
            }
        }
    }

}
