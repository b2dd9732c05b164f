use crate::table::extract_position_rows;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use vault_watch_core::position::POSITION_VALUE_HEADER;
use vault_watch_core::{FetchError, PageFetcher, RawRow, VaultConfig};

const USER_AGENT: &str = concat!("vault-watch/", env!("CARGO_PKG_VERSION"));

/// Fetches the vault page over plain HTTP without executing scripts.
///
/// Only useful when the page (or a saved snapshot behind a static server)
/// already contains the rendered positions table; the live dashboard needs
/// [`crate::BrowserFetcher`].
pub struct HttpFetcher {
    http_client: Client,
    url: String,
}

impl std::fmt::Debug for HttpFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpFetcher")
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

impl HttpFetcher {
    /// Creates a fetcher for `config.url` with `config.http_timeout_secs` as request timeout.
    ///
    /// # Errors
    /// Returns error if the URL is malformed or the HTTP client cannot be built.
    pub fn new(config: &VaultConfig) -> Result<Self, FetchError> {
        let url = url::Url::parse(&config.url)
            .map_err(|e| FetchError::Network(format!("invalid vault URL {}: {e}", config.url)))?;

        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FetchError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            url: url.into(),
        })
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Downloads the page body.
    ///
    /// # Errors
    /// Returns error on transport failure or a non-success status.
    pub async fn fetch_html(&self) -> Result<String, FetchError> {
        tracing::info!("Opening vault page: {}", self.url);

        let response = self
            .http_client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_rows(&self) -> Result<Vec<RawRow>, FetchError> {
        let html = self.fetch_html().await?;

        if !html.contains(POSITION_VALUE_HEADER) {
            let err = FetchError::marker_not_found(POSITION_VALUE_HEADER);
            tracing::error!(url = %self.url, "PERP table missing from page: {}", err);
            return Err(err);
        }

        Ok(extract_position_rows(&html))
    }
}
