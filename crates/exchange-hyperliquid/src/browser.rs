//! Headless Chromium fetcher for the live vault dashboard.
//!
//! The dashboard is a client-rendered app, so the positions table only
//! exists after its scripts run. The fetcher launches a throwaway browser,
//! waits for the table header to render, and hands the rendered DOM to the
//! table extractor. All browser handles are owned locals, so the session is
//! torn down on every return path.

use crate::table::extract_position_rows;
use async_trait::async_trait;
use headless_chrome::{Browser, LaunchOptions};
use std::time::Duration;
use vault_watch_core::position::POSITION_VALUE_HEADER;
use vault_watch_core::{FetchError, PageFetcher, RawRow, VaultConfig};

#[derive(Debug, Clone)]
pub struct BrowserFetcher {
    url: String,
    render_timeout: Duration,
}

impl BrowserFetcher {
    /// # Errors
    /// Returns error if the configured URL is malformed.
    pub fn new(config: &VaultConfig) -> Result<Self, FetchError> {
        let url = url::Url::parse(&config.url)
            .map_err(|e| FetchError::Browser(format!("invalid vault URL {}: {e}", config.url)))?;

        Ok(Self {
            url: url.into(),
            render_timeout: Duration::from_secs(config.render_timeout_secs),
        })
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// XPath matching a header cell whose full text contains the table marker.
    ///
    /// Uses the string value of the cell, not its first text node, so labels
    /// rendered as several adjacent text nodes still match.
    fn marker_xpath() -> String {
        format!("//th[contains(normalize-space(.), '{POSITION_VALUE_HEADER}')]")
    }

    fn navigation_error(url: &str, message: impl std::fmt::Display) -> FetchError {
        let err = FetchError::Browser(format!("navigation to {url} failed: {message}"));
        tracing::error!("Failed to load the vault page: {}", err);
        err
    }

    /// Loads the page in a fresh headless session and returns the rendered HTML.
    fn render_page(url: &str, render_timeout: Duration) -> Result<String, FetchError> {
        let options = LaunchOptions::default_builder()
            .headless(true)
            .build()
            .map_err(|e| FetchError::Browser(format!("invalid launch options: {e}")))?;

        let browser = Browser::new(options)
            .map_err(|e| FetchError::Browser(format!("failed to launch Chromium: {e}")))?;
        let context = browser
            .new_context()
            .map_err(|e| FetchError::Browser(format!("failed to create browser context: {e}")))?;
        let tab = context
            .new_tab()
            .map_err(|e| FetchError::Browser(format!("failed to open tab: {e}")))?;

        tracing::info!("Opening vault page: {}", url);
        tab.navigate_to(url)
            .and_then(|tab| tab.wait_until_navigated())
            .map_err(|e| Self::navigation_error(url, e))?;

        if let Err(e) = tab.wait_for_xpath_with_custom_timeout(&Self::marker_xpath(), render_timeout)
        {
            let err = FetchError::render_timeout(
                POSITION_VALUE_HEADER,
                render_timeout.as_secs(),
                e.to_string(),
            );
            tracing::error!("Timed out waiting for the PERP table: {}", err);
            return Err(err);
        }

        tab.get_content()
            .map_err(|e| FetchError::Browser(format!("failed to read page content: {e}")))
    }
}

#[async_trait]
impl PageFetcher for BrowserFetcher {
    async fn fetch_rows(&self) -> Result<Vec<RawRow>, FetchError> {
        let url = self.url.clone();
        let render_timeout = self.render_timeout;

        let html = tokio::task::spawn_blocking(move || Self::render_page(&url, render_timeout))
            .await
            .map_err(|e| FetchError::Task(e.to_string()))??;

        Ok(extract_position_rows(&html))
    }
}
