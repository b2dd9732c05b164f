//! Error types for the vault monitor pipeline.
//!
//! Fetching and mail delivery each have their own error type so callers can
//! tell which stage aborted a run.

use thiserror::Error;

/// Errors raised while loading the vault page or extracting its positions table.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The positions table never rendered within the wait bound.
    #[error("timed out after {timeout_secs}s waiting for {marker:?}: {message}")]
    RenderTimeout {
        /// Text that identifies the rendered table.
        marker: String,
        /// Wait bound in seconds.
        timeout_secs: u64,
        /// Underlying driver message.
        message: String,
    },

    /// Headless browser failed to launch or navigate.
    #[error("browser error: {0}")]
    Browser(String),

    /// Page request returned a non-success status.
    #[error("HTTP {status} fetching {url}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Requested URL.
        url: String,
    },

    /// Transport-level request failure.
    #[error("network error: {0}")]
    Network(String),

    /// Page loaded but does not contain the positions table marker.
    #[error("page does not contain {marker:?}")]
    MarkerNotFound {
        /// Text that identifies the rendered table.
        marker: String,
    },

    /// Background fetch task failed to complete.
    #[error("fetch task failed: {0}")]
    Task(String),
}

impl FetchError {
    /// Creates a render timeout error.
    pub fn render_timeout(
        marker: impl Into<String>,
        timeout_secs: u64,
        message: impl Into<String>,
    ) -> Self {
        Self::RenderTimeout {
            marker: marker.into(),
            timeout_secs,
            message: message.into(),
        }
    }

    /// Creates a marker-not-found error.
    pub fn marker_not_found(marker: impl Into<String>) -> Self {
        Self::MarkerNotFound {
            marker: marker.into(),
        }
    }

    /// Returns true if the table did not appear in time.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::RenderTimeout { .. })
    }
}

/// Errors raised while building or delivering the alert email.
#[derive(Debug, Error)]
pub enum MailError {
    /// Sender or recipient address is malformed.
    #[error("invalid address: {0}")]
    Address(String),

    /// Message could not be assembled.
    #[error("message build error: {0}")]
    Message(String),

    /// SMTP connection, authentication, or delivery failed.
    #[error("SMTP transport error: {0}")]
    Transport(String),
}

/// A failed monitor run.
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("alert delivery failed: {0}")]
    Mail(#[from] MailError),
}
