use crate::error::{FetchError, MailError};
use crate::position::{Position, RawRow};
use async_trait::async_trait;

/// Source of the raw rows of the vault's positions table.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_rows(&self) -> Result<Vec<RawRow>, FetchError>;
}

/// Delivery channel for positions that crossed the alert threshold.
#[async_trait]
pub trait AlertNotifier: Send + Sync {
    async fn notify(&self, alerts: &[Position]) -> Result<(), MailError>;
}
