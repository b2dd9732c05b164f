use crate::alert::collect_alerts;
use crate::config::AlertConfig;
use crate::error::MonitorError;
use crate::position::{normalize_positions, Position};
use crate::traits::{AlertNotifier, PageFetcher};

/// Result of a completed run.
#[derive(Debug, Clone, PartialEq)]
pub enum MonitorOutcome {
    /// Nothing crossed the threshold, no email was sent.
    NoAlerts { positions: Vec<Position> },
    /// An alert email was delivered for `alerts`.
    Notified {
        positions: Vec<Position>,
        alerts: Vec<Position>,
    },
}

impl MonitorOutcome {
    #[must_use]
    pub fn alerts(&self) -> &[Position] {
        match self {
            Self::NoAlerts { .. } => &[],
            Self::Notified { alerts, .. } => alerts,
        }
    }

    #[must_use]
    pub fn positions(&self) -> &[Position] {
        match self {
            Self::NoAlerts { positions } | Self::Notified { positions, .. } => positions,
        }
    }
}

/// Single-shot fetch, normalize, filter, notify pipeline for one vault.
pub struct VaultMonitor<F, N>
where
    F: PageFetcher,
    N: AlertNotifier,
{
    config: AlertConfig,
    fetcher: F,
    notifier: N,
}

impl<F, N> VaultMonitor<F, N>
where
    F: PageFetcher,
    N: AlertNotifier,
{
    pub fn new(config: AlertConfig, fetcher: F, notifier: N) -> Self {
        Self {
            config,
            fetcher,
            notifier,
        }
    }

    /// Runs the pipeline once.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::Fetch`] if the page could not be loaded, in which
    /// case nothing else runs, or [`MonitorError::Mail`] if delivery failed.
    pub async fn run(&self) -> Result<MonitorOutcome, MonitorError> {
        tracing::info!("Starting PERP monitor");

        let rows = self.fetcher.fetch_rows().await?;
        let positions = normalize_positions(&rows);
        tracing::info!(
            rows = rows.len(),
            positions = positions.len(),
            "Normalized vault positions"
        );

        let alerts = collect_alerts(&positions, self.config.threshold);
        if alerts.is_empty() {
            tracing::info!(
                "No PERP position exceeds {}; email skipped",
                self.config.threshold_display()
            );
            return Ok(MonitorOutcome::NoAlerts { positions });
        }

        for alert in &alerts {
            tracing::info!(
                coin = %alert.coin,
                value = %alert.position_value_raw,
                "Position above threshold"
            );
        }

        self.notifier.notify(&alerts).await?;

        Ok(MonitorOutcome::Notified { positions, alerts })
    }
}
