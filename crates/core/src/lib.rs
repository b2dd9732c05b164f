//! Core of the Hyperliquid vault position monitor.
//!
//! Holds configuration, the position model, the normalize and filter
//! stages, and [`VaultMonitor`], which runs one fetch → normalize → filter →
//! notify pass over the traits implemented by the fetcher and notifier crates.

pub mod alert;
pub mod config;
pub mod config_loader;
pub mod currency;
pub mod error;
pub mod monitor;
pub mod position;
pub mod traits;

pub use alert::collect_alerts;
pub use config::{AlertConfig, AppConfig, SmtpConfig, VaultConfig, DEFAULT_VAULT_URL};
pub use config_loader::ConfigLoader;
pub use currency::parse_currency;
pub use error::{FetchError, MailError, MonitorError};
pub use monitor::{MonitorOutcome, VaultMonitor};
pub use position::{normalize_positions, Position, RawRow};
pub use traits::{AlertNotifier, PageFetcher};
