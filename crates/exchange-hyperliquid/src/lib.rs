//! Hyperliquid vault dashboard access.
//!
//! Two [`PageFetcher`](vault_watch_core::PageFetcher) implementations share
//! one HTML table extractor:
//! - [`BrowserFetcher`] renders the live dashboard in headless Chromium
//! - [`HttpFetcher`] downloads a page that is already rendered server-side

pub mod browser;
pub mod client;
pub mod table;

pub use browser::BrowserFetcher;
pub use client::HttpFetcher;
pub use table::extract_position_rows;
