use anyhow::Context;
use clap::{Parser, ValueEnum};
use vault_watch_core::{AppConfig, ConfigLoader, MonitorOutcome, PageFetcher, VaultMonitor};
use vault_watch_hyperliquid::{BrowserFetcher, HttpFetcher};
use vault_watch_notifier::SmtpNotifier;

#[derive(Parser)]
#[command(name = "vault-watch")]
#[command(about = "Email an alert when a Hyperliquid vault holds an oversized PERP position", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long, default_value = vault_watch_core::config_loader::DEFAULT_CONFIG_PATH)]
    config: String,

    /// How to load the vault page
    #[arg(long, value_enum, default_value_t = PageSource::Browser)]
    source: PageSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PageSource {
    /// Render the dashboard in headless Chromium
    Browser,
    /// Plain HTTP GET, for pages that are already rendered
    Http,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = ConfigLoader::load_from(&cli.config)
        .with_context(|| format!("failed to load config from {}", cli.config))?;
    config.validate().context("invalid configuration")?;

    let outcome = match cli.source {
        PageSource::Browser => run_monitor(&config, BrowserFetcher::new(&config.vault)?).await?,
        PageSource::Http => run_monitor(&config, HttpFetcher::new(&config.vault)?).await?,
    };

    tracing::info!(
        positions = outcome.positions().len(),
        alerts = outcome.alerts().len(),
        "PERP monitor finished"
    );

    Ok(())
}

async fn run_monitor<F: PageFetcher>(config: &AppConfig, fetcher: F) -> anyhow::Result<MonitorOutcome> {
    let notifier = SmtpNotifier::new(&config.smtp, config.alert.clone(), config.vault.url.clone())?;
    let monitor = VaultMonitor::new(config.alert.clone(), fetcher, notifier);

    monitor.run().await.map_err(|e| {
        tracing::error!("PERP monitor run failed: {}", e);
        e.into()
    })
}
