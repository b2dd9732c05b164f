use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Dashboard page of the monitored vault.
pub const DEFAULT_VAULT_URL: &str =
    "https://app.hyperliquid.xyz/vaults/0xdfc24b077bc1425ad1dea75bcb6f8158e10df303";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub vault: VaultConfig,
    pub alert: AlertConfig,
    pub smtp: SmtpConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VaultConfig {
    pub url: String,
    /// Upper bound on waiting for the positions table to render.
    pub render_timeout_secs: u64,
    pub http_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    /// Positions with a notional value strictly above this are alerted.
    pub threshold: f64,
    /// Leverage tag printed after the coin in each alert line.
    pub leverage_label: String,
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub sender: String,
    pub recipient: String,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_VAULT_URL.to_string(),
            render_timeout_secs: 15,
            http_timeout_secs: 30,
        }
    }
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            threshold: 50_000.0,
            leverage_label: "20x".to_string(),
        }
    }
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: "smtp.gmail.com".to_string(),
            port: 465,
            username: String::new(),
            password: String::new(),
            sender: String::new(),
            recipient: String::new(),
        }
    }
}

impl std::fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("sender", &self.sender)
            .field("recipient", &self.recipient)
            .finish()
    }
}

impl AlertConfig {
    /// Threshold rendered the way the dashboard shows amounts, e.g. `$50,000`.
    #[must_use]
    pub fn threshold_display(&self) -> String {
        format_usd(self.threshold)
    }
}

impl AppConfig {
    /// Checks the values a run depends on before any network activity.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first invalid field.
    pub fn validate(&self) -> Result<()> {
        if !(self.vault.url.starts_with("https://") || self.vault.url.starts_with("http://")) {
            bail!("vault.url must be an http(s) URL, got {:?}", self.vault.url);
        }
        if self.vault.render_timeout_secs == 0 {
            bail!("vault.render_timeout_secs must be greater than zero");
        }
        if self.vault.http_timeout_secs == 0 {
            bail!("vault.http_timeout_secs must be greater than zero");
        }
        if !self.alert.threshold.is_finite() || self.alert.threshold <= 0.0 {
            bail!("alert.threshold must be a positive number, got {}", self.alert.threshold);
        }
        self.smtp.validate()
    }
}

impl SmtpConfig {
    /// # Errors
    ///
    /// Returns an error if any field needed to deliver mail is empty.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("smtp.host", &self.host),
            ("smtp.username", &self.username),
            ("smtp.password", &self.password),
            ("smtp.sender", &self.sender),
            ("smtp.recipient", &self.recipient),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                bail!("{name} must be set");
            }
        }
        if self.port == 0 {
            bail!("smtp.port must be non-zero");
        }
        Ok(())
    }
}

/// Formats a dollar amount with grouping commas; whole amounts drop the cents.
#[must_use]
pub fn format_usd(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if fraction == 0 {
        format!("{sign}${grouped}")
    } else {
        format!("{sign}${grouped}.{fraction:02}")
    }
}
