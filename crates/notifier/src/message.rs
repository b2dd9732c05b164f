use vault_watch_core::{AlertConfig, Position};

/// Plain-text alert email contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertMessage {
    pub subject: String,
    pub body: String,
}

impl AlertMessage {
    /// Builds the alert for `alerts`, in the order given.
    ///
    /// The body is the banner, a blank line, one line per alert, a blank
    /// line, and the vault link.
    #[must_use]
    pub fn build(alerts: &[Position], config: &AlertConfig, vault_url: &str) -> Self {
        let banner = Self::banner(config);

        let mut lines = Vec::with_capacity(alerts.len() + 4);
        lines.push(banner.clone());
        lines.push(String::new());
        lines.extend(
            alerts
                .iter()
                .map(|alert| Self::alert_line(alert, &config.leverage_label)),
        );
        lines.push(String::new());
        lines.push(format!("Vault: {vault_url}"));

        Self {
            subject: banner,
            body: lines.join("\n"),
        }
    }

    #[must_use]
    pub fn banner(config: &AlertConfig) -> String {
        format!("🚨 PERP Position Exceeds {} 🚨", config.threshold_display())
    }

    /// `BTC 20x | Value: $60,000 | Size: 1 | Mark: 60000`
    #[must_use]
    pub fn alert_line(alert: &Position, leverage_label: &str) -> String {
        format!(
            "{} {} | Value: {} | Size: {} | Mark: {}",
            alert.coin, leverage_label, alert.position_value_raw, alert.size, alert.mark_price
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VAULT: &str = "https://app.hyperliquid.xyz/vaults/0xabc";

    fn btc() -> Position {
        Position {
            coin: "BTC".to_string(),
            size: "1".to_string(),
            position_value_raw: "$60,000".to_string(),
            position_value: 60_000.0,
            mark_price: "60000".to_string(),
        }
    }

    #[test]
    fn test_alert_line_format() {
        assert_eq!(
            AlertMessage::alert_line(&btc(), "20x"),
            "BTC 20x | Value: $60,000 | Size: 1 | Mark: 60000"
        );
    }

    #[test]
    fn test_body_layout() {
        let eth = Position {
            coin: "ETH".to_string(),
            size: "30".to_string(),
            position_value_raw: "$96,000.00 USDC".to_string(),
            position_value: 96_000.0,
            mark_price: "3,200".to_string(),
        };

        let message = AlertMessage::build(&[btc(), eth], &AlertConfig::default(), VAULT);

        let expected = [
            "🚨 PERP Position Exceeds $50,000 🚨",
            "",
            "BTC 20x | Value: $60,000 | Size: 1 | Mark: 60000",
            "ETH 20x | Value: $96,000.00 USDC | Size: 30 | Mark: 3,200",
            "",
            "Vault: https://app.hyperliquid.xyz/vaults/0xabc",
        ]
        .join("\n");
        assert_eq!(message.body, expected);
        assert_eq!(message.subject, "🚨 PERP Position Exceeds $50,000 🚨");
    }

    #[test]
    fn test_configured_label_and_threshold() {
        let config = AlertConfig {
            threshold: 250_000.0,
            leverage_label: "10x".to_string(),
        };

        let message = AlertMessage::build(&[btc()], &config, VAULT);

        assert!(message.subject.contains("$250,000"));
        assert!(message.body.contains("BTC 10x | Value: $60,000"));
    }
}
