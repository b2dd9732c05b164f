use crate::position::Position;

/// Selects positions whose notional value is strictly above `threshold`.
///
/// Zero-valued positions are never alerts, even with a negative threshold.
#[must_use]
pub fn collect_alerts(positions: &[Position], threshold: f64) -> Vec<Position> {
    positions
        .iter()
        .filter(|pos| pos.position_value != 0.0 && pos.position_value > threshold)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(coin: &str, value: f64) -> Position {
        Position {
            coin: coin.to_string(),
            size: "1".to_string(),
            position_value_raw: format!("${value}"),
            position_value: value,
            mark_price: "1".to_string(),
        }
    }

    #[test]
    fn test_value_equal_to_threshold_is_excluded() {
        let positions = vec![position("BTC", 50_000.0)];
        assert!(collect_alerts(&positions, 50_000.0).is_empty());
    }

    #[test]
    fn test_value_just_above_threshold_is_included() {
        let positions = vec![position("BTC", 50_000.01)];
        let alerts = collect_alerts(&positions, 50_000.0);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].coin, "BTC");
    }

    #[test]
    fn test_zero_value_never_alerts() {
        let positions = vec![position("DOGE", 0.0)];
        assert!(collect_alerts(&positions, -1.0).is_empty());
    }

    #[test]
    fn test_mixed_positions_keep_order() {
        let positions = vec![
            position("BTC", 120_000.0),
            position("ETH", 10_000.0),
            position("SOL", 75_000.0),
        ];

        let coins: Vec<_> = collect_alerts(&positions, 50_000.0)
            .into_iter()
            .map(|p| p.coin)
            .collect();

        assert_eq!(coins, vec!["BTC", "SOL"]);
    }
}
