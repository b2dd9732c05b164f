use crate::currency::parse_currency;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Column header holding the coin symbol.
pub const COIN_HEADER: &str = "Coin";
/// Column header holding the notional position value.
pub const POSITION_VALUE_HEADER: &str = "Position Value (USDC)";
/// Column header holding the position size.
pub const SIZE_HEADER: &str = "Size";
/// Column header holding the mark price.
pub const MARK_PRICE_HEADER: &str = "Mark Price";

/// One scraped table row, keyed by column header.
pub type RawRow = BTreeMap<String, String>;

/// A vault position with a successfully parsed notional value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub coin: String,
    pub size: String,
    pub position_value_raw: String,
    pub position_value: f64,
    pub mark_price: String,
}

fn field<'a>(row: &'a RawRow, header: &str) -> &'a str {
    row.get(header).map_or("", |v| v.trim())
}

/// Converts scraped rows into positions.
///
/// Rows without a coin or position value, or whose value does not parse, are
/// dropped. Input order is preserved.
#[must_use]
pub fn normalize_positions(rows: &[RawRow]) -> Vec<Position> {
    rows.iter()
        .filter_map(|row| {
            let coin = field(row, COIN_HEADER);
            let position_value_raw = field(row, POSITION_VALUE_HEADER);
            if coin.is_empty() || position_value_raw.is_empty() {
                return None;
            }

            let position_value = parse_currency(position_value_raw)?;

            Some(Position {
                coin: coin.to_string(),
                size: field(row, SIZE_HEADER).to_string(),
                position_value_raw: position_value_raw.to_string(),
                position_value,
                mark_price: field(row, MARK_PRICE_HEADER).to_string(),
            })
        })
        .collect()
}
