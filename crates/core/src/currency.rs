//! Parsing of display-formatted dashboard amounts such as `"$12,345.67 USDC"`.

/// Parses a dashboard currency string into a number.
///
/// Grouping commas, the `$` symbol and the `USDC` unit are stripped before
/// parsing. Returns `None` for empty input or anything that is not a finite
/// number once cleaned.
#[must_use]
pub fn parse_currency(value: &str) -> Option<f64> {
    if value.is_empty() {
        return None;
    }

    let cleaned = value.replace([',', '$'], "").replace("USDC", "");
    let cleaned = cleaned.trim();

    match cleaned.parse::<f64>() {
        Ok(parsed) if parsed.is_finite() => Some(parsed),
        _ => {
            tracing::debug!(input = value, "Unparseable currency string");
            None
        }
    }
}
