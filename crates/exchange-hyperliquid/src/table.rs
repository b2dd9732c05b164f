//! Extraction of the PERP positions table from rendered dashboard HTML.
//!
//! The dashboard renders several tables; the positions table is the first
//! one whose header row carries both the `Coin` and `Position Value (USDC)`
//! columns. Each data row becomes a [`RawRow`] keyed by header text.

use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use vault_watch_core::position::{COIN_HEADER, POSITION_VALUE_HEADER};
use vault_watch_core::RawRow;

static TABLE: LazyLock<Selector> = LazyLock::new(|| parse_selector("table"));
static HEADER_CELL: LazyLock<Selector> = LazyLock::new(|| parse_selector("th"));
static BODY_ROW: LazyLock<Selector> = LazyLock::new(|| parse_selector("tbody tr"));
static ANY_ROW: LazyLock<Selector> = LazyLock::new(|| parse_selector("tr"));
static DATA_CELL: LazyLock<Selector> = LazyLock::new(|| parse_selector("td"));

fn parse_selector(css: &'static str) -> Selector {
    Selector::parse(css).expect("static CSS selector is valid")
}

fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn is_positions_table(headers: &[String]) -> bool {
    headers.iter().any(|h| h == POSITION_VALUE_HEADER) && headers.iter().any(|h| h == COIN_HEADER)
}

/// Returns the rows of the first positions table in `html`, or an empty list
/// if the page has no such table.
///
/// Rows come from the table body; when the table has no body rows, every row
/// after the first is treated as data. Rows without any `<td>` cells (header
/// rows) are skipped, and cells missing from short rows map to `""`.
#[must_use]
pub fn extract_position_rows(html: &str) -> Vec<RawRow> {
    let document = Html::parse_document(html);

    for table in document.select(&TABLE) {
        let headers: Vec<String> = table.select(&HEADER_CELL).map(text_of).collect();
        if headers.is_empty() || !is_positions_table(&headers) {
            continue;
        }

        let mut rows: Vec<ElementRef<'_>> = table.select(&BODY_ROW).collect();
        if rows.is_empty() {
            rows = table.select(&ANY_ROW).skip(1).collect();
        }

        let records: Vec<RawRow> = rows
            .into_iter()
            .filter_map(|row| {
                let cells: Vec<String> = row.select(&DATA_CELL).map(text_of).collect();
                if cells.is_empty() {
                    return None;
                }
                Some(
                    headers
                        .iter()
                        .enumerate()
                        .map(|(idx, header)| {
                            (header.clone(), cells.get(idx).cloned().unwrap_or_default())
                        })
                        .collect(),
                )
            })
            .collect();

        tracing::info!("Extracted {} PERP rows", records.len());
        return records;
    }

    tracing::info!("No PERP positions table found on page");
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    const POSITIONS_PAGE: &str = r#"
        <html><body>
          <table>
            <thead><tr><th>Asset</th><th>Balance</th></tr></thead>
            <tbody><tr><td>USDC</td><td>1,000,000</td></tr></tbody>
          </table>
          <table>
            <thead>
              <tr>
                <th>Coin</th><th>Size</th><th>Position Value (USDC)</th><th>Mark Price</th>
              </tr>
            </thead>
            <tbody>
              <tr>
                <td> BTC </td><td>1.5 BTC</td><td>$97,500.00 USDC</td><td>65,000</td>
              </tr>
              <tr>
                <td><span>ETH</span></td><td>10 ETH</td><td><div>$32,000</div></td><td>3,200</td>
              </tr>
            </tbody>
          </table>
        </body></html>
    "#;

    #[test]
    fn test_selects_table_with_position_headers() {
        let rows = extract_position_rows(POSITIONS_PAGE);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["Coin"], "BTC");
        assert_eq!(rows[0]["Position Value (USDC)"], "$97,500.00 USDC");
        assert_eq!(rows[0]["Size"], "1.5 BTC");
        assert_eq!(rows[0]["Mark Price"], "65,000");
        assert_eq!(rows[1]["Coin"], "ETH");
        assert_eq!(rows[1]["Position Value (USDC)"], "$32,000");
    }

    #[test]
    fn test_page_without_positions_table_is_empty() {
        let html = "<table><tr><th>Asset</th></tr><tr><td>USDC</td></tr></table>";
        assert!(extract_position_rows(html).is_empty());
    }

    #[test]
    fn test_table_without_headers_is_skipped() {
        let html = r#"
            <table><tr><td>Coin</td><td>Position Value (USDC)</td></tr></table>
            <table>
              <tr><th>Coin</th><th>Position Value (USDC)</th></tr>
              <tr><td>SOL</td><td>$60,000</td></tr>
            </table>
        "#;

        let rows = extract_position_rows(html);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["Coin"], "SOL");
    }

    #[test]
    fn test_rows_after_header_used_when_no_body() {
        let html = r#"
            <table>
              <thead>
                <tr><th>Coin</th><th>Position Value (USDC)</th></tr>
                <tr><td>HYPE</td><td>$55,000</td></tr>
              </thead>
            </table>
        "#;

        let rows = extract_position_rows(html);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["Coin"], "HYPE");
        assert_eq!(rows[0]["Position Value (USDC)"], "$55,000");
    }

    #[test]
    fn test_short_row_fills_missing_cells_with_empty() {
        let html = r#"
            <table>
              <thead><tr><th>Coin</th><th>Position Value (USDC)</th><th>Mark Price</th></tr></thead>
              <tbody><tr><td>BTC</td></tr></tbody>
            </table>
        "#;

        let rows = extract_position_rows(html);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["Coin"], "BTC");
        assert_eq!(rows[0]["Position Value (USDC)"], "");
        assert_eq!(rows[0]["Mark Price"], "");
    }

    #[test]
    fn test_header_split_across_text_nodes_matches() {
        let html = r#"
            <table>
              <thead><tr><th>Coin</th><th>Position Value (<!-- -->USDC<!-- -->)</th></tr></thead>
              <tbody><tr><td>BTC</td><td>$<!-- -->70,000</td></tr></tbody>
            </table>
        "#;

        let rows = extract_position_rows(html);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["Position Value (USDC)"], "$70,000");
    }

    #[test]
    fn test_first_matching_table_wins() {
        let html = r#"
            <table>
              <thead><tr><th>Coin</th><th>Position Value (USDC)</th></tr></thead>
              <tbody><tr><td>FIRST</td><td>$1</td></tr></tbody>
            </table>
            <table>
              <thead><tr><th>Coin</th><th>Position Value (USDC)</th></tr></thead>
              <tbody><tr><td>SECOND</td><td>$2</td></tr></tbody>
            </table>
        "#;

        let rows = extract_position_rows(html);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["Coin"], "FIRST");
    }
}
