// 🌐 Extractor
// Fetches the bank list page and scrapes (Name, MarketCapUSD) rows

use crate::records::RawBankRecord;
use anyhow::{anyhow, Context, Result};
use scraper::{ElementRef, Html, Selector};

/// Cell holding the bank name (cell 0 is the rank)
const NAME_CELL: usize = 1;

/// Cell holding the market cap in USD billions
const MARKET_CAP_CELL: usize = 2;

/// Single GET, no retry. Non-2xx responses are errors.
pub fn fetch_page(url: &str) -> Result<String> {
    let response = reqwest::blocking::get(url)
        .with_context(|| format!("Failed to fetch {}", url))?
        .error_for_status()
        .with_context(|| format!("Bad response from {}", url))?;

    response
        .text()
        .with_context(|| format!("Failed to read body from {}", url))
}

/// Parse the first element matching `table_selector` into raw records
///
/// Rows without `<td>` cells (header rows) are skipped. Every other row
/// must have at least three cells.
pub fn parse_bank_table(html: &str, table_selector: &str) -> Result<Vec<RawBankRecord>> {
    let table_sel = Selector::parse(table_selector)
        .map_err(|e| anyhow!("Invalid table selector {:?}: {}", table_selector, e))?;
    let row_sel = Selector::parse("tr").map_err(|e| anyhow!("Invalid row selector: {}", e))?;
    let cell_sel = Selector::parse("td").map_err(|e| anyhow!("Invalid cell selector: {}", e))?;

    let document = Html::parse_document(html);
    let table = document
        .select(&table_sel)
        .next()
        .ok_or_else(|| anyhow!("No element matching {:?} found in page", table_selector))?;

    let mut records = Vec::new();

    for (row_num, row) in table.select(&row_sel).enumerate() {
        let cells: Vec<ElementRef> = row.select(&cell_sel).collect();
        if cells.is_empty() {
            continue;
        }

        if cells.len() <= MARKET_CAP_CELL {
            return Err(anyhow!(
                "Row {} has {} cells, expected at least {}",
                row_num,
                cells.len(),
                MARKET_CAP_CELL + 1
            ));
        }

        records.push(RawBankRecord::new(
            cell_text(&cells[NAME_CELL]),
            cell_text(&cells[MARKET_CAP_CELL]),
        ));
    }

    Ok(records)
}

/// Fetch + parse
pub fn extract(url: &str, table_selector: &str) -> Result<Vec<RawBankRecord>> {
    let html = fetch_page(url)?;
    parse_bank_table(&html, table_selector)
        .with_context(|| format!("Failed to extract bank table from {}", url))
}

fn cell_text(cell: &ElementRef) -> String {
    cell.text().collect::<String>().trim().to_string()
}
