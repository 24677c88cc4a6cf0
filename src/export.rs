// 📄 CSV Export
// Writes the result table to a flat file (and reads it back)

use crate::records::EnrichedBankRecord;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File row: leading unnamed index column + the record columns
#[derive(Debug, Serialize, Deserialize)]
struct CsvRow {
    index: usize,
    name: String,
    market_cap_usd: f64,
    market_cap_gbp: f64,
    market_cap_eur: f64,
    market_cap_inr: f64,
}

/// Overwrite `csv_path` with a header and one line per record
pub fn save_csv(records: &[EnrichedBankRecord], csv_path: &Path) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(csv_path)
        .with_context(|| format!("Failed to create CSV file: {}", csv_path.display()))?;

    let mut header = vec![""];
    header.extend(EnrichedBankRecord::COLUMNS);
    wtr.write_record(&header)?;

    for (index, record) in records.iter().enumerate() {
        wtr.serialize(CsvRow {
            index,
            name: record.name.clone(),
            market_cap_usd: record.market_cap_usd,
            market_cap_gbp: record.market_cap_gbp,
            market_cap_eur: record.market_cap_eur,
            market_cap_inr: record.market_cap_inr,
        })
        .with_context(|| format!("Failed to write row {} for {}", index, record.name))?;
    }

    wtr.flush()
        .with_context(|| format!("Failed to flush CSV file: {}", csv_path.display()))?;

    Ok(())
}

/// Read a file written by `save_csv`
pub fn load_csv(csv_path: &Path) -> Result<Vec<EnrichedBankRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(csv_path)
        .with_context(|| format!("Failed to open CSV file: {}", csv_path.display()))?;

    let mut records = Vec::new();

    for (line_num, result) in rdr.records().enumerate() {
        let row: CsvRow = result
            .and_then(|record| record.deserialize(None))
            .with_context(|| format!("Failed to parse CSV line {}", line_num + 2))?;

        records.push(EnrichedBankRecord {
            name: row.name,
            market_cap_usd: row.market_cap_usd,
            market_cap_gbp: row.market_cap_gbp,
            market_cap_eur: row.market_cap_eur,
            market_cap_inr: row.market_cap_inr,
        });
    }

    Ok(records)
}
