// 🚚 ETL Pipeline
// extract → transform → CSV → SQLite → report queries, logging each milestone

use crate::config::EtlConfig;
use crate::db::{load_to_table, BankDatabase};
use crate::export::save_csv;
use crate::extractor::{extract, parse_bank_table};
use crate::logger::{self, ProgressLog};
use crate::queries::{print_query, run_query, standard_queries, QueryOutput};
use crate::records::{render_records, RawBankRecord};
use crate::transform::transform_from_file;
use anyhow::Result;

/// What one run produced
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub extracted: usize,
    pub loaded: usize,
    pub query_results: Vec<QueryOutput>,
}

/// Run the full job against the live source page
pub fn run(config: &EtlConfig) -> Result<RunSummary> {
    let log = ProgressLog::new(config.log_path.clone());
    log.log(logger::MSG_START)?;

    println!("🌐 Extracting bank table from {}", config.source_url);
    let raw = extract(&config.source_url, &config.table_selector)?;

    run_from_records(config, &log, raw)
}

/// Run the job on an already-fetched page
pub fn run_from_html(config: &EtlConfig, html: &str) -> Result<RunSummary> {
    let log = ProgressLog::new(config.log_path.clone());
    log.log(logger::MSG_START)?;

    let raw = parse_bank_table(html, &config.table_selector)?;

    run_from_records(config, &log, raw)
}

fn run_from_records(
    config: &EtlConfig,
    log: &ProgressLog,
    raw: Vec<RawBankRecord>,
) -> Result<RunSummary> {
    println!("✓ Extracted {} banks", raw.len());
    log.log(logger::MSG_EXTRACTED)?;

    let records = transform_from_file(&raw, &config.exchange_rate_csv)?;
    println!("{}", render_records(&records));
    log.log(logger::MSG_TRANSFORMED)?;

    save_csv(&records, &config.output_csv)?;
    println!("✓ Saved CSV: {}", config.output_csv.display());
    log.log(logger::MSG_CSV_SAVED)?;

    // Dropped without `close` on any early return below
    let mut db = BankDatabase::open(&config.db_path)?;
    log.log(logger::MSG_CONNECTED)?;

    let loaded = load_to_table(db.conn_mut(), &config.table_name, &records)?;
    println!("✓ Loaded {} rows into {}", loaded, config.table_name);
    log.log(logger::MSG_DB_LOADED)?;

    let mut query_results = Vec::new();
    for sql in standard_queries(&config.table_name) {
        let output = run_query(db.conn(), &sql)?;
        print_query(&sql, &output);
        query_results.push(output);
    }
    log.log(logger::MSG_QUERIED)?;

    db.close()?;
    log.log(logger::MSG_CLOSED)?;

    Ok(RunSummary {
        extracted: raw.len(),
        loaded,
        query_results,
    })
}
