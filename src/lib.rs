// Largest Banks ETL - Core Library
// Exposes every pipeline stage for the binary and tests

pub mod config;
pub mod db;
pub mod export;
pub mod extractor;
pub mod logger;
pub mod pipeline;
pub mod queries;
pub mod records;
pub mod transform;

// Re-export commonly used types
pub use config::EtlConfig;
pub use db::{count_rows, get_all_banks, load_to_table, BankDatabase};
pub use export::{load_csv, save_csv};
pub use extractor::{extract, fetch_page, parse_bank_table};
pub use logger::ProgressLog;
pub use pipeline::{run, run_from_html, RunSummary};
pub use queries::{print_query, run_query, standard_queries, QueryOutput};
pub use records::{BankRecord, Currency, EnrichedBankRecord, RawBankRecord};
pub use transform::{round_to_cents, transform, transform_from_file, ExchangeRateTable};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
