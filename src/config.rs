// ⚙️ ETL Configuration
// Every path, URL and table name the pipeline touches lives here

use std::path::PathBuf;

/// Archived copy of the Wikipedia "List of largest banks" page
pub const DEFAULT_SOURCE_URL: &str =
    "https://web.archive.org/web/20230908091635/https://en.wikipedia.org/wiki/List_of_largest_banks";

/// The market-capitalization table is the first table body on the page.
/// If the page layout changes, this is the contract to update.
pub const DEFAULT_TABLE_SELECTOR: &str = "tbody";

pub const DEFAULT_TABLE_NAME: &str = "Largest_banks";

/// Pipeline configuration, passed by reference into `pipeline::run`
#[derive(Debug, Clone, PartialEq)]
pub struct EtlConfig {
    /// Page holding the bank table
    pub source_url: String,

    /// CSS selector for the table body to scrape (first match wins)
    pub table_selector: String,

    /// Input: `Currency,Rate` CSV
    pub exchange_rate_csv: PathBuf,

    /// Output: transformed table as CSV
    pub output_csv: PathBuf,

    /// Output: SQLite database file
    pub db_path: PathBuf,

    pub table_name: String,

    /// Append-only progress log
    pub log_path: PathBuf,
}

impl Default for EtlConfig {
    fn default() -> Self {
        EtlConfig {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            table_selector: DEFAULT_TABLE_SELECTOR.to_string(),
            exchange_rate_csv: PathBuf::from("./exchange_rate.csv"),
            output_csv: PathBuf::from("./Largest_banks_data.csv"),
            db_path: PathBuf::from("./Banks.db"),
            table_name: DEFAULT_TABLE_NAME.to_string(),
            log_path: PathBuf::from("./code_log.txt"),
        }
    }
}
