// 📝 Progress Log
// Append-only milestone log: one `<timestamp>:<message>` line per checkpoint

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Timestamp layout, e.g. `2024-Mar-05-14:02:09`
pub const TIMESTAMP_FORMAT: &str = "%Y-%b-%d-%H:%M:%S";

// Pipeline checkpoints, in the order they are logged
pub const MSG_START: &str = "Preliminaries complete. Initiating ETL process";
pub const MSG_EXTRACTED: &str = "Data extraction complete. Initiating Transformation process";
pub const MSG_TRANSFORMED: &str = "Data transformation complete. Initiating Loading process";
pub const MSG_CSV_SAVED: &str = "Data saved to CSV file";
pub const MSG_CONNECTED: &str = "SQL Connection initiated";
pub const MSG_DB_LOADED: &str = "Data loaded to Database as a table, Executing queries";
pub const MSG_QUERIED: &str = "Process Complete";
pub const MSG_CLOSED: &str = "Server Connection closed";

pub struct ProgressLog {
    path: PathBuf,
}

impl ProgressLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ProgressLog { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a line stamped with the local time
    pub fn log(&self, message: &str) -> Result<()> {
        self.log_at(Local::now().naive_local(), message)
    }

    /// Append a line with an explicit timestamp
    pub fn log_at(&self, timestamp: NaiveDateTime, message: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open log file: {}", self.path.display()))?;

        writeln!(file, "{}", format_line(timestamp, message))
            .with_context(|| format!("Failed to write log file: {}", self.path.display()))?;

        Ok(())
    }
}

pub fn format_line(timestamp: NaiveDateTime, message: &str) -> String {
    format!("{}:{}", timestamp.format(TIMESTAMP_FORMAT), message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::fs;

    fn sample_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(14, 2, 9)
            .unwrap()
    }

    #[test]
    fn test_format_line() {
        let line = format_line(sample_time(), MSG_START);

        assert_eq!(
            line,
            "2024-Mar-05-14:02:09:Preliminaries complete. Initiating ETL process"
        );
    }

    #[test]
    fn test_log_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let log = ProgressLog::new(dir.path().join("code_log.txt"));

        log.log_at(sample_time(), MSG_START).unwrap();
        log.log_at(sample_time(), MSG_CLOSED).unwrap();

        let contents = fs::read_to_string(log.path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(":Preliminaries complete. Initiating ETL process"));
        assert_eq!(lines[1], "2024-Mar-05-14:02:09:Server Connection closed");
        assert!(contents.ends_with('\n'));
    }

    #[test]
    fn test_log_keeps_existing_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("code_log.txt");
        fs::write(&path, "earlier run\n").unwrap();

        let log = ProgressLog::new(path.clone());
        log.log(MSG_QUERIED).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("earlier run\n"));
        assert!(contents.trim_end().ends_with(":Process Complete"));
    }
}
