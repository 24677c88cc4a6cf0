use crate::records::EnrichedBankRecord;
use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use std::path::Path;

/// Owned SQLite handle for one pipeline run
///
/// `close` releases the connection and reports errors. If the handle is
/// dropped instead (e.g. on an error path) rusqlite closes it on drop.
pub struct BankDatabase {
    conn: Connection,
}

impl BankDatabase {
    pub fn open(db_path: &Path) -> Result<Self> {
        let conn = Connection::open(db_path)
            .with_context(|| format!("Failed to open database: {}", db_path.display()))?;
        Ok(BankDatabase { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        Ok(BankDatabase { conn })
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    pub fn conn_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }

    pub fn close(self) -> Result<()> {
        self.conn
            .close()
            .map_err(|(_, e)| e)
            .context("Failed to close database connection")
    }
}

/// Quote a table name as an SQL identifier
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Replace `table_name` with `records`
///
/// Drops any existing table of that name, recreates it and inserts every
/// record in one transaction. Row `index` is the record position.
pub fn load_to_table(
    conn: &mut Connection,
    table_name: &str,
    records: &[EnrichedBankRecord],
) -> Result<usize> {
    let table = quote_ident(table_name);
    let index_name = quote_ident(&format!("ix_{}_index", table_name));

    let tx = conn.transaction()?;

    tx.execute(&format!("DROP TABLE IF EXISTS {}", table), [])
        .with_context(|| format!("Failed to drop table {}", table_name))?;

    tx.execute(
        &format!(
            "CREATE TABLE {} (
                \"index\" INTEGER,
                Name TEXT,
                MarketCapUSD REAL,
                MarketCapGBP REAL,
                MarketCapEUR REAL,
                MarketCapINR REAL
            )",
            table
        ),
        [],
    )
    .with_context(|| format!("Failed to create table {}", table_name))?;

    tx.execute(
        &format!("CREATE INDEX {} ON {} (\"index\")", index_name, table),
        [],
    )?;

    let mut inserted = 0;
    {
        let mut stmt = tx.prepare(&format!(
            "INSERT INTO {} (
                \"index\", Name, MarketCapUSD, MarketCapGBP, MarketCapEUR, MarketCapINR
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            table
        ))?;

        for (index, record) in records.iter().enumerate() {
            stmt.execute(params![
                index as i64,
                record.name,
                record.market_cap_usd,
                record.market_cap_gbp,
                record.market_cap_eur,
                record.market_cap_inr,
            ])
            .with_context(|| format!("Failed to insert {}", record.name))?;
            inserted += 1;
        }
    }

    tx.commit()?;

    Ok(inserted)
}

pub fn count_rows(conn: &Connection, table_name: &str) -> Result<i64> {
    let count: i64 = conn.query_row(
        &format!("SELECT COUNT(*) FROM {}", quote_ident(table_name)),
        [],
        |row| row.get(0),
    )?;

    Ok(count)
}

/// All records in row-index order
pub fn get_all_banks(conn: &Connection, table_name: &str) -> Result<Vec<EnrichedBankRecord>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT Name, MarketCapUSD, MarketCapGBP, MarketCapEUR, MarketCapINR
         FROM {}
         ORDER BY \"index\"",
        quote_ident(table_name)
    ))?;

    let banks = stmt
        .query_map([], |row| {
            Ok(EnrichedBankRecord {
                name: row.get(0)?,
                market_cap_usd: row.get(1)?,
                market_cap_gbp: row.get(2)?,
                market_cap_eur: row.get(3)?,
                market_cap_inr: row.get(4)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(banks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bank(name: &str, usd: f64) -> EnrichedBankRecord {
        EnrichedBankRecord {
            name: name.to_string(),
            market_cap_usd: usd,
            market_cap_gbp: usd * 0.5,
            market_cap_eur: usd * 0.75,
            market_cap_inr: usd * 80.0,
        }
    }

    #[test]
    fn test_load_and_read_back() {
        let mut db = BankDatabase::open_in_memory().unwrap();
        let records = vec![bank("Bank A", 100.0), bank("Bank B", 50.0)];

        let inserted = load_to_table(db.conn_mut(), "Largest_banks", &records).unwrap();

        assert_eq!(inserted, 2);
        assert_eq!(get_all_banks(db.conn(), "Largest_banks").unwrap(), records);
    }

    #[test]
    fn test_load_twice_replaces_table() {
        let mut db = BankDatabase::open_in_memory().unwrap();
        let records = vec![bank("Bank A", 100.0), bank("Bank B", 50.0), bank("Bank C", 10.0)];

        load_to_table(db.conn_mut(), "Largest_banks", &records).unwrap();
        let count1 = count_rows(db.conn(), "Largest_banks").unwrap();

        load_to_table(db.conn_mut(), "Largest_banks", &records).unwrap();
        let count2 = count_rows(db.conn(), "Largest_banks").unwrap();

        assert_eq!(count1, 3);
        assert_eq!(count2, 3, "Second load should replace, not append");

        let tables: i64 = db
            .conn()
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'Largest_banks'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 1);
    }

    #[test]
    fn test_replace_keeps_latest_data() {
        let mut db = BankDatabase::open_in_memory().unwrap();

        load_to_table(db.conn_mut(), "Largest_banks", &[bank("Old Bank", 1.0)]).unwrap();
        load_to_table(db.conn_mut(), "Largest_banks", &[bank("New Bank", 2.0)]).unwrap();

        let banks = get_all_banks(db.conn(), "Largest_banks").unwrap();
        assert_eq!(banks, vec![bank("New Bank", 2.0)]);
    }

    #[test]
    fn test_replace_drops_foreign_schema() {
        let mut db = BankDatabase::open_in_memory().unwrap();
        db.conn()
            .execute("CREATE TABLE Largest_banks (something_else TEXT)", [])
            .unwrap();

        load_to_table(db.conn_mut(), "Largest_banks", &[bank("Bank A", 100.0)]).unwrap();

        assert_eq!(count_rows(db.conn(), "Largest_banks").unwrap(), 1);
    }

    #[test]
    fn test_index_column_matches_position() {
        let mut db = BankDatabase::open_in_memory().unwrap();
        let records = vec![bank("Bank A", 100.0), bank("Bank B", 50.0)];
        load_to_table(db.conn_mut(), "Largest_banks", &records).unwrap();

        let index: i64 = db
            .conn()
            .query_row(
                "SELECT \"index\" FROM Largest_banks WHERE Name = 'Bank B'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(index, 1);
    }

    #[test]
    fn test_quote_ident() {
        assert_eq!(quote_ident("Largest_banks"), "\"Largest_banks\"");
        assert_eq!(quote_ident("a\"b"), "\"a\"\"b\"");
    }

    #[test]
    fn test_open_and_close_file_database() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Banks.db");

        let mut db = BankDatabase::open(&path).unwrap();
        load_to_table(db.conn_mut(), "Largest_banks", &[bank("Bank A", 100.0)]).unwrap();
        db.close().unwrap();

        let db = BankDatabase::open(&path).unwrap();
        assert_eq!(count_rows(db.conn(), "Largest_banks").unwrap(), 1);
    }
}
