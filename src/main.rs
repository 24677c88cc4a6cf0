use anyhow::Result;

use largest_banks_etl::{run, EtlConfig};

fn main() -> Result<()> {
    println!("🏦 Largest Banks ETL - Extract → Transform → Load");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let config = EtlConfig::default();
    let summary = run(&config)?;

    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!(
        "🎉 Done: {} banks extracted, {} rows in {}",
        summary.extracted,
        summary.loaded,
        config.db_path.display()
    );

    Ok(())
}
