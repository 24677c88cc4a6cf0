// 🏦 Bank Records
// Row shapes flowing between extract → transform → load

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

// ============================================================================
// CURRENCIES
// ============================================================================

/// Target currencies derived from the USD market cap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    Gbp,
    Eur,
    Inr,
}

impl Currency {
    pub const ALL: [Currency; 3] = [Currency::Gbp, Currency::Eur, Currency::Inr];

    /// ISO code as it appears in the exchange-rate file
    pub fn code(&self) -> &str {
        match self {
            Currency::Gbp => "GBP",
            Currency::Eur => "EUR",
            Currency::Inr => "INR",
        }
    }

    /// Output column holding the converted market cap
    pub fn column(&self) -> &str {
        match self {
            Currency::Gbp => "MarketCapGBP",
            Currency::Eur => "MarketCapEUR",
            Currency::Inr => "MarketCapINR",
        }
    }
}

// ============================================================================
// RECORDS
// ============================================================================

/// RawBankRecord - Output of the extractor
/// Cell text as scraped, before any numeric coercion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawBankRecord {
    pub name: String,
    pub market_cap_usd: String,
}

impl RawBankRecord {
    pub fn new(name: impl Into<String>, market_cap_usd: impl Into<String>) -> Self {
        RawBankRecord {
            name: name.into(),
            market_cap_usd: market_cap_usd.into(),
        }
    }

    /// Coerce the market cap to a number
    pub fn parse(&self) -> Result<BankRecord> {
        let market_cap_usd = self
            .market_cap_usd
            .trim()
            .parse::<f64>()
            .with_context(|| {
                format!(
                    "Invalid market cap for {}: {:?}",
                    self.name, self.market_cap_usd
                )
            })?;

        Ok(BankRecord {
            name: self.name.clone(),
            market_cap_usd,
        })
    }
}

/// Bank with a numeric USD market cap (billions)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankRecord {
    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "MarketCapUSD")]
    pub market_cap_usd: f64,
}

/// BankRecord plus the converted market caps, each rounded to 2 decimals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedBankRecord {
    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "MarketCapUSD")]
    pub market_cap_usd: f64,

    #[serde(rename = "MarketCapGBP")]
    pub market_cap_gbp: f64,

    #[serde(rename = "MarketCapEUR")]
    pub market_cap_eur: f64,

    #[serde(rename = "MarketCapINR")]
    pub market_cap_inr: f64,
}

impl EnrichedBankRecord {
    /// Output columns in file/table order (without the row index)
    pub const COLUMNS: [&'static str; 5] = [
        "Name",
        "MarketCapUSD",
        "MarketCapGBP",
        "MarketCapEUR",
        "MarketCapINR",
    ];

    pub fn market_cap(&self, currency: Currency) -> f64 {
        match currency {
            Currency::Gbp => self.market_cap_gbp,
            Currency::Eur => self.market_cap_eur,
            Currency::Inr => self.market_cap_inr,
        }
    }
}

/// Render records the way the pipeline prints them after transformation
pub fn render_records(records: &[EnrichedBankRecord]) -> String {
    let mut out = format!(
        "{:>4}  {:<45} {:>14} {:>14} {:>14} {:>14}\n",
        "", "Name", "MarketCapUSD", "MarketCapGBP", "MarketCapEUR", "MarketCapINR"
    );

    for (index, record) in records.iter().enumerate() {
        out.push_str(&format!(
            "{:>4}  {:<45} {:>14.2} {:>14.2} {:>14.2} {:>14.2}\n",
            index,
            record.name,
            record.market_cap_usd,
            record.market_cap_gbp,
            record.market_cap_eur,
            record.market_cap_inr,
        ));
    }

    out
}
