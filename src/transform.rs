// 💱 Transformer
// Exchange-rate table + USD → GBP/EUR/INR conversion

use crate::records::{Currency, EnrichedBankRecord, RawBankRecord};
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

/// One row of the `Currency,Rate` file
#[derive(Debug, Deserialize)]
struct RateRow {
    #[serde(rename = "Currency")]
    currency: String,

    #[serde(rename = "Rate")]
    rate: f64,
}

/// Currency code → rate (units of currency per 1 USD)
/// Read-only once loaded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExchangeRateTable {
    rates: HashMap<String, f64>,
}

impl ExchangeRateTable {
    pub fn from_csv(csv_path: &Path) -> Result<Self> {
        let file = std::fs::File::open(csv_path).with_context(|| {
            format!("Failed to open exchange rate file: {}", csv_path.display())
        })?;

        Self::from_reader(file)
            .with_context(|| format!("Failed to load exchange rates from {}", csv_path.display()))
    }

    /// Later rows for the same currency replace earlier ones
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut rates = HashMap::new();
        for (line_num, result) in rdr.deserialize().enumerate() {
            let row: RateRow = result
                .with_context(|| format!("Failed to parse exchange rate line {}", line_num + 2))?;
            rates.insert(row.currency, row.rate);
        }

        Ok(ExchangeRateTable { rates })
    }

    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        ExchangeRateTable {
            rates: pairs.into_iter().map(|(code, rate)| (code.into(), rate)).collect(),
        }
    }

    /// Missing currencies are an error, never a default
    pub fn rate(&self, currency: Currency) -> Result<f64> {
        self.rates
            .get(currency.code())
            .copied()
            .ok_or_else(|| anyhow!("Exchange rate for {} not found", currency.code()))
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

/// Round half away from zero to 2 decimals
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Derive the converted columns. The input is left untouched.
pub fn transform(
    records: &[RawBankRecord],
    rates: &ExchangeRateTable,
) -> Result<Vec<EnrichedBankRecord>> {
    // Resolve rates up front so a missing currency fails even on an empty table
    let gbp = rates.rate(Currency::Gbp)?;
    let eur = rates.rate(Currency::Eur)?;
    let inr = rates.rate(Currency::Inr)?;

    records
        .iter()
        .map(|raw| {
            let bank = raw.parse()?;
            Ok(EnrichedBankRecord {
                market_cap_gbp: round_to_cents(bank.market_cap_usd * gbp),
                market_cap_eur: round_to_cents(bank.market_cap_usd * eur),
                market_cap_inr: round_to_cents(bank.market_cap_usd * inr),
                name: bank.name,
                market_cap_usd: bank.market_cap_usd,
            })
        })
        .collect()
}

/// Load rates from `rate_csv` and transform
pub fn transform_from_file(
    records: &[RawBankRecord],
    rate_csv: &Path,
) -> Result<Vec<EnrichedBankRecord>> {
    let rates = ExchangeRateTable::from_csv(rate_csv)?;
    transform(records, &rates)
}
