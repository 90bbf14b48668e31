//! CSV holdings snapshot adapter.
//!
//! Reads a `name,symbol,weight,pe` table as scraped from a fund's holdings
//! page. The `weight` and `pe` cells are kept as raw text (`"25.50%"`,
//! `"N/A"`, `"12.3x"`) and run through the text parsers here.

use crate::domain::error::BasketError;
use crate::domain::holding::Holding;
use crate::domain::text_parse::{parse_percentage, read_ratio, RatioReading};
use crate::ports::holdings_port::HoldingsPort;
use std::fs;
use std::path::PathBuf;

pub struct CsvHoldingsAdapter {
    path: PathBuf,
}

impl CsvHoldingsAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Parses holdings from CSV text with a header row.
    ///
    /// Columns are found by header name, in any order. Error rows count data
    /// records from 1; row 0 is the header.
    pub fn parse(content: &str) -> Result<Vec<Holding>, BasketError> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());

        let headers = rdr
            .headers()
            .map_err(|e| BasketError::HoldingsFormat {
                line: 0,
                reason: format!("CSV header error: {}", e),
            })?
            .clone();
        let index_of = |name: &str| {
            headers
                .iter()
                .position(|h| h.eq_ignore_ascii_case(name))
                .ok_or_else(|| BasketError::HoldingsFormat {
                    line: 0,
                    reason: format!("header has no {} column", name),
                })
        };
        let columns = [
            index_of("name")?,
            index_of("symbol")?,
            index_of("weight")?,
            index_of("pe")?,
        ];

        let mut holdings = Vec::new();
        for (idx, result) in rdr.records().enumerate() {
            let line = idx as u64 + 1;
            let record = result.map_err(|e| BasketError::HoldingsFormat {
                line,
                reason: format!("CSV parse error: {}", e),
            })?;

            let column = |slot: usize, name: &str| {
                record
                    .get(columns[slot])
                    .ok_or_else(|| BasketError::HoldingsFormat {
                        line,
                        reason: format!("missing {} column", name),
                    })
            };

            let name = column(0, "name")?;
            let symbol = column(1, "symbol")?;
            let weight_text = column(2, "weight")?;
            let pe_text = column(3, "pe")?;

            let ratio = match read_ratio(pe_text) {
                RatioReading::Value(v) => Some(v),
                RatioReading::NotAvailable => None,
                RatioReading::Unrecognised => {
                    eprintln!(
                        "warning: unrecognised P/E '{}' for {} (row {}), treating as N/A",
                        pe_text, symbol, line
                    );
                    None
                }
            };

            holdings.push(Holding::new(
                name,
                symbol,
                parse_percentage(weight_text),
                ratio,
            ));
        }

        Ok(holdings)
    }
}

impl HoldingsPort for CsvHoldingsAdapter {
    fn fetch_holdings(&self) -> Result<Vec<Holding>, BasketError> {
        let content = fs::read_to_string(&self.path).map_err(|e| BasketError::HoldingsRead {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::parse(&content)
    }
}
