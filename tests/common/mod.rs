#![allow(dead_code)]

use basketpe::domain::error::BasketError;
pub use basketpe::domain::holding::Holding;
use basketpe::ports::holdings_port::HoldingsPort;
use std::io::Write;

pub struct MockHoldingsPort {
    pub holdings: Vec<Holding>,
    pub error: Option<String>,
}

impl MockHoldingsPort {
    pub fn new() -> Self {
        Self {
            holdings: Vec::new(),
            error: None,
        }
    }

    pub fn with_holding(mut self, holding: Holding) -> Self {
        self.holdings.push(holding);
        self
    }

    pub fn with_error(mut self, reason: &str) -> Self {
        self.error = Some(reason.to_string());
        self
    }
}

impl HoldingsPort for MockHoldingsPort {
    fn fetch_holdings(&self) -> Result<Vec<Holding>, BasketError> {
        if let Some(reason) = &self.error {
            return Err(BasketError::HoldingsRead {
                path: "mock".to_string(),
                reason: reason.clone(),
            });
        }
        Ok(self.holdings.clone())
    }
}

pub fn make_holding(symbol: &str, weight: f64, ratio: Option<f64>) -> Holding {
    Holding::new(format!("{} Ltd", symbol), symbol, weight, ratio)
}

/// The two-holding basket used throughout: 25.5% at 12.3 and 10.2% at 18.5.
pub fn sample_holdings() -> Vec<Holding> {
    vec![
        Holding::new("Alibaba Group", "BABA", 25.5, Some(12.3)),
        Holding::new("JD.com", "JD", 10.2, Some(18.5)),
    ]
}

pub const KWEB_CSV: &str = "name,symbol,weight,pe\n\
    Alibaba Group,BABA,25.50%,12.3\n\
    JD.com,JD,10.20%,18.5\n";

pub fn write_temp_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
