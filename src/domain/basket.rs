//! Basket-level settings resolved from configuration.

use chrono::NaiveDate;
use std::path::PathBuf;

use super::weighted_ratio::DEFAULT_RATIO;

#[derive(Debug, Clone, PartialEq)]
pub struct BasketConfig {
    pub name: String,
    pub holdings_path: PathBuf,
    pub default_ratio: f64,
    pub as_of: Option<NaiveDate>,
}

impl BasketConfig {
    pub fn new(name: impl Into<String>, holdings_path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            holdings_path: holdings_path.into(),
            default_ratio: DEFAULT_RATIO,
            as_of: None,
        }
    }
}
