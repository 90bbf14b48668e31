//! Report generation port trait.

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use crate::domain::basket::BasketConfig;
use crate::domain::error::BasketError;
use crate::domain::weighted_ratio::AggregationResult;

/// Port for presenting an aggregation result.
pub trait ReportPort {
    fn write(
        &self,
        result: &AggregationResult,
        basket: &BasketConfig,
        out: &mut dyn Write,
    ) -> Result<(), BasketError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Csv,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "csv" => Ok(ReportFormat::Csv),
            other => Err(format!("unknown report format '{}' (expected text or csv)", other)),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Text => write!(f, "text"),
            ReportFormat::Csv => write!(f, "csv"),
        }
    }
}
