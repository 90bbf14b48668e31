//! Configuration validation.
//!
//! Checks the `[basket]` and `[report]` sections before any holdings are read.

use crate::domain::error::BasketError;
use crate::ports::config_port::ConfigPort;
use crate::ports::report_port::ReportFormat;
use chrono::NaiveDate;

/// Validates `[basket]`. `holdings_overridden` is set when the holdings path
/// comes from the command line, making the config key optional.
pub fn validate_basket_config(
    config: &dyn ConfigPort,
    holdings_overridden: bool,
) -> Result<(), BasketError> {
    if !holdings_overridden {
        validate_holdings(config)?;
    }
    parse_default_ratio(config)?;
    parse_as_of(config)?;
    Ok(())
}

pub fn validate_report_config(config: &dyn ConfigPort) -> Result<(), BasketError> {
    parse_report_format(config)?;
    Ok(())
}

fn validate_holdings(config: &dyn ConfigPort) -> Result<(), BasketError> {
    match config.get_string("basket", "holdings") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(BasketError::ConfigMissing {
            section: "basket".to_string(),
            key: "holdings".to_string(),
        }),
    }
}

/// `[basket] default_pe`, or `None` when unset. Must be a finite number.
pub fn parse_default_ratio(config: &dyn ConfigPort) -> Result<Option<f64>, BasketError> {
    let Some(raw) = config.get_string("basket", "default_pe") else {
        return Ok(None);
    };
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(BasketError::ConfigInvalid {
            section: "basket".to_string(),
            key: "default_pe".to_string(),
            reason: format!("expected a finite number, found '{}'", raw),
        }),
    }
}

pub fn parse_as_of(config: &dyn ConfigPort) -> Result<Option<NaiveDate>, BasketError> {
    match config.get_string("basket", "as_of") {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Some)
            .map_err(|_| BasketError::ConfigInvalid {
                section: "basket".to_string(),
                key: "as_of".to_string(),
                reason: "invalid as_of format, expected YYYY-MM-DD".to_string(),
            }),
    }
}

pub fn parse_report_format(config: &dyn ConfigPort) -> Result<ReportFormat, BasketError> {
    match config.get_string("report", "format") {
        None => Ok(ReportFormat::default()),
        Some(s) => s.parse().map_err(|reason| BasketError::ConfigInvalid {
            section: "report".to_string(),
            key: "format".to_string(),
            reason,
        }),
    }
}
