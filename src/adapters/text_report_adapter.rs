//! Plain-text console report implementing ReportPort.

use std::io::Write;

use crate::domain::basket::BasketConfig;
use crate::domain::error::BasketError;
use crate::domain::weighted_ratio::{AggregationResult, RatioSource};
use crate::ports::report_port::ReportPort;

pub struct TextReportAdapter;

impl TextReportAdapter {
    fn render(
        result: &AggregationResult,
        basket: &BasketConfig,
        out: &mut dyn Write,
    ) -> std::io::Result<()> {
        match basket.as_of {
            Some(date) => writeln!(out, "=== Weighted PE Calculation: {} (as of {}) ===", basket.name, date)?,
            None => writeln!(out, "=== Weighted PE Calculation: {} ===", basket.name)?,
        }
        writeln!(out)?;

        for (i, c) in result.contributions.iter().enumerate() {
            let h = &c.holding;
            match c.ratio {
                RatioSource::Reported(pe) => writeln!(
                    out,
                    "{}. {} ({}): PE={}, Weight={}%",
                    i + 1,
                    h.name,
                    h.symbol,
                    pe,
                    h.weight
                )?,
                RatioSource::Default(pe) => writeln!(
                    out,
                    "{}. {} ({}): PE=N/A (using {}), Weight={}%",
                    i + 1,
                    h.name,
                    h.symbol,
                    pe,
                    h.weight
                )?,
            }
            writeln!(out, "   Contribution: {:.2}", c.contribution)?;
        }

        writeln!(out)?;
        writeln!(out, "=== Summary ===")?;
        writeln!(out, "Listed holdings: {}", result.contributions.len())?;
        if result.defaulted_count() > 0 {
            writeln!(
                out,
                "Holdings using default PE: {}",
                result.defaulted_count()
            )?;
        }
        writeln!(out, "Listed total weight: {}%", result.total_listed_weight)?;
        writeln!(out, "Listed weighted PE contribution: {:.2}", result.weighted_sum)?;
        writeln!(
            out,
            "Remaining weight (assumed PE={}): {}%, Contribution={:.2}",
            result.default_ratio, result.residual_weight, result.residual_contribution
        )?;

        writeln!(out)?;
        writeln!(out, "=== Final Result ===")?;
        writeln!(
            out,
            "Total weighted PE for {}: {:.2}",
            basket.name, result.weighted_ratio
        )?;
        writeln!(out, "Per-unit weighted PE: {:.2}", result.normalized_ratio())?;
        Ok(())
    }
}

impl ReportPort for TextReportAdapter {
    fn write(
        &self,
        result: &AggregationResult,
        basket: &BasketConfig,
        out: &mut dyn Write,
    ) -> Result<(), BasketError> {
        Self::render(result, basket, out).map_err(|e| BasketError::ReportWrite {
            reason: e.to_string(),
        })
    }
}
