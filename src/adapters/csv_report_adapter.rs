//! CSV report adapter implementing ReportPort.
//!
//! One row per listed holding, then a `residual` row for the unlisted weight
//! and a `total` row whose `pe` column is the per-unit weighted PE and whose
//! `contribution` column is the 0–100 scale weighted PE.

use std::io::Write;

use crate::domain::basket::BasketConfig;
use crate::domain::error::BasketError;
use crate::domain::weighted_ratio::AggregationResult;
use crate::ports::report_port::ReportPort;

const HEADER: [&str; 7] = [
    "index",
    "name",
    "symbol",
    "weight",
    "pe",
    "pe_source",
    "contribution",
];

pub struct CsvReportAdapter;

impl CsvReportAdapter {
    fn rows(result: &AggregationResult) -> Vec<[String; 7]> {
        let mut rows: Vec<[String; 7]> = result
            .contributions
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let source = if c.holding.has_ratio() {
                    "reported"
                } else {
                    "default"
                };
                [
                    (i + 1).to_string(),
                    c.holding.name.clone(),
                    c.holding.symbol.clone(),
                    c.holding.weight.to_string(),
                    c.effective_ratio().to_string(),
                    source.to_string(),
                    format!("{:.4}", c.contribution),
                ]
            })
            .collect();

        rows.push([
            String::new(),
            "residual".to_string(),
            String::new(),
            result.residual_weight.to_string(),
            result.default_ratio.to_string(),
            "default".to_string(),
            format!("{:.4}", result.residual_contribution),
        ]);
        rows.push([
            String::new(),
            "total".to_string(),
            String::new(),
            (result.total_listed_weight + result.residual_weight).to_string(),
            format!("{:.4}", result.normalized_ratio()),
            "weighted".to_string(),
            format!("{:.4}", result.weighted_ratio),
        ]);
        rows
    }
}

impl ReportPort for CsvReportAdapter {
    fn write(
        &self,
        result: &AggregationResult,
        _basket: &BasketConfig,
        out: &mut dyn Write,
    ) -> Result<(), BasketError> {
        let mut wtr = csv::Writer::from_writer(out);
        let csv_err = |e: csv::Error| BasketError::ReportWrite {
            reason: format!("CSV write error: {}", e),
        };

        wtr.write_record(HEADER).map_err(csv_err)?;
        for row in Self::rows(result) {
            wtr.write_record(&row).map_err(csv_err)?;
        }
        wtr.flush().map_err(|e| BasketError::ReportWrite {
            reason: e.to_string(),
        })
    }
}
