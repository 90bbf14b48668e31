//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_holdings_adapter::CsvHoldingsAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::text_report_adapter::TextReportAdapter;
use crate::domain::basket::BasketConfig;
use crate::domain::config_validation::{
    parse_as_of, parse_report_format, validate_basket_config, validate_report_config,
};
use crate::domain::error::BasketError;
use crate::domain::text_parse::{parse_percentage, read_ratio, RatioReading};
use crate::domain::weighted_ratio::{aggregate, AggregationResult, DEFAULT_RATIO, FULL_WEIGHT};
use crate::ports::config_port::ConfigPort;
use crate::ports::holdings_port::HoldingsPort;
use crate::ports::report_port::{ReportFormat, ReportPort};

#[derive(Parser, Debug)]
#[command(name = "basketpe", about = "Capitalization-weighted P/E for a basket of securities")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute the weighted P/E of a basket
    Calculate {
        #[arg(short, long)]
        config: PathBuf,
        /// Holdings CSV, overriding [basket] holdings
        #[arg(long)]
        holdings: Option<PathBuf>,
        /// P/E assumed for holdings without one and for unlisted weight
        #[arg(long, allow_negative_numbers = true, value_parser = parse_finite)]
        default_pe: Option<f64>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(short, long)]
        format: Option<ReportFormat>,
    },
    /// Print the percentage found in a piece of text
    ParseWeight {
        #[arg(allow_hyphen_values = true)]
        text: String,
    },
    /// Print the P/E ratio found in a piece of text
    ParsePe {
        #[arg(allow_hyphen_values = true)]
        text: String,
    },
    /// Validate a basket configuration
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

fn parse_finite(s: &str) -> Result<f64, String> {
    match s.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(format!("expected a finite number, found '{}'", s)),
    }
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Calculate {
            config,
            holdings,
            default_pe,
            output,
            format,
        } => run_calculate(
            &config,
            holdings.as_ref(),
            default_pe,
            output.as_ref(),
            format,
        ),
        Command::ParseWeight { text } => run_parse_weight(&text),
        Command::ParsePe { text } => run_parse_pe(&text),
        Command::Validate { config } => run_validate(&config),
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|err| {
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// Resolves `[basket]` into a `BasketConfig`, letting command-line values
/// take precedence. Expects a config that passed `validate_basket_config`.
pub fn build_basket_config(
    adapter: &dyn ConfigPort,
    holdings_override: Option<&PathBuf>,
    default_pe_override: Option<f64>,
) -> Result<BasketConfig, BasketError> {
    let holdings_path = match holdings_override {
        Some(p) => p.clone(),
        None => adapter
            .get_string("basket", "holdings")
            .map(|s| PathBuf::from(s.trim()))
            .ok_or_else(|| BasketError::ConfigMissing {
                section: "basket".into(),
                key: "holdings".into(),
            })?,
    };
    let name = adapter
        .get_string("basket", "name")
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| "basket".to_string());

    Ok(BasketConfig {
        name,
        holdings_path,
        default_ratio: default_pe_override
            .unwrap_or_else(|| adapter.get_double("basket", "default_pe", DEFAULT_RATIO)),
        as_of: parse_as_of(adapter)?,
    })
}

pub fn report_adapter(format: ReportFormat) -> Box<dyn ReportPort> {
    match format {
        ReportFormat::Text => Box::new(TextReportAdapter),
        ReportFormat::Csv => Box::new(CsvReportAdapter),
    }
}

/// Fetches holdings, aggregates them and writes the report to `out`.
pub fn run_calculate_pipeline(
    holdings_port: &dyn HoldingsPort,
    report_port: &dyn ReportPort,
    basket: &BasketConfig,
    out: &mut dyn Write,
) -> Result<AggregationResult, BasketError> {
    let holdings = holdings_port.fetch_holdings()?;
    eprintln!(
        "Aggregating {} holdings for {} (default PE {})",
        holdings.len(),
        basket.name,
        basket.default_ratio
    );

    let result = aggregate(&holdings, basket.default_ratio);

    if holdings.is_empty() {
        eprintln!(
            "warning: no holdings listed, basket valued entirely at default PE {}",
            basket.default_ratio
        );
    }
    if result.total_listed_weight > FULL_WEIGHT {
        eprintln!(
            "warning: listed weights sum to {}%, residual weight is negative",
            result.total_listed_weight
        );
    }
    if result.defaulted_count() > 0 {
        eprintln!(
            "warning: {} of {} holdings have no PE, using {}",
            result.defaulted_count(),
            holdings.len(),
            basket.default_ratio
        );
    }

    report_port.write(&result, basket, out)?;
    Ok(result)
}

fn run_calculate(
    config_path: &Path,
    holdings_override: Option<&PathBuf>,
    default_pe_override: Option<f64>,
    output_override: Option<&PathBuf>,
    format_override: Option<ReportFormat>,
) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let validated = validate_basket_config(&adapter, holdings_override.is_some())
        .and_then(|()| validate_report_config(&adapter));
    if let Err(e) = validated {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let basket = match build_basket_config(&adapter, holdings_override, default_pe_override) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let format = match format_override {
        Some(f) => f,
        None => match parse_report_format(&adapter) {
            Ok(f) => f,
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        },
    };
    let output = output_override.cloned().or_else(|| {
        adapter
            .get_string("report", "output")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
    });

    eprintln!("Reading holdings from {}", basket.holdings_path.display());
    let holdings_port = CsvHoldingsAdapter::new(basket.holdings_path.clone());
    let report_port = report_adapter(format);

    eprintln!("Writing {} report", format);
    let outcome = match &output {
        Some(path) => {
            let mut buf = Vec::new();
            run_calculate_pipeline(&holdings_port, report_port.as_ref(), &basket, &mut buf)
                .and_then(|result| {
                    fs::write(path, &buf).map_err(|e| BasketError::ReportWrite {
                        reason: format!("{}: {}", path.display(), e),
                    })?;
                    Ok(result)
                })
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            run_calculate_pipeline(&holdings_port, report_port.as_ref(), &basket, &mut lock)
        }
    };

    match outcome {
        Ok(result) => {
            eprintln!(
                "\nWeighted PE for {}: {:.2}",
                basket.name, result.weighted_ratio
            );
            if let Some(path) = &output {
                eprintln!("Report written to: {}", path.display());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_parse_weight(text: &str) -> ExitCode {
    println!("{}", parse_percentage(text));
    ExitCode::SUCCESS
}

fn run_parse_pe(text: &str) -> ExitCode {
    match read_ratio(text) {
        RatioReading::Value(v) => println!("{}", v),
        RatioReading::NotAvailable => println!("N/A"),
        RatioReading::Unrecognised => {
            eprintln!("warning: no number found in '{}'", text);
            println!("N/A");
        }
    }
    ExitCode::SUCCESS
}

fn run_validate(config_path: &Path) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let checked = validate_basket_config(&adapter, false)
        .and_then(|()| validate_report_config(&adapter))
        .and_then(|()| build_basket_config(&adapter, None, None));
    match checked {
        Ok(basket) => {
            eprintln!("\nBasket:      {}", basket.name);
            eprintln!("Holdings:    {}", basket.holdings_path.display());
            eprintln!("Default PE:  {}", basket.default_ratio);
            if let Some(date) = basket.as_of {
                eprintln!("As of:       {}", date);
            }
            eprintln!("\nBasket configuration is valid.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}
