//! CLI integration tests for the calculate command orchestration.
//!
//! Tests cover:
//! - Config resolution (build_basket_config) with and without overrides
//! - Report adapter selection
//! - The calculate pipeline with MockHoldingsPort
//! - End-to-end runs against INI and CSV files on disk

mod common;

use approx::assert_relative_eq;
use basketpe::adapters::file_config_adapter::FileConfigAdapter;
use basketpe::cli::{self, Cli};
use basketpe::domain::basket::BasketConfig;
use basketpe::domain::error::BasketError;
use basketpe::ports::report_port::ReportFormat;
use chrono::NaiveDate;
use clap::Parser;
use common::*;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

const VALID_INI: &str = r#"
[basket]
name = KWEB
holdings = kweb_holdings.csv
default_pe = 18
as_of = 2024-06-30

[report]
format = text
"#;

// ExitCode has no PartialEq; compare the Debug rendering instead.
fn assert_exit(actual: ExitCode, expected: ExitCode) {
    assert_eq!(format!("{:?}", actual), format!("{:?}", expected));
}

mod config_loading {
    use super::*;

    #[test]
    fn build_basket_config_from_ini() {
        let adapter = FileConfigAdapter::from_string(VALID_INI).unwrap();
        let basket = cli::build_basket_config(&adapter, None, None).unwrap();

        assert_eq!(basket.name, "KWEB");
        assert_eq!(basket.holdings_path, PathBuf::from("kweb_holdings.csv"));
        assert_eq!(basket.default_ratio, 18.0);
        assert_eq!(basket.as_of, NaiveDate::from_ymd_opt(2024, 6, 30));
    }

    #[test]
    fn build_basket_config_defaults() {
        let adapter = FileConfigAdapter::from_string("[basket]\nholdings = h.csv\n").unwrap();
        let basket = cli::build_basket_config(&adapter, None, None).unwrap();

        assert_eq!(basket.name, "basket");
        assert_eq!(basket.default_ratio, 20.0);
        assert_eq!(basket.as_of, None);
    }

    #[test]
    fn build_basket_config_overrides_win() {
        let adapter = FileConfigAdapter::from_string(VALID_INI).unwrap();
        let holdings = PathBuf::from("other.csv");
        let basket = cli::build_basket_config(&adapter, Some(&holdings), Some(25.0)).unwrap();

        assert_eq!(basket.holdings_path, holdings);
        assert_eq!(basket.default_ratio, 25.0);
    }

    #[test]
    fn build_basket_config_missing_holdings() {
        let adapter = FileConfigAdapter::from_string("[basket]\nname = KWEB\n").unwrap();
        let err = cli::build_basket_config(&adapter, None, None).unwrap_err();
        assert!(matches!(err, BasketError::ConfigMissing { key, .. } if key == "holdings"));
    }

    #[test]
    fn build_basket_config_bad_as_of() {
        let adapter =
            FileConfigAdapter::from_string("[basket]\nholdings = h.csv\nas_of = June\n").unwrap();
        let err = cli::build_basket_config(&adapter, None, None).unwrap_err();
        assert!(matches!(err, BasketError::ConfigInvalid { key, .. } if key == "as_of"));
    }
}

mod pipeline {
    use super::*;

    fn basket() -> BasketConfig {
        BasketConfig::new("KWEB", "mock.csv")
    }

    #[test]
    fn text_pipeline_writes_report() {
        let port = sample_holdings()
            .into_iter()
            .fold(MockHoldingsPort::new(), |p, h| p.with_holding(h));
        let report = cli::report_adapter(ReportFormat::Text);
        let mut out = Vec::new();

        let result = cli::run_calculate_pipeline(&port, report.as_ref(), &basket(), &mut out).unwrap();

        assert_relative_eq!(result.weighted_ratio, 1788.35, epsilon = 1e-9);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("1. Alibaba Group (BABA): PE=12.3, Weight=25.5%"));
        assert!(text.contains("Total weighted PE for KWEB: 1788.35"));
    }

    #[test]
    fn csv_pipeline_writes_rows() {
        let port = MockHoldingsPort::new().with_holding(make_holding("AAA", 50.0, None));
        let report = cli::report_adapter(ReportFormat::Csv);
        let mut out = Vec::new();

        cli::run_calculate_pipeline(&port, report.as_ref(), &basket(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "index,name,symbol,weight,pe,pe_source,contribution");
        assert_eq!(lines[1], "1,AAA Ltd,AAA,50,20,default,1000.0000");
        assert_eq!(lines[3], ",total,,100,20.0000,weighted,2000.0000");
    }

    #[test]
    fn pipeline_uses_basket_default_ratio() {
        let port = MockHoldingsPort::new().with_holding(make_holding("AAA", 10.0, None));
        let report = cli::report_adapter(ReportFormat::Text);
        let basket = BasketConfig {
            default_ratio: 10.0,
            ..basket()
        };
        let mut out = Vec::new();

        let result = cli::run_calculate_pipeline(&port, report.as_ref(), &basket, &mut out).unwrap();
        assert_eq!(result.weighted_ratio, 1000.0);
    }

    #[test]
    fn pipeline_propagates_holdings_error() {
        let port = MockHoldingsPort::new().with_error("page did not load");
        let report = cli::report_adapter(ReportFormat::Text);
        let mut out = Vec::new();

        let err = cli::run_calculate_pipeline(&port, report.as_ref(), &basket(), &mut out).unwrap_err();
        assert!(matches!(err, BasketError::HoldingsRead { reason, .. } if reason == "page did not load"));
        assert!(out.is_empty());
    }
}

mod end_to_end {
    use super::*;

    fn write_config(dir: &tempfile::TempDir, holdings: &std::path::Path, extra: &str) -> PathBuf {
        let path = dir.path().join("basket.ini");
        let ini = format!(
            "[basket]\nname = KWEB\nholdings = {}\n{}",
            holdings.display(),
            extra
        );
        fs::write(&path, ini).unwrap();
        path
    }

    fn run(args: &[&str]) -> ExitCode {
        cli::run(Cli::try_parse_from(args).unwrap())
    }

    #[test]
    fn calculate_writes_text_report_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let holdings = dir.path().join("holdings.csv");
        fs::write(&holdings, KWEB_CSV).unwrap();
        let config = write_config(&dir, &holdings, "");
        let output = dir.path().join("report.txt");

        let code = run(&[
            "basketpe",
            "calculate",
            "--config",
            config.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
        ]);

        assert_exit(code, ExitCode::SUCCESS);
        let report = fs::read_to_string(&output).unwrap();
        assert!(report.contains("=== Weighted PE Calculation: KWEB ==="));
        assert!(report.contains("Total weighted PE for KWEB: 1788.35"));
    }

    #[test]
    fn calculate_honours_format_and_default_pe_flags() {
        let dir = tempfile::TempDir::new().unwrap();
        let holdings = dir.path().join("holdings.csv");
        fs::write(&holdings, "name,symbol,weight,pe\nTencent,0700.HK,10%,N/A\n").unwrap();
        let config = write_config(&dir, &holdings, "default_pe = 30\n");
        let output = dir.path().join("report.csv");

        let code = run(&[
            "basketpe",
            "calculate",
            "-c",
            config.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
            "--format",
            "csv",
            "--default-pe",
            "10",
        ]);

        assert_exit(code, ExitCode::SUCCESS);
        let report = fs::read_to_string(&output).unwrap();
        assert!(report.contains("1,Tencent,0700.HK,10,10,default,100.0000"));
        assert!(report.contains(",total,,100,10.0000,weighted,1000.0000"));
    }

    #[test]
    fn calculate_uses_report_output_from_config() {
        let dir = tempfile::TempDir::new().unwrap();
        let holdings = dir.path().join("holdings.csv");
        fs::write(&holdings, KWEB_CSV).unwrap();
        let output = dir.path().join("from_config.csv");
        let extra = format!("\n[report]\nformat = csv\noutput = {}\n", output.display());
        let config = write_config(&dir, &holdings, &extra);

        let code = run(&["basketpe", "calculate", "-c", config.to_str().unwrap()]);

        assert_exit(code, ExitCode::SUCCESS);
        let report = fs::read_to_string(&output).unwrap();
        assert!(report.starts_with("index,name,symbol,weight,pe,pe_source,contribution"));
    }

    #[test]
    fn calculate_holdings_override() {
        let dir = tempfile::TempDir::new().unwrap();
        let holdings = dir.path().join("override.csv");
        fs::write(&holdings, KWEB_CSV).unwrap();
        let config_path = dir.path().join("basket.ini");
        fs::write(&config_path, "[basket]\nname = KWEB\n").unwrap();
        let output = dir.path().join("report.txt");

        let code = run(&[
            "basketpe",
            "calculate",
            "-c",
            config_path.to_str().unwrap(),
            "--holdings",
            holdings.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ]);

        assert_exit(code, ExitCode::SUCCESS);
        assert!(fs::read_to_string(&output).unwrap().contains("1788.35"));
    }

    #[test]
    fn calculate_missing_holdings_file_exits_3() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = write_config(&dir, &dir.path().join("absent.csv"), "");
        let output = dir.path().join("report.txt");

        let code = run(&[
            "basketpe",
            "calculate",
            "-c",
            config.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ]);

        assert_exit(code, ExitCode::from(3));
    }

    #[test]
    fn failed_calculate_keeps_previous_report() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = write_config(&dir, &dir.path().join("absent.csv"), "");
        let output = dir.path().join("report.txt");
        fs::write(&output, "last good report\n").unwrap();

        let code = run(&[
            "basketpe",
            "calculate",
            "-c",
            config.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ]);

        assert_exit(code, ExitCode::from(3));
        assert_eq!(fs::read_to_string(&output).unwrap(), "last good report\n");
    }

    #[test]
    fn malformed_holdings_leave_no_output_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let holdings = dir.path().join("holdings.csv");
        fs::write(&holdings, "name,symbol,weight,pe\nJD.com,JD\n").unwrap();
        let config = write_config(&dir, &holdings, "");
        let output = dir.path().join("report.txt");

        let code = run(&[
            "basketpe",
            "calculate",
            "-c",
            config.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ]);

        assert_exit(code, ExitCode::from(3));
        assert!(!output.exists());
    }

    #[test]
    fn calculate_invalid_default_pe_exits_2() {
        let dir = tempfile::TempDir::new().unwrap();
        let holdings = dir.path().join("holdings.csv");
        fs::write(&holdings, KWEB_CSV).unwrap();
        let config = write_config(&dir, &holdings, "default_pe = lots\n");

        let code = run(&["basketpe", "calculate", "-c", config.to_str().unwrap()]);
        assert_exit(code, ExitCode::from(2));
    }

    #[test]
    fn calculate_missing_config_exits_2() {
        let code = run(&["basketpe", "calculate", "-c", "/nonexistent/basket.ini"]);
        assert_exit(code, ExitCode::from(2));
    }

    #[test]
    fn validate_accepts_valid_config() {
        let file = write_temp_file(VALID_INI);
        let code = run(&["basketpe", "validate", "-c", file.path().to_str().unwrap()]);
        assert_exit(code, ExitCode::SUCCESS);
    }

    #[test]
    fn validate_rejects_unknown_format() {
        let file = write_temp_file("[basket]\nholdings = h.csv\n[report]\nformat = pdf\n");
        let code = run(&["basketpe", "validate", "-c", file.path().to_str().unwrap()]);
        assert_exit(code, ExitCode::from(2));
    }

    #[test]
    fn parse_subcommands_succeed() {
        assert_exit(run(&["basketpe", "parse-weight", "12.34%"]), ExitCode::SUCCESS);
        assert_exit(run(&["basketpe", "parse-pe", "N/A"]), ExitCode::SUCCESS);
        assert_exit(run(&["basketpe", "parse-pe", "-3.2"]), ExitCode::SUCCESS);
    }
}
