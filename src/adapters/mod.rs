//! Concrete adapter implementations for ports.

pub mod csv_holdings_adapter;
pub mod csv_report_adapter;
pub mod file_config_adapter;
pub mod text_report_adapter;
