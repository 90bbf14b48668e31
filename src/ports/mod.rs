//! Port traits for the collaborators around the core.

pub mod config_port;
pub mod holdings_port;
pub mod report_port;
