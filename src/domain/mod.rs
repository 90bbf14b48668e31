//! Core domain types and logic.

pub mod basket;
pub mod config_validation;
pub mod error;
pub mod holding;
pub mod text_parse;
pub mod weighted_ratio;
