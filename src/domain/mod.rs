//! Core domain types and logic.

pub mod config_validation;
pub mod error;
pub mod event_log;
pub mod ledger;
pub mod price_process;
pub mod session;
