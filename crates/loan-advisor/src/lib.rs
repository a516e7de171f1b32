//! Loan program eligibility scoring and home affordability analysis.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
