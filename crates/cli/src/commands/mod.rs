//! CLI command implementations.

pub mod analyze;
pub mod metrics;
pub mod report;
