//! SKU Pulse Core - Shared types and portfolio metrics.
//!
//! This crate provides the types and pure computations used across all SKU
//! Pulse components:
//! - `dashboard` - Configuration, Gemini analysis client, dashboard state
//! - `cli` - Command-line reports and on-demand analysis
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. Money is `rust_decimal::Decimal` and every division goes through
//! [`Ratio`], so a zero denominator is an explicit state rather than `NaN`.
//!
//! # Modules
//!
//! - [`types`] - SKU record, ratio sentinel, health label, analysis result
//! - [`metrics`] - Portfolio aggregator and per-row deriver
//! - [`health`] - Health label extraction from analysis text
//! - [`sample`] - Built-in sample dataset

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod health;
pub mod metrics;
pub mod sample;
pub mod types;

pub use metrics::{PortfolioMetrics, RowMetrics};
pub use types::*;
