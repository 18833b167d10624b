//! SKU Pulse Dashboard - Analysis client, dashboard state and report rendering.
//!
//! This crate holds everything above the pure computations in
//! `sku-pulse-core` that the command-line front end needs:
//!
//! - [`config`] - Environment configuration (Gemini key, Sentry, log format)
//! - [`gemini`] - Gemini `generateContent` client
//! - [`prompt`] - Analysis prompt template
//! - [`analyzer`] - Seam between the dashboard state and the model client
//! - [`state`] - Analysis lifecycle (loading, error, latest result)
//! - [`dataset`] - Loading SKU records from the sample set or a file
//! - [`report`] - Plain-text KPI cards, SKU table and analysis panel

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod analyzer;
pub mod config;
pub mod dataset;
pub mod gemini;
pub mod prompt;
pub mod report;
pub mod state;

pub use analyzer::Analyzer;
pub use config::{ConfigError, DashboardConfig, GeminiConfig, LogFormat, TelemetryConfig};
pub use dataset::{DatasetError, load_dataset};
pub use gemini::{GeminiClient, GeminiError};
pub use state::{ANALYSIS_FAILED_MESSAGE, AnalysisTicket, DashboardState, Settlement, StateError};
