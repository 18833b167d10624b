//! Gemini API integration for on-demand business analysis.
//!
//! # Features
//!
//! - Single `generateContent` call per analysis (no retry, no streaming)
//! - Full dataset embedded in the prompt as pretty-printed JSON
//! - Distinguishable errors for transport, API, auth and rate-limit failures

mod client;
mod error;
mod types;

pub use client::GeminiClient;
pub use error::{ApiError, ApiErrorResponse, GeminiError};
pub use types::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part,
    UsageMetadata,
};
