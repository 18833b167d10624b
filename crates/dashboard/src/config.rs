//! Dashboard configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `GEMINI_API_KEY` - Google Gemini API key (falls back to `API_KEY`)
//!
//! ## Optional
//! - `GEMINI_MODEL` - Model ID (default: gemini-3-flash-preview)
//! - `GEMINI_TEMPERATURE` - Sampling temperature, 0.0 to 2.0 (default: 0.5)
//! - `GEMINI_API_BASE_URL` - API base URL (default: <https://generativelanguage.googleapis.com>)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Sentry error sample rate (default: 1.0)
//! - `LOG_FORMAT` - `text` or `json` (default: text)

use std::collections::HashMap;
use std::str::FromStr;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;
const DEFAULT_GEMINI_MODEL: &str = "gemini-3-flash-preview";
const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
/// Moderate temperature, favouring consistent summaries over creative ones.
const DEFAULT_TEMPERATURE: f32 = 0.5;
const MAX_TEMPERATURE: f32 = 2.0;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Log output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("expected `text` or `json`, got `{s}`")),
        }
    }
}

/// Dashboard application configuration.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Gemini API configuration
    pub gemini: GeminiConfig,
    /// Logging and error tracking
    pub telemetry: TelemetryConfig,
}

/// Logging and Sentry configuration.
///
/// Loaded separately from [`GeminiConfig`] so that commands which never call
/// the API can run without a key.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Log output format
    pub log_format: LogFormat,
}

/// Gemini API configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct GeminiConfig {
    /// Google AI Studio API key
    pub api_key: SecretString,
    /// Model ID (e.g., gemini-3-flash-preview)
    pub model: String,
    /// Generation temperature
    pub temperature: f32,
    /// API base URL, without the `/v1beta` path
    pub base_url: Url,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

impl DashboardConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the API key is missing or fails validation,
    /// or if an optional variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`DashboardConfig::from_env`].
    pub fn from_lookup(vars: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            gemini: GeminiConfig::from_lookup(&vars)?,
            telemetry: TelemetryConfig::from_lookup(&vars)?,
        })
    }

    /// Returns a reference to the Gemini configuration.
    #[must_use]
    pub const fn gemini(&self) -> &GeminiConfig {
        &self.gemini
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            log_format: LogFormat::default(),
        }
    }
}

impl TelemetryConfig {
    /// Load logging configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if `LOG_FORMAT` is not `text` or
    /// `json`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        Self::from_lookup(&|key: &str| std::env::var(key).ok())
    }

    fn from_lookup(vars: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let sentry_sample_rate = vars("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let log_format = vars("LOG_FORMAT")
            .map(|s| s.parse::<LogFormat>())
            .transpose()
            .map_err(|e| ConfigError::InvalidEnvVar("LOG_FORMAT".to_string(), e))?
            .unwrap_or_default();

        Ok(Self {
            sentry_dsn: vars("SENTRY_DSN").filter(|dsn| !dsn.is_empty()),
            sentry_environment: vars("SENTRY_ENVIRONMENT"),
            sentry_sample_rate,
            log_format,
        })
    }
}

impl GeminiConfig {
    fn from_lookup(vars: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = get_api_key(vars)?;

        let temperature = vars("GEMINI_TEMPERATURE")
            .map_or(Ok(DEFAULT_TEMPERATURE), |s| s.parse::<f32>())
            .map_err(|e| {
                ConfigError::InvalidEnvVar("GEMINI_TEMPERATURE".to_string(), e.to_string())
            })?;
        if !(0.0..=MAX_TEMPERATURE).contains(&temperature) {
            return Err(ConfigError::InvalidEnvVar(
                "GEMINI_TEMPERATURE".to_string(),
                format!("must be between 0.0 and {MAX_TEMPERATURE:.1} (got {temperature})"),
            ));
        }

        let base_url = get_env_or_default(vars, "GEMINI_API_BASE_URL", DEFAULT_GEMINI_BASE_URL)
            .parse::<Url>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("GEMINI_API_BASE_URL".to_string(), e.to_string())
            })?;

        Ok(Self {
            api_key,
            model: get_env_or_default(vars, "GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
            temperature,
            base_url,
        })
    }

    /// Configuration with the default model, temperature and endpoint.
    ///
    /// # Panics
    ///
    /// Panics if the built-in default base URL fails to parse.
    #[must_use]
    pub fn with_api_key(api_key: SecretString) -> Self {
        Self {
            api_key,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            base_url: default_base_url(),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn default_base_url() -> Url {
    Url::parse(DEFAULT_GEMINI_BASE_URL).expect("default base URL is valid")
}

/// Get the API key, falling back to the generic `API_KEY` used by AI Studio
/// app templates.
fn get_api_key(vars: &impl Fn(&str) -> Option<String>) -> Result<SecretString, ConfigError> {
    let (key, value) = vars("GEMINI_API_KEY")
        .map(|v| ("GEMINI_API_KEY", v))
        .or_else(|| vars("API_KEY").map(|v| ("API_KEY", v)))
        .ok_or_else(|| ConfigError::MissingEnvVar("GEMINI_API_KEY".to_string()))?;

    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}

/// Get an environment variable with a default value.
fn get_env_or_default(vars: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    vars(key).unwrap_or_else(|| default.to_string())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    // Check blocklist
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    // Real API keys are random strings with high entropy
    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use the key issued by Google AI Studio."
            ),
        ));
    }

    Ok(())
}
