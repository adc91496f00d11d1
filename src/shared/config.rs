//! Application configuration. Backend endpoint, retry policy, localization.

use crate::domain::RetryPolicy;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Default per-request timeout for the HTTP backend.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

/// Default message locale (reference deployment is Thai).
pub const DEFAULT_LOCALE: &str = "th";

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Procedure root of the admin backend. Read from DISPATCH_ADMIN_BACKEND_URL.
    /// When unset, the in-memory backend is used.
    #[serde(default)]
    pub backend_url: Option<String>,

    /// Bearer token sent with each procedure call. Read from DISPATCH_ADMIN_API_TOKEN.
    #[serde(default)]
    pub api_token: Option<String>,

    /// Per-request timeout in seconds (default 15).
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    // ─────────────────────────────────────────────────────────────────────────
    // Retry policy
    // ─────────────────────────────────────────────────────────────────────────
    /// Total call attempts per invocation (default 3).
    #[serde(default)]
    pub max_attempts: Option<u32>,

    /// Delay before the first retry in ms (default 1000).
    #[serde(default)]
    pub base_delay_ms: Option<u64>,

    /// Growth factor between retries (default 2.0).
    #[serde(default)]
    pub backoff_multiplier: Option<f64>,

    /// Upper bound for any single delay in ms (default 8000).
    #[serde(default)]
    pub max_delay_ms: Option<u64>,

    /// Comma-separated transport codes added to the retry allow-list.
    #[serde(default)]
    pub extra_transient_codes: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Localization
    // ─────────────────────────────────────────────────────────────────────────
    /// Built-in catalog locale: "th" (default) or "en".
    #[serde(default)]
    pub locale: Option<String>,

    /// Optional JSON message table replacing the built-in catalog.
    #[serde(default)]
    pub catalog_path: Option<String>,
}

impl AppConfig {
    /// Load from `DISPATCH_ADMIN_*` env vars, plus the file named by DISPATCH_ADMIN_CONFIG.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        if let Ok(path) = std::env::var("DISPATCH_ADMIN_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c = c.add_source(config::Environment::with_prefix("DISPATCH_ADMIN").try_parsing(true));
        c.build()?.try_deserialize()
    }

    /// Load from a single config file (TOML, JSON, YAML by extension).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .build()?
            .try_deserialize()
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        let defaults = RetryPolicy::default();
        RetryPolicy {
            max_attempts: self.max_attempts.unwrap_or(defaults.max_attempts).max(1),
            base_delay_ms: self.base_delay_ms.unwrap_or(defaults.base_delay_ms),
            backoff_multiplier: self
                .backoff_multiplier
                .unwrap_or(defaults.backoff_multiplier),
            max_delay_ms: self.max_delay_ms.unwrap_or(defaults.max_delay_ms),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    pub fn locale_or_default(&self) -> &str {
        self.locale.as_deref().unwrap_or(DEFAULT_LOCALE)
    }

    /// Extra retryable transport codes, trimmed, empties dropped.
    pub fn extra_transient_codes(&self) -> Vec<String> {
        self.extra_transient_codes
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Returns true if a remote backend URL is configured.
    pub fn is_backend_configured(&self) -> bool {
        self.backend_url
            .as_deref()
            .is_some_and(|url| !url.trim().is_empty())
    }
}
