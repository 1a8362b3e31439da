//! Client configuration loaded from environment variables.
//!
//! Every field has a default, so a client can start with no configuration at
//! all.

use volt_shared::constants::DEFAULT_API_URL;

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the REST API.
    /// Env: `VOLT_API_URL`
    /// Default: `https://api.revolt.chat`
    pub api_url: String,

    /// Session name sent with logins.
    /// Env: `VOLT_FRIENDLY_NAME`
    /// Default: none
    pub friendly_name: Option<String>,

    /// Run without the event feed. Settings stay mocked and are never
    /// merged.
    /// Env: `VOLT_HTTP_ONLY` (true/false)
    /// Default: `false`
    pub http_only: bool,

    /// Tracing filter used when `RUST_LOG` is unset.
    /// Env: `VOLT_LOG`
    /// Default: `info,volt_client=debug,volt_store=debug`
    pub log_filter: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            friendly_name: None,
            http_only: false,
            log_filter: "info,volt_client=debug,volt_store=debug".to_string(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = var("VOLT_API_URL") {
            if url.starts_with("http://") || url.starts_with("https://") {
                config.api_url = url.trim_end_matches('/').to_string();
            } else {
                tracing::warn!(value = %url, "Invalid VOLT_API_URL, using default");
            }
        }

        if let Some(name) = var("VOLT_FRIENDLY_NAME") {
            if !name.is_empty() {
                config.friendly_name = Some(name);
            }
        }

        if let Some(val) = var("VOLT_HTTP_ONLY") {
            match parse_flag(&val) {
                Some(flag) => config.http_only = flag,
                None => tracing::warn!(value = %val, "Invalid VOLT_HTTP_ONLY, using default"),
            }
        }

        // RUST_LOG still wins; see `init_tracing`.
        if let Some(filter) = var("VOLT_LOG") {
            if !filter.is_empty() {
                config.log_filter = filter;
            }
        }

        config
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
