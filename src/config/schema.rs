//! Configuration schema definitions.
//!
//! This module defines the service configuration and the bang definition
//! file format. All types derive Serde traits for deserialization from TOML.

use serde::{Deserialize, Serialize};

use crate::bang::BangDefinition;

/// Root configuration for the bangs service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Where bangs come from and how they are resolved.
    pub registry: RegistryConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Bang registry configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Path or `http(s)://` URL of the bang definition file.
    pub source: String,

    /// Forward input without a bang to the default engine.
    /// When false such input is rejected with 400.
    pub allow_no_bang: bool,

    /// Reject duplicate tokens instead of keeping the first one.
    pub strict: bool,

    /// Rebuild the registry when the (local) source file changes.
    pub watch: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            source: "bangs.toml".to_string(),
            allow_no_bang: true,
            strict: false,
            watch: false,
        }
    }
}

impl RegistryConfig {
    /// Whether the source is fetched over HTTP.
    pub fn is_remote(&self) -> bool {
        self.source.starts_with("http://") || self.source.starts_with("https://")
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout in seconds.
    pub request_secs: u64,

    /// Timeout for fetching a remote bang source, in seconds.
    pub fetch_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 10,
            fetch_secs: 15,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable, for development.
    #[default]
    Pretty,
    /// One JSON object per line, for log aggregation.
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Bang definition file.
///
/// ```toml
/// default = "https://duckduckgo.com/?q={}"
///
/// [[bangs]]
/// bang = "g"
/// url = "https://www.google.com/search?q={}"
/// name = "Google"
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct BangFile {
    /// Default engine template, used when the input has no bang.
    pub default: String,

    #[serde(default)]
    pub bangs: Vec<BangDefinition>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: ServiceConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.registry.source, "bangs.toml");
        assert!(config.registry.allow_no_bang);
        assert!(!config.registry.strict);
        assert_eq!(config.observability.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_partial_config() {
        let config: ServiceConfig = toml::from_str(
            r#"
            [registry]
            source = "https://example.com/bangs.toml"
            strict = true

            [observability]
            log_format = "json"
            "#,
        )
        .unwrap();
        assert!(config.registry.is_remote());
        assert!(config.registry.strict);
        assert!(config.registry.allow_no_bang);
        assert_eq!(config.observability.log_format, LogFormat::Json);
        assert_eq!(config.timeouts.request_secs, 10);
    }

    #[test]
    fn test_bang_file() {
        let file: BangFile = toml::from_str(
            r#"
            default = "https://duckduckgo.com/?q={}"

            [[bangs]]
            bang = "g"
            url = "https://www.google.com/search?q={}"
            name = "Google"
            category = "Search"

            [[bangs]]
            bang = "w"
            url = "https://en.wikipedia.org/wiki/{}"
            "#,
        )
        .unwrap();
        assert_eq!(file.bangs.len(), 2);
        assert_eq!(file.bangs[0].name.as_deref(), Some("Google"));
        assert_eq!(file.bangs[1].description, None);
    }
}
