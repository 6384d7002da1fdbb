//! Gateway configuration.
//!
//! # Environment variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `PORT` | `5000` | TCP port to listen on. |
//! | `HEARTWISE_HOST` | `0.0.0.0` | Bind address. |
//! | `HEARTWISE_MODEL_PATH` | `models/heart_disease_model.json` | Classifier artifact. |
//! | `HEARTWISE_CONFIDENCE_POLICY` | `predicted_class` | `predicted_class` or `positive_class`. |
//! | `HEARTWISE_MAX_BODY_BYTES` | `65536` | Request body cap. |
//! | `HEARTWISE_LOG_FORMAT` | `pretty` | `pretty` or `json`. |
//!
//! Unset or blank variables take the default. A value that is set but does
//! not parse is an error.

use heartwise_kernel::ConfidencePolicy;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_MODEL_PATH: &str = "models/heart_disease_model.json";
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{other}' (expected 'pretty' or 'json')")),
        }
    }
}

/// Runtime configuration for [`GatewayServer`](crate::server::GatewayServer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
    pub model_path: PathBuf,
    pub confidence_policy: ConfidencePolicy,
    /// Largest accepted request body; larger bodies get `413`.
    pub max_body_bytes: usize,
    pub log_format: LogFormat,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            confidence_policy: ConfidencePolicy::default(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            log_format: LogFormat::default(),
        }
    }
}

impl GatewayConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        Ok(Self {
            host: get("HEARTWISE_HOST").unwrap_or(defaults.host),
            port: parse_or("PORT", get("PORT"), defaults.port)?,
            model_path: get("HEARTWISE_MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.model_path),
            confidence_policy: parse_or(
                "HEARTWISE_CONFIDENCE_POLICY",
                get("HEARTWISE_CONFIDENCE_POLICY"),
                defaults.confidence_policy,
            )?,
            max_body_bytes: parse_or(
                "HEARTWISE_MAX_BODY_BYTES",
                get("HEARTWISE_MAX_BODY_BYTES"),
                defaults.max_body_bytes,
            )?,
            log_format: parse_or(
                "HEARTWISE_LOG_FORMAT",
                get("HEARTWISE_LOG_FORMAT"),
                defaults.log_format,
            )?,
        })
    }

    /// `host:port` to bind.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: ToString,
{
    match raw {
        None => Ok(default),
        Some(value) => match value.parse::<T>() {
            Ok(parsed) => Ok(parsed),
            Err(e) => Err(ConfigError::InvalidValue {
                key,
                reason: e.to_string(),
                value,
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let cfg = GatewayConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg, GatewayConfig::default());
        assert_eq!(cfg.port, 5000);
        assert_eq!(cfg.bind_addr(), "0.0.0.0:5000");
        assert_eq!(cfg.confidence_policy, ConfidencePolicy::PredictedClass);
    }

    #[test]
    fn reads_every_variable() {
        let cfg = GatewayConfig::from_lookup(lookup(&[
            ("PORT", "8080"),
            ("HEARTWISE_HOST", "127.0.0.1"),
            ("HEARTWISE_MODEL_PATH", "/srv/models/forest.json"),
            ("HEARTWISE_CONFIDENCE_POLICY", "positive_class"),
            ("HEARTWISE_MAX_BODY_BYTES", "1024"),
            ("HEARTWISE_LOG_FORMAT", "json"),
        ]))
        .unwrap();
        assert_eq!(cfg.bind_addr(), "127.0.0.1:8080");
        assert_eq!(cfg.model_path, PathBuf::from("/srv/models/forest.json"));
        assert_eq!(cfg.confidence_policy, ConfidencePolicy::PositiveClass);
        assert_eq!(cfg.max_body_bytes, 1024);
        assert_eq!(cfg.log_format, LogFormat::Json);
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let cfg = GatewayConfig::from_lookup(lookup(&[("PORT", "  "), ("HEARTWISE_HOST", "")]))
            .unwrap();
        assert_eq!(cfg.port, DEFAULT_PORT);
        assert_eq!(cfg.host, DEFAULT_HOST);
    }

    #[test]
    fn unparsable_port_is_an_error() {
        let err = GatewayConfig::from_lookup(lookup(&[("PORT", "http")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { key: "PORT", ref value, .. } if value == "http"
        ));
    }

    #[test]
    fn unknown_policy_and_log_format_are_errors() {
        assert!(
            GatewayConfig::from_lookup(lookup(&[("HEARTWISE_CONFIDENCE_POLICY", "max")])).is_err()
        );
        assert!(GatewayConfig::from_lookup(lookup(&[("HEARTWISE_LOG_FORMAT", "xml")])).is_err());
    }
}
