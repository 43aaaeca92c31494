use std::net::SocketAddr;
use std::time::Duration;

use digest_engine::{ModelSettings, PipelineSettings};
use digest_logging::LogDestination;
use log::LevelFilter;
use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8787";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AppConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// Server configuration, read from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub model: ModelSettings,
    pub pipeline: PipelineSettings,
    pub log_destination: LogDestination,
    pub log_level: LevelFilter,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from `lookup`. Unset or blank keys keep their
    /// defaults; a missing API key is allowed and surfaces on the first run.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppConfigError> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let bind_raw = get("DIGEST_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .trim()
            .parse::<SocketAddr>()
            .map_err(|_| AppConfigError::InvalidValue {
                key: "DIGEST_BIND_ADDR",
                value: bind_raw.clone(),
            })?;

        let mut model = ModelSettings {
            api_key: get("CLAUDE_API_KEY"),
            ..ModelSettings::default()
        };
        if let Some(name) = get("CLAUDE_MODEL") {
            model.model = name;
        }
        if let Some(endpoint) = get("CLAUDE_API_URL") {
            model.endpoint = endpoint;
        }

        let mut pipeline = PipelineSettings::default();
        if let Some(raw) = get("DIGEST_CALL_DELAY_MS") {
            let millis: u64 = raw
                .trim()
                .parse()
                .map_err(|_| AppConfigError::InvalidValue {
                    key: "DIGEST_CALL_DELAY_MS",
                    value: raw.clone(),
                })?;
            pipeline.inter_call_delay = Duration::from_millis(millis);
        }

        let log_destination = match get("DIGEST_LOG") {
            Some(raw) => LogDestination::parse(&raw).ok_or(AppConfigError::InvalidValue {
                key: "DIGEST_LOG",
                value: raw,
            })?,
            None => LogDestination::default(),
        };
        let log_level = match get("DIGEST_LOG_LEVEL") {
            Some(raw) => raw
                .trim()
                .parse::<LevelFilter>()
                .map_err(|_| AppConfigError::InvalidValue {
                    key: "DIGEST_LOG_LEVEL",
                    value: raw.clone(),
                })?,
            None => LevelFilter::Info,
        };

        Ok(Self {
            bind_addr,
            model,
            pipeline,
            log_destination,
            log_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, AppConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config(&[]).unwrap();
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR.parse::<SocketAddr>().unwrap());
        assert_eq!(config.model.api_key, None);
        assert_eq!(config.pipeline.inter_call_delay, Duration::from_secs(2));
        assert_eq!(config.pipeline.max_content_length, 150_000);
        assert_eq!(config.log_destination, LogDestination::Terminal);
        assert_eq!(config.log_level, LevelFilter::Info);
    }

    #[test]
    fn overrides_are_read() {
        let config = config(&[
            ("CLAUDE_API_KEY", "secret"),
            ("CLAUDE_MODEL", "claude-test"),
            ("DIGEST_BIND_ADDR", "127.0.0.1:9000"),
            ("DIGEST_CALL_DELAY_MS", "1500"),
            ("DIGEST_LOG", "both"),
            ("DIGEST_LOG_LEVEL", "debug"),
        ])
        .unwrap();
        assert_eq!(config.model.api_key.as_deref(), Some("secret"));
        assert_eq!(config.model.model, "claude-test");
        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.pipeline.inter_call_delay, Duration::from_millis(1500));
        assert_eq!(config.log_destination, LogDestination::Both);
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn blank_key_counts_as_unset() {
        let config = config(&[("CLAUDE_API_KEY", "  ")]).unwrap();
        assert_eq!(config.model.api_key, None);
    }

    #[test]
    fn bad_delay_is_rejected() {
        let err = config(&[("DIGEST_CALL_DELAY_MS", "soon")]).unwrap_err();
        assert_eq!(
            err,
            AppConfigError::InvalidValue {
                key: "DIGEST_CALL_DELAY_MS",
                value: "soon".to_string(),
            }
        );
    }
}
