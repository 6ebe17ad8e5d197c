//! Process configuration loaded from the environment.

use std::env;
use std::net::{AddrParseError, SocketAddr};

use thiserror::Error;

use orderdesk_observability::{LogFormat, UnknownLogFormat};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEV_JWT_SECRET: &str = "dev-secret";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("ORDERDESK_BIND_ADDR '{value}' is not a socket address: {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: AddrParseError,
    },

    #[error("JWT_SECRET must be set")]
    MissingJwtSecret,

    #[error("JWT_SECRET must not be empty")]
    EmptyJwtSecret,

    #[error("ORDERDESK_LOG_FORMAT: {0}")]
    InvalidLogFormat(#[from] UnknownLogFormat),
}

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub jwt_secret: String,
    pub log_format: LogFormat,
    /// True when `JWT_SECRET` was absent and the dev default was substituted.
    pub dev_secret: bool,
}

impl ApiConfig {
    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok(), cfg!(debug_assertions))
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// A missing `JWT_SECRET` falls back to a dev default only when
    /// `allow_dev_secret` is set.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        allow_dev_secret: bool,
    ) -> Result<Self, ConfigError> {
        let raw_addr = lookup("ORDERDESK_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr
            .parse()
            .map_err(|source| ConfigError::InvalidBindAddr {
                value: raw_addr.clone(),
                source,
            })?;

        let (jwt_secret, dev_secret) = match lookup("JWT_SECRET") {
            Some(secret) if secret.is_empty() => return Err(ConfigError::EmptyJwtSecret),
            Some(secret) => (secret, false),
            None if allow_dev_secret => (DEV_JWT_SECRET.to_string(), true),
            None => return Err(ConfigError::MissingJwtSecret),
        };

        let log_format = match lookup("ORDERDESK_LOG_FORMAT") {
            Some(raw) => raw.parse()?,
            None => LogFormat::default(),
        };

        Ok(Self {
            bind_addr,
            jwt_secret,
            log_format,
            dev_secret,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<&str, &str> = vars.iter().copied().collect();
        move |key: &str| map.get(key).map(|v| v.to_string())
    }

    #[test]
    fn defaults_in_dev() {
        let config = ApiConfig::from_lookup(lookup(&[]), true).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.jwt_secret, DEV_JWT_SECRET);
        assert!(config.dev_secret);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn secret_required_outside_dev() {
        let err = ApiConfig::from_lookup(lookup(&[]), false).unwrap_err();
        assert!(matches!(err, ConfigError::MissingJwtSecret));
    }

    #[test]
    fn empty_secret_rejected() {
        let err = ApiConfig::from_lookup(lookup(&[("JWT_SECRET", "")]), true).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyJwtSecret));
    }

    #[test]
    fn reads_all_variables() {
        let config = ApiConfig::from_lookup(
            lookup(&[
                ("ORDERDESK_BIND_ADDR", "127.0.0.1:9000"),
                ("JWT_SECRET", "s3cret"),
                ("ORDERDESK_LOG_FORMAT", "pretty"),
            ]),
            false,
        )
        .unwrap();

        assert_eq!(config.bind_addr, "127.0.0.1:9000".parse().unwrap());
        assert_eq!(config.jwt_secret, "s3cret");
        assert!(!config.dev_secret);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            ApiConfig::from_lookup(lookup(&[("ORDERDESK_BIND_ADDR", "nowhere")]), true),
            Err(ConfigError::InvalidBindAddr { .. })
        ));
        assert!(matches!(
            ApiConfig::from_lookup(lookup(&[("ORDERDESK_LOG_FORMAT", "xml")]), true),
            Err(ConfigError::InvalidLogFormat(_))
        ));
    }
}
