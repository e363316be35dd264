//! Configuration types.

use std::str::FromStr;

use crate::error::ConfigError;

/// Default listen host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default listen port.
pub const DEFAULT_PORT: u16 = 8080;

/// Default cap on request body size (256 KiB). One page of OCR text is a
/// few KiB.
pub const DEFAULT_MAX_BODY_BYTES: usize = 256 * 1024;

/// HTTP server configuration, built from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Interface to bind (`LETTERLENS_HOST`).
    pub host: String,
    /// Port to bind (`PORT`); `0` picks an ephemeral port.
    pub port: u16,
    /// Largest accepted request body (`LETTERLENS_MAX_BODY_BYTES`).
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl ServerConfig {
    /// Build config from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from any key lookup. Unset or blank keys use defaults;
    /// values that don't parse are an error.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let host = lookup("LETTERLENS_HOST")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.host);

        let port = parse_var(&lookup, "PORT")?.unwrap_or(defaults.port);

        let max_body_bytes =
            parse_var(&lookup, "LETTERLENS_MAX_BODY_BYTES")?.unwrap_or(defaults.max_body_bytes);
        if max_body_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                key: "LETTERLENS_MAX_BODY_BYTES".into(),
                message: "must be greater than zero".into(),
            });
        }

        Ok(Self {
            host,
            port,
            max_body_bytes,
        })
    }

    /// `host:port` for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key).map(|s| s.trim().to_string()) {
        None => Ok(None),
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s.parse().map(Some).map_err(|e: T::Err| ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("{s:?}: {e}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ServerConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn reads_all_values() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("LETTERLENS_HOST", "127.0.0.1"),
            ("PORT", "9000"),
            ("LETTERLENS_MAX_BODY_BYTES", "1024"),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:9000");
        assert_eq!(config.max_body_bytes, 1024);
    }

    #[test]
    fn blank_values_use_defaults() {
        let config =
            ServerConfig::from_lookup(lookup_from(&[("PORT", " "), ("LETTERLENS_HOST", "")]))
                .unwrap();
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn invalid_port_is_an_error() {
        let err = ServerConfig::from_lookup(lookup_from(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "PORT"));
    }

    #[test]
    fn port_out_of_range_is_an_error() {
        assert!(ServerConfig::from_lookup(lookup_from(&[("PORT", "70000")])).is_err());
    }

    #[test]
    fn zero_body_limit_is_an_error() {
        assert!(
            ServerConfig::from_lookup(lookup_from(&[("LETTERLENS_MAX_BODY_BYTES", "0")])).is_err()
        );
    }
}
