use log::{info, warn};
use std::{env, fmt::Display, path::PathBuf, str::FromStr};
use thiserror::Error;

/// Reset token used when `RESET_TOKEN` is unset. Anyone reading the source
/// knows it, so it is only fit for local development.
pub const FALLBACK_RESET_TOKEN: &str = "change-me-reset-token";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    File,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(Self::File),
            "memory" => Ok(Self::Memory),
            other => Err(format!("expected \"file\" or \"memory\", got {:?}", other)),
        }
    }
}

pub struct Config {
    pub port: u16,
    pub storage: StorageBackend,
    pub votes_path: PathBuf,
    pub reset_token: String,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, process env in production.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let reset_token = match lookup("RESET_TOKEN").filter(|t| !t.is_empty()) {
            Some(token) => token,
            None => {
                warn!(
                    "RESET_TOKEN not set, using the built-in fallback token. \
                     Do not run like this in production"
                );
                FALLBACK_RESET_TOKEN.to_string()
            }
        };

        Ok(Self {
            port: try_load(&lookup, "PORT", "5000")?,
            storage: try_load(&lookup, "POLL_STORAGE", "file")?,
            votes_path: try_load(&lookup, "POLL_VOTES_PATH", "votes.json")?,
            reset_token,
        })
    }
}

fn try_load<T, F>(lookup: &F, key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    let parsed: Result<T, T::Err> = value.parse();
    parsed.map_err(|e| ConfigError::Invalid {
        key,
        reason: e.to_string(),
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.port, 5000);
        assert_eq!(config.storage, StorageBackend::File);
        assert_eq!(config.votes_path, PathBuf::from("votes.json"));
        assert_eq!(config.reset_token, FALLBACK_RESET_TOKEN);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("POLL_STORAGE", "Memory"),
            ("POLL_VOTES_PATH", "/var/lib/poll/votes.json"),
            ("RESET_TOKEN", "op-token"),
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.votes_path, PathBuf::from("/var/lib/poll/votes.json"));
        assert_eq!(config.reset_token, "op-token");
    }

    #[test]
    fn test_empty_token_uses_fallback() {
        let config = config_from(&[("RESET_TOKEN", "")]).unwrap();
        assert_eq!(config.reset_token, FALLBACK_RESET_TOKEN);
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        let err = config_from(&[("PORT", "eighty")]).err().unwrap();
        assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));
    }

    #[test]
    fn test_unknown_backend_is_an_error() {
        let err = config_from(&[("POLL_STORAGE", "redis")]).err().unwrap();
        assert!(matches!(err, ConfigError::Invalid { key: "POLL_STORAGE", .. }));
    }
}
