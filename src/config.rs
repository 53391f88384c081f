//! Runtime configuration read from the environment (and `.env` via dotenvy).

use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_POOL_SIZE: u32 = 10;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has an invalid value '{value}': {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Which order store backs the service.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreConfig {
    Postgres {
        database_url: String,
        pool_size: u32,
    },
    Memory,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub store: StoreConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup; `from_env` passes `std::env::var`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match lookup("PORT") {
            Some(raw) => parse("PORT", raw)?,
            None => DEFAULT_PORT,
        };

        let backend = lookup("ORDER_STORE").unwrap_or_else(|| "postgres".to_string());
        let store = match backend.to_ascii_lowercase().as_str() {
            "memory" => StoreConfig::Memory,
            "postgres" => {
                let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
                let pool_size = match lookup("DATABASE_POOL_SIZE") {
                    Some(raw) => parse("DATABASE_POOL_SIZE", raw)?,
                    None => DEFAULT_POOL_SIZE,
                };
                if pool_size == 0 {
                    return Err(ConfigError::Invalid {
                        key: "DATABASE_POOL_SIZE",
                        value: "0".to_string(),
                        reason: "must be at least 1".to_string(),
                    });
                }
                StoreConfig::Postgres {
                    database_url,
                    pool_size,
                }
            }
            _ => {
                return Err(ConfigError::Invalid {
                    key: "ORDER_STORE",
                    value: backend,
                    reason: "expected 'postgres' or 'memory'".to_string(),
                })
            }
        };

        Ok(Config { host, port, store })
    }
}

fn parse<T>(key: &'static str, raw: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let parsed = raw.trim().parse::<T>();
    parsed.map_err(|e| ConfigError::Invalid {
        key,
        reason: e.to_string(),
        value: raw,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_to_postgres_and_requires_database_url() {
        assert_eq!(config(&[]), Err(ConfigError::Missing("DATABASE_URL")));
    }

    #[test]
    fn postgres_with_defaults() {
        let cfg = config(&[("DATABASE_URL", "postgres://localhost/orders")]).unwrap();

        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 8080);
        assert_eq!(
            cfg.store,
            StoreConfig::Postgres {
                database_url: "postgres://localhost/orders".to_string(),
                pool_size: 10,
            }
        );
    }

    #[test]
    fn memory_store_needs_no_database() {
        let cfg = config(&[("ORDER_STORE", "memory"), ("HOST", "127.0.0.1"), ("PORT", "8082")])
            .unwrap();

        assert_eq!(cfg.store, StoreConfig::Memory);
        assert_eq!(cfg.host, "127.0.0.1");
        assert_eq!(cfg.port, 8082);
    }

    #[test]
    fn invalid_port_is_reported() {
        let err = config(&[("ORDER_STORE", "memory"), ("PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));
    }

    #[test]
    fn zero_pool_size_is_rejected() {
        let err = config(&[("DATABASE_URL", "postgres://x"), ("DATABASE_POOL_SIZE", "0")])
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "DATABASE_POOL_SIZE", .. }));
    }

    #[test]
    fn unknown_store_is_rejected() {
        let err = config(&[("ORDER_STORE", "redis")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "ORDER_STORE", .. }));
    }
}
