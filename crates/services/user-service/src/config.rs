//! User service configuration.

use std::env;

use thiserror::Error;
use url::Url;

use common::{DatabaseConfig, ServerConfig};

/// Required: page size used when a list request carries no usable limit.
pub const ENV_PAGINATOR_LIMIT_DEFAULT: &str = "PAGINATOR_LIMIT_DEFAULT";

/// Configuration errors are fatal at startup.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("{key} has an invalid value '{value}'")]
    Invalid { key: &'static str, value: String },
}

/// User service configuration.
#[derive(Debug, Clone)]
pub struct UserServiceConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    /// Page size applied when the request limit is zero or missing
    pub default_page_limit: u64,
}

impl UserServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let default_page_limit = lookup(ENV_PAGINATOR_LIMIT_DEFAULT)
            .filter(|value| !value.is_empty())
            .ok_or(ConfigError::Missing(ENV_PAGINATOR_LIMIT_DEFAULT))
            .and_then(|value| match value.parse::<u64>() {
                Ok(limit) if limit > 0 => Ok(limit),
                _ => Err(ConfigError::Invalid {
                    key: ENV_PAGINATOR_LIMIT_DEFAULT,
                    value,
                }),
            })?;

        let server_defaults = ServerConfig::default();
        let server = ServerConfig {
            host: lookup("HOST").unwrap_or(server_defaults.host),
            port: parse_or(&lookup, "PORT", server_defaults.port)?,
            request_timeout_ms: parse_or(
                &lookup,
                "REQUEST_TIMEOUT_MS",
                server_defaults.request_timeout_ms,
            )?,
        };

        let database_defaults = DatabaseConfig::default();
        let database = DatabaseConfig {
            url: match lookup("DATABASE_URL") {
                Some(url) => url,
                None => database_url_from_parts(&lookup)?.unwrap_or(database_defaults.url),
            },
            max_connections: parse_or(
                &lookup,
                "DB_MAX_CONNECTIONS",
                database_defaults.max_connections,
            )?,
            min_connections: parse_or(
                &lookup,
                "DB_MIN_CONNECTIONS",
                database_defaults.min_connections,
            )?,
            debug: lookup("DB_DEBUG").is_some_and(|v| v == "true"),
            auto_migrate: lookup("DB_AUTO_MIGRATE").is_some_and(|v| v == "true"),
        };

        Ok(Self {
            server,
            database,
            default_page_limit,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}

/// Assemble a Postgres URL from `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASS`
/// and `DB_NAME` when all of them are set. Credentials and the database
/// name are percent-encoded.
fn database_url_from_parts<F>(lookup: &F) -> Result<Option<String>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let (Some(host), Some(port), Some(user), Some(pass), Some(name)) = (
        lookup("DB_HOST"),
        lookup("DB_PORT"),
        lookup("DB_USER"),
        lookup("DB_PASS"),
        lookup("DB_NAME"),
    ) else {
        return Ok(None);
    };

    let invalid = |key: &'static str, value: &str| ConfigError::Invalid {
        key,
        value: value.to_string(),
    };

    let port: u16 = port.parse().map_err(|_| invalid("DB_PORT", &port))?;
    let mut url =
        Url::parse(&format!("postgres://{host}")).map_err(|_| invalid("DB_HOST", &host))?;
    url.set_port(Some(port))
        .map_err(|_| invalid("DB_HOST", &host))?;
    url.set_username(&user)
        .map_err(|_| invalid("DB_USER", &user))?;
    url.set_password(Some(&pass))
        .map_err(|_| invalid("DB_PASS", "<redacted>"))?;
    url.path_segments_mut()
        .map_err(|_| invalid("DB_HOST", &host))?
        .clear()
        .push(&name);

    Ok(Some(url.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<UserServiceConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        UserServiceConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_default_page_limit_is_required() {
        let err = load(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(ENV_PAGINATOR_LIMIT_DEFAULT)));
    }

    #[test]
    fn test_default_page_limit_must_be_positive() {
        assert!(matches!(
            load(&[(ENV_PAGINATOR_LIMIT_DEFAULT, "0")]),
            Err(ConfigError::Invalid { .. })
        ));
        assert!(matches!(
            load(&[(ENV_PAGINATOR_LIMIT_DEFAULT, "ten")]),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn test_defaults_apply() {
        let config = load(&[(ENV_PAGINATOR_LIMIT_DEFAULT, "10")]).unwrap();
        assert_eq!(config.default_page_limit, 10);
        assert_eq!(config.server.port, 8080);
        assert!(!config.database.auto_migrate);
    }

    #[test]
    fn test_database_url_from_parts() {
        let config = load(&[
            (ENV_PAGINATOR_LIMIT_DEFAULT, "10"),
            ("DB_HOST", "db"),
            ("DB_PORT", "5432"),
            ("DB_USER", "app"),
            ("DB_PASS", "secret"),
            ("DB_NAME", "users"),
            ("DB_AUTO_MIGRATE", "true"),
        ])
        .unwrap();

        assert_eq!(config.database.url, "postgres://app:secret@db:5432/users");
        assert!(config.database.auto_migrate);
    }

    #[test]
    fn test_database_url_encodes_credentials() {
        let config = load(&[
            (ENV_PAGINATOR_LIMIT_DEFAULT, "10"),
            ("DB_HOST", "db"),
            ("DB_PORT", "5432"),
            ("DB_USER", "app"),
            ("DB_PASS", "p@ss/w#rd"),
            ("DB_NAME", "users"),
        ])
        .unwrap();

        let url = Url::parse(&config.database.url).unwrap();
        assert_eq!(url.host_str(), Some("db"));
        assert_eq!(url.port(), Some(5432));
        assert_eq!(url.username(), "app");
        assert_eq!(url.password(), Some("p%40ss%2Fw%23rd"));
        assert_eq!(url.path(), "/users");
        assert_eq!(url.fragment(), None);
    }

    #[test]
    fn test_database_url_rejects_bad_port() {
        let err = load(&[
            (ENV_PAGINATOR_LIMIT_DEFAULT, "10"),
            ("DB_HOST", "db"),
            ("DB_PORT", "pg"),
            ("DB_USER", "app"),
            ("DB_PASS", "secret"),
            ("DB_NAME", "users"),
        ])
        .unwrap_err();

        assert!(matches!(err, ConfigError::Invalid { key: "DB_PORT", .. }));
    }

    #[test]
    fn test_invalid_port_is_reported() {
        let err = load(&[(ENV_PAGINATOR_LIMIT_DEFAULT, "10"), ("PORT", "http")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));
    }
}
