use std::env;
use std::time::Duration;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_hours: i64,
}

// Keeps the signing secret out of startup logs.
impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"***")
            .field("expiration_hours", &self.expiration_hours)
            .finish()
    }
}

/// Longest token lifetime accepted from configuration (one year).
pub const MAX_EXPIRATION_HOURS: i64 = 24 * 365;

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    /// 4. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .set_default("server.http_port", 8080)?
            .set_default("server.request_timeout_secs", 15)?
            .set_default("database.max_connections", 5)?
            .set_default("jwt.expiration_hours", auth::jwt::DEFAULT_TOKEN_LIFETIME_HOURS)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::default().separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Reject settings the service cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.trim().is_empty() {
            return Err(ConfigError::Message(
                "jwt.secret must be set (JWT__SECRET)".to_string(),
            ));
        }

        if self.jwt.expiration_hours <= 0 || self.jwt.expiration_hours > MAX_EXPIRATION_HOURS {
            return Err(ConfigError::Message(format!(
                "jwt.expiration_hours must be between 1 and {}, got {}",
                MAX_EXPIRATION_HOURS, self.jwt.expiration_hours
            )));
        }

        if self.database.max_connections == 0 {
            return Err(ConfigError::Message(
                "database.max_connections must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str, expiration_hours: i64) -> Config {
        Config {
            database: DatabaseConfig {
                url: "postgres://localhost/test".to_string(),
                max_connections: 5,
            },
            server: ServerConfig {
                http_port: 8080,
                request_timeout_secs: 15,
            },
            jwt: JwtConfig {
                secret: secret.to_string(),
                expiration_hours,
            },
        }
    }

    #[test]
    fn test_validate_accepts_complete_config() {
        assert!(config("a-secret-key-at-least-32-bytes-long!", 24)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_secret() {
        assert!(config("", 24).validate().is_err());
        assert!(config("   ", 24).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_positive_expiration() {
        assert!(config("secret", 0).validate().is_err());
        assert!(config("secret", -1).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_excessive_expiration() {
        assert!(config("secret", MAX_EXPIRATION_HOURS).validate().is_ok());
        assert!(config("secret", MAX_EXPIRATION_HOURS + 1).validate().is_err());
        assert!(config("secret", 3_000_000_000).validate().is_err());
        assert!(config("secret", i64::MAX).validate().is_err());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let rendered = format!("{:?}", config("super-secret-value", 24));
        assert!(!rendered.contains("super-secret-value"));
    }
}
