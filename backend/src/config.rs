//! Runtime configuration loaded from environment variables.
//!
//! The server binary loads a `.env` file (if any) before calling
//! [`AppConfig::from_env`]. Storage backend selection is handled separately by
//! [`crate::db::RepositoryFactory`].

use chrono::Duration;
use log::warn;
use std::env;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::auth::password::DEFAULT_COST;

/// Signing key used outside production when `JWT_SECRET` is unset.
const DEV_JWT_SECRET: &str = "school-portal-dev-secret";

/// Longest accepted session lifetime.
pub const MAX_SESSION_TTL_DAYS: i64 = 3650;

/// Deployment environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    /// Only `production` (or `prod`) is special; any other name runs as
    /// development.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "development" | "dev" | "test" => Self::Development,
            other => {
                warn!("Unrecognized environment '{}', treating it as development", other);
                Self::Development
            }
        }
    }
}

/// Configuration problems detected at startup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} has invalid value '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("{0} must be set in production")]
    Missing(&'static str),
}

/// Server settings.
#[derive(Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    /// Admin account created at startup if absent
    pub admin_email: String,
    pub admin_password: String,
    pub jwt_secret: String,
    /// Token lifetime and cookie `Max-Age`
    pub session_ttl: Duration,
    pub bcrypt_cost: u32,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let environment = var("APP_ENV")
            .or_else(|| var("NODE_ENV"))
            .map(|name| Environment::from_name(&name))
            .unwrap_or_default();

        let jwt_secret = match var("JWT_SECRET") {
            Some(secret) => secret,
            None if environment == Environment::Production => {
                return Err(ConfigError::Missing("JWT_SECRET"))
            }
            None => DEV_JWT_SECRET.to_string(),
        };

        let port = parse_var(&var, "PORT", 5000u16)?;

        let ttl_days = parse_var(&var, "SESSION_TTL_DAYS", 7i64)?;
        if !(1..=MAX_SESSION_TTL_DAYS).contains(&ttl_days) {
            return Err(ConfigError::Invalid {
                var: "SESSION_TTL_DAYS",
                value: ttl_days.to_string(),
                reason: format!("must be between 1 and {} days", MAX_SESSION_TTL_DAYS),
            });
        }

        let bcrypt_cost = parse_var(&var, "BCRYPT_COST", DEFAULT_COST)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::Invalid {
                var: "BCRYPT_COST",
                value: bcrypt_cost.to_string(),
                reason: "must be between 4 and 31".to_string(),
            });
        }

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            environment,
            admin_email: var("ADMIN_EMAIL").unwrap_or_else(|| "admin@school.local".to_string()),
            admin_password: var("ADMIN_PASSWORD").unwrap_or_else(|| "admin@123".to_string()),
            jwt_secret,
            session_ttl: Duration::days(ttl_days),
            bcrypt_cost,
        })
    }

    /// True when tokens are signed with the built-in development key.
    pub fn uses_dev_secret(&self) -> bool {
        self.jwt_secret == DEV_JWT_SECRET
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// `host:port` for binding the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T, F>(var: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match var(key) {
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var: key,
            reason: e.to_string(),
            value,
        }),
        None => Ok(default),
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("environment", &self.environment)
            .field("admin_email", &self.admin_email)
            .field("session_ttl", &self.session_ttl)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.bind_address(), "0.0.0.0:5000");
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.admin_email, "admin@school.local");
        assert_eq!(config.admin_password, "admin@123");
        assert_eq!(config.jwt_secret, DEV_JWT_SECRET);
        assert_eq!(config.session_ttl, Duration::days(7));
        assert_eq!(config.bcrypt_cost, 10);
    }

    #[test]
    fn test_production_requires_secret() {
        assert_eq!(
            load(&[("NODE_ENV", "production")]).unwrap_err(),
            ConfigError::Missing("JWT_SECRET")
        );

        let config = load(&[("APP_ENV", "production"), ("JWT_SECRET", "k")]).unwrap();
        assert!(config.is_production());
    }

    #[test]
    fn test_app_env_wins_over_node_env() {
        let config = load(&[("APP_ENV", "development"), ("NODE_ENV", "production")]).unwrap();
        assert!(!config.is_production());
    }

    #[test]
    fn test_blank_values_fall_back() {
        let config = load(&[("PORT", "  "), ("HOST", "")]).unwrap();
        assert_eq!(config.bind_address(), "0.0.0.0:5000");
    }

    #[test]
    fn test_invalid_numbers() {
        assert!(matches!(
            load(&[("PORT", "http")]),
            Err(ConfigError::Invalid { var: "PORT", .. })
        ));
        assert!(matches!(
            load(&[("BCRYPT_COST", "3")]),
            Err(ConfigError::Invalid { var: "BCRYPT_COST", .. })
        ));
        assert!(matches!(
            load(&[("SESSION_TTL_DAYS", "0")]),
            Err(ConfigError::Invalid { var: "SESSION_TTL_DAYS", .. })
        ));
    }

    #[test]
    fn test_session_ttl_upper_bound() {
        for days in ["3651", "100000000", "200000000000"] {
            assert!(matches!(
                load(&[("SESSION_TTL_DAYS", days)]),
                Err(ConfigError::Invalid { var: "SESSION_TTL_DAYS", .. })
            ));
        }
        let config = load(&[("SESSION_TTL_DAYS", "3650")]).unwrap();
        assert_eq!(config.session_ttl, Duration::days(MAX_SESSION_TTL_DAYS));
    }

    #[test]
    fn test_unknown_environment_runs_as_development() {
        for name in ["staging", "local", "qa"] {
            let config = load(&[("NODE_ENV", name)]).unwrap();
            assert_eq!(config.environment, Environment::Development);
            assert!(!config.is_production());
        }
        assert_eq!(Environment::from_name(" PROD "), Environment::Production);
    }

    #[test]
    fn test_dev_secret_detection() {
        assert!(load(&[]).unwrap().uses_dev_secret());
        assert!(load(&[("JWT_SECRET", "   ")]).unwrap().uses_dev_secret());
        assert!(!load(&[("JWT_SECRET", "real-key")]).unwrap().uses_dev_secret());
    }

    #[test]
    fn test_debug_hides_secrets() {
        let config = load(&[("JWT_SECRET", "sekrit"), ("ADMIN_PASSWORD", "hunter2")]).unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("sekrit"));
        assert!(!debug.contains("hunter2"));
    }
}
