//! Environment and file based configuration.

mod support;

use std::io::Write;

use school_portal::config::{AppConfig, ConfigError, Environment};
use school_portal::db::repository::DocumentRepository;
use school_portal::db::{RepositoryConfig, RepositoryFactory, RepositoryType};
use support::with_scoped_env;

const APP_VARS: [&str; 10] = [
    "HOST",
    "PORT",
    "ADMIN_EMAIL",
    "ADMIN_PASSWORD",
    "APP_ENV",
    "NODE_ENV",
    "JWT_SECRET",
    "SESSION_TTL_DAYS",
    "BCRYPT_COST",
    "REPOSITORY_TYPE",
];

/// Clear every variable the app reads, then apply `overrides`.
fn env_with<'a>(overrides: &[(&'a str, Option<&'a str>)]) -> Vec<(&'a str, Option<&'a str>)> {
    let mut changes: Vec<(&str, Option<&str>)> = APP_VARS.iter().map(|k| (*k, None)).collect();
    changes.extend([("DATABASE_URL", None), ("PG_DATABASE_URL", None)]);
    changes.extend_from_slice(overrides);
    changes
}

#[test]
fn test_app_config_from_env() {
    let config = with_scoped_env(
        &env_with(&[
            ("PORT", Some("8088")),
            ("ADMIN_EMAIL", Some("office@school.org")),
            ("NODE_ENV", Some("production")),
            ("JWT_SECRET", Some("prod-secret")),
            ("SESSION_TTL_DAYS", Some("1")),
        ]),
        AppConfig::from_env,
    )
    .unwrap();

    assert_eq!(config.bind_address(), "0.0.0.0:8088");
    assert_eq!(config.admin_email, "office@school.org");
    assert_eq!(config.environment, Environment::Production);
    assert_eq!(config.jwt_secret, "prod-secret");
    assert_eq!(config.session_ttl, chrono::Duration::days(1));
}

#[test]
fn test_production_without_secret_fails() {
    let result = with_scoped_env(
        &env_with(&[("APP_ENV", Some("production"))]),
        AppConfig::from_env,
    );
    assert_eq!(result.unwrap_err(), ConfigError::Missing("JWT_SECRET"));
}

#[test]
fn test_repository_type_from_env() {
    let selected = with_scoped_env(&env_with(&[]), RepositoryType::from_env);
    assert_eq!(selected, RepositoryType::Local);

    let selected = with_scoped_env(
        &env_with(&[("DATABASE_URL", Some("postgres://localhost/school"))]),
        RepositoryType::from_env,
    );
    assert_eq!(selected, RepositoryType::Postgres);

    let selected = with_scoped_env(
        &env_with(&[
            ("DATABASE_URL", Some("postgres://localhost/school")),
            ("REPOSITORY_TYPE", Some("local")),
        ]),
        RepositoryType::from_env,
    );
    assert_eq!(selected, RepositoryType::Local);
}

#[test]
fn test_repository_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[repository]\ntype = \"local\"").unwrap();

    let config = RepositoryConfig::from_file(file.path()).unwrap();
    assert_eq!(config.repository_type().unwrap(), RepositoryType::Local);
    assert_eq!(config.postgres.max_connections, 10);
    assert!(config.to_postgres_config().unwrap().is_none());
}

#[tokio::test]
async fn test_factory_from_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[repository]\ntype = \"local\"").unwrap();

    let repo = RepositoryFactory::from_config_file(file.path()).await.unwrap();
    assert!(repo.health_check().await.unwrap());
}
