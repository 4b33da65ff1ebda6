//! Database connection configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! Either a full connection string:
//! - `COMPLAINTS_DATABASE_URL` - `PostgreSQL` connection string
//!   (falls back to `DATABASE_URL`)
//!
//! or discrete parameters:
//! - `COMPLAINTS_DB_USER` - Database role (required)
//! - `COMPLAINTS_DB_PASSWORD` - Role password (optional)
//! - `COMPLAINTS_DB_HOST` - Server host (default: localhost)
//! - `COMPLAINTS_DB_PORT` - Server port (default: 5432)
//! - `COMPLAINTS_DB_NAME` - Database name (default: `complaint_management`)

use std::str::FromStr;

use secrecy::{ExposeSecret, SecretString};
use sqlx::postgres::PgConnectOptions;
use thiserror::Error;

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: &str = "5432";
const DEFAULT_DATABASE: &str = "complaint_management";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Where the connection parameters come from.
#[derive(Clone)]
enum Source {
    /// Parsed from a full connection string (may contain a password).
    Url(Box<PgConnectOptions>),
    /// Individual host/credential/database settings.
    Parameters {
        host: String,
        port: u16,
        user: String,
        password: Option<SecretString>,
        database: String,
    },
}

/// Connection settings for the complaints database.
///
/// Implements `Debug` manually to redact credentials.
#[derive(Clone)]
pub struct DatabaseConfig {
    source: Source,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.source {
            Source::Url(_) => f
                .debug_struct("DatabaseConfig")
                .field("url", &"[REDACTED]")
                .finish(),
            Source::Parameters {
                host,
                port,
                user,
                password,
                database,
            } => f
                .debug_struct("DatabaseConfig")
                .field("host", host)
                .field("port", port)
                .field("user", user)
                .field("password", &password.as_ref().map(|_| "[REDACTED]"))
                .field("database", database)
                .finish(),
        }
    }
}

impl DatabaseConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("COMPLAINTS_DATABASE_URL").or_else(|| lookup("DATABASE_URL")) {
            return Self::from_url(SecretString::from(url));
        }

        let user = lookup("COMPLAINTS_DB_USER").ok_or_else(|| {
            ConfigError::MissingEnvVar("COMPLAINTS_DB_USER (or COMPLAINTS_DATABASE_URL)".to_owned())
        })?;
        let port = lookup("COMPLAINTS_DB_PORT")
            .unwrap_or_else(|| DEFAULT_PORT.to_owned())
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("COMPLAINTS_DB_PORT".to_owned(), e.to_string()))?;

        Ok(Self {
            source: Source::Parameters {
                host: lookup("COMPLAINTS_DB_HOST").unwrap_or_else(|| DEFAULT_HOST.to_owned()),
                port,
                user,
                password: lookup("COMPLAINTS_DB_PASSWORD").map(SecretString::from),
                database: lookup("COMPLAINTS_DB_NAME")
                    .unwrap_or_else(|| DEFAULT_DATABASE.to_owned()),
            },
        })
    }

    /// Build configuration from a connection string.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if the string is not a valid
    /// `PostgreSQL` connection URL.
    pub fn from_url(url: SecretString) -> Result<Self, ConfigError> {
        let options = PgConnectOptions::from_str(url.expose_secret()).map_err(|e| {
            ConfigError::InvalidEnvVar("COMPLAINTS_DATABASE_URL".to_owned(), e.to_string())
        })?;
        Ok(Self {
            source: Source::Url(Box::new(options)),
        })
    }

    /// Connection options for a single `PgConnection`.
    #[must_use]
    pub fn connect_options(&self) -> PgConnectOptions {
        match &self.source {
            Source::Url(options) => (**options).clone(),
            Source::Parameters {
                host,
                port,
                user,
                password,
                database,
            } => {
                let options = PgConnectOptions::new()
                    .host(host)
                    .port(*port)
                    .username(user)
                    .database(database);
                match password {
                    Some(password) => options.password(password.expose_secret()),
                    None => options,
                }
            }
        }
    }
}
