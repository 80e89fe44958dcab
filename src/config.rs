//! Application configuration management.
//!
//! This module handles loading configuration from environment variables.
//! It uses the `envy` crate to automatically deserialize environment variables into a type-safe struct.

use serde::Deserialize;
use sqlx::postgres::PgConnectOptions;

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `DB_USER` (required): database user name
/// - `DB_PASS` (required): database password
/// - `DB_HOST` (optional): database host, defaults to `localhost`
/// - `DB_PORT` (optional): database port, defaults to 5432
/// - `DB_NAME` (optional): database name, defaults to `blog`
/// - `PORT` (optional): HTTP server port, defaults to 5000
/// - `ACCESS_TOKEN_SECRET` (required): HMAC secret used to sign session tokens
/// - `CLIENT_ORIGIN` (optional): the single origin allowed by CORS, defaults to `http://localhost:5173`
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub db_user: String,
    pub db_pass: String,

    #[serde(default = "default_db_host")]
    pub db_host: String,

    #[serde(default = "default_db_port")]
    pub db_port: u16,

    #[serde(default = "default_db_name")]
    pub db_name: String,

    #[serde(default = "default_port")]
    pub port: u16,

    pub access_token_secret: String,

    #[serde(default = "default_client_origin")]
    pub client_origin: String,
}

/// Configuration was present but unusable.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read environment: {0}")]
    Env(#[from] envy::Error),

    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("CLIENT_ORIGIN is not a valid URL: {0}")]
    InvalidOrigin(#[from] url::ParseError),
}

fn default_db_host() -> String {
    "localhost".to_string()
}

fn default_db_port() -> u16 {
    5432
}

fn default_db_name() -> String {
    "blog".to_string()
}

/// Default port if PORT environment variable is not set.
fn default_port() -> u16 {
    5000
}

fn default_client_origin() -> String {
    "http://localhost:5173".to_string()
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// This method first attempts to load a `.env` file (which is optional),
    /// then reads environment variables, deserializes them into a Config struct
    /// and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required environment variables are missing (e.g., ACCESS_TOKEN_SECRET)
    /// - Environment variable values cannot be parsed into expected types
    /// - A required value is empty or the client origin is not a URL
    pub fn from_env() -> Result<Self, ConfigError> {
        // Try to load .env file if it exists (does nothing if not found)
        dotenvy::dotenv().ok();

        // Field names are automatically converted: db_user -> DB_USER
        let config = envy::from_env::<Config>()?;
        config.validate()?;

        Ok(config)
    }

    /// Reject settings that would let the server start in an insecure or broken state.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.db_user.trim().is_empty() {
            return Err(ConfigError::Empty("DB_USER"));
        }
        if self.db_pass.is_empty() {
            return Err(ConfigError::Empty("DB_PASS"));
        }
        if self.access_token_secret.is_empty() {
            return Err(ConfigError::Empty("ACCESS_TOKEN_SECRET"));
        }

        url::Url::parse(&self.client_origin)?;

        Ok(())
    }

    /// Connection options for the document database.
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.db_host)
            .port(self.db_port)
            .username(&self.db_user)
            .password(&self.db_pass)
            .database(&self.db_name)
    }
}
