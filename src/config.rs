use crate::connection::{connect, connect_with_auth, connect_with_params};
use crate::error::{Result, SqlScopeError};
use rusqlite::Connection;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Top-level configuration structure parsed from a TOML file.
#[derive(Debug, Deserialize)]
pub struct Config {
    pub connection: ConnectionConfig,
}

/// Connection-related configuration.
#[derive(Debug, Deserialize)]
pub struct ConnectionConfig {
    pub url: String,
    pub user: Option<String>,
    pub password: Option<String>,
    pub pragmas: Option<HashMap<String, String>>,
}

impl ConnectionConfig {
    /// Opens a connection as described by this configuration.
    ///
    /// Credentials take precedence: when both `user` and `password`
    /// are set the credentialed factory is used and `pragmas` are
    /// ignored. Otherwise any pragmas are forwarded as driver
    /// options, and a bare `url` opens a plain connection.
    pub fn open(&self) -> Result<Connection> {
        match (&self.user, &self.password) {
            (Some(user), Some(password)) => connect_with_auth(&self.url, user, password),
            _ => match &self.pragmas {
                Some(pragmas) if !pragmas.is_empty() => connect_with_params(&self.url, pragmas),
                _ => connect(&self.url),
            },
        }
    }
}

/// Loads configuration from a TOML file at the given path.
///
/// # Arguments
///
/// * `path` - The file path to the TOML configuration file.
///
/// # Example
///
/// ```no_run
/// use sqlscope::config::load_config;
///
/// let config = load_config("sqlscope.toml").expect("Failed to load config");
/// println!("{}", config.connection.url);
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|e| SqlScopeError::Config(e.to_string()))?;
    toml::from_str(&content).map_err(|e| SqlScopeError::Config(e.to_string()))
}
