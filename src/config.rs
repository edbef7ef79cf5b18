//! Application configuration
//!
//! Read once at process start and passed explicitly to the store. Sources, in
//! order of precedence: command line (handled by the binary), YAML file,
//! environment, built-in default.

use crate::error::{ClientError, Result};
use serde::Deserialize;
use std::path::Path;

pub const DATABASE_URL_VAR: &str = "WAYANAD_DATABASE_URL";
pub const FALLBACK_URL_VAR: &str = "DATABASE_URL";
pub const DEFAULT_DATABASE_URL: &str = "mysql://root@localhost:3306/wayanad_disaster";

/// Database configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub database_url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            database_url: std::env::var(DATABASE_URL_VAR)
                .or_else(|_| std::env::var(FALLBACK_URL_VAR))
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
        }
    }
}

impl DatabaseConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
        }
    }

    /// Connection URL with the password replaced, for logging
    pub fn masked_url(&self) -> String {
        mask_database_url(&self.database_url)
    }
}

/// Main window geometry
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub window: WindowConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::default()
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).map_err(|e| ClientError::Config(e.to_string()))
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ClientError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_yaml_str(&text)
    }

    pub fn with_database_url(mut self, database_url: impl Into<String>) -> Self {
        self.database.database_url = database_url.into();
        self
    }
}

/// Mask the password in a database URL for logging
pub fn mask_database_url(url: &str) -> String {
    match url::Url::parse(url) {
        Ok(mut parsed) => {
            if parsed.password().is_some() {
                let _ = parsed.set_password(Some("***"));
            }
            parsed.to_string()
        }
        Err(_) => "<unparseable database url>".to_string(),
    }
}
