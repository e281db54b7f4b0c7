//! Application settings loaded from environment variables.

use std::env;
use std::path::PathBuf;

use super::constants::{DEFAULT_CRITERIA_PATH, DEFAULT_ENTITY_MODULE, DEFAULT_REPOSITORY_PATH};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Where `generate repository` writes files
    pub repository_path: PathBuf,
    /// Where `generate criteria` writes files
    pub criteria_path: PathBuf,
    /// Module path generated code imports entities from
    pub entity_module: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repository_path: PathBuf::from(DEFAULT_REPOSITORY_PATH),
            criteria_path: PathBuf::from(DEFAULT_CRITERIA_PATH),
            entity_module: DEFAULT_ENTITY_MODULE.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables (and `.env`, if present).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        Self {
            repository_path: env::var("REPOSITORY_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.repository_path),
            criteria_path: env::var("CRITERIA_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.criteria_path),
            entity_module: env::var("ENTITY_MODULE")
                .ok()
                .filter(|module| !module.trim().is_empty())
                .unwrap_or(defaults.entity_module),
        }
    }
}
