//! Configuration management for Boom Art Sales
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with BOOM__ prefix

use std::path::PathBuf;

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::{default_users, AuthorizedUser};

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Shop identity used in exports and prompts
    pub app: AppConfig,

    /// Local blob storage
    pub storage: StorageConfig,

    /// Sales assistant (generative AI) configuration
    pub assistant: AssistantConfig,

    /// Login allow-list
    #[serde(default = "default_users")]
    pub users: Vec<AuthorizedUser>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Display name of the business
    pub name: String,

    /// File-name prefix for exports, e.g. `boom_art`
    pub slug: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Directory holding one file per storage key
    pub data_dir: PathBuf,

    /// Key of the sales list blob
    pub sales_key: String,

    /// Key of the logged-in user blob
    pub session_key: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AssistantConfig {
    /// Base URL of the generative language API
    pub endpoint: String,

    /// Model name
    pub model: String,

    /// API key; the assistant replies with the fallback message when empty
    pub api_key: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Maximum number of sales serialized into a prompt
    pub max_records: usize,

    /// Reasoning token budget passed to the model
    pub thinking_budget: u32,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("BOOM_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("app.name", "Boom Art")?
            .set_default("app.slug", "boom_art")?
            .set_default("storage.data_dir", default_data_dir())?
            .set_default("storage.sales_key", "boom_art_sales_data")?
            .set_default("storage.session_key", "boom_art_user")?
            .set_default(
                "assistant.endpoint",
                "https://generativelanguage.googleapis.com/v1beta",
            )?
            .set_default("assistant.model", "gemini-3-pro-preview")?
            .set_default("assistant.api_key", "")?
            .set_default("assistant.timeout_secs", 30)?
            .set_default("assistant.max_records", 500)?
            .set_default("assistant.thinking_budget", 2048)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (BOOM prefix)
            .add_source(
                Environment::with_prefix("BOOM")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

fn default_data_dir() -> String {
    std::env::var("HOME")
        .map(|home| format!("{}/.boom-art-sales", home))
        .unwrap_or_else(|_| ".boom-art-sales".to_string())
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-3-pro-preview".to_string(),
            api_key: String::new(),
            timeout_secs: 30,
            max_records: 500,
            thinking_budget: 2048,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: "Boom Art".to_string(),
            slug: "boom_art".to_string(),
        }
    }
}
