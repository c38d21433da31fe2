use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

// Default timeout functions
fn default_db_connect_timeout() -> u64 {
  5
}

fn default_db_acquire_timeout() -> u64 {
  3
}

fn default_search_timeout() -> u64 {
  10
}

fn default_search_base_url() -> String {
  "https://jooble.org/api".to_string()
}

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
  pub server: ServerConfig,
  pub database: DatabaseConfig,
  pub documents: DocumentsConfig,
  #[serde(default)]
  pub search: SearchConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  pub host: String,
  pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
  pub url: String,
  pub max_connections: u32,
  #[serde(default = "default_db_connect_timeout")]
  pub connect_timeout_seconds: u64,
  #[serde(default = "default_db_acquire_timeout")]
  pub acquire_timeout_seconds: u64,
}

/// Document storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentsConfig {
  /// Directory where per-invoice PDF files are written
  pub dir: String,
}

/// Job-search proxy configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
  #[serde(default = "default_search_base_url")]
  pub base_url: String,
  /// Jooble API key; requests fail upstream when unset
  #[serde(default)]
  pub api_key: Option<String>,
  #[serde(default = "default_search_timeout")]
  pub timeout_seconds: u64,
}

impl Default for SearchConfig {
  fn default() -> Self {
    Self {
      base_url: default_search_base_url(),
      api_key: None,
      timeout_seconds: default_search_timeout(),
    }
  }
}

impl Config {
  /// Load configuration from files and environment variables
  ///
  /// Configuration is loaded in the following order (later sources override earlier ones):
  /// 1. config/default.toml
  /// 2. config/local.toml (if exists)
  /// 3. config/{RUN_MODE}.toml (if exists)
  /// 4. Environment variables with FAKTURKA_ prefix
  ///
  /// Environment variables use double underscores as separators:
  /// - `FAKTURKA_SERVER__PORT=3001`
  /// - `FAKTURKA_DATABASE__URL=sqlite://faktury.db`
  /// - `FAKTURKA_DOCUMENTS__DIR=./pdfs`
  /// - `FAKTURKA_SEARCH__API_KEY=...`
  pub fn load() -> Result<Self, ConfigError> {
    let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

    let config = ConfigBuilder::builder()
      // Start with default configuration
      .add_source(File::with_name("config/default").required(true))
      // Add optional local configuration (for local development overrides)
      .add_source(File::with_name("config/local").required(false))
      // Add optional environment-specific configuration
      .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
      .add_source(
        Environment::with_prefix("FAKTURKA")
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      )
      .build()?;

    config.try_deserialize()
  }
}
