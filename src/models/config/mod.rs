//! Configuration loading and validation.

#![allow(clippy::result_large_err)]

use async_trait::async_trait;
use std::path::Path;

mod clients_config;
mod error;

pub use error::ConfigError;

/// Default location of the clients configuration file
pub const DEFAULT_CLIENTS_CONFIG_PATH: &str = "config/clients.json";

/// Common interface for configuration files
#[async_trait]
pub trait ConfigLoader: Sized {
	/// Load and validate the configuration at `path`.
	async fn load_from_path(path: &Path) -> Result<Self, ConfigError>;

	/// Returns Ok(()) if valid, or the first problem found.
	fn validate(&self) -> Result<(), ConfigError>;

	/// Check if a file is a JSON file based on extension
	fn is_json_file(path: &Path) -> bool {
		path.extension()
			.map(|ext| ext.to_string_lossy().to_lowercase() == "json")
			.unwrap_or(false)
	}
}
