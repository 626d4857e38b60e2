//! Loading and validation of the clients configuration file.

use async_trait::async_trait;
use std::{collections::HashMap, path::Path};
use url::Url;

use crate::models::{
	config::{error::ConfigError, DEFAULT_CLIENTS_CONFIG_PATH},
	ClientOverride, ClientsConfig, ConfigLoader,
};

/// Upper bound on configured retries
const MAX_RETRIES: u32 = 10;

fn path_metadata(path: &Path) -> Option<HashMap<String, String>> {
	Some(HashMap::from([(
		"path".to_string(),
		path.display().to_string(),
	)]))
}

fn validate_url(field: &str, owner: &str, raw: &str) -> Result<(), ConfigError> {
	Url::parse(raw).map(|_| ()).map_err(|e| {
		ConfigError::validation_error(
			format!("{} of {} is not a valid URL: {}", field, owner, raw),
			Some(Box::new(e)),
			None,
		)
	})
}

fn validate_override(name: &str, over: &ClientOverride) -> Result<(), ConfigError> {
	if let Some(base_url) = &over.base_url {
		validate_url("base_url", name, base_url)?;
	}
	if over.timeout_ms == Some(0) {
		return Err(ConfigError::validation_error(
			format!("timeout_ms of {} must be greater than zero", name),
			None,
			None,
		));
	}
	if let Some(retries) = over.retries.filter(|r| *r > MAX_RETRIES) {
		return Err(ConfigError::validation_error(
			format!(
				"retries of {} must be at most {}, got {}",
				name, MAX_RETRIES, retries
			),
			None,
			None,
		));
	}
	if over.api_key.as_ref().is_some_and(|key| key.is_empty()) {
		return Err(ConfigError::validation_error(
			format!("api_key of {} is empty", name),
			None,
			None,
		));
	}
	Ok(())
}

impl ClientsConfig {
	/// Loads `path`, or the default location when `path` is `None`.
	///
	/// A missing default file yields an empty config so every client runs on built-in
	/// settings. An explicitly given path must exist.
	pub async fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
		match path {
			Some(path) => Self::load_from_path(path).await,
			None => {
				let default_path = Path::new(DEFAULT_CLIENTS_CONFIG_PATH);
				if default_path.exists() {
					Self::load_from_path(default_path).await
				} else {
					tracing::debug!(
						path = DEFAULT_CLIENTS_CONFIG_PATH,
						"No clients config found, using built-in defaults"
					);
					Ok(Self::default())
				}
			}
		}
	}
}

#[async_trait]
impl ConfigLoader for ClientsConfig {
	async fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
		if !Self::is_json_file(path) {
			return Err(ConfigError::file_error(
				"clients config must be a .json file",
				None,
				path_metadata(path),
			));
		}

		let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
			ConfigError::file_error(
				format!("failed to read clients config: {}", e),
				Some(Box::new(e)),
				path_metadata(path),
			)
		})?;

		let config: ClientsConfig = serde_json::from_str(&raw).map_err(|e| {
			ConfigError::parse_error(
				format!("failed to parse clients config: {}", e),
				Some(Box::new(e)),
				path_metadata(path),
			)
		})?;

		config.validate()?;

		tracing::debug!(
			path = %path.display(),
			clients = config.clients.len(),
			networks = config.onchain.len(),
			"Loaded clients config"
		);
		Ok(config)
	}

	fn validate(&self) -> Result<(), ConfigError> {
		let mut names: Vec<_> = self.clients.keys().collect();
		names.sort();
		for name in names {
			validate_override(name, &self.clients[name])?;
		}

		for (chain_id, network) in &self.onchain {
			let owner = format!("chain {}", chain_id);
			if network.chain_name.trim().is_empty() {
				return Err(ConfigError::validation_error(
					format!("chain_name of {} is required", owner),
					None,
					None,
				));
			}
			validate_url("rpc_url", &owner, &network.rpc_url)?;
		}

		Ok(())
	}
}
