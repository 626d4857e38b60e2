use alloy::primitives::Address;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::models::{core::trim_base_url, FetchConfig, SecretValue};

/// Partial [`FetchConfig`] read from the clients file; unset fields keep the client default.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ClientOverride {
	pub base_url: Option<String>,
	pub timeout_ms: Option<u64>,
	pub retries: Option<u32>,
	pub backoff_base_ms: Option<u64>,
	pub headers: Option<HashMap<String, String>>,
	pub api_key: Option<SecretValue>,
}

impl ClientOverride {
	/// Layers this override on top of `defaults`. Headers are merged, overrides win.
	pub fn apply(&self, mut defaults: FetchConfig) -> FetchConfig {
		if let Some(base_url) = &self.base_url {
			defaults.base_url = trim_base_url(base_url.clone());
		}
		if let Some(timeout_ms) = self.timeout_ms {
			defaults.timeout_ms = timeout_ms;
		}
		if let Some(retries) = self.retries {
			defaults.retries = retries;
		}
		if let Some(backoff_base_ms) = self.backoff_base_ms {
			defaults.backoff_base_ms = backoff_base_ms;
		}
		if let Some(headers) = &self.headers {
			defaults
				.headers
				.extend(headers.iter().map(|(k, v)| (k.clone(), v.clone())));
		}
		if let Some(api_key) = &self.api_key {
			defaults.api_key = Some(api_key.clone());
		}
		defaults
	}
}

/// Deployed indexer proxy contracts on one chain.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ModuleAddresses {
	pub erc20_indexer_proxy: Option<Address>,
	pub uniswap_v2_indexer_proxy: Option<Address>,
	pub address_indexer_proxy: Option<Address>,
}

/// RPC endpoint and indexer deployment for one EVM chain.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct OnChainNetworkConfig {
	pub chain_name: String,
	pub rpc_url: String,
	#[serde(default)]
	pub modules: ModuleAddresses,
}

/// Contents of the clients configuration file (`config/clients.json` by default).
///
/// ```json
/// {
///   "clients": { "dexguru": { "api_key": { "type": "environment", "value": "DEXGURU_API_KEY" } } },
///   "onchain": { "1": { "chain_name": "eth-mainnet", "rpc_url": "https://...", "modules": { ... } } }
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ClientsConfig {
	/// Overrides keyed by client name (`dexscreener`, `geckoterminal`, `moralis`, ...)
	#[serde(default)]
	pub clients: HashMap<String, ClientOverride>,

	/// Networks keyed by EVM chain id
	#[serde(default)]
	pub onchain: BTreeMap<u64, OnChainNetworkConfig>,
}

impl ClientsConfig {
	/// Returns the effective config for `client`, starting from its built-in `defaults`.
	pub fn client_config(&self, client: &str, defaults: FetchConfig) -> FetchConfig {
		match self.clients.get(client) {
			Some(over) => over.apply(defaults),
			None => defaults,
		}
	}

	pub fn network(&self, chain_id: u64) -> Option<&OnChainNetworkConfig> {
		self.onchain.get(&chain_id)
	}
}
