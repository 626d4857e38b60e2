//! Dexscreener public API client.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{collections::HashMap, sync::Arc};
use tracing::instrument;

use crate::{
	models::{FetchConfig, TokenSummary},
	services::{
		aggregator::build_dexscreener_summary,
		clients::{decode, default_fetcher, encode_segment, ClientError, RestClient},
		fetch::Fetcher,
	},
};

pub const DEXSCREENER_BASE_URL: &str = "https://api.dexscreener.com";

/// Most addresses accepted by one `/tokens/v1` call
pub const MAX_TOKENS_PER_REQUEST: usize = 30;

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DexscreenerToken {
	pub address: String,
	#[serde(default)]
	pub name: Option<String>,
	#[serde(default)]
	pub symbol: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct DexscreenerTxnStats {
	#[serde(default)]
	pub buys: u64,
	#[serde(default)]
	pub sells: u64,
}

/// Windowed statistics keyed `m5`, `h1`, `h6`, `h24`
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct DexscreenerWindows<T> {
	pub m5: Option<T>,
	pub h1: Option<T>,
	pub h6: Option<T>,
	pub h24: Option<T>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct DexscreenerLiquidity {
	pub usd: Option<f64>,
	pub base: Option<f64>,
	pub quote: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DexscreenerPairInfo {
	pub image_url: Option<String>,
	pub header: Option<String>,
	pub open_graph: Option<String>,
}

/// One entry of a Dexscreener `pairs` list.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DexscreenerPair {
	pub chain_id: String,
	pub dex_id: String,
	#[serde(default)]
	pub url: Option<String>,
	pub pair_address: String,
	#[serde(default)]
	pub labels: Vec<String>,
	pub base_token: DexscreenerToken,
	pub quote_token: DexscreenerToken,
	pub price_native: Option<String>,
	pub price_usd: Option<String>,
	pub txns: Option<DexscreenerWindows<DexscreenerTxnStats>>,
	pub volume: Option<DexscreenerWindows<f64>>,
	pub price_change: Option<HashMap<String, f64>>,
	pub liquidity: Option<DexscreenerLiquidity>,
	pub fdv: Option<f64>,
	pub market_cap: Option<f64>,
	/// Milliseconds since the epoch
	pub pair_created_at: Option<u64>,
	pub info: Option<DexscreenerPairInfo>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DexscreenerPairsResponse {
	#[serde(default)]
	pub schema_version: Option<String>,
	/// `null` when the token has no pairs
	#[serde(default)]
	pub pairs: Option<Vec<DexscreenerPair>>,
}

/// Client for `api.dexscreener.com`.
#[derive(Clone)]
pub struct DexscreenerClient {
	rest: RestClient,
}

impl DexscreenerClient {
	/// Key for overrides in the clients config file
	pub const NAME: &'static str = "dexscreener";

	pub fn default_config() -> FetchConfig {
		FetchConfig::new(DEXSCREENER_BASE_URL)
	}

	pub fn new(config: FetchConfig) -> Result<Self, ClientError> {
		let fetcher = default_fetcher(&config)?;
		Ok(Self::with_fetcher(config, fetcher))
	}

	pub fn with_fetcher(config: FetchConfig, fetcher: Arc<dyn Fetcher>) -> Self {
		Self {
			rest: RestClient::new(&config, fetcher),
		}
	}

	/// Raw `/latest/dex/tokens/{token}` body, as needed by the summary builder
	#[instrument(skip(self))]
	pub async fn get_pairs_by_token_raw(&self, token_address: &str) -> Result<Value, ClientError> {
		let url = self.rest.url(&format!(
			"/latest/dex/tokens/{}",
			encode_segment(token_address)
		));
		self.rest.get_json(&url).await
	}

	/// All pairs trading `token_address`, across chains.
	#[instrument(skip(self))]
	pub async fn get_pairs_by_token(
		&self,
		token_address: &str,
	) -> Result<DexscreenerPairsResponse, ClientError> {
		let raw = self.get_pairs_by_token_raw(token_address).await?;
		decode(raw, "Dexscreener pairs response")
	}

	/// Summarizes every pair Dexscreener reports for `token_address`.
	#[instrument(skip(self))]
	pub async fn get_token_summary(&self, token_address: &str) -> Result<TokenSummary, ClientError> {
		let raw = self.get_pairs_by_token_raw(token_address).await?;
		Ok(build_dexscreener_summary(token_address, &raw)?)
	}

	/// Pools of one token on one chain.
	#[instrument(skip(self))]
	pub async fn get_token_pools(
		&self,
		chain_id: &str,
		token_address: &str,
	) -> Result<Vec<DexscreenerPair>, ClientError> {
		let url = self.rest.url(&format!(
			"/token-pairs/v1/{}/{}",
			encode_segment(chain_id),
			encode_segment(token_address)
		));
		self.rest.get_typed(&url).await
	}

	/// Pairs for up to [`MAX_TOKENS_PER_REQUEST`] tokens on one chain.
	#[instrument(skip(self, token_addresses), fields(count = token_addresses.len()))]
	pub async fn get_tokens_by_addresses(
		&self,
		chain_id: &str,
		token_addresses: &[&str],
	) -> Result<Vec<DexscreenerPair>, ClientError> {
		if token_addresses.is_empty() || token_addresses.len() > MAX_TOKENS_PER_REQUEST {
			return Err(ClientError::invalid_argument(
				format!(
					"Expected between 1 and {} token addresses",
					MAX_TOKENS_PER_REQUEST
				),
				None,
				Some(HashMap::from([(
					"count".to_string(),
					token_addresses.len().to_string(),
				)])),
			));
		}
		let joined = token_addresses
			.iter()
			.map(|address| encode_segment(address))
			.collect::<Vec<_>>()
			.join(",");
		let url = self.rest.url(&format!(
			"/tokens/v1/{}/{}",
			encode_segment(chain_id),
			joined
		));
		self.rest.get_typed(&url).await
	}

	/// Free-text pair search, e.g. `"USD1/USDC"`.
	#[instrument(skip(self))]
	pub async fn search_pairs(&self, query: &str) -> Result<DexscreenerPairsResponse, ClientError> {
		let url = self
			.rest
			.url_with_query("/latest/dex/search", &[("q", query)])?;
		self.rest.get_typed(&url).await
	}

	#[instrument(skip(self))]
	pub async fn get_latest_token_profiles(&self) -> Result<Value, ClientError> {
		self.rest
			.get_json(&self.rest.url("/token-profiles/latest/v1"))
			.await
	}

	#[instrument(skip(self))]
	pub async fn get_latest_token_boosts(&self) -> Result<Value, ClientError> {
		self.rest
			.get_json(&self.rest.url("/token-boosts/latest/v1"))
			.await
	}
}
