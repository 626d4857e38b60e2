//! DefiLlama protocols and stablecoins client.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::{collections::HashMap, sync::Arc};
use tracing::instrument;

use crate::{
	models::FetchConfig,
	services::{
		clients::{decode, default_fetcher, ClientError, RestClient},
		fetch::Fetcher,
	},
};

pub const DEFILLAMA_BASE_URL: &str = "https://api.llama.fi";
pub const DEFILLAMA_STABLECOINS_BASE_URL: &str = "https://stablecoins.llama.fi";

/// One `/protocols` entry; fields not modelled here are kept in `extra`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DefiLlamaProtocol {
	pub id: String,
	pub name: String,
	pub address: Option<String>,
	pub symbol: Option<String>,
	pub url: Option<String>,
	pub chain: Option<String>,
	pub category: Option<String>,
	#[serde(default)]
	pub chains: Vec<String>,
	pub slug: Option<String>,
	pub tvl: Option<f64>,
	#[serde(default)]
	pub chain_tvls: HashMap<String, f64>,
	#[serde(rename = "change_1d")]
	pub change_1d: Option<f64>,
	#[serde(rename = "change_7d")]
	pub change_7d: Option<f64>,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LlamaPeggedAsset {
	pub id: String,
	pub name: String,
	pub symbol: String,
	#[serde(rename = "gecko_id")]
	pub gecko_id: Option<String>,
	pub peg_type: Option<String>,
	pub peg_mechanism: Option<String>,
	#[serde(default)]
	pub chains: Vec<String>,
	pub price: Option<f64>,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

/// `GET https://stablecoins.llama.fi/stablecoins` body.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LlamaStablecoinsResponse {
	pub pegged_assets: Vec<LlamaPeggedAsset>,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

/// Client for the DefiLlama TVL and stablecoins APIs.
///
/// The stablecoins API lives on its own host; it shares the fetcher and timeouts of the
/// main API.
#[derive(Clone)]
pub struct DefiLlamaClient {
	rest: RestClient,
	stablecoins: RestClient,
}

impl DefiLlamaClient {
	pub const NAME: &'static str = "defillama";

	pub fn default_config() -> FetchConfig {
		FetchConfig::new(DEFILLAMA_BASE_URL)
	}

	pub fn new(config: FetchConfig) -> Result<Self, ClientError> {
		let fetcher = default_fetcher(&config)?;
		Ok(Self::with_fetcher(config, fetcher))
	}

	pub fn with_fetcher(config: FetchConfig, fetcher: Arc<dyn Fetcher>) -> Self {
		let rest = RestClient::new(&config, fetcher);
		Self {
			stablecoins: rest.clone().with_base_url(DEFILLAMA_STABLECOINS_BASE_URL),
			rest,
		}
	}

	/// Points the stablecoins API at another host.
	pub fn with_stablecoins_base_url(mut self, base_url: &str) -> Self {
		self.stablecoins = self.stablecoins.with_base_url(base_url);
		self
	}

	/// Every protocol DefiLlama tracks.
	#[instrument(skip(self))]
	pub async fn get_protocols(&self) -> Result<Vec<DefiLlamaProtocol>, ClientError> {
		let value = self.rest.get_json(&self.rest.url("/protocols")).await?;
		if !value.is_array() {
			return Err(ClientError::unexpected_response(
				"DefiLlama /protocols: expected an array response",
				None,
				None,
			));
		}
		decode(value, "DefiLlama protocols")
	}

	/// Every tracked stablecoin with its circulation data.
	#[instrument(skip(self))]
	pub async fn get_stablecoins(&self) -> Result<LlamaStablecoinsResponse, ClientError> {
		let value = self
			.stablecoins
			.get_json(&self.stablecoins.url("/stablecoins"))
			.await?;
		if !value
			.get("peggedAssets")
			.map(Value::is_array)
			.unwrap_or(false)
		{
			return Err(ClientError::unexpected_response(
				"Stablecoins /stablecoins: expected an object with peggedAssets[]",
				None,
				None,
			));
		}
		decode(value, "DefiLlama stablecoins")
	}
}
