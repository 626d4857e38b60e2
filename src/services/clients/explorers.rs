//! Token lookups on chain explorers: Stellar Expert, XRPScan and Aptoscan.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::instrument;

use crate::{
	models::FetchConfig,
	services::{
		clients::{default_fetcher, encode_segment, ClientError, RestClient},
		fetch::Fetcher,
	},
};

pub const STELLAR_EXPERT_BASE_URL: &str = "https://api.stellar.expert";
pub const XRPSCAN_BASE_URL: &str = "https://api.xrpscan.com";
pub const APTOSCAN_BASE_URL: &str = "https://api.aptoscan.com";

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StellarExpertTomlInfo {
	pub code: String,
	pub issuer: String,
	pub name: Option<String>,
	pub decimals: Option<u32>,
	pub anchor_asset_type: Option<String>,
	pub anchor_asset: Option<String>,
	pub org_name: Option<String>,
	pub org_logo: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct StellarExpertRating {
	pub age: Option<f64>,
	pub trades: Option<f64>,
	pub payments: Option<f64>,
	pub trustlines: Option<f64>,
	pub volume7d: Option<f64>,
	pub interop: Option<f64>,
	pub liquidity: Option<f64>,
	pub average: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct StellarExpertTrustlines {
	pub total: u64,
	pub authorized: u64,
	pub funded: u64,
}

/// `GET /explorer/public/asset/{CODE-ISSUER}` body.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct StellarExpertAsset {
	pub asset: String,
	pub created: Option<u64>,
	/// Raw supply in stroops
	pub supply: Option<f64>,
	pub trustlines: Option<StellarExpertTrustlines>,
	pub payments: Option<u64>,
	pub payments_amount: Option<f64>,
	pub volume: Option<f64>,
	pub volume7d: Option<f64>,
	pub toml_info: Option<StellarExpertTomlInfo>,
	pub home_domain: Option<String>,
	pub rating: Option<StellarExpertRating>,
}

/// `GET /api/v1/token/{identifier}` body; mostly optional, nested objects left untyped.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct XrpscanToken {
	pub id: Option<String>,
	pub code: Option<String>,
	pub currency: Option<String>,
	pub issuer: Option<String>,
	pub token: Option<String>,
	pub created_at: Option<String>,
	pub updated_at: Option<String>,
	pub blackholed: Option<bool>,
	pub price: Option<f64>,
	pub marketcap: Option<f64>,
	pub supply: Option<f64>,
	pub holders: Option<u64>,
	pub amms: Option<u64>,
	pub disabled: Option<bool>,
	pub score: Option<f64>,
	pub meta: Option<Map<String, Value>>,
	pub metrics: Option<Map<String, Value>>,
	pub tomldata: Option<Map<String, Value>>,
	#[serde(rename = "IssuingAccount")]
	pub issuing_account: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AptoscanFungibleAsset {
	#[serde(rename = "coin_id")]
	pub coin_id: String,
	pub name: String,
	pub symbol: String,
	pub decimals: u8,
	pub address: String,
	#[serde(rename = "current_price")]
	pub current_price: Option<f64>,
	#[serde(rename = "current_num_holder")]
	pub current_num_holder: Option<u64>,
	#[serde(rename = "total_supply")]
	pub total_supply: Option<f64>,
	#[serde(rename = "logo_url")]
	pub logo_url: Option<String>,
	#[serde(rename = "project_url")]
	pub project_url: Option<String>,
	#[serde(rename = "creator_address")]
	pub creator_address: Option<String>,
	#[serde(rename = "coin_standard")]
	pub coin_standard: Option<String>,
	pub reputation: Option<String>,
	pub is_fungible_asset: Option<bool>,
}

/// Aptoscan response envelope.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct AptoscanResponse<T> {
	pub success: bool,
	pub data: T,
	#[serde(default)]
	pub metadata: Option<Map<String, Value>>,
}

/// Client for `api.stellar.expert`.
#[derive(Clone)]
pub struct StellarExpertClient {
	rest: RestClient,
}

impl StellarExpertClient {
	pub const NAME: &'static str = "stellar_expert";

	pub fn default_config() -> FetchConfig {
		FetchConfig::new(STELLAR_EXPERT_BASE_URL)
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

	/// Asset statistics; `asset` is `CODE-ISSUER`, e.g. `BENJI-GBHN...`
	#[instrument(skip(self))]
	pub async fn get_asset(&self, asset: &str) -> Result<StellarExpertAsset, ClientError> {
		if !asset.contains('-') {
			return Err(ClientError::invalid_argument(
				format!("Stellar asset must be CODE-ISSUER, got {}", asset),
				None,
				None,
			));
		}
		let url = self.rest.url(&format!(
			"/explorer/public/asset/{}",
			encode_segment(asset)
		));
		self.rest.get_typed(&url).await
	}
}

/// Client for `api.xrpscan.com`.
#[derive(Clone)]
pub struct XrpscanClient {
	rest: RestClient,
}

impl XrpscanClient {
	pub const NAME: &'static str = "xrpscan";

	pub fn default_config() -> FetchConfig {
		FetchConfig::new(XRPSCAN_BASE_URL)
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

	/// Token by `CURRENCY.ISSUER` identifier.
	#[instrument(skip(self))]
	pub async fn get_token(&self, identifier: &str) -> Result<XrpscanToken, ClientError> {
		let url = self
			.rest
			.url(&format!("/api/v1/token/{}", encode_segment(identifier)));
		self.rest.get_typed(&url).await
	}
}

/// Client for `api.aptoscan.com`.
#[derive(Clone)]
pub struct AptoscanClient {
	rest: RestClient,
}

impl AptoscanClient {
	pub const NAME: &'static str = "aptoscan";

	pub fn default_config() -> FetchConfig {
		FetchConfig::new(APTOSCAN_BASE_URL)
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

	#[instrument(skip(self))]
	pub async fn get_fungible_asset(
		&self,
		address: &str,
	) -> Result<AptoscanResponse<AptoscanFungibleAsset>, ClientError> {
		let url = self.rest.url(&format!(
			"/public/v1.0/fungible_assets/{}",
			encode_segment(address)
		));
		let response: AptoscanResponse<AptoscanFungibleAsset> = self.rest.get_typed(&url).await?;
		if !response.success {
			return Err(ClientError::unexpected_response(
				"Aptoscan reported an unsuccessful lookup",
				None,
				None,
			));
		}
		Ok(response)
	}
}
