//! CoinMarketCap DexScan client.

use serde_json::Value;
use std::{collections::HashMap, sync::Arc};
use tracing::{debug, instrument, warn};

use crate::{
	models::{FetchConfig, TokenSummary},
	services::{
		aggregator::{build_cmc_dexscan_summary, CMC_USD_CONVERT_ID},
		clients::{default_fetcher, required_api_key, ClientError, RestClient},
		fetch::Fetcher,
	},
};

pub const CMC_BASE_URL: &str = "https://pro-api.coinmarketcap.com";
pub const CMC_DEFAULT_NETWORK: &str = "ethereum";

/// Client for the CoinMarketCap DexScan API, authenticated with `X-CMC_PRO_API_KEY`.
#[derive(Clone)]
pub struct CmcDexScanClient {
	rest: RestClient,
}

impl CmcDexScanClient {
	pub const NAME: &'static str = "cmc";

	pub fn default_config() -> FetchConfig {
		FetchConfig::new(CMC_BASE_URL)
	}

	pub fn new(config: FetchConfig) -> Result<Self, ClientError> {
		let fetcher = default_fetcher(&config)?;
		Self::with_fetcher(config, fetcher)
	}

	pub fn with_fetcher(config: FetchConfig, fetcher: Arc<dyn Fetcher>) -> Result<Self, ClientError> {
		let api_key = required_api_key(&config, "CoinMarketCap")?;
		Ok(Self {
			rest: RestClient::new(&config, fetcher).with_header("X-CMC_PRO_API_KEY", api_key.as_str()),
		})
	}

	/// Candidate pair endpoints for a contract, most specific first.
	fn pair_endpoints(
		&self,
		contract_address: &str,
		network_slug: &str,
	) -> Result<Vec<String>, ClientError> {
		let convert_id = CMC_USD_CONVERT_ID.to_string();
		Ok(vec![
			self.rest.url_with_query(
				"/v4/dex/pairs/quotes/latest",
				&[
					("contract_address", contract_address),
					("network_slug", network_slug),
					("convert_id", convert_id.as_str()),
				],
			)?,
			self.rest.url_with_query(
				"/v4/dex/pairs/trade/latest",
				&[
					("base_asset_contract_address", contract_address),
					("network_slug", network_slug),
					("convert", "USD"),
				],
			)?,
			self.rest.url_with_query(
				"/v4/dex/pairs/trade/latest",
				&[
					("contract_address", contract_address),
					("network_slug", network_slug),
					("convert", "USD"),
				],
			)?,
			self.rest.url_with_query(
				"/v3/dex/pairs",
				&[
					("base_asset_contract_address", contract_address),
					("network_slug", network_slug),
					("convert", "USD"),
				],
			)?,
		])
	}

	/// GETs `url` and rejects bodies whose `status.error_code` is not zero.
	async fn request(&self, url: &str) -> Result<Value, ClientError> {
		let value = self.rest.get_json(url).await?;
		if let Some(status) = value.get("status") {
			let code = error_code(status);
			if code != 0 {
				let message = status
					.get("error_message")
					.and_then(Value::as_str)
					.unwrap_or_default();
				return Err(ClientError::unexpected_response(
					format!("API Error {}: {}", code, message),
					None,
					Some(HashMap::from([("url".to_string(), url.to_string())])),
				));
			}
		}
		Ok(value)
	}

	/// Pairs of a contract on one network.
	///
	/// Tries each pair endpoint in turn and returns the first body with non-empty `data`.
	/// A failing endpoint is logged and skipped; when none yields data, the last failure is
	/// returned, or [`ClientError::NotFound`] if every endpoint answered empty.
	#[instrument(skip(self))]
	pub async fn get_pairs_by_token(
		&self,
		contract_address: &str,
		network_slug: &str,
	) -> Result<Value, ClientError> {
		let mut last_error = None;
		for url in self.pair_endpoints(contract_address, network_slug)? {
			debug!(url = %url, "Trying DexScan endpoint");
			match self.request(&url).await {
				Ok(value) if has_data(&value) => return Ok(value),
				Ok(_) => debug!(url = %url, "DexScan endpoint returned no data"),
				Err(error) => {
					warn!(url = %url, error = %error, "DexScan endpoint failed");
					last_error = Some(error);
				}
			}
		}

		Err(last_error.unwrap_or_else(|| {
			ClientError::not_found(
				"All endpoints failed to return valid data",
				None,
				Some(HashMap::from([
					("contract_address".to_string(), contract_address.to_string()),
					("network_slug".to_string(), network_slug.to_string()),
				])),
			)
		}))
	}

	/// Summarizes the pairs of a contract on one network.
	#[instrument(skip(self))]
	pub async fn get_token_summary(
		&self,
		contract_address: &str,
		network_slug: &str,
	) -> Result<TokenSummary, ClientError> {
		let response = self.get_pairs_by_token(contract_address, network_slug).await?;
		Ok(build_cmc_dexscan_summary(contract_address, &response)?)
	}
}

/// `status.error_code`, which v3 sends as a number and v4 as a string.
fn error_code(status: &Value) -> i64 {
	match status.get("error_code") {
		Some(Value::Number(n)) => n.as_i64().unwrap_or(-1),
		Some(Value::String(s)) => s.trim().parse().unwrap_or(-1),
		_ => 0,
	}
}

fn has_data(value: &Value) -> bool {
	match value.get("data") {
		Some(Value::Array(items)) => !items.is_empty(),
		Some(Value::Null) | None => false,
		Some(_) => true,
	}
}
