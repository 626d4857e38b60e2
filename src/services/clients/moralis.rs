//! Moralis Web3 Data API client.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{collections::HashMap, sync::Arc};
use tracing::instrument;

use crate::{
	models::FetchConfig,
	services::{
		aggregator::numeric_value,
		clients::{decode, default_fetcher, encode_segment, required_api_key, ClientError, RestClient},
		fetch::Fetcher,
	},
};

pub const MORALIS_BASE_URL: &str = "https://deep-index.moralis.io/api/v2.2";
pub const MORALIS_DEFAULT_CHAIN: &str = "eth";

/// Numeric fields coerced to numbers, missing or unparsable ones becoming `0`
const NUMERIC_PRICE_FIELDS: [&str; 5] = [
	"usdPrice",
	"usdPrice24h",
	"usdPrice24hrUsdChange",
	"usdPrice24hrPercentChange",
	"securityScore",
];

/// `GET /erc20/{address}/price` body.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MoralisErc20Price {
	pub token_address: String,
	pub token_name: Option<String>,
	pub token_symbol: Option<String>,
	pub token_logo: Option<String>,
	pub token_decimals: Option<String>,
	pub native_price: Option<Value>,
	pub usd_price: f64,
	pub usd_price_formatted: Option<String>,
	#[serde(rename = "24hrPercentChange")]
	pub percent_change_24h: Option<String>,
	pub exchange_address: Option<String>,
	pub exchange_name: Option<String>,
	pub to_block: Option<String>,
	pub possible_spam: Option<bool>,
	pub verified_contract: Option<bool>,
	pub pair_address: Option<String>,
	pub pair_total_liquidity_usd: Option<String>,
	pub usd_price_24h: f64,
	pub usd_price_24hr_usd_change: f64,
	pub usd_price_24hr_percent_change: f64,
	pub security_score: f64,
}

/// Checks a raw price body and normalizes its numeric fields.
///
/// `tokenAddress` must be a non-empty string.
pub fn validate_token_data(value: Value) -> Result<MoralisErc20Price, ClientError> {
	let Value::Object(mut object) = value else {
		return Err(ClientError::unexpected_response(
			"Invalid token data: expected an object",
			None,
			None,
		));
	};

	let has_address = object
		.get("tokenAddress")
		.and_then(Value::as_str)
		.map(|address| !address.trim().is_empty())
		.unwrap_or(false);
	if !has_address {
		return Err(ClientError::unexpected_response(
			"Invalid token data: missing tokenAddress",
			None,
			None,
		));
	}

	for field in NUMERIC_PRICE_FIELDS {
		let number = object.get(field).and_then(numeric_value).unwrap_or(0.0);
		object.insert(field.to_string(), Value::from(number));
	}

	decode(Value::Object(object), "Moralis token price")
}

/// Client for the Moralis EVM API, authenticated with `X-API-Key`.
#[derive(Clone)]
pub struct MoralisClient {
	rest: RestClient,
}

impl MoralisClient {
	pub const NAME: &'static str = "moralis";

	pub fn default_config() -> FetchConfig {
		FetchConfig::new(MORALIS_BASE_URL)
	}

	pub fn new(config: FetchConfig) -> Result<Self, ClientError> {
		let fetcher = default_fetcher(&config)?;
		Self::with_fetcher(config, fetcher)
	}

	pub fn with_fetcher(config: FetchConfig, fetcher: Arc<dyn Fetcher>) -> Result<Self, ClientError> {
		let api_key = required_api_key(&config, "Moralis")?;
		Ok(Self {
			rest: RestClient::new(&config, fetcher).with_header("X-API-Key", api_key.as_str()),
		})
	}

	/// USD price of an ERC20 token, taken from its most liquid pool.
	#[instrument(skip(self))]
	pub async fn get_erc20_token_price(
		&self,
		token_address: &str,
		chain: &str,
	) -> Result<MoralisErc20Price, ClientError> {
		let token_address = token_address.trim();
		let chain = chain.trim();
		if token_address.is_empty() {
			return Err(ClientError::invalid_argument(
				"Token address is required and must be a string",
				None,
				None,
			));
		}
		if chain.is_empty() {
			return Err(ClientError::invalid_argument(
				"Chain is required and must be a string",
				None,
				None,
			));
		}

		let url = self.rest.url_with_query(
			&format!("/erc20/{}/price", encode_segment(token_address)),
			&[("chain", chain)],
		)?;
		let value = self
			.rest
			.get_json(&url)
			.await
			.map_err(|error| translate_status(error, token_address, chain))?;
		validate_token_data(value)
	}
}

fn translate_status(error: ClientError, token_address: &str, chain: &str) -> ClientError {
	let ClientError::Fetch(fetch) = &error else {
		return error;
	};
	let metadata = Some(HashMap::from([
		("token".to_string(), token_address.to_string()),
		("chain".to_string(), chain.to_string()),
	]));
	match fetch.status() {
		Some(StatusCode::NOT_FOUND) => ClientError::not_found(
			format!(
				"No liquidity pools found for token {} on {}. This token may not have trading \
				 liquidity or may not exist on this chain.",
				token_address, chain
			),
			Some(Box::new(error)),
			metadata,
		),
		Some(StatusCode::UNAUTHORIZED) => {
			ClientError::unauthorized("Invalid Moralis API key", Some(Box::new(error)), metadata)
		}
		_ => error,
	}
}
