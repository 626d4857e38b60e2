//! GoldRush (Covalent) API client.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{collections::HashMap, fmt, sync::Arc};
use tracing::{debug, instrument};

use crate::{
	models::FetchConfig,
	services::{
		clients::{decode, default_fetcher, encode_segment, required_api_key, ClientError, RestClient},
		fetch::Fetcher,
	},
};

pub const GOLDRUSH_BASE_URL: &str = "https://api.covalenthq.com/v1";

/// Environment variable conventionally holding the GoldRush key
pub const GOLDRUSH_API_KEY_ENV: &str = "GOLDRUSH_API_KEY";

/// Quote currencies GoldRush prices in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum QuoteCurrency {
	#[default]
	Usd,
	Cad,
	Eur,
	Sgd,
	Inr,
	Jpy,
	Vnd,
	Cny,
	Krw,
	Rub,
	Try,
	Ngn,
	Ars,
	Aud,
	Chf,
	Gbp,
}

impl fmt::Display for QuoteCurrency {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let code = match self {
			Self::Usd => "USD",
			Self::Cad => "CAD",
			Self::Eur => "EUR",
			Self::Sgd => "SGD",
			Self::Inr => "INR",
			Self::Jpy => "JPY",
			Self::Vnd => "VND",
			Self::Cny => "CNY",
			Self::Krw => "KRW",
			Self::Rub => "RUB",
			Self::Try => "TRY",
			Self::Ngn => "NGN",
			Self::Ars => "ARS",
			Self::Aud => "AUD",
			Self::Chf => "CHF",
			Self::Gbp => "GBP",
		};
		f.write_str(code)
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenBalancesParams {
	pub chain_name: String,
	pub wallet_address: String,
	pub quote_currency: Option<QuoteCurrency>,
	pub no_spam: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoricalPricesParams {
	pub chain_name: String,
	pub quote_currency: QuoteCurrency,
	pub contract_addresses: Vec<String>,
	/// `YYYY-MM-DD`
	pub from: Option<String>,
	/// `YYYY-MM-DD`
	pub to: Option<String>,
	pub prices_at_asc: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenHoldersParams {
	pub chain_name: String,
	pub token_address: String,
	pub block_height: Option<u64>,
	/// `YYYY-MM-DD`
	pub date: Option<String>,
	/// 100 or 1000
	pub page_size: Option<u32>,
	pub page_number: Option<u32>,
	pub no_snapshot: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct GoldRushPagination {
	#[serde(default)]
	pub has_more: bool,
	pub page_number: Option<u32>,
	pub page_size: Option<u32>,
	pub total_count: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
struct Envelope {
	#[serde(default)]
	data: Value,
	#[serde(default)]
	error: bool,
	error_message: Option<String>,
	error_code: Option<i64>,
}

/// Client for the GoldRush REST API, authenticated with a bearer key.
///
/// Built once by the caller and handed to whatever needs it.
#[derive(Clone)]
pub struct GoldRushClient {
	rest: RestClient,
}

impl GoldRushClient {
	pub const NAME: &'static str = "goldrush";

	pub fn default_config() -> FetchConfig {
		FetchConfig::new(GOLDRUSH_BASE_URL)
	}

	pub fn new(config: FetchConfig) -> Result<Self, ClientError> {
		let fetcher = default_fetcher(&config)?;
		Self::with_fetcher(config, fetcher)
	}

	pub fn with_fetcher(config: FetchConfig, fetcher: Arc<dyn Fetcher>) -> Result<Self, ClientError> {
		let api_key = required_api_key(&config, "GoldRush")?;
		Ok(Self {
			rest: RestClient::new(&config, fetcher)
				.with_header("Authorization", format!("Bearer {}", api_key.as_str())),
		})
	}

	/// GETs `path` and unwraps the `data` member of the response envelope.
	async fn get_data(&self, path: &str, query: &[(&str, String)]) -> Result<Value, ClientError> {
		let url = self.rest.url_with_query(path, query)?;
		let envelope: Envelope = decode(self.rest.get_json(&url).await?, "GoldRush response")?;
		if envelope.error {
			let code = envelope.error_code.unwrap_or_default();
			return Err(ClientError::unexpected_response(
				envelope
					.error_message
					.unwrap_or_else(|| "GoldRush request failed".to_string()),
				None,
				Some(HashMap::from([("error_code".to_string(), code.to_string())])),
			));
		}
		Ok(envelope.data)
	}

	/// Token balances held by a wallet on one chain.
	#[instrument(skip(self))]
	pub async fn get_token_balances_for_wallet_address(
		&self,
		params: &TokenBalancesParams,
	) -> Result<Value, ClientError> {
		let path = format!(
			"/{}/address/{}/balances_v2/",
			encode_segment(&params.chain_name),
			encode_segment(&params.wallet_address)
		);
		let mut query = Vec::new();
		if let Some(currency) = params.quote_currency {
			query.push(("quote-currency", currency.to_string()));
		}
		if let Some(no_spam) = params.no_spam {
			query.push(("no-spam", no_spam.to_string()));
		}
		self.get_data(&path, &query).await
	}

	/// Daily prices for one or more contracts.
	#[instrument(skip(self))]
	pub async fn get_historical_token_prices(
		&self,
		params: &HistoricalPricesParams,
	) -> Result<Value, ClientError> {
		if params.contract_addresses.is_empty() {
			return Err(ClientError::invalid_argument(
				"At least one contract address is required",
				None,
				None,
			));
		}
		let contracts = params
			.contract_addresses
			.iter()
			.map(|address| encode_segment(address))
			.collect::<Vec<_>>()
			.join(",");
		let path = format!(
			"/pricing/historical_by_addresses_v2/{}/{}/{}/",
			encode_segment(&params.chain_name),
			params.quote_currency,
			contracts
		);
		let mut query = Vec::new();
		if let Some(from) = &params.from {
			query.push(("from", from.clone()));
		}
		if let Some(to) = &params.to {
			query.push(("to", to.clone()));
		}
		if let Some(asc) = params.prices_at_asc {
			query.push(("prices-at-asc", asc.to_string()));
		}
		self.get_data(&path, &query).await
	}

	fn holders_request(params: &TokenHoldersParams, page_number: Option<u32>) -> (String, Vec<(&'static str, String)>) {
		let path = format!(
			"/{}/tokens/{}/token_holders_v2/",
			encode_segment(&params.chain_name),
			encode_segment(&params.token_address)
		);
		let mut query = Vec::new();
		if let Some(height) = params.block_height {
			query.push(("block-height", height.to_string()));
		}
		if let Some(date) = &params.date {
			query.push(("date", date.clone()));
		}
		if let Some(size) = params.page_size {
			query.push(("page-size", size.to_string()));
		}
		if let Some(page) = page_number {
			query.push(("page-number", page.to_string()));
		}
		if let Some(no_snapshot) = params.no_snapshot {
			query.push(("no-snapshot", no_snapshot.to_string()));
		}
		(path, query)
	}

	/// One page of token holders.
	#[instrument(skip(self))]
	pub async fn get_token_holders_by_page(
		&self,
		params: &TokenHoldersParams,
	) -> Result<Value, ClientError> {
		let (path, query) = Self::holders_request(params, params.page_number);
		self.get_data(&path, &query).await
	}

	/// Every page of token holders, starting at `page_number` (default 0), following
	/// `pagination.has_more`.
	#[instrument(skip(self))]
	pub async fn get_token_holders(&self, params: &TokenHoldersParams) -> Result<Vec<Value>, ClientError> {
		let mut pages = Vec::new();
		let mut page_number = params.page_number.unwrap_or(0);
		loop {
			let (path, query) = Self::holders_request(params, Some(page_number));
			let data = self.get_data(&path, &query).await?;
			let pagination: GoldRushPagination = match data.get("pagination") {
				Some(value) if !value.is_null() => decode(value.clone(), "GoldRush pagination")?,
				_ => GoldRushPagination::default(),
			};
			pages.push(data);
			if !pagination.has_more {
				break;
			}
			debug!(page_number, "Fetching next page of token holders");
			page_number = page_number.saturating_add(1);
		}
		Ok(pages)
	}
}
