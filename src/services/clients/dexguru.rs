//! DexGuru API client.
//!
//! Endpoints answer with JSON or, for a few legacy routes, plain text; both come back as
//! [`ResponseBody`].

use serde::Serialize;
use std::{fmt, sync::Arc};
use tracing::instrument;

use crate::{
	models::FetchConfig,
	services::{
		clients::{default_fetcher, encode_segment, required_api_key, ClientError, RestClient},
		fetch::{FetchRequest, Fetcher, ResponseBody},
	},
};

pub const DEXGURU_BASE_URL: &str = "https://api.dev.dex.guru";
pub const DEXGURU_DEFAULT_TIMEOUT_MS: u64 = 8_000;

/// Sort direction of paginated listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
	Asc,
	Desc,
}

impl fmt::Display for SortOrder {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Asc => "asc",
			Self::Desc => "desc",
		})
	}
}

/// Filters shared by the transaction listings. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DexguruPageParams {
	pub begin_timestamp: Option<u64>,
	pub end_timestamp: Option<u64>,
	/// e.g. `"timestamp"`
	pub sort_by: Option<String>,
	pub order: Option<SortOrder>,
	pub limit: Option<u32>,
	pub offset: Option<u32>,
	/// Any further query parameters, sent as given
	pub extra: Vec<(String, String)>,
}

impl DexguruPageParams {
	fn to_query(&self) -> Vec<(String, String)> {
		let mut query = Vec::new();
		let mut push = |key: &str, value: Option<String>| {
			if let Some(value) = value {
				query.push((key.to_string(), value));
			}
		};
		push("begin_timestamp", self.begin_timestamp.map(|v| v.to_string()));
		push("end_timestamp", self.end_timestamp.map(|v| v.to_string()));
		push("sort_by", self.sort_by.clone());
		push("order", self.order.map(|v| v.to_string()));
		push("limit", self.limit.map(|v| v.to_string()));
		push("offset", self.offset.map(|v| v.to_string()));
		query.extend(self.extra.iter().cloned());
		query
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryInterval {
	OneMinute,
	FiveMinutes,
	FifteenMinutes,
	OneHour,
	FourHours,
	OneDay,
}

impl fmt::Display for HistoryInterval {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::OneMinute => "1m",
			Self::FiveMinutes => "5m",
			Self::FifteenMinutes => "15m",
			Self::OneHour => "1h",
			Self::FourHours => "4h",
			Self::OneDay => "1d",
		})
	}
}

/// Window of a market history query, in unix seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DexguruHistoryParams {
	pub from: u64,
	pub to: u64,
	pub interval: HistoryInterval,
}

/// Transaction listings available per token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
	All,
	Swaps,
	Burns,
	Mints,
	Transfers,
}

impl TransactionKind {
	fn path_suffix(self) -> &'static str {
		match self {
			Self::All => "/transactions",
			Self::Swaps => "/transactions/swaps",
			Self::Burns => "/transactions/burns",
			Self::Mints => "/transactions/mints",
			Self::Transfers => "/transactions/transfers",
		}
	}
}

/// Client for the DexGuru v1 API.
///
/// The key travels both as an `api-key` header and as an `api-key` query parameter.
#[derive(Clone)]
pub struct DexguruClient {
	rest: RestClient,
	api_key: String,
}

impl DexguruClient {
	pub const NAME: &'static str = "dexguru";

	pub fn default_config() -> FetchConfig {
		FetchConfig::new(DEXGURU_BASE_URL).with_timeout_ms(DEXGURU_DEFAULT_TIMEOUT_MS)
	}

	pub fn new(config: FetchConfig) -> Result<Self, ClientError> {
		let fetcher = default_fetcher(&config)?;
		Self::with_fetcher(config, fetcher)
	}

	pub fn with_fetcher(config: FetchConfig, fetcher: Arc<dyn Fetcher>) -> Result<Self, ClientError> {
		let api_key = required_api_key(&config, "DexGuru")?
			.as_str()
			.trim()
			.to_string();
		Ok(Self {
			rest: RestClient::new(&config, fetcher).with_header("api-key", api_key.clone()),
			api_key,
		})
	}

	fn token_path(chain_id: u64, token_address: &str, suffix: &str) -> String {
		format!(
			"/v1/chain/{}/tokens/{}{}",
			chain_id,
			encode_segment(token_address),
			suffix
		)
	}

	async fn request(&self, path: &str, query: Vec<(String, String)>) -> Result<ResponseBody, ClientError> {
		let mut query = query;
		if !query.iter().any(|(key, _)| key == "api-key") {
			query.push(("api-key".to_string(), self.api_key.clone()));
		}
		let url = self.rest.url_with_query(path, &query)?;
		self.rest.send(FetchRequest::get(url)).await
	}

	#[instrument(skip(self))]
	pub async fn get_token_inventory(
		&self,
		chain_id: u64,
		token_address: &str,
	) -> Result<ResponseBody, ClientError> {
		self.request(&Self::token_path(chain_id, token_address, ""), Vec::new())
			.await
	}

	#[instrument(skip(self))]
	pub async fn get_token_logo(
		&self,
		chain_id: u64,
		token_address: &str,
	) -> Result<ResponseBody, ClientError> {
		self.request(&Self::token_path(chain_id, token_address, "/logo"), Vec::new())
			.await
	}

	#[instrument(skip(self))]
	pub async fn get_token_market(
		&self,
		chain_id: u64,
		token_address: &str,
	) -> Result<ResponseBody, ClientError> {
		self.request(&Self::token_path(chain_id, token_address, "/market"), Vec::new())
			.await
	}

	#[instrument(skip(self))]
	pub async fn get_token_market_history(
		&self,
		chain_id: u64,
		token_address: &str,
		params: DexguruHistoryParams,
	) -> Result<ResponseBody, ClientError> {
		let query = vec![
			("from".to_string(), params.from.to_string()),
			("to".to_string(), params.to.to_string()),
			("interval".to_string(), params.interval.to_string()),
		];
		self.request(
			&Self::token_path(chain_id, token_address, "/market/history"),
			query,
		)
		.await
	}

	/// One of the per-token transaction listings.
	#[instrument(skip(self, params))]
	pub async fn get_token_transactions(
		&self,
		chain_id: u64,
		token_address: &str,
		kind: TransactionKind,
		params: &DexguruPageParams,
	) -> Result<ResponseBody, ClientError> {
		self.request(
			&Self::token_path(chain_id, token_address, kind.path_suffix()),
			params.to_query(),
		)
		.await
	}

	/// TradingView UDF candles for a DexGuru symbol.
	#[instrument(skip(self))]
	pub async fn get_tradingview_history(
		&self,
		symbol: &str,
		from: u64,
		to: u64,
		resolution: &str,
	) -> Result<ResponseBody, ClientError> {
		let query = vec![
			("symbol".to_string(), symbol.to_string()),
			("from".to_string(), from.to_string()),
			("to".to_string(), to.to_string()),
			("resolution".to_string(), resolution.to_string()),
		];
		self.request("/v1/tradingview/history", query).await
	}
}
