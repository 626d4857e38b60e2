//! GeckoTerminal API v2 client.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{fmt, sync::Arc};
use tracing::instrument;

use crate::{
	models::{FetchConfig, TokenSummary},
	services::{
		aggregator::build_geckoterminal_summary,
		clients::{decode, default_fetcher, encode_segment, ClientError, RestClient},
		fetch::Fetcher,
	},
};

pub const GECKOTERMINAL_BASE_URL: &str = "https://api.geckoterminal.com/api/v2";

/// Candle width for OHLCV queries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OhlcvTimeframe {
	Minute,
	#[default]
	Hour,
	Day,
}

impl fmt::Display for OhlcvTimeframe {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Minute => "minute",
			Self::Hour => "hour",
			Self::Day => "day",
		})
	}
}

/// Parameters of [`GeckoTerminalClient::get_pool_ohlcv`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OhlcvQuery {
	pub timeframe: OhlcvTimeframe,
	/// Candles per bucket, e.g. 1, 4 or 24 for hours
	pub aggregate: u32,
	/// Only candles before this unix timestamp
	pub before_timestamp: Option<u64>,
	pub limit: u32,
}

impl Default for OhlcvQuery {
	fn default() -> Self {
		Self {
			timeframe: OhlcvTimeframe::Hour,
			aggregate: 1,
			before_timestamp: None,
			limit: 100,
		}
	}
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct GeckoTerminalVolume {
	pub h24: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct GeckoTerminalTokenAttributes {
	pub address: String,
	pub name: Option<String>,
	pub symbol: Option<String>,
	pub decimals: Option<u32>,
	pub image_url: Option<String>,
	pub coingecko_coin_id: Option<String>,
	pub total_supply: Option<String>,
	pub normalized_total_supply: Option<String>,
	pub price_usd: Option<String>,
	pub fdv_usd: Option<String>,
	pub total_reserve_in_usd: Option<String>,
	pub volume_usd: Option<GeckoTerminalVolume>,
	pub market_cap_usd: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct GeckoTerminalTokenData {
	pub id: String,
	#[serde(rename = "type")]
	pub kind: String,
	pub attributes: GeckoTerminalTokenAttributes,
}

/// `GET /networks/{network}/tokens/{address}` body.
///
/// `included` holds pools and other related resources, left untyped.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct GeckoTerminalTokenResponse {
	pub data: GeckoTerminalTokenData,
	#[serde(default)]
	pub included: Vec<Value>,
}

/// Client for `api.geckoterminal.com`.
#[derive(Clone)]
pub struct GeckoTerminalClient {
	rest: RestClient,
}

impl GeckoTerminalClient {
	pub const NAME: &'static str = "geckoterminal";

	pub fn default_config() -> FetchConfig {
		FetchConfig::new(GECKOTERMINAL_BASE_URL)
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

	fn network_path(network: &str, rest: &str) -> String {
		format!("/networks/{}{}", encode_segment(network), rest)
	}

	/// Raw token body, optionally with its top pools in `included`.
	#[instrument(skip(self))]
	pub async fn get_token_raw(
		&self,
		network: &str,
		token_address: &str,
		include_top_pools: bool,
		include_composition: bool,
	) -> Result<Value, ClientError> {
		let mut query: Vec<(&str, &str)> = Vec::new();
		if include_top_pools {
			query.push(("include", "top_pools"));
		}
		if include_composition {
			query.push(("include_composition", "true"));
		}
		let path = Self::network_path(
			network,
			&format!("/tokens/{}", encode_segment(token_address)),
		);
		let url = self.rest.url_with_query(&path, &query)?;
		self.rest.get_json(&url).await
	}

	#[instrument(skip(self))]
	pub async fn get_token(
		&self,
		network: &str,
		token_address: &str,
		include_top_pools: bool,
		include_composition: bool,
	) -> Result<GeckoTerminalTokenResponse, ClientError> {
		let raw = self
			.get_token_raw(network, token_address, include_top_pools, include_composition)
			.await?;
		decode(raw, "GeckoTerminal token response")
	}

	/// Summarizes the token's top pools on `network`.
	#[instrument(skip(self))]
	pub async fn get_token_summary(
		&self,
		network: &str,
		token_address: &str,
	) -> Result<TokenSummary, ClientError> {
		let raw = self
			.get_token_raw(network, token_address, true, false)
			.await?;
		Ok(build_geckoterminal_summary(network, token_address, &raw)?)
	}

	#[instrument(skip(self))]
	pub async fn get_pool(&self, network: &str, pool_address: &str) -> Result<Value, ClientError> {
		let path = Self::network_path(network, &format!("/pools/{}", encode_segment(pool_address)));
		self.rest.get_json(&self.rest.url(&path)).await
	}

	#[instrument(skip(self))]
	pub async fn search_pools(&self, network: &str, query: &str) -> Result<Value, ClientError> {
		let path = Self::network_path(network, "/pools/search");
		let url = self.rest.url_with_query(&path, &[("query", query)])?;
		self.rest.get_json(&url).await
	}

	#[instrument(skip(self))]
	pub async fn get_trending_pools(&self, network: &str) -> Result<Value, ClientError> {
		let path = Self::network_path(network, "/trending_pools");
		self.rest.get_json(&self.rest.url(&path)).await
	}

	/// Candlestick data for one pool.
	#[instrument(skip(self))]
	pub async fn get_pool_ohlcv(
		&self,
		network: &str,
		pool_address: &str,
		query: OhlcvQuery,
	) -> Result<Value, ClientError> {
		let path = Self::network_path(
			network,
			&format!(
				"/pools/{}/ohlcv/{}",
				encode_segment(pool_address),
				query.timeframe
			),
		);
		let mut params = vec![
			("timeframe", query.timeframe.to_string()),
			("aggregate", query.aggregate.to_string()),
			("limit", query.limit.to_string()),
		];
		if let Some(before) = query.before_timestamp {
			params.push(("before_timestamp", before.to_string()));
		}
		let url = self.rest.url_with_query(&path, &params)?;
		self.rest.get_json(&url).await
	}

	#[instrument(skip(self))]
	pub async fn get_networks(&self) -> Result<Value, ClientError> {
		self.rest.get_json(&self.rest.url("/networks")).await
	}

	#[instrument(skip(self))]
	pub async fn get_dexes(&self, network: &str) -> Result<Value, ClientError> {
		let path = Self::network_path(network, "/dexes");
		self.rest.get_json(&self.rest.url(&path)).await
	}
}
