//! Summary builders for each market-data API's response shape.

use serde_json::Value;
use std::collections::HashMap;

use crate::{
	models::{DexScanDetails, PairOverview, SecurityScan, TokenSummary},
	services::aggregator::{
		build_summary, count_value, numeric_value, summary::object_entries, AggregationError,
		JsonRecord, MarketRecord, RecordSchema,
	},
};

/// CoinMarketCap's id for USD in `quote[].convert_id`
pub const CMC_USD_CONVERT_ID: u64 = 2781;

fn missing_field(source: &str, field: &str) -> AggregationError {
	AggregationError::invalid_input(
		format!("{} response has no `{}`", source, field),
		None,
		Some(HashMap::from([("source".to_string(), source.to_string())])),
	)
}

/// Summarizes a Dexscreener pairs response.
///
/// Accepts the bare `pairs` array or the whole `{ "pairs": [...] }` body; a null or absent
/// `pairs` means the token has no pairs.
pub fn build_dexscreener_summary(
	token_address: &str,
	response: &Value,
) -> Result<TokenSummary, AggregationError> {
	let empty = Value::Array(Vec::new());
	let pairs = match response {
		Value::Array(_) => response,
		Value::Object(body) => match body.get("pairs") {
			None | Some(Value::Null) => &empty,
			Some(pairs) => pairs,
		},
		_ => return Err(missing_field("Dexscreener", "pairs")),
	};

	let (objects, skipped) = object_entries(pairs, "pairs")?;
	let records: Vec<JsonRecord<'_>> = objects
		.into_iter()
		.map(|pair| JsonRecord::new(pair, &RecordSchema::DEXSCREENER))
		.collect();

	let mut summary = build_summary(token_address, &records);
	summary.skipped_records = skipped;
	Ok(summary)
}

/// Summarizes a GeckoTerminal token response fetched with `include=top_pools`.
///
/// Pools come from `included[]` entries of type `pool` and are reported on `network`. The
/// token's own attributes take precedence for name and symbol, and stand in for the totals
/// when the response carries no pools.
pub fn build_geckoterminal_summary(
	network: &str,
	token_address: &str,
	response: &Value,
) -> Result<TokenSummary, AggregationError> {
	let token = response
		.get("data")
		.filter(|data| data.is_object())
		.ok_or_else(|| missing_field("GeckoTerminal", "data"))?;
	let attributes = token.get("attributes");

	let empty = Value::Array(Vec::new());
	let included = match response.get("included") {
		None | Some(Value::Null) => &empty,
		Some(included) => included,
	};
	let (objects, skipped) = object_entries(included, "included")?;
	let pools: Vec<JsonRecord<'_>> = objects
		.into_iter()
		.filter(|item| item.get("type").and_then(Value::as_str) == Some("pool"))
		.map(|pool| {
			JsonRecord::new(pool, &RecordSchema::GECKOTERMINAL_POOL).with_default_chain(network)
		})
		.collect();

	let mut summary = build_summary(token_address, &pools);
	summary.skipped_records = skipped;
	summary.chains.insert(network.to_string());

	let attribute = |pointer: &str| attributes.and_then(|a| a.pointer(pointer));
	if let Some(name) = attribute("/name")
		.and_then(Value::as_str)
		.map(str::trim)
		.filter(|n| !n.is_empty())
	{
		summary.token_name = name.to_string();
	}
	if let Some(symbol) = attribute("/symbol")
		.and_then(Value::as_str)
		.map(str::trim)
		.filter(|s| !s.is_empty())
	{
		summary.token_symbol = symbol.to_string();
	}

	if pools.is_empty() {
		if let Some(reserve) = attribute("/total_reserve_in_usd")
			.and_then(numeric_value)
			.filter(|v| *v >= 0.0)
		{
			summary.liquidity_usd_total = reserve;
		}
		if let Some(volume) = attribute("/volume_usd/h24")
			.and_then(numeric_value)
			.filter(|v| *v >= 0.0)
		{
			summary.volume_24h_total = volume;
		}
	}

	Ok(summary)
}

/// One CoinMarketCap DexScan pair, with market figures read from its USD quote.
#[derive(Debug, Clone, Copy)]
pub struct CmcPairRecord<'a> {
	pair: &'a Value,
	quote: Option<&'a Value>,
}

impl<'a> CmcPairRecord<'a> {
	/// Uses the quote with `convert_id == 2781` (USD), else the first quote.
	pub fn new(pair: &'a Value) -> Self {
		let quotes = pair.get("quote").and_then(Value::as_array);
		let quote = quotes.and_then(|quotes| {
			quotes
				.iter()
				.find(|q| {
					q.get("convert_id").and_then(count_value) == Some(CMC_USD_CONVERT_ID)
				})
				.or_else(|| quotes.first())
		});
		Self { pair, quote }
	}

	fn text(&self, key: &str) -> Option<&'a str> {
		self.pair.get(key).and_then(Value::as_str)
	}

	fn quote_number(&self, key: &str) -> Option<f64> {
		self.quote.and_then(|q| q.get(key)).and_then(numeric_value)
	}
}

impl MarketRecord for CmcPairRecord<'_> {
	fn pair_address(&self) -> Option<&str> {
		self.text("contract_address")
	}

	fn chain_id(&self) -> Option<&str> {
		self.text("network_slug")
	}

	fn base_address(&self) -> Option<&str> {
		self.text("base_asset_contract_address")
	}

	fn base_name(&self) -> Option<&str> {
		self.text("base_asset_name")
	}

	fn base_symbol(&self) -> Option<&str> {
		self.text("base_asset_symbol")
	}

	fn quote_address(&self) -> Option<&str> {
		self.text("quote_asset_contract_address")
	}

	fn quote_name(&self) -> Option<&str> {
		self.text("quote_asset_name")
	}

	fn quote_symbol(&self) -> Option<&str> {
		self.text("quote_asset_symbol")
	}

	fn liquidity_usd(&self) -> Option<f64> {
		self.quote_number("liquidity")
	}

	fn volume_24h(&self) -> Option<f64> {
		self.quote_number("volume_24h")
	}

	// DexScan does not split trades into buys and sells
	fn buys_24h(&self) -> Option<u64> {
		None
	}

	fn sells_24h(&self) -> Option<u64> {
		None
	}

	fn dex_id(&self) -> Option<&str> {
		self.text("dex_slug").or_else(|| self.text("platform_name"))
	}

	fn transactions_24h(&self) -> Option<u64> {
		self.pair
			.get("num_transactions_24h")
			.and_then(count_value)
			.or_else(|| {
				self.quote
					.and_then(|q| q.get("num_transactions_24h"))
					.and_then(count_value)
			})
	}

	fn price_usd(&self) -> Option<f64> {
		self.quote_number("price")
	}

	fn fdv(&self) -> Option<f64> {
		self.quote_number("fully_diluted_value")
	}
}

impl CmcPairRecord<'_> {
	fn is_base(&self, token_address: &str) -> bool {
		self.base_address()
			.map(|a| a.trim().eq_ignore_ascii_case(token_address.trim()))
			.unwrap_or(false)
	}

	/// A non-zero number stored on the pair itself.
	fn pair_number(&self, key: &str) -> Option<f64> {
		self.pair
			.get(key)
			.and_then(numeric_value)
			.filter(|v| *v != 0.0)
	}

	fn security_scan(&self) -> Option<SecurityScan> {
		let scan = self.pair.get("security_scan").filter(|s| s.is_object())?;
		let flag = |key: &str| {
			scan.pointer(&format!("/aggregated/{}", key))
				.and_then(Value::as_bool)
				.unwrap_or(false)
		};
		Some(SecurityScan {
			contract_verified: flag("contract_verified"),
			is_honeypot: flag("honeypot"),
			details: scan
				.get("third_party")
				.filter(|d| !d.is_null())
				.cloned()
				.unwrap_or_else(|| Value::Object(Default::default())),
		})
	}

	fn overview(&self) -> PairOverview {
		let pair_name = self
			.text("name")
			.filter(|n| !n.trim().is_empty())
			.map(str::to_string)
			.unwrap_or_else(|| {
				format!(
					"{}/{}",
					self.base_symbol().unwrap_or_default(),
					self.quote_symbol().unwrap_or_default()
				)
			});
		PairOverview {
			pair_name,
			dex: self.dex_id().unwrap_or("Unknown").to_string(),
			contract_address: self.pair_address().map(str::to_string),
			volume_24h: self.volume_24h().unwrap_or(0.0),
			liquidity_usd: self.liquidity_usd().unwrap_or(0.0),
		}
	}
}

/// Collects the DexScan-only token facts and the per-pair listing.
///
/// Each token-level field is taken from the first base-side pair that reports it; zero
/// counts as not reported.
fn dex_scan_details(token_address: &str, records: &[CmcPairRecord<'_>]) -> DexScanDetails {
	let mut details = DexScanDetails::default();
	for record in records.iter().filter(|r| r.is_base(token_address)) {
		details.holders = details.holders.or_else(|| {
			record
				.pair
				.get("holders")
				.and_then(count_value)
				.filter(|h| *h > 0)
		});
		details.total_supply = details
			.total_supply
			.or_else(|| record.pair_number("total_supply_base_asset"));
		details.buy_tax = details.buy_tax.or_else(|| record.pair_number("buy_tax"));
		details.sell_tax = details.sell_tax.or_else(|| record.pair_number("sell_tax"));
		details.security = details.security.or_else(|| record.security_scan());
	}
	details.all_pairs = records.iter().map(CmcPairRecord::overview).collect();
	details
}

/// Summarizes a CoinMarketCap DexScan response whose `data` is a pair list or a single pair.
///
/// Besides the common summary, fills [`TokenSummary::dex_scan`] with holders, supply, taxes,
/// the security scan and an overview of every pair.
pub fn build_cmc_dexscan_summary(
	token_address: &str,
	response: &Value,
) -> Result<TokenSummary, AggregationError> {
	let data = response
		.get("data")
		.filter(|data| !data.is_null())
		.ok_or_else(|| missing_field("CoinMarketCap DexScan", "data"))?;

	let wrapped;
	let pairs = if data.is_object() {
		wrapped = Value::Array(vec![data.clone()]);
		&wrapped
	} else {
		data
	};

	let (objects, skipped) = object_entries(pairs, "data")?;
	let records: Vec<CmcPairRecord<'_>> = objects.into_iter().map(CmcPairRecord::new).collect();

	let mut summary = build_summary(token_address, &records);
	summary.skipped_records = skipped;
	summary.dex_scan = Some(dex_scan_details(token_address, &records));
	Ok(summary)
}
