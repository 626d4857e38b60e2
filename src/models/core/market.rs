use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Name reported when no record identifies the token
pub const UNKNOWN_TOKEN_NAME: &str = "Unknown";

/// Symbol reported when no record identifies the token
pub const UNKNOWN_TOKEN_SYMBOL: &str = "UNKNOWN";

/// Address, name and symbol of one side of a pair.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TokenRef {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub address: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub symbol: Option<String>,
}

/// Trade counts over the last 24 hours.
///
/// `total` also includes sources that only report an undivided count.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionCounts {
	pub buys: u64,
	pub sells: u64,
	pub total: u64,
}

/// Normalized view of the record with the most liquidity.
///
/// Fields the source did not report are `None` and omitted from JSON output.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PrimaryRecord {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub pair_address: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub dex_id: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub chain_id: Option<String>,
	pub base_token: TokenRef,
	pub quote_token: TokenRef,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub price_usd: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub liquidity_usd: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub volume_24h: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub fdv: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub market_cap: Option<f64>,
}

/// Security verdict CoinMarketCap attaches to a token.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SecurityScan {
	pub contract_verified: bool,
	pub is_honeypot: bool,
	/// Third-party scanner reports, passed through as sent
	#[serde(default)]
	pub details: serde_json::Value,
}

/// One pair as listed in [`DexScanDetails::all_pairs`].
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PairOverview {
	/// Pair name, or `BASE/QUOTE` when the source gives none
	pub pair_name: String,
	pub dex: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub contract_address: Option<String>,
	pub volume_24h: f64,
	pub liquidity_usd: f64,
}

/// Token facts only CoinMarketCap DexScan reports.
///
/// Token-level fields come from pairs whose base asset is the queried token.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DexScanDetails {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub holders: Option<u64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub total_supply: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub buy_tax: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub sell_tax: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub security: Option<SecurityScan>,
	pub all_pairs: Vec<PairOverview>,
}

/// Aggregated market picture of one token across every pair/pool a source returned.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TokenSummary {
	/// The queried address, echoed unchanged
	pub token_address: String,
	pub token_name: String,
	pub token_symbol: String,
	/// Distinct chain ids, sorted
	pub chains: BTreeSet<String>,
	/// Number of records interpreted
	pub num_pairs: usize,
	pub liquidity_usd_total: f64,
	pub volume_24h_total: f64,
	pub transactions_24h: TransactionCounts,
	/// `None` only when there were no records
	pub primary_record: Option<PrimaryRecord>,
	/// Entries dropped because they were not JSON objects
	#[serde(default)]
	pub skipped_records: usize,
	/// Set only by the CoinMarketCap DexScan builder
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub dex_scan: Option<DexScanDetails>,
}

impl TokenSummary {
	/// Summary of a token with no market records.
	pub fn empty(token_address: impl Into<String>) -> Self {
		Self {
			token_address: token_address.into(),
			token_name: UNKNOWN_TOKEN_NAME.to_string(),
			token_symbol: UNKNOWN_TOKEN_SYMBOL.to_string(),
			chains: BTreeSet::new(),
			num_pairs: 0,
			liquidity_usd_total: 0.0,
			volume_24h_total: 0.0,
			transactions_24h: TransactionCounts::default(),
			primary_record: None,
			skipped_records: 0,
			dex_scan: None,
		}
	}
}
