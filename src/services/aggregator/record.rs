//! Source-independent access to pair/pool records.
//!
//! Third-party responses are loosely typed: fields go missing, numbers arrive as strings and
//! nulls appear anywhere. [`MarketRecord`] exposes every field as an `Option`, and
//! [`JsonRecord`] implements it over raw JSON with a per-source [`RecordSchema`], so a missing
//! or malformed field reads as `None` instead of failing the whole summary.

use serde_json::Value;

/// Read access to one trading venue's market data for a token.
pub trait MarketRecord {
	fn pair_address(&self) -> Option<&str>;
	fn chain_id(&self) -> Option<&str>;
	fn base_address(&self) -> Option<&str>;
	fn base_name(&self) -> Option<&str>;
	fn base_symbol(&self) -> Option<&str>;
	fn quote_address(&self) -> Option<&str>;
	fn quote_name(&self) -> Option<&str>;
	fn quote_symbol(&self) -> Option<&str>;
	/// Pooled liquidity in USD
	fn liquidity_usd(&self) -> Option<f64>;
	/// Traded volume over 24h in USD
	fn volume_24h(&self) -> Option<f64>;
	fn buys_24h(&self) -> Option<u64>;
	fn sells_24h(&self) -> Option<u64>;

	fn dex_id(&self) -> Option<&str> {
		None
	}

	/// Trade count over 24h; defaults to buys + sells when either is known
	fn transactions_24h(&self) -> Option<u64> {
		match (self.buys_24h(), self.sells_24h()) {
			(None, None) => None,
			(buys, sells) => Some(buys.unwrap_or(0).saturating_add(sells.unwrap_or(0))),
		}
	}

	fn price_usd(&self) -> Option<f64> {
		None
	}

	fn fdv(&self) -> Option<f64> {
		None
	}

	fn market_cap(&self) -> Option<f64> {
		None
	}
}

/// Reads a finite number from a JSON number or numeric string.
pub fn numeric_value(value: &Value) -> Option<f64> {
	let number = match value {
		Value::Number(n) => n.as_f64(),
		Value::String(s) => s.trim().parse::<f64>().ok(),
		_ => None,
	}?;
	number.is_finite().then_some(number)
}

/// Reads a non-negative count, truncating fractions.
pub fn count_value(value: &Value) -> Option<u64> {
	match value {
		Value::Number(n) if n.as_u64().is_some() => n.as_u64(),
		_ => numeric_value(value)
			.filter(|n| *n >= 0.0)
			.map(|n| n.trunc() as u64),
	}
}

/// JSON-pointer paths to each [`MarketRecord`] field for one API's record shape.
///
/// `None` means the source never reports the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordSchema {
	pub pair_address: Option<&'static str>,
	pub dex_id: Option<&'static str>,
	pub chain_id: Option<&'static str>,
	pub base_address: Option<&'static str>,
	pub base_name: Option<&'static str>,
	pub base_symbol: Option<&'static str>,
	pub quote_address: Option<&'static str>,
	pub quote_name: Option<&'static str>,
	pub quote_symbol: Option<&'static str>,
	pub liquidity_usd: Option<&'static str>,
	pub volume_24h: Option<&'static str>,
	pub buys_24h: Option<&'static str>,
	pub sells_24h: Option<&'static str>,
	pub transactions_24h: Option<&'static str>,
	pub price_usd: Option<&'static str>,
	pub fdv: Option<&'static str>,
	pub market_cap: Option<&'static str>,
}

impl RecordSchema {
	/// Dexscreener `pairs[]` entries
	pub const DEXSCREENER: RecordSchema = RecordSchema {
		pair_address: Some("/pairAddress"),
		dex_id: Some("/dexId"),
		chain_id: Some("/chainId"),
		base_address: Some("/baseToken/address"),
		base_name: Some("/baseToken/name"),
		base_symbol: Some("/baseToken/symbol"),
		quote_address: Some("/quoteToken/address"),
		quote_name: Some("/quoteToken/name"),
		quote_symbol: Some("/quoteToken/symbol"),
		liquidity_usd: Some("/liquidity/usd"),
		volume_24h: Some("/volume/h24"),
		buys_24h: Some("/txns/h24/buys"),
		sells_24h: Some("/txns/h24/sells"),
		transactions_24h: None,
		price_usd: Some("/priceUsd"),
		fdv: Some("/fdv"),
		market_cap: Some("/marketCap"),
	};

	/// GeckoTerminal `included[]` entries of type `pool`; the chain comes from the queried network
	pub const GECKOTERMINAL_POOL: RecordSchema = RecordSchema {
		pair_address: Some("/attributes/address"),
		dex_id: Some("/relationships/dex/data/id"),
		chain_id: None,
		base_address: Some("/attributes/base_token/address"),
		base_name: Some("/attributes/base_token/name"),
		base_symbol: Some("/attributes/base_token/symbol"),
		quote_address: Some("/attributes/quote_token/address"),
		quote_name: Some("/attributes/quote_token/name"),
		quote_symbol: Some("/attributes/quote_token/symbol"),
		liquidity_usd: Some("/attributes/reserve_in_usd"),
		volume_24h: Some("/attributes/volume_usd/h24"),
		buys_24h: Some("/attributes/transactions/h24/buys"),
		sells_24h: Some("/attributes/transactions/h24/sells"),
		transactions_24h: None,
		price_usd: Some("/attributes/base_token_price_usd"),
		fdv: Some("/attributes/fdv_usd"),
		market_cap: Some("/attributes/market_cap_usd"),
	};
}

/// [`MarketRecord`] over a borrowed JSON object.
#[derive(Debug, Clone, Copy)]
pub struct JsonRecord<'a> {
	value: &'a Value,
	schema: &'a RecordSchema,
	default_chain: Option<&'a str>,
}

impl<'a> JsonRecord<'a> {
	pub fn new(value: &'a Value, schema: &'a RecordSchema) -> Self {
		Self {
			value,
			schema,
			default_chain: None,
		}
	}

	/// Chain reported when the record itself has none
	pub fn with_default_chain(mut self, chain: &'a str) -> Self {
		self.default_chain = Some(chain);
		self
	}

	fn field(&self, path: Option<&'static str>) -> Option<&'a Value> {
		path.and_then(|p| self.value.pointer(p))
			.filter(|v| !v.is_null())
	}

	fn text(&self, path: Option<&'static str>) -> Option<&'a str> {
		self.field(path).and_then(Value::as_str)
	}

	fn number(&self, path: Option<&'static str>) -> Option<f64> {
		self.field(path).and_then(numeric_value)
	}

	fn count(&self, path: Option<&'static str>) -> Option<u64> {
		self.field(path).and_then(count_value)
	}
}

impl MarketRecord for JsonRecord<'_> {
	fn pair_address(&self) -> Option<&str> {
		self.text(self.schema.pair_address)
	}

	fn chain_id(&self) -> Option<&str> {
		self.text(self.schema.chain_id).or(self.default_chain)
	}

	fn base_address(&self) -> Option<&str> {
		self.text(self.schema.base_address)
	}

	fn base_name(&self) -> Option<&str> {
		self.text(self.schema.base_name)
	}

	fn base_symbol(&self) -> Option<&str> {
		self.text(self.schema.base_symbol)
	}

	fn quote_address(&self) -> Option<&str> {
		self.text(self.schema.quote_address)
	}

	fn quote_name(&self) -> Option<&str> {
		self.text(self.schema.quote_name)
	}

	fn quote_symbol(&self) -> Option<&str> {
		self.text(self.schema.quote_symbol)
	}

	fn liquidity_usd(&self) -> Option<f64> {
		self.number(self.schema.liquidity_usd)
	}

	fn volume_24h(&self) -> Option<f64> {
		self.number(self.schema.volume_24h)
	}

	fn buys_24h(&self) -> Option<u64> {
		self.count(self.schema.buys_24h)
	}

	fn sells_24h(&self) -> Option<u64> {
		self.count(self.schema.sells_24h)
	}

	fn dex_id(&self) -> Option<&str> {
		self.text(self.schema.dex_id)
	}

	fn transactions_24h(&self) -> Option<u64> {
		match self.count(self.schema.transactions_24h) {
			Some(total) => Some(total),
			None => match (self.buys_24h(), self.sells_24h()) {
				(None, None) => None,
				(buys, sells) => Some(buys.unwrap_or(0).saturating_add(sells.unwrap_or(0))),
			},
		}
	}

	fn price_usd(&self) -> Option<f64> {
		self.number(self.schema.price_usd)
	}

	fn fdv(&self) -> Option<f64> {
		self.number(self.schema.fdv)
	}

	fn market_cap(&self) -> Option<f64> {
		self.number(self.schema.market_cap)
	}
}
