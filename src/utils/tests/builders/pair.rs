//! Builder for Dexscreener-shaped pair objects

use serde_json::{json, Map, Value};

/// Builds a pair object as returned in Dexscreener's `pairs[]`.
///
/// Numeric fields take a [`Value`] so tests can feed strings, nulls or garbage.
pub struct PairBuilder {
	chain_id: Option<String>,
	dex_id: String,
	pair_address: String,
	base: (String, String, String),
	quote: (String, String, String),
	price_usd: Option<Value>,
	liquidity_usd: Option<Value>,
	volume_h24: Option<Value>,
	buys: Option<Value>,
	sells: Option<Value>,
}

impl Default for PairBuilder {
	fn default() -> Self {
		Self {
			chain_id: Some("ethereum".to_string()),
			dex_id: "uniswap".to_string(),
			pair_address: "0xpair".to_string(),
			base: (
				"0xtoken".to_string(),
				"Test Token".to_string(),
				"TEST".to_string(),
			),
			quote: (
				"0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2".to_string(),
				"Wrapped Ether".to_string(),
				"WETH".to_string(),
			),
			price_usd: Some(json!("1.25")),
			liquidity_usd: Some(json!(1000.0)),
			volume_h24: Some(json!(500.0)),
			buys: Some(json!(10)),
			sells: Some(json!(5)),
		}
	}
}

impl PairBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn chain_id(mut self, chain_id: &str) -> Self {
		self.chain_id = Some(chain_id.to_string());
		self
	}

	pub fn no_chain_id(mut self) -> Self {
		self.chain_id = None;
		self
	}

	pub fn dex_id(mut self, dex_id: &str) -> Self {
		self.dex_id = dex_id.to_string();
		self
	}

	pub fn pair_address(mut self, address: &str) -> Self {
		self.pair_address = address.to_string();
		self
	}

	pub fn base_token(mut self, address: &str, name: &str, symbol: &str) -> Self {
		self.base = (address.to_string(), name.to_string(), symbol.to_string());
		self
	}

	pub fn quote_token(mut self, address: &str, name: &str, symbol: &str) -> Self {
		self.quote = (address.to_string(), name.to_string(), symbol.to_string());
		self
	}

	pub fn liquidity(mut self, usd: Value) -> Self {
		self.liquidity_usd = Some(usd);
		self
	}

	pub fn no_liquidity(mut self) -> Self {
		self.liquidity_usd = None;
		self
	}

	pub fn volume(mut self, h24: Value) -> Self {
		self.volume_h24 = Some(h24);
		self
	}

	pub fn txns(mut self, buys: Value, sells: Value) -> Self {
		self.buys = Some(buys);
		self.sells = Some(sells);
		self
	}

	pub fn price_usd(mut self, price: Value) -> Self {
		self.price_usd = Some(price);
		self
	}

	pub fn build(self) -> Value {
		let mut pair = Map::new();
		if let Some(chain_id) = self.chain_id {
			pair.insert("chainId".to_string(), json!(chain_id));
		}
		pair.insert("dexId".to_string(), json!(self.dex_id));
		pair.insert("pairAddress".to_string(), json!(self.pair_address));
		pair.insert(
			"baseToken".to_string(),
			json!({"address": self.base.0, "name": self.base.1, "symbol": self.base.2}),
		);
		pair.insert(
			"quoteToken".to_string(),
			json!({"address": self.quote.0, "name": self.quote.1, "symbol": self.quote.2}),
		);
		if let Some(price) = self.price_usd {
			pair.insert("priceUsd".to_string(), price);
		}
		if let Some(liquidity) = self.liquidity_usd {
			pair.insert("liquidity".to_string(), json!({ "usd": liquidity }));
		}
		if let Some(volume) = self.volume_h24 {
			pair.insert("volume".to_string(), json!({ "h24": volume }));
		}
		let mut h24 = Map::new();
		if let Some(buys) = self.buys {
			h24.insert("buys".to_string(), buys);
		}
		if let Some(sells) = self.sells {
			h24.insert("sells".to_string(), sells);
		}
		pair.insert("txns".to_string(), json!({ "h24": h24 }));
		Value::Object(pair)
	}
}
