//! Folding market records into a [`TokenSummary`].

use serde_json::Value;
use std::collections::HashMap;

use crate::{
	models::{PrimaryRecord, TokenRef, TokenSummary, UNKNOWN_TOKEN_NAME, UNKNOWN_TOKEN_SYMBOL},
	services::aggregator::{AggregationError, JsonRecord, MarketRecord, RecordSchema},
};

/// Amount a value adds to a USD total; missing, negative and non-finite values add nothing.
fn contribution(value: Option<f64>) -> f64 {
	match value {
		Some(v) if v.is_finite() && v > 0.0 => v,
		_ => 0.0,
	}
}

fn non_empty(value: Option<&str>) -> Option<&str> {
	value.map(str::trim).filter(|v| !v.is_empty())
}

fn same_address(candidate: Option<&str>, token: &str) -> bool {
	candidate
		.map(|c| c.trim().eq_ignore_ascii_case(token))
		.unwrap_or(false)
}

/// Name and symbol, filled from the first record that supplies each.
#[derive(Default)]
struct Identity {
	name: Option<String>,
	symbol: Option<String>,
}

impl Identity {
	fn fill(&mut self, name: Option<&str>, symbol: Option<&str>) {
		if self.name.is_none() {
			self.name = non_empty(name).map(str::to_string);
		}
		if self.symbol.is_none() {
			self.symbol = non_empty(symbol).map(str::to_string);
		}
	}
}

fn primary_record<R: MarketRecord>(record: &R) -> PrimaryRecord {
	let owned = |v: Option<&str>| v.map(str::to_string);
	PrimaryRecord {
		pair_address: owned(record.pair_address()),
		dex_id: owned(record.dex_id()),
		chain_id: owned(record.chain_id()),
		base_token: TokenRef {
			address: owned(record.base_address()),
			name: owned(record.base_name()),
			symbol: owned(record.base_symbol()),
		},
		quote_token: TokenRef {
			address: owned(record.quote_address()),
			name: owned(record.quote_name()),
			symbol: owned(record.quote_symbol()),
		},
		price_usd: record.price_usd(),
		liquidity_usd: record.liquidity_usd(),
		volume_24h: record.volume_24h(),
		fdv: record.fdv(),
		market_cap: record.market_cap(),
	}
}

/// Summarizes every record reported for `token_address`.
///
/// The token's name and symbol come from records whose base token is the queried address
/// (compared case-insensitively); records that only quote it are used when no base-side
/// match exists. The primary record is the one with the highest reported liquidity, a
/// missing figure ranking as zero and the earliest record winning ties. Negative figures
/// rank as reported even though they add nothing to the total.
pub fn build_summary<R: MarketRecord>(token_address: &str, records: &[R]) -> TokenSummary {
	let mut summary = TokenSummary::empty(token_address);
	let wanted = token_address.trim();

	let mut base_identity = Identity::default();
	let mut quote_identity = Identity::default();
	let mut best: Option<(usize, f64)> = None;

	for (index, record) in records.iter().enumerate() {
		if same_address(record.base_address(), wanted) {
			base_identity.fill(record.base_name(), record.base_symbol());
		} else if same_address(record.quote_address(), wanted) {
			quote_identity.fill(record.quote_name(), record.quote_symbol());
		}

		if let Some(chain) = non_empty(record.chain_id()) {
			summary.chains.insert(chain.to_string());
		}

		summary.liquidity_usd_total += contribution(record.liquidity_usd());
		summary.volume_24h_total += contribution(record.volume_24h());

		let counts = &mut summary.transactions_24h;
		let buys = record.buys_24h().unwrap_or(0);
		let sells = record.sells_24h().unwrap_or(0);
		counts.buys = counts.buys.saturating_add(buys);
		counts.sells = counts.sells.saturating_add(sells);
		counts.total = counts
			.total
			.saturating_add(record.transactions_24h().unwrap_or(0));

		let rank = record
			.liquidity_usd()
			.filter(|v| v.is_finite())
			.unwrap_or(0.0);
		match best {
			Some((_, top)) if rank <= top => {}
			_ => best = Some((index, rank)),
		}
	}

	summary.num_pairs = records.len();
	summary.primary_record = best.map(|(index, _)| primary_record(&records[index]));
	summary.token_name = base_identity
		.name
		.or(quote_identity.name)
		.unwrap_or_else(|| UNKNOWN_TOKEN_NAME.to_string());
	summary.token_symbol = base_identity
		.symbol
		.or(quote_identity.symbol)
		.unwrap_or_else(|| UNKNOWN_TOKEN_SYMBOL.to_string());
	summary
}

fn json_kind(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "bool",
		Value::Number(_) => "number",
		Value::String(_) => "string",
		Value::Array(_) => "array",
		Value::Object(_) => "object",
	}
}

/// Collects the object entries of `records`, counting the rest as skipped.
pub(crate) fn object_entries<'a>(
	records: &'a Value,
	context: &str,
) -> Result<(Vec<&'a Value>, usize), AggregationError> {
	let entries = records.as_array().ok_or_else(|| {
		AggregationError::invalid_input(
			format!("{} must be an array of records", context),
			None,
			Some(HashMap::from([(
				"found".to_string(),
				json_kind(records).to_string(),
			)])),
		)
	})?;

	let mut objects = Vec::with_capacity(entries.len());
	let mut skipped = 0;
	for (index, entry) in entries.iter().enumerate() {
		if entry.is_object() {
			objects.push(entry);
		} else {
			skipped += 1;
			tracing::warn!(
				index,
				kind = json_kind(entry),
				"Skipping {} entry that is not an object",
				context
			);
		}
	}
	Ok((objects, skipped))
}

/// Summarizes a JSON array of records read through `schema`.
///
/// Fails only when `records` is not an array. Entries that are not objects are skipped and
/// counted in `skipped_records`; they do not count towards `num_pairs`.
pub fn build_summary_from_json(
	token_address: &str,
	schema: &RecordSchema,
	records: &Value,
) -> Result<TokenSummary, AggregationError> {
	let (objects, skipped) = object_entries(records, "records")?;
	let views: Vec<JsonRecord<'_>> = objects
		.into_iter()
		.map(|value| JsonRecord::new(value, schema))
		.collect();

	let mut summary = build_summary(token_address, &views);
	summary.skipped_records = skipped;
	Ok(summary)
}
