use proptest::{option, prelude::*};
use serde_json::{json, Value};
use token_indexer_sdk::utils::tests::PairBuilder;

const MAX_PAIRS: usize = 12;

/// A liquidity value as the APIs send it: number, numeric string, garbage or null.
pub fn liquidity_value_strategy() -> impl Strategy<Value = Value> {
	prop_oneof![
		4 => (0.0f64..1.0e9).prop_map(|v| json!(v)),
		2 => (-1.0e6f64..0.0).prop_map(|v| json!(v)),
		2 => (0u32..1_000_000).prop_map(|v| json!(v.to_string())),
		1 => Just(json!("n/a")),
		1 => Just(Value::Null),
	]
}

pub fn count_value_strategy() -> impl Strategy<Value = Value> {
	prop_oneof![
		3 => (0u32..10_000).prop_map(|v| json!(v)),
		1 => (0u32..10_000).prop_map(|v| json!(v.to_string())),
		1 => Just(Value::Null),
	]
}

/// A Dexscreener-shaped pair with generated market numbers.
pub fn pair_strategy() -> impl Strategy<Value = Value> {
	(
		"0x[a-f0-9]{8}",
		option::of(prop::sample::select(vec!["ethereum", "base", "bsc", "solana"])),
		liquidity_value_strategy(),
		liquidity_value_strategy(),
		count_value_strategy(),
		count_value_strategy(),
	)
		.prop_map(|(pair_address, chain, liquidity, volume, buys, sells)| {
			let builder = PairBuilder::new()
				.pair_address(&pair_address)
				.liquidity(liquidity)
				.volume(volume)
				.txns(buys, sells);
			match chain {
				Some(chain) => builder.chain_id(chain),
				None => builder.no_chain_id(),
			}
			.build()
		})
}

pub fn pairs_strategy() -> impl Strategy<Value = Vec<Value>> {
	prop::collection::vec(pair_strategy(), 0..MAX_PAIRS)
}

/// Pair lists with non-object entries mixed in.
pub fn mixed_entries_strategy() -> impl Strategy<Value = Vec<Value>> {
	prop::collection::vec(
		prop_oneof![
			4 => pair_strategy(),
			1 => Just(Value::Null),
			1 => any::<i32>().prop_map(|v| json!(v)),
			1 => "[a-z]{0,6}".prop_map(Value::String),
		],
		0..MAX_PAIRS,
	)
}
