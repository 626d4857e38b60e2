use proptest::{prelude::*, test_runner::Config};
use serde_json::{json, Value};

use token_indexer_sdk::{
	services::aggregator::{build_dexscreener_summary, numeric_value},
	utils::tests::PairBuilder,
};

use crate::properties::strategies::{mixed_entries_strategy, pairs_strategy};

const MAX_NEGATIVE: usize = 6;

fn liquidity_of(pair: &Value) -> f64 {
	pair.get("liquidity")
		.and_then(|l| l.get("usd"))
		.and_then(numeric_value)
		.filter(|v| v.is_finite() && *v > 0.0)
		.unwrap_or(0.0)
}

/// Liquidity as ranked for the primary record: missing figures count as zero, negative
/// figures stay negative.
fn rank_of(pair: &Value) -> f64 {
	pair.get("liquidity")
		.and_then(|l| l.get("usd"))
		.and_then(numeric_value)
		.unwrap_or(0.0)
}

fn close(a: f64, b: f64) -> bool {
	(a - b).abs() <= 1e-6 * a.abs().max(b.abs()).max(1.0)
}

proptest! {
	#![proptest_config(Config {
		failure_persistence: None,
		..Config::default()
	})]

	#[test]
	fn prop_liquidity_total_is_sum_of_positive_values(pairs in pairs_strategy()) {
		let expected: f64 = pairs.iter().map(liquidity_of).sum();
		let summary = build_dexscreener_summary("0xtoken", &Value::Array(pairs)).unwrap();

		prop_assert!(close(summary.liquidity_usd_total, expected));
	}

	#[test]
	fn prop_totals_are_non_negative(pairs in pairs_strategy()) {
		let summary = build_dexscreener_summary("0xtoken", &Value::Array(pairs)).unwrap();

		prop_assert!(summary.liquidity_usd_total >= 0.0);
		prop_assert!(summary.volume_24h_total >= 0.0);
		prop_assert!(summary.liquidity_usd_total.is_finite());
	}

	#[test]
	fn prop_num_pairs_counts_objects_only(entries in mixed_entries_strategy()) {
		let objects = entries.iter().filter(|e| e.is_object()).count();
		let summary = build_dexscreener_summary("0xtoken", &Value::Array(entries.clone())).unwrap();

		prop_assert_eq!(summary.num_pairs, objects);
		prop_assert_eq!(summary.skipped_records, entries.len() - objects);
	}

	#[test]
	fn prop_primary_record_is_first_most_liquid(pairs in pairs_strategy()) {
		let summary = build_dexscreener_summary("0xtoken", &Value::Array(pairs.clone())).unwrap();

		match pairs.first() {
			None => prop_assert!(summary.primary_record.is_none()),
			Some(_) => {
				let top = pairs.iter().map(liquidity_of).fold(0.0, f64::max);
				let index = pairs
					.iter()
					.position(|p| liquidity_of(p) == top)
					.unwrap();
				let primary = summary.primary_record.unwrap();
				prop_assert_eq!(
					primary.pair_address.as_deref(),
					pairs[index]["pairAddress"].as_str()
				);
			}
		}
	}

	#[test]
	fn prop_negative_liquidity_never_beats_missing(
		negatives in prop::collection::vec(-1.0e6f64..-0.01, 1..MAX_NEGATIVE),
		slot in 0usize..MAX_NEGATIVE,
	) {
		let mut pairs: Vec<Value> = negatives
			.iter()
			.enumerate()
			.map(|(i, usd)| {
				PairBuilder::new()
					.pair_address(&format!("0xneg{}", i))
					.liquidity(json!(usd))
					.build()
			})
			.collect();
		let slot = slot.min(pairs.len());
		pairs.insert(slot, PairBuilder::new().pair_address("0xmissing").no_liquidity().build());

		let summary = build_dexscreener_summary("0xtoken", &Value::Array(pairs)).unwrap();

		prop_assert_eq!(summary.liquidity_usd_total, 0.0);
		prop_assert_eq!(
			summary.primary_record.as_ref().unwrap().pair_address.as_deref(),
			Some("0xmissing")
		);
	}

	#[test]
	fn prop_transaction_total_matches_sides(pairs in pairs_strategy()) {
		let summary = build_dexscreener_summary("0xtoken", &Value::Array(pairs)).unwrap();
		let counts = summary.transactions_24h;

		prop_assert_eq!(counts.total, counts.buys + counts.sells);
	}

	#[test]
	fn prop_summary_is_order_independent_for_totals(pairs in pairs_strategy()) {
		let forward = build_dexscreener_summary("0xtoken", &Value::Array(pairs.clone())).unwrap();
		let reversed: Vec<Value> = pairs.into_iter().rev().collect();
		let backward = build_dexscreener_summary("0xtoken", &Value::Array(reversed)).unwrap();

		prop_assert!(close(forward.liquidity_usd_total, backward.liquidity_usd_total));
		prop_assert_eq!(forward.num_pairs, backward.num_pairs);
		prop_assert_eq!(forward.chains, backward.chains);
		prop_assert_eq!(forward.transactions_24h, backward.transactions_24h);
	}
}

