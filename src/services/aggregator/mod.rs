//! Token market summaries.
//!
//! Pair and pool records from any market-data source are read through [`MarketRecord`] and
//! folded by [`build_summary`] into a [`crate::models::TokenSummary`]: totals, distinct
//! chains, the resolved token identity and the highest-liquidity primary record. Everything
//! here is pure and works on already-fetched JSON.

mod error;
mod record;
mod sources;
mod summary;

pub use error::AggregationError;
pub use record::{count_value, numeric_value, JsonRecord, MarketRecord, RecordSchema};
pub use sources::{
	build_cmc_dexscan_summary, build_dexscreener_summary, build_geckoterminal_summary,
	CmcPairRecord, CMC_USD_CONVERT_ID,
};
pub use summary::{build_summary, build_summary_from_json};
