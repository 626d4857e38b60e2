//! Core domain models: per-client fetch settings, the clients file and token summaries.

mod clients;
mod fetch;
mod market;

pub use clients::{ClientOverride, ClientsConfig, ModuleAddresses, OnChainNetworkConfig};
pub(crate) use fetch::trim_base_url;
pub use fetch::{FetchConfig, DEFAULT_BACKOFF_BASE_MS, DEFAULT_RETRIES, DEFAULT_TIMEOUT_MS};
pub use market::{
	DexScanDetails, PairOverview, PrimaryRecord, SecurityScan, TokenRef, TokenSummary,
	TransactionCounts, UNKNOWN_TOKEN_NAME, UNKNOWN_TOKEN_SYMBOL,
};
