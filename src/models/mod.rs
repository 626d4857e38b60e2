//! Domain models and data structures.
//!
//! - `config`: Loading and validation of the clients configuration file
//! - `core`: Fetch settings, client overrides, on-chain network entries and token summaries
//! - `security`: API key sources

mod config;
mod core;
mod security;

pub use config::{ConfigError, ConfigLoader, DEFAULT_CLIENTS_CONFIG_PATH};

pub use core::{
	ClientOverride, ClientsConfig, DexScanDetails, FetchConfig, ModuleAddresses,
	OnChainNetworkConfig, PairOverview, PrimaryRecord, SecurityScan, TokenRef, TokenSummary,
	TransactionCounts, DEFAULT_BACKOFF_BASE_MS, DEFAULT_RETRIES, DEFAULT_TIMEOUT_MS,
	UNKNOWN_TOKEN_NAME, UNKNOWN_TOKEN_SYMBOL,
};

pub use security::{SecretString, SecretValue, SecurityError, SecurityResult};
