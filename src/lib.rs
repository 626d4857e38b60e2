//! Token market data indexer SDK.
//!
//! Fetches token and pair data from market-data APIs, block explorers and on-chain indexer
//! contracts, and folds pair listings into per-token summaries. It includes:
//!
//! - A fetch primitive with per-attempt timeouts, retries and `Retry-After` handling
//! - Pure aggregation of pair and pool records into a `TokenSummary`
//! - Typed clients for Dexscreener, GeckoTerminal, CoinMarketCap DexScan and others
//! - Read-only access to the ERC20, address and Uniswap V2 indexer contracts
//!
//! # Module Structure
//!
//! - `models`: Configuration, fetch settings and summary data structures
//! - `services`: Fetching, aggregation, API clients and on-chain access
//! - `utils`: Logging, parsing and test helpers

pub mod models;
pub mod services;
pub mod utils;
