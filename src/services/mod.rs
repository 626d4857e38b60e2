//! Core services.
//!
//! - `fetch`: resilient HTTP fetch with timeout, retry and error classification
//! - `aggregator`: token market summaries built from pair and pool records
//! - `clients`: market-data and explorer API clients
//! - `onchain`: read-only indexer contract calls over JSON-RPC

pub mod aggregator;
pub mod clients;
pub mod fetch;
pub mod onchain;
