//! Mock implementations for testing purposes.
//!
//! This module contains mocks of the traits at the crate's seams and helpers for
//! mockito servers:
//! - `fetch`: the fetcher and single-attempt transport
//! - `onchain`: the `eth_call` seam and JSON-RPC server responses
//!
//! The mocks are implemented using the `mockall` crate.

mod fetch;
mod onchain;
#[allow(unused_imports)]
pub use fetch::*;
#[allow(unused_imports)]
pub use onchain::*;
