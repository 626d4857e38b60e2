//! Resilient fetch primitive.
//!
//! Every client performs HTTP through a shared [`Fetcher`], so timeout, retry, rate-limit and
//! error-classification rules are implemented once:
//!
//! - `backoff`: retry schedule and `Retry-After` parsing
//! - `error`: the three failure kinds surfaced to callers
//! - `fetcher`: the retry loop over a transport
//! - `request`: request, response body and attempt types
//! - `transport`: single-attempt HTTP over reqwest

mod backoff;
mod error;
mod fetcher;
mod request;
mod transport;

pub use backoff::{parse_retry_after, RetryPolicy};
pub use error::FetchError;
pub use fetcher::{Fetcher, RetryingFetcher};
pub use request::{FetchRequest, RequestAttempt, ResponseBody};
pub use transport::{HttpTransport, RawResponse, ReqwestTransport};

use std::sync::Arc;

use crate::models::FetchConfig;

/// Builds the production fetcher for `config` over a fresh reqwest transport.
pub fn create_fetcher(config: &FetchConfig) -> Result<Arc<dyn Fetcher>, anyhow::Error> {
	let transport = Arc::new(ReqwestTransport::new()?);
	Ok(Arc::new(RetryingFetcher::from_config(transport, config)))
}
