use async_trait::async_trait;
use mockall::mock;
use std::sync::Arc;

use token_indexer_sdk::{
	models::FetchConfig,
	services::fetch::{
		FetchError, FetchRequest, Fetcher, HttpTransport, RawResponse, ReqwestTransport,
		ResponseBody, RetryingFetcher,
	},
};

mock! {
	pub Fetcher {}

	#[async_trait]
	impl Fetcher for Fetcher {
		async fn fetch(&self, request: FetchRequest) -> Result<ResponseBody, FetchError>;
	}
}

mock! {
	pub HttpTransport {}

	#[async_trait]
	impl HttpTransport for HttpTransport {
		async fn send(&self, request: &FetchRequest) -> Result<RawResponse, reqwest_middleware::Error>;
	}
}

/// Fetch settings for a mock server: short timeout, no backoff wait.
pub fn test_fetch_config(base_url: &str, retries: u32) -> FetchConfig {
	FetchConfig::new(base_url)
		.with_retries(retries)
		.with_timeout_ms(2_000)
		.with_backoff_base_ms(1)
}

/// A real reqwest-backed fetcher for `config`.
pub fn reqwest_fetcher(config: &FetchConfig) -> Arc<dyn Fetcher> {
	let transport = Arc::new(ReqwestTransport::new().expect("reqwest transport"));
	Arc::new(RetryingFetcher::from_config(transport, config))
}
