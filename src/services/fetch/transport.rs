//! Single-attempt HTTP transport.
//!
//! A transport performs exactly one request and reports what came back. Timeouts, retries
//! and status classification live in the fetcher, so a test can swap in a scripted
//! transport and drive the retry loop without a network.

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{header::HeaderMap, StatusCode};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use std::time::Duration;

use crate::services::fetch::FetchRequest;

/// What the server sent back for one attempt, whatever the status.
#[derive(Debug, Clone)]
pub struct RawResponse {
	pub status: StatusCode,
	pub headers: HeaderMap,
	pub body: String,
}

impl RawResponse {
	pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
		Self {
			status,
			headers: HeaderMap::new(),
			body: body.into(),
		}
	}

	/// `Retry-After` header value, if present and readable
	pub fn retry_after(&self) -> Option<&str> {
		self.headers
			.get(reqwest::header::RETRY_AFTER)
			.and_then(|v| v.to_str().ok())
	}
}

/// Sends one request.
///
/// Errors are connection-level failures only; any HTTP status is returned as `Ok`.
#[async_trait]
pub trait HttpTransport: Send + Sync {
	async fn send(&self, request: &FetchRequest) -> Result<RawResponse, reqwest_middleware::Error>;
}

/// [`HttpTransport`] backed by a pooled reqwest client.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
	client: ClientWithMiddleware,
}

impl ReqwestTransport {
	/// Builds a transport with connection pooling and a connect timeout.
	///
	/// No overall request timeout is set here; the fetcher bounds each attempt.
	pub fn new() -> Result<Self, anyhow::Error> {
		let base_client = reqwest::ClientBuilder::new()
			.pool_idle_timeout(Duration::from_secs(90))
			.pool_max_idle_per_host(32)
			.connect_timeout(Duration::from_secs(20))
			.build()
			.context("Failed to create base HTTP client")?;

		Ok(Self::with_client(ClientBuilder::new(base_client).build()))
	}

	/// Uses a caller-built client, e.g. one with extra middleware.
	pub fn with_client(client: ClientWithMiddleware) -> Self {
		Self { client }
	}
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
	async fn send(&self, request: &FetchRequest) -> Result<RawResponse, reqwest_middleware::Error> {
		let mut builder = self
			.client
			.request(request.method.clone(), request.url.as_str());
		for (name, value) in &request.headers {
			builder = builder.header(name.as_str(), value.as_str());
		}
		if let Some(body) = &request.body {
			builder = builder.body(body.clone());
		}

		let response = builder.send().await?;
		let status = response.status();
		let headers = response.headers().clone();
		let body = response.text().await?;

		Ok(RawResponse {
			status,
			headers,
			body,
		})
	}
}
