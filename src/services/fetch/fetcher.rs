//! Retrying fetcher.
//!
//! [`RetryingFetcher`] turns a single-attempt [`HttpTransport`] into the resilient fetch used by
//! every client:
//!
//! - each attempt is bounded by the configured timeout
//! - at most `retries + 1` attempts, waiting `backoff_base * (i + 1)` after failed attempt `i`
//! - a 429 carrying `Retry-After` waits at least that long
//! - 4xx other than 429 fails immediately
//! - after the last attempt the last observed error is returned

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Method, StatusCode};
use std::{collections::HashMap, sync::Arc, time::Duration};
use url::Url;

use crate::{
	models::FetchConfig,
	services::fetch::{
		parse_retry_after, FetchError, FetchRequest, HttpTransport, RawResponse, RequestAttempt,
		ResponseBody, RetryPolicy,
	},
};

/// Longest error body kept in logs and error messages
const MAX_LOGGED_BODY: usize = 512;

/// Fetch capability shared by every client.
#[async_trait]
pub trait Fetcher: Send + Sync {
	/// Performs `request` with timeout and retry handling.
	async fn fetch(&self, request: FetchRequest) -> Result<ResponseBody, FetchError>;

	/// Convenience wrapper building the request from its parts.
	async fn fetch_json(
		&self,
		url: &str,
		method: Method,
		headers: Option<HashMap<String, String>>,
		body: Option<String>,
	) -> Result<ResponseBody, FetchError> {
		let mut request = FetchRequest::new(method, url);
		if let Some(headers) = headers {
			request.headers = headers;
		}
		request.body = body;
		self.fetch(request).await
	}
}

/// Outcome of one attempt, after classification
#[derive(Debug)]
enum AttemptOutcome {
	Success(ResponseBody),
	/// Worth another attempt; carries the server's `Retry-After`, if any
	Retry(FetchError, Option<Duration>),
	Fail(FetchError),
}

/// Production [`Fetcher`].
#[derive(Clone)]
pub struct RetryingFetcher {
	transport: Arc<dyn HttpTransport>,
	policy: RetryPolicy,
}

impl RetryingFetcher {
	pub fn new(transport: Arc<dyn HttpTransport>, policy: RetryPolicy) -> Self {
		Self { transport, policy }
	}

	/// Fetcher with the timeout and retry settings of `config`.
	pub fn from_config(transport: Arc<dyn HttpTransport>, config: &FetchConfig) -> Self {
		Self::new(transport, RetryPolicy::from(config))
	}

	pub fn policy(&self) -> &RetryPolicy {
		&self.policy
	}

	async fn attempt(&self, request: &FetchRequest, attempt: RequestAttempt) -> AttemptOutcome {
		let metadata = attempt_metadata(request, attempt);

		match tokio::time::timeout(self.policy.attempt_timeout, self.transport.send(request)).await
		{
			Err(_) => AttemptOutcome::Retry(
				FetchError::timeout(
					format!(
						"Attempt exceeded {}ms for URL {}",
						self.policy.attempt_timeout.as_millis(),
						request.url
					),
					None,
					Some(metadata),
				),
				None,
			),
			Ok(Err(network_error)) => AttemptOutcome::Retry(
				FetchError::transient_http(
					None,
					format!("Network error for URL {}: {}", request.url, network_error),
					Some(Box::new(network_error)),
					Some(metadata),
				),
				None,
			),
			Ok(Ok(response)) => classify_response(request, response, metadata),
		}
	}
}

fn attempt_metadata(request: &FetchRequest, attempt: RequestAttempt) -> HashMap<String, String> {
	HashMap::from([
		("method".to_string(), request.method.to_string()),
		("attempt".to_string(), (attempt.index + 1).to_string()),
	])
}

fn truncate_body(body: &str) -> &str {
	match body.char_indices().nth(MAX_LOGGED_BODY) {
		Some((end, _)) => &body[..end],
		None => body,
	}
}

/// Maps an HTTP response to success, a retryable failure or a permanent failure.
fn classify_response(
	request: &FetchRequest,
	response: RawResponse,
	metadata: HashMap<String, String>,
) -> AttemptOutcome {
	let status = response.status;

	if status.is_success() {
		return AttemptOutcome::Success(ResponseBody::from_text(response.body));
	}

	let msg = format!(
		"HTTP error: status {} for URL {}: {}",
		status,
		request.url,
		truncate_body(&response.body)
	);

	if status == StatusCode::TOO_MANY_REQUESTS {
		let retry_after = response
			.retry_after()
			.and_then(|value| parse_retry_after(value, Utc::now()));
		return AttemptOutcome::Retry(
			FetchError::transient_http(Some(status), msg, None, Some(metadata)),
			retry_after,
		);
	}

	if status.is_client_error() {
		return AttemptOutcome::Fail(FetchError::permanent_http(
			Some(status),
			response.body,
			msg,
			None,
			Some(metadata),
		));
	}

	AttemptOutcome::Retry(
		FetchError::transient_http(Some(status), msg, None, Some(metadata)),
		None,
	)
}

#[async_trait]
impl Fetcher for RetryingFetcher {
	async fn fetch(&self, request: FetchRequest) -> Result<ResponseBody, FetchError> {
		if let Err(e) = Url::parse(&request.url) {
			let error = FetchError::permanent_http(
				None,
				"",
				format!("Invalid URL {}", request.url),
				Some(Box::new(e)),
				None,
			);
			error.log();
			return Err(error);
		}

		let mut attempt = RequestAttempt::first();
		loop {
			tracing::debug!(
				method = %request.method,
				url = %request.url,
				attempt = attempt.index + 1,
				max_attempts = self.policy.max_attempts(),
				delay_before_ms = attempt.delay_before.as_millis() as u64,
				"Sending request"
			);

			let (error, retry_after) = match self.attempt(&request, attempt).await {
				AttemptOutcome::Success(body) => {
					tracing::debug!(
						url = %request.url,
						attempt = attempt.index + 1,
						"Request succeeded"
					);
					return Ok(body);
				}
				AttemptOutcome::Fail(error) => {
					error.log();
					return Err(error);
				}
				AttemptOutcome::Retry(error, retry_after) => (error, retry_after),
			};

			if attempt.index >= self.policy.max_retries {
				error.log();
				return Err(error);
			}

			let delay = self.policy.delay_for(attempt.index, retry_after);
			tracing::warn!(
				url = %request.url,
				attempt = attempt.index + 1,
				status = error.status().map(|s| s.as_u16()),
				retry_after_ms = retry_after.map(|d| d.as_millis() as u64),
				delay_ms = delay.as_millis() as u64,
				error = %error,
				"Retrying request"
			);

			tokio::time::sleep(delay).await;
			attempt = attempt.next(delay);
		}
	}
}
