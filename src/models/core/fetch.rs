use serde::{Deserialize, Serialize};
use std::{collections::HashMap, time::Duration};

use crate::models::SecretValue;

pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;
pub const DEFAULT_RETRIES: u32 = 2;
pub const DEFAULT_BACKOFF_BASE_MS: u64 = 200;

fn default_timeout_ms() -> u64 {
	DEFAULT_TIMEOUT_MS
}

fn default_retries() -> u32 {
	DEFAULT_RETRIES
}

fn default_backoff_base_ms() -> u64 {
	DEFAULT_BACKOFF_BASE_MS
}

/// Per-client HTTP settings.
///
/// A client takes its `FetchConfig` by value at construction and never changes it afterwards.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct FetchConfig {
	/// Root URL that endpoint paths are appended to, without a trailing `/`
	pub base_url: String,

	/// Deadline for a single attempt, covering connect and full body read
	#[serde(default = "default_timeout_ms")]
	pub timeout_ms: u64,

	/// Retries after the first attempt; at most `retries + 1` attempts are made
	#[serde(default = "default_retries")]
	pub retries: u32,

	/// Linear backoff unit; the wait before attempt `i + 1` is `backoff_base_ms * (i + 1)`
	#[serde(default = "default_backoff_base_ms")]
	pub backoff_base_ms: u64,

	/// Static headers sent with every request
	#[serde(default)]
	pub headers: HashMap<String, String>,

	/// API key, for clients that authenticate
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub api_key: Option<SecretValue>,
}

impl FetchConfig {
	pub fn new(base_url: impl Into<String>) -> Self {
		Self {
			base_url: trim_base_url(base_url.into()),
			timeout_ms: DEFAULT_TIMEOUT_MS,
			retries: DEFAULT_RETRIES,
			backoff_base_ms: DEFAULT_BACKOFF_BASE_MS,
			headers: HashMap::new(),
			api_key: None,
		}
	}

	pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
		self.base_url = trim_base_url(base_url.into());
		self
	}

	pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
		self.timeout_ms = timeout_ms;
		self
	}

	pub fn with_retries(mut self, retries: u32) -> Self {
		self.retries = retries;
		self
	}

	pub fn with_backoff_base_ms(mut self, backoff_base_ms: u64) -> Self {
		self.backoff_base_ms = backoff_base_ms;
		self
	}

	pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.insert(name.into(), value.into());
		self
	}

	pub fn with_api_key(mut self, api_key: SecretValue) -> Self {
		self.api_key = Some(api_key);
		self
	}

	pub fn timeout(&self) -> Duration {
		Duration::from_millis(self.timeout_ms)
	}

	pub fn backoff_base(&self) -> Duration {
		Duration::from_millis(self.backoff_base_ms)
	}
}

pub(crate) fn trim_base_url(url: String) -> String {
	url.trim_end_matches('/').to_string()
}
