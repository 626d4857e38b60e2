//! Retry schedule and `Retry-After` parsing.

use chrono::{DateTime, Utc};
use std::time::Duration;

use crate::models::FetchConfig;

/// Timeout and backoff settings for one fetcher, derived from a [`FetchConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
	/// Retries after the first attempt
	pub max_retries: u32,
	/// Deadline per attempt
	pub attempt_timeout: Duration,
	/// Linear backoff unit
	pub backoff_base: Duration,
}

impl RetryPolicy {
	pub fn new(max_retries: u32, attempt_timeout: Duration, backoff_base: Duration) -> Self {
		Self {
			max_retries,
			attempt_timeout,
			backoff_base,
		}
	}

	/// Total number of attempts allowed
	pub fn max_attempts(&self) -> u32 {
		self.max_retries.saturating_add(1)
	}

	/// Linear wait after failed attempt `index` (0-based): `backoff_base * (index + 1)`.
	pub fn linear_delay(&self, index: u32) -> Duration {
		self.backoff_base.saturating_mul(index.saturating_add(1))
	}

	/// Wait after failed attempt `index`, honouring a server-provided `Retry-After`.
	///
	/// The server hint never shortens the linear schedule.
	pub fn delay_for(&self, index: u32, retry_after: Option<Duration>) -> Duration {
		let linear = self.linear_delay(index);
		match retry_after {
			Some(hint) => hint.max(linear),
			None => linear,
		}
	}
}

impl From<&FetchConfig> for RetryPolicy {
	fn from(config: &FetchConfig) -> Self {
		Self::new(config.retries, config.timeout(), config.backoff_base())
	}
}

/// Parses a `Retry-After` value given as delta-seconds or as an HTTP-date.
///
/// Dates in the past yield a zero wait. Anything else unparseable yields `None`, which
/// makes the caller fall back to the linear schedule.
pub fn parse_retry_after(value: &str, now: DateTime<Utc>) -> Option<Duration> {
	let value = value.trim();
	if value.is_empty() {
		return None;
	}

	if let Ok(seconds) = value.parse::<u64>() {
		return Some(Duration::from_secs(seconds));
	}

	let at = DateTime::parse_from_rfc2822(value).ok()?.with_timezone(&Utc);
	Some((at - now).to_std().unwrap_or(Duration::ZERO))
}
