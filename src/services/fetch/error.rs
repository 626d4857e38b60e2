//! Error type surfaced by the fetch primitive.
//!
//! Every failed request ends up in exactly one of three kinds, which decides whether the
//! retry loop tries again.

use crate::utils::logging::error::{ErrorContext, TraceableError};
use reqwest::StatusCode;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
	/// An attempt did not finish within the configured timeout
	#[error("Request timed out: {0}")]
	Timeout(ErrorContext),

	/// 5xx, 429, a network failure or another non-success status; retried
	#[error("Transient HTTP error: {context}")]
	TransientHttp {
		status: Option<StatusCode>,
		context: ErrorContext,
	},

	/// 4xx other than 429, or a request that could not be built; never retried
	#[error("Permanent HTTP error: {context}")]
	PermanentHttp {
		status: Option<StatusCode>,
		body: String,
		context: ErrorContext,
	},
}

impl FetchError {
	pub fn timeout(
		msg: impl Into<String>,
		source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::Timeout(ErrorContext::new(msg, source, metadata))
	}

	pub fn transient_http(
		status: Option<StatusCode>,
		msg: impl Into<String>,
		source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::TransientHttp {
			status,
			context: ErrorContext::new(msg, source, metadata),
		}
	}

	pub fn permanent_http(
		status: Option<StatusCode>,
		body: impl Into<String>,
		msg: impl Into<String>,
		source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::PermanentHttp {
			status,
			body: body.into(),
			context: ErrorContext::new(msg, source, metadata),
		}
	}

	/// HTTP status of the failed response, if one was received
	pub fn status(&self) -> Option<StatusCode> {
		match self {
			Self::Timeout(_) => None,
			Self::TransientHttp { status, .. } => *status,
			Self::PermanentHttp { status, .. } => *status,
		}
	}

	/// Whether another attempt may succeed
	pub fn is_retryable(&self) -> bool {
		!matches!(self, Self::PermanentHttp { .. })
	}

	pub fn context(&self) -> &ErrorContext {
		match self {
			Self::Timeout(ctx) => ctx,
			Self::TransientHttp { context, .. } => context,
			Self::PermanentHttp { context, .. } => context,
		}
	}

	/// Emits the error once it is surfaced to the caller.
	pub(crate) fn log(&self) {
		self.context().log();
	}
}

impl TraceableError for FetchError {
	fn trace_id(&self) -> String {
		self.context().trace_id.clone()
	}
}
