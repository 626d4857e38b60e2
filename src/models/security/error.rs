//! Errors raised while resolving API keys and other secrets.

use crate::utils::logging::error::{ErrorContext, TraceableError};
use std::collections::HashMap;
use thiserror::Error as ThisError;

/// Result type alias for secret resolution
pub type SecurityResult<T> = Result<T, Box<SecurityError>>;

#[derive(ThisError, Debug)]
pub enum SecurityError {
	/// A secret resolved to an unusable value (e.g. blank)
	#[error("Validation error: {0}")]
	ValidationError(ErrorContext),

	/// A secret could not be read from its source
	#[error("Parse error: {0}")]
	ParseError(ErrorContext),
}

impl SecurityError {
	pub fn validation_error(
		msg: impl Into<String>,
		source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::ValidationError(ErrorContext::new_with_log(msg, source, metadata))
	}

	pub fn parse_error(
		msg: impl Into<String>,
		source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::ParseError(ErrorContext::new_with_log(msg, source, metadata))
	}
}

impl TraceableError for SecurityError {
	fn trace_id(&self) -> String {
		match self {
			Self::ValidationError(ctx) => ctx.trace_id.clone(),
			Self::ParseError(ctx) => ctx.trace_id.clone(),
		}
	}
}
