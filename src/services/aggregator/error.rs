//! Errors raised while summarizing market records.

use crate::utils::logging::error::{ErrorContext, TraceableError};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AggregationError {
	/// The response does not contain a list of records
	#[error("Invalid aggregation input: {0}")]
	InvalidInput(ErrorContext),
}

impl AggregationError {
	pub fn invalid_input(
		msg: impl Into<String>,
		source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::InvalidInput(ErrorContext::new_with_log(msg, source, metadata))
	}
}

impl TraceableError for AggregationError {
	fn trace_id(&self) -> String {
		match self {
			Self::InvalidInput(ctx) => ctx.trace_id.clone(),
		}
	}
}
