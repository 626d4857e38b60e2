//! Client error types.
//!
//! Wraps fetch failures and adds the API-level problems a client can detect on its own:
//! malformed payloads, missing credentials, and statuses with a client-specific meaning.

use crate::{
	models::SecurityError,
	services::{aggregator::AggregationError, fetch::FetchError},
	utils::logging::error::{BoxedSource, ErrorContext, TraceableError},
};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
	/// The request itself failed
	#[error(transparent)]
	Fetch(#[from] FetchError),

	/// The API answered with a payload of the wrong shape or an error envelope
	#[error("Unexpected response: {0}")]
	UnexpectedResponse(ErrorContext),

	/// The client cannot be built, e.g. a required API key is missing
	#[error("Client configuration error: {0}")]
	Configuration(ErrorContext),

	/// The API has nothing for the requested resource
	#[error("Not found: {0}")]
	NotFound(ErrorContext),

	/// The API rejected the credentials
	#[error("Unauthorized: {0}")]
	Unauthorized(ErrorContext),

	/// A caller-supplied argument is unusable
	#[error("Invalid argument: {0}")]
	InvalidArgument(ErrorContext),
}

impl ClientError {
	pub fn unexpected_response(
		msg: impl Into<String>,
		source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::UnexpectedResponse(ErrorContext::new_with_log(msg, source, metadata))
	}

	pub fn configuration(
		msg: impl Into<String>,
		source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::Configuration(ErrorContext::new_with_log(msg, source, metadata))
	}

	pub fn not_found(
		msg: impl Into<String>,
		source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::NotFound(ErrorContext::new_with_log(msg, source, metadata))
	}

	pub fn unauthorized(
		msg: impl Into<String>,
		source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::Unauthorized(ErrorContext::new_with_log(msg, source, metadata))
	}

	pub fn invalid_argument(
		msg: impl Into<String>,
		source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::InvalidArgument(ErrorContext::new(msg, source, metadata))
	}
}

impl From<Box<SecurityError>> for ClientError {
	fn from(error: Box<SecurityError>) -> Self {
		let source: BoxedSource = error;
		Self::configuration("Failed to resolve API key", Some(source), None)
	}
}

impl From<AggregationError> for ClientError {
	fn from(error: AggregationError) -> Self {
		Self::unexpected_response("Response cannot be summarized", Some(Box::new(error)), None)
	}
}

impl TraceableError for ClientError {
	fn trace_id(&self) -> String {
		match self {
			Self::Fetch(err) => err.trace_id(),
			Self::UnexpectedResponse(ctx) => ctx.trace_id.clone(),
			Self::Configuration(ctx) => ctx.trace_id.clone(),
			Self::NotFound(ctx) => ctx.trace_id.clone(),
			Self::Unauthorized(ctx) => ctx.trace_id.clone(),
			Self::InvalidArgument(ctx) => ctx.trace_id.clone(),
		}
	}
}
