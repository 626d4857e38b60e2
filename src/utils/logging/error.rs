//! Error context shared by every error type in the crate.
//!
//! [`ErrorContext`] carries a message, an optional boxed source, sorted key/value metadata,
//! an RFC 3339 timestamp and a trace id. Wrapping an error that already carries a trace id
//! keeps that id, so one failed request can be followed across the fetch, client and CLI
//! layers in the logs.

use chrono::Utc;
use std::{collections::HashMap, fmt};
use uuid::Uuid;

/// Boxed error accepted as the source of an [`ErrorContext`]
pub type BoxedSource = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Message, source and metadata attached to an error, plus a trace id.
#[derive(Debug)]
pub struct ErrorContext {
	/// The error message
	pub message: String,
	/// The error that caused this one, if any
	pub source: Option<BoxedSource>,
	/// Additional key/value pairs rendered after the message
	pub metadata: Option<HashMap<String, String>>,
	/// Creation time in RFC 3339 format
	pub timestamp: String,
	/// Trace id inherited from the source chain, or a fresh UUID v4
	pub trace_id: String,
}

impl ErrorContext {
	/// Creates a new error context without logging it.
	pub fn new(
		message: impl Into<String>,
		source: Option<BoxedSource>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		let trace_id = match source.as_ref() {
			Some(src) => TraceableError::trace_id(src.as_ref()),
			None => Uuid::new_v4().to_string(),
		};

		Self {
			message: message.into(),
			source,
			metadata,
			timestamp: Utc::now().to_rfc3339(),
			trace_id,
		}
	}

	/// Creates a new error context and emits it as an `error` event.
	pub fn new_with_log(
		message: impl Into<String>,
		source: Option<BoxedSource>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		let context = Self::new(message, source, metadata);
		context.log();
		context
	}

	/// Adds one metadata entry, creating the map on first use.
	pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.metadata
			.get_or_insert_with(HashMap::new)
			.insert(key.into(), value.into());
		self
	}

	/// Renders `"message [k1=v1, k2=v2]"` with keys in alphabetical order.
	pub fn format_with_metadata(&self) -> String {
		let Some(metadata) = self.metadata.as_ref().filter(|m| !m.is_empty()) else {
			return self.message.clone();
		};

		let mut pairs: Vec<_> = metadata.iter().collect();
		pairs.sort_by(|a, b| a.0.cmp(b.0));
		let rendered: Vec<String> = pairs.iter().map(|(k, v)| format!("{}={}", k, v)).collect();

		format!("{} [{}]", self.message, rendered.join(", "))
	}

	/// Emits this context as a structured `error` event.
	pub fn log(&self) {
		match &self.source {
			Some(source) => tracing::error!(
				message = self.format_with_metadata(),
				trace_id = %self.trace_id,
				timestamp = %self.timestamp,
				error.chain = %format_error_chain(source.as_ref()),
				"Error occurred"
			),
			None => tracing::error!(
				message = self.format_with_metadata(),
				trace_id = %self.trace_id,
				timestamp = %self.timestamp,
				"Error occurred"
			),
		}
	}
}

impl fmt::Display for ErrorContext {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.format_with_metadata())
	}
}

impl std::error::Error for ErrorContext {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		self.source
			.as_ref()
			.map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
	}
}

/// Errors that expose the trace id of their [`ErrorContext`]
pub trait TraceableError: std::error::Error + Send + Sync {
	/// Returns the trace id for this error
	fn trace_id(&self) -> String;
}

impl TraceableError for dyn std::error::Error + Send + Sync + 'static {
	fn trace_id(&self) -> String {
		const MAX_DEPTH: usize = 3;

		if let Some(id) = extract_trace_id(self) {
			return id;
		}

		let mut source = self.source();
		let mut depth = 0;
		while let Some(err) = source {
			depth += 1;
			if depth > MAX_DEPTH {
				break;
			}
			if let Some(id) = extract_trace_id(err) {
				return id;
			}
			source = err.source();
		}

		Uuid::new_v4().to_string()
	}
}

fn extract_trace_id(err: &(dyn std::error::Error + 'static)) -> Option<String> {
	if let Some(ctx) = err.downcast_ref::<ErrorContext>() {
		return Some(ctx.trace_id.clone());
	}

	macro_rules! try_downcast {
		($($ty:path),*) => {
			$(
				if let Some(e) = err.downcast_ref::<$ty>() {
					return Some(e.trace_id());
				}
			)*
		}
	}

	try_downcast!(
		crate::services::fetch::FetchError,
		crate::services::clients::ClientError,
		crate::services::aggregator::AggregationError,
		crate::services::onchain::OnChainError,
		crate::models::ConfigError,
		crate::models::SecurityError
	);

	None
}

/// Strips HTML documents that some APIs return as error bodies
fn sanitize_error_message(message: &str) -> String {
	let lower = message.to_ascii_lowercase();
	if lower.contains("<html") || lower.contains("<head") || lower.contains("<body") {
		if let Some(pos) = message.find('<') {
			return message[..pos].trim().to_string();
		}
	}
	message.to_string()
}

fn format_error_chain(err: &dyn std::error::Error) -> String {
	let mut result = sanitize_error_message(&err.to_string());
	let mut source = err.source();

	while let Some(err) = source {
		result.push_str("\n\tCaused by: ");
		result.push_str(&sanitize_error_message(&err.to_string()));
		source = err.source();
	}

	result
}
