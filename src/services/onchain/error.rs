//! On-chain error types.

use crate::{
	services::fetch::FetchError,
	utils::logging::error::{ErrorContext, TraceableError},
};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OnChainError {
	/// The RPC request itself failed
	#[error(transparent)]
	Fetch(#[from] FetchError),

	/// The node answered with a JSON-RPC error or a malformed envelope
	#[error("RPC error: {0}")]
	Rpc(ErrorContext),

	/// Call data or return data could not be ABI encoded or decoded
	#[error("ABI decode error: {0}")]
	Decode(ErrorContext),

	/// No indexer deployment is configured for the chain
	#[error("Unsupported chain: {0}")]
	UnsupportedChain(ErrorContext),
}

impl OnChainError {
	pub fn rpc(
		msg: impl Into<String>,
		source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::Rpc(ErrorContext::new_with_log(msg, source, metadata))
	}

	pub fn decode(
		msg: impl Into<String>,
		source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::Decode(ErrorContext::new_with_log(msg, source, metadata))
	}

	pub fn unsupported_chain(
		msg: impl Into<String>,
		source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::UnsupportedChain(ErrorContext::new(msg, source, metadata))
	}
}

impl TraceableError for OnChainError {
	fn trace_id(&self) -> String {
		match self {
			Self::Fetch(err) => err.trace_id(),
			Self::Rpc(ctx) => ctx.trace_id.clone(),
			Self::Decode(ctx) => ctx.trace_id.clone(),
			Self::UnsupportedChain(ctx) => ctx.trace_id.clone(),
		}
	}
}
