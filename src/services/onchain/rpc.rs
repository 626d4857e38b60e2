//! JSON-RPC `eth_call` over the shared fetcher.

use alloy::{
	primitives::{Address, Bytes},
	sol_types::SolCall,
};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::{
	collections::HashMap,
	str::FromStr,
	sync::{
		atomic::{AtomicU64, Ordering},
		Arc,
	},
};
use tracing::{debug, instrument};

use crate::services::{
	fetch::{FetchRequest, Fetcher, ResponseBody},
	onchain::OnChainError,
};

/// Read-only contract calls against one chain.
#[async_trait]
pub trait EthCall: Send + Sync {
	/// Executes `data` against `to` at the latest block and returns the raw return data.
	async fn eth_call(&self, to: Address, data: Bytes) -> Result<Bytes, OnChainError>;
}

/// Minimal JSON-RPC client for EVM nodes.
pub struct EvmRpcClient {
	rpc_url: String,
	fetcher: Arc<dyn Fetcher>,
	next_id: AtomicU64,
}

impl EvmRpcClient {
	pub fn new(rpc_url: impl Into<String>, fetcher: Arc<dyn Fetcher>) -> Self {
		Self {
			rpc_url: rpc_url.into(),
			fetcher,
			next_id: AtomicU64::new(1),
		}
	}

	pub fn rpc_url(&self) -> &str {
		&self.rpc_url
	}

	/// Sends one JSON-RPC request and returns its `result` member.
	pub async fn send_raw_request(&self, method: &str, params: Value) -> Result<Value, OnChainError> {
		let id = self.next_id.fetch_add(1, Ordering::Relaxed);
		let payload = json!({
			"jsonrpc": "2.0",
			"id": id,
			"method": method,
			"params": params,
		});
		debug!(method, id, "Sending JSON-RPC request");

		let body = self
			.fetcher
			.fetch(FetchRequest::post_json(&self.rpc_url, &payload))
			.await?;
		let metadata = HashMap::from([
			("method".to_string(), method.to_string()),
			("rpc_url".to_string(), self.rpc_url.clone()),
		]);
		let ResponseBody::Json(mut response) = body else {
			return Err(OnChainError::rpc(
				"Expected a JSON-RPC response",
				None,
				Some(metadata),
			));
		};

		if let Some(error) = response.get("error").filter(|error| !error.is_null()) {
			let message = error
				.get("message")
				.and_then(Value::as_str)
				.unwrap_or("Unknown JSON-RPC error")
				.to_string();
			let mut metadata = metadata;
			if let Some(code) = error.get("code") {
				metadata.insert("code".to_string(), code.to_string());
			}
			if let Some(data) = error.get("data").filter(|data| !data.is_null()) {
				metadata.insert("data".to_string(), data.to_string());
			}
			return Err(OnChainError::rpc(message, None, Some(metadata)));
		}

		match response.get_mut("result") {
			Some(result) => Ok(result.take()),
			None => Err(OnChainError::rpc(
				"Missing 'result' field",
				None,
				Some(metadata),
			)),
		}
	}
}

#[async_trait]
impl EthCall for EvmRpcClient {
	#[instrument(skip(self, data), fields(rpc_url = %self.rpc_url))]
	async fn eth_call(&self, to: Address, data: Bytes) -> Result<Bytes, OnChainError> {
		let params = json!([{ "to": to.to_string(), "data": data.to_string() }, "latest"]);
		let result = self.send_raw_request("eth_call", params).await?;
		let hex = result.as_str().ok_or_else(|| {
			OnChainError::rpc(
				"eth_call result is not a hex string",
				None,
				Some(HashMap::from([("result".to_string(), result.to_string())])),
			)
		})?;
		Bytes::from_str(hex).map_err(|e| {
			OnChainError::decode("eth_call result is not valid hex", Some(Box::new(e)), None)
		})
	}
}

/// Encodes `call`, runs it against `to` and decodes the return values.
pub async fn call_contract<C: SolCall>(
	rpc: &dyn EthCall,
	to: Address,
	call: &C,
) -> Result<C::Return, OnChainError> {
	let output = rpc.eth_call(to, Bytes::from(call.abi_encode())).await?;
	C::abi_decode_returns(&output).map_err(|e| {
		OnChainError::decode(
			format!("Failed to decode return data of {}", C::SIGNATURE),
			Some(Box::new(e)),
			Some(HashMap::from([
				("contract".to_string(), to.to_string()),
				("length".to_string(), output.len().to_string()),
			])),
		)
	})
}
