use alloy::primitives::{Address, Bytes};
use async_trait::async_trait;
use mockall::mock;
use mockito::{Matcher, Mock, ServerGuard};
use serde_json::json;

use token_indexer_sdk::services::onchain::{EthCall, OnChainError};

mock! {
	pub EthCall {}

	#[async_trait]
	impl EthCall for EthCall {
		async fn eth_call(&self, to: Address, data: Bytes) -> Result<Bytes, OnChainError>;
	}
}

/// Answers every `eth_call` POSTed to `/` with `output` as the hex result.
pub fn create_eth_call_mock(server: &mut ServerGuard, output: &[u8]) -> Mock {
	server
		.mock("POST", "/")
		.match_body(Matcher::PartialJson(json!({
			"jsonrpc": "2.0",
			"method": "eth_call"
		})))
		.with_header("content-type", "application/json")
		.with_status(200)
		.with_body(
			json!({
				"jsonrpc": "2.0",
				"id": 1,
				"result": Bytes::copy_from_slice(output).to_string()
			})
			.to_string(),
		)
		.create()
}

/// Answers every JSON-RPC request with an `error` object.
pub fn create_rpc_error_mock(server: &mut ServerGuard, code: i64, message: &str) -> Mock {
	server
		.mock("POST", "/")
		.with_header("content-type", "application/json")
		.with_status(200)
		.with_body(
			json!({
				"jsonrpc": "2.0",
				"id": 1,
				"error": {"code": code, "message": message, "data": "0x08c379a0"}
			})
			.to_string(),
		)
		.create()
}
