use alloy::{
	primitives::{Address, U256},
	sol_types::{SolCall, SolValue},
};
use mockito::Server;
use std::sync::Arc;

use token_indexer_sdk::services::onchain::{
	Erc20IndexerClient, EthCall, EvmRpcClient, IErc20Indexer, OnChainError,
};

use crate::integration::mocks::{
	create_eth_call_mock, create_rpc_error_mock, reqwest_fetcher, test_fetch_config,
};

fn rpc_client(server: &mockito::ServerGuard) -> EvmRpcClient {
	EvmRpcClient::new(
		server.url(),
		reqwest_fetcher(&test_fetch_config(&server.url(), 0)),
	)
}

#[tokio::test]
async fn test_erc20_get_through_node() {
	let mut server = Server::new_async().await;
	let output = (
		"USD Coin".to_string(),
		"USDC".to_string(),
		U256::from(6u8), // uint8 ABI-encodes as a 32-byte word
		U256::from(50_000_000u64),
		U256::from(1_250_000u64),
		U256::from(10u64),
	)
		.abi_encode_params();
	let mock = create_eth_call_mock(&mut server, &output);

	let client = Erc20IndexerClient::new(
		Address::repeat_byte(0x11),
		Arc::new(rpc_client(&server)),
	);
	let info = client
		.get(
			Address::repeat_byte(0xa0),
			Address::repeat_byte(0x01),
			Address::repeat_byte(0x02),
		)
		.await
		.unwrap();

	assert_eq!(info.token, Address::repeat_byte(0xa0));
	assert_eq!(info.name, "USD Coin");
	assert_eq!(info.symbol, "USDC");
	assert_eq!(info.decimals, 6);
	assert_eq!(info.balance, U256::from(1_250_000u64));
	assert_eq!(info.allowance, U256::from(10u64));
	mock.assert();
}

#[tokio::test]
async fn test_eth_call_returns_raw_bytes() {
	let mut server = Server::new_async().await;
	let mock = create_eth_call_mock(&mut server, &[0xde, 0xad, 0xbe, 0xef]);

	let rpc = rpc_client(&server);
	let call = IErc20Indexer::getCall {
		token: Address::ZERO,
		owner: Address::ZERO,
		spender: Address::ZERO,
	};
	let output = rpc
		.eth_call(Address::repeat_byte(0x11), call.abi_encode().into())
		.await
		.unwrap();

	assert_eq!(output.as_ref(), &[0xde, 0xad, 0xbe, 0xef]);
	mock.assert();
}

#[tokio::test]
async fn test_node_error_is_rpc_error() {
	let mut server = Server::new_async().await;
	let mock = create_rpc_error_mock(&mut server, 3, "execution reverted");

	let client = Erc20IndexerClient::new(
		Address::repeat_byte(0x11),
		Arc::new(rpc_client(&server)),
	);
	match client
		.get(Address::ZERO, Address::ZERO, Address::ZERO)
		.await
	{
		Err(OnChainError::Rpc(ctx)) => {
			assert_eq!(ctx.message, "execution reverted");
			let metadata = ctx.metadata.unwrap();
			assert_eq!(metadata.get("code").map(String::as_str), Some("3"));
			assert!(metadata.contains_key("data"));
		}
		other => panic!("expected an RPC error, got {:?}", other),
	}
	mock.assert();
}

#[tokio::test]
async fn test_http_failure_surfaces_as_fetch_error() {
	let mut server = Server::new_async().await;
	let mock = server
		.mock("POST", "/")
		.with_status(502)
		.expect(1)
		.create();

	let result = rpc_client(&server)
		.send_raw_request("eth_chainId", serde_json::json!([]))
		.await;

	assert!(matches!(result, Err(OnChainError::Fetch(_))));
	mock.assert();
}
