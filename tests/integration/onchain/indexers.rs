use alloy::{
	primitives::{Address, Bytes, B256, U256},
	sol_types::{SolCall, SolValue},
};
use mockall::predicate;
use std::sync::Arc;

use token_indexer_sdk::services::onchain::{
	AddressIndexerClient, IAddressIndexer, IUniswapV2Indexer, OnChainError,
	UniswapV2IndexerClient,
};

use crate::integration::mocks::MockEthCall;

const ADDRESS_INDEXER: Address = Address::repeat_byte(0x33);
const UNISWAP_INDEXER: Address = Address::repeat_byte(0x22);

fn pair_view(byte: u8, reserve0: u64) -> IUniswapV2Indexer::PairView {
	IUniswapV2Indexer::PairView {
		pair: Address::repeat_byte(byte),
		token0: Address::repeat_byte(0xa0),
		token1: Address::repeat_byte(0xb0),
		reserve0: U256::from(reserve0),
		reserve1: U256::from(reserve0 * 2),
		price0: U256::from(2u64),
		price1: U256::from(1u64),
	}
}

#[tokio::test]
async fn test_account_lookup_targets_indexer() {
	let account = Address::repeat_byte(0x01);
	let expected_data = Bytes::from(IAddressIndexer::getCall { account }.abi_encode());
	let output = (U256::from(42u64), true, B256::repeat_byte(0xcc)).abi_encode_params();

	let mut rpc = MockEthCall::new();
	rpc.expect_eth_call()
		.with(predicate::eq(ADDRESS_INDEXER), predicate::eq(expected_data))
		.times(1)
		.returning(move |_, _| Ok(Bytes::from(output.clone())));

	let client = AddressIndexerClient::new(ADDRESS_INDEXER, Arc::new(rpc));
	let info = client.get(account).await.unwrap();

	assert_eq!(info.account, account);
	assert_eq!(info.balance, U256::from(42u64));
	assert!(info.is_contract);
	assert_eq!(info.codehash, B256::repeat_byte(0xcc));
}

#[tokio::test]
async fn test_account_batch_keeps_input_order() {
	let accounts = [Address::repeat_byte(0x01), Address::repeat_byte(0x02)];
	let output = (
		vec![U256::from(1u64), U256::from(2u64)],
		vec![false, true],
		vec![B256::ZERO, B256::repeat_byte(0x0f)],
	)
		.abi_encode_params();

	let mut rpc = MockEthCall::new();
	rpc.expect_eth_call()
		.times(1)
		.returning(move |_, _| Ok(Bytes::from(output.clone())));

	let infos = AddressIndexerClient::new(ADDRESS_INDEXER, Arc::new(rpc))
		.get_batch(&accounts)
		.await
		.unwrap();

	assert_eq!(infos.len(), 2);
	assert_eq!(infos[0].account, accounts[0]);
	assert!(!infos[0].is_contract);
	assert_eq!(infos[1].balance, U256::from(2u64));
	assert_eq!(infos[1].codehash, B256::repeat_byte(0x0f));
}

#[tokio::test]
async fn test_paging_through_factory_pairs() {
	let factory = Address::repeat_byte(0xfa);
	let token = Address::repeat_byte(0xa0);
	let first = (vec![pair_view(0x01, 10), pair_view(0x02, 20)], U256::from(2u64), U256::from(3u64))
		.abi_encode_params();
	let second = (vec![pair_view(0x03, 30)], U256::from(3u64), U256::from(3u64)).abi_encode_params();

	let mut rpc = MockEthCall::new();
	let mut sequence = mockall::Sequence::new();
	rpc.expect_eth_call()
		.times(1)
		.in_sequence(&mut sequence)
		.returning(move |_, _| Ok(Bytes::from(first.clone())));
	rpc.expect_eth_call()
		.times(1)
		.in_sequence(&mut sequence)
		.returning(move |to, data| {
			assert_eq!(to, UNISWAP_INDEXER);
			let call = IUniswapV2Indexer::findPairsForTokenInFactoryCall::abi_decode(&data).unwrap();
			assert_eq!(call.offset, U256::from(2u64));
			Ok(Bytes::from(second.clone()))
		});

	let client = UniswapV2IndexerClient::new(UNISWAP_INDEXER, Arc::new(rpc));
	let limit = U256::from(2u64);
	let mut offset = U256::ZERO;
	let mut pairs = Vec::new();
	loop {
		let page = client
			.find_pairs_for_token_in_factory(factory, token, offset, limit)
			.await
			.unwrap();
		pairs.extend(page.pairs);
		if page.total_pairs.map_or(true, |total| page.next_offset >= total) {
			break;
		}
		offset = page.next_offset;
	}

	assert_eq!(pairs.len(), 3);
	assert_eq!(pairs[2].pair, Address::repeat_byte(0x03));
	assert_eq!(pairs[2].reserve1, U256::from(60u64));
}

#[tokio::test]
async fn test_rpc_failure_propagates() {
	let mut rpc = MockEthCall::new();
	rpc.expect_eth_call()
		.returning(|_, _| Err(OnChainError::rpc("header not found", None, None)));

	let result = UniswapV2IndexerClient::new(UNISWAP_INDEXER, Arc::new(rpc))
		.find_pair(Address::ZERO, Address::ZERO, Address::ZERO)
		.await;

	assert!(matches!(result, Err(OnChainError::Rpc(_))));
}
