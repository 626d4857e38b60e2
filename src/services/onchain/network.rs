//! Per-network assembly of the on-chain clients.

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, sync::Arc};
use tracing::info;

use crate::{
	models::ClientsConfig,
	services::{
		clients::GoldRushClient,
		fetch::Fetcher,
		onchain::{
			AddressIndexerClient, Erc20IndexerClient, EthCall, EvmRpcClient, OnChainError,
			UniswapV2IndexerClient,
		},
	},
};

/// What a caller wants to inspect on one chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkInput {
	pub chain_id: u64,
	/// GoldRush chain name, e.g. `eth-mainnet`
	pub chain_name: String,
	/// Overrides the RPC URL from the clients config
	#[serde(default)]
	pub rpc_url: Option<String>,
	/// Uniswap V2 factories to search
	#[serde(default)]
	pub factories: Vec<Address>,
	/// Quote tokens pairs are searched against
	#[serde(default)]
	pub bases: Vec<Address>,
	pub wallet_address: Address,
	#[serde(default)]
	pub quote_currency: Option<String>,
}

/// The indexer clients of one chain, sharing a single RPC client.
#[derive(Clone)]
pub struct NetworkClients {
	pub input: NetworkInput,
	pub rpc_url: String,
	pub address_client: AddressIndexerClient,
	pub erc20_client: Erc20IndexerClient,
	pub uniswap_client: UniswapV2IndexerClient,
	pub goldrush_client: Option<GoldRushClient>,
}

impl NetworkClients {
	/// Builds the clients for `input.chain_id` from the deployments in `config`.
	///
	/// Fails with [`OnChainError::UnsupportedChain`] when the chain is not configured or
	/// lacks one of the indexer proxies.
	pub fn build(
		input: NetworkInput,
		config: &ClientsConfig,
		fetcher: Arc<dyn Fetcher>,
		goldrush: Option<GoldRushClient>,
	) -> Result<Self, OnChainError> {
		let metadata = || {
			Some(HashMap::from([(
				"chain_id".to_string(),
				input.chain_id.to_string(),
			)]))
		};
		let Some(network) = config.network(input.chain_id) else {
			return Err(OnChainError::unsupported_chain(
				format!("Unsupported chain id: {}", input.chain_id),
				None,
				metadata(),
			));
		};
		let modules = &network.modules;
		let (Some(erc20), Some(uniswap), Some(address)) = (
			modules.erc20_indexer_proxy,
			modules.uniswap_v2_indexer_proxy,
			modules.address_indexer_proxy,
		) else {
			return Err(OnChainError::unsupported_chain(
				format!(
					"Missing one or more indexer proxy addresses for chain id {}",
					input.chain_id
				),
				None,
				metadata(),
			));
		};

		let rpc_url = input
			.rpc_url
			.clone()
			.unwrap_or_else(|| network.rpc_url.clone());
		let rpc: Arc<dyn EthCall> = Arc::new(EvmRpcClient::new(rpc_url.clone(), fetcher));
		info!(
			chain_id = input.chain_id,
			chain_name = %input.chain_name,
			"Built on-chain clients"
		);

		Ok(Self {
			rpc_url,
			address_client: AddressIndexerClient::new(address, rpc.clone()),
			erc20_client: Erc20IndexerClient::new(erc20, rpc.clone()),
			uniswap_client: UniswapV2IndexerClient::new(uniswap, rpc),
			goldrush_client: goldrush,
			input,
		})
	}

	/// [`NetworkClients::build`] for several networks; fails on the first unsupported one.
	pub fn build_all(
		inputs: Vec<NetworkInput>,
		config: &ClientsConfig,
		fetcher: Arc<dyn Fetcher>,
		goldrush: Option<GoldRushClient>,
	) -> Result<Vec<Self>, OnChainError> {
		inputs
			.into_iter()
			.map(|input| Self::build(input, config, fetcher.clone(), goldrush.clone()))
			.collect()
	}
}
