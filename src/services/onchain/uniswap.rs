//! Uniswap V2 pair indexer contract client.

use alloy::primitives::{Address, U256};
use serde::Serialize;
use std::sync::Arc;
use tracing::instrument;

use crate::services::onchain::{abi::IUniswapV2Indexer, call_contract, EthCall, OnChainError};

/// One Uniswap V2 pair with reserves and spot prices as reported by the indexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PairInfo {
	pub pair: Address,
	pub token0: Address,
	pub token1: Address,
	pub reserve0: U256,
	pub reserve1: U256,
	pub price0: U256,
	pub price1: U256,
}

impl From<IUniswapV2Indexer::PairView> for PairInfo {
	fn from(view: IUniswapV2Indexer::PairView) -> Self {
		Self {
			pair: view.pair,
			token0: view.token0,
			token1: view.token1,
			reserve0: view.reserve0,
			reserve1: view.reserve1,
			price0: view.price0,
			price1: view.price1,
		}
	}
}

/// A page of pairs. `next_offset` continues the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairPage {
	pub pairs: Vec<PairInfo>,
	pub next_offset: U256,
	/// Pairs of the token in the factory; only known for factory listings
	pub total_pairs: Option<U256>,
}

#[derive(Clone)]
pub struct UniswapV2IndexerClient {
	address: Address,
	rpc: Arc<dyn EthCall>,
}

impl UniswapV2IndexerClient {
	pub fn new(address: Address, rpc: Arc<dyn EthCall>) -> Self {
		Self { address, rpc }
	}

	pub fn address(&self) -> Address {
		self.address
	}

	/// The pair of `token_a` and `token_b` in `factory`, if it exists.
	#[instrument(skip(self))]
	pub async fn find_pair(
		&self,
		factory: Address,
		token_a: Address,
		token_b: Address,
	) -> Result<Option<PairInfo>, OnChainError> {
		let ret = call_contract(
			self.rpc.as_ref(),
			self.address,
			&IUniswapV2Indexer::findPairCall {
				factory,
				tokenA: token_a,
				tokenB: token_b,
			},
		)
		.await?;
		Ok(ret.found.then(|| PairInfo::from(ret.pairView)))
	}

	#[instrument(skip(self))]
	pub async fn find_pairs_for_token_in_factory(
		&self,
		factory: Address,
		token: Address,
		offset: U256,
		limit: U256,
	) -> Result<PairPage, OnChainError> {
		let ret = call_contract(
			self.rpc.as_ref(),
			self.address,
			&IUniswapV2Indexer::findPairsForTokenInFactoryCall {
				factory,
				token,
				offset,
				limit,
			},
		)
		.await?;
		Ok(PairPage {
			pairs: ret.results.into_iter().map(PairInfo::from).collect(),
			next_offset: ret.nextOffset,
			total_pairs: Some(ret.totalPairs),
		})
	}

	/// Pairs of `token` against each of `bases` in `factory`.
	#[instrument(skip(self, bases), fields(bases = bases.len()))]
	pub async fn find_pairs_for_token_against_bases(
		&self,
		factory: Address,
		token: Address,
		bases: &[Address],
		offset: U256,
		limit: U256,
	) -> Result<PairPage, OnChainError> {
		let ret = call_contract(
			self.rpc.as_ref(),
			self.address,
			&IUniswapV2Indexer::findPairsForTokenAgainstBasesCall {
				factory,
				token,
				bases: bases.to_vec(),
				offset,
				limit,
			},
		)
		.await?;
		Ok(PairPage {
			pairs: ret.results.into_iter().map(PairInfo::from).collect(),
			next_offset: ret.nextOffset,
			total_pairs: None,
		})
	}
}
