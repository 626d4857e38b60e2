//! ERC20 indexer contract client.

use alloy::primitives::{Address, U256};
use serde::Serialize;
use std::{collections::HashMap, sync::Arc};
use tracing::instrument;

use crate::services::onchain::{abi::IErc20Indexer, call_contract, EthCall, OnChainError};

/// Metadata and holdings of one token for an owner/spender pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Erc20Info {
	pub token: Address,
	pub name: String,
	pub symbol: String,
	pub decimals: u8,
	pub total_supply: U256,
	/// `balanceOf(owner)`
	pub balance: U256,
	/// `allowance(owner, spender)`
	pub allowance: U256,
}

/// Reads token metadata through the ERC20 indexer proxy.
#[derive(Clone)]
pub struct Erc20IndexerClient {
	address: Address,
	rpc: Arc<dyn EthCall>,
}

impl Erc20IndexerClient {
	pub fn new(address: Address, rpc: Arc<dyn EthCall>) -> Self {
		Self { address, rpc }
	}

	pub fn address(&self) -> Address {
		self.address
	}

	#[instrument(skip(self))]
	pub async fn get(
		&self,
		token: Address,
		owner: Address,
		spender: Address,
	) -> Result<Erc20Info, OnChainError> {
		let call = IErc20Indexer::getCall {
			token,
			owner,
			spender,
		};
		let ret = call_contract(self.rpc.as_ref(), self.address, &call).await?;
		Ok(Erc20Info {
			token,
			name: ret.n,
			symbol: ret.s,
			decimals: ret.d,
			total_supply: ret.ts,
			balance: ret.bal,
			allowance: ret.alw,
		})
	}

	/// Same as [`Erc20IndexerClient::get`] for many tokens in one call, in input order.
	#[instrument(skip(self, tokens), fields(count = tokens.len()))]
	pub async fn get_batch(
		&self,
		tokens: &[Address],
		owner: Address,
		spender: Address,
	) -> Result<Vec<Erc20Info>, OnChainError> {
		let call = IErc20Indexer::getBatchCall {
			tokens: tokens.to_vec(),
			owner,
			spender,
		};
		let ret = call_contract(self.rpc.as_ref(), self.address, &call).await?;

		let lengths = [
			ret.names.len(),
			ret.symbols.len(),
			ret.decimalsList.len(),
			ret.totalSupplies.len(),
			ret.balances.len(),
			ret.allowances.len(),
		];
		if lengths.iter().any(|len| *len != tokens.len()) {
			return Err(OnChainError::decode(
				"getBatch returned columns of unexpected length",
				None,
				Some(HashMap::from([
					("expected".to_string(), tokens.len().to_string()),
					("lengths".to_string(), format!("{:?}", lengths)),
				])),
			));
		}

		Ok(tokens
			.iter()
			.enumerate()
			.map(|(i, token)| Erc20Info {
				token: *token,
				name: ret.names[i].clone(),
				symbol: ret.symbols[i].clone(),
				decimals: ret.decimalsList[i],
				total_supply: ret.totalSupplies[i],
				balance: ret.balances[i],
				allowance: ret.allowances[i],
			})
			.collect())
	}
}
