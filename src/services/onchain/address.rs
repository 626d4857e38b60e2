//! Address indexer contract client.

use alloy::primitives::{Address, B256, U256};
use serde::Serialize;
use std::{collections::HashMap, sync::Arc};
use tracing::instrument;

use crate::services::onchain::{abi::IAddressIndexer, call_contract, EthCall, OnChainError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AccountInfo {
	pub account: Address,
	/// Native balance in wei
	pub balance: U256,
	pub is_contract: bool,
	/// `EXTCODEHASH`; zero for accounts that do not exist
	pub codehash: B256,
}

#[derive(Clone)]
pub struct AddressIndexerClient {
	address: Address,
	rpc: Arc<dyn EthCall>,
}

impl AddressIndexerClient {
	pub fn new(address: Address, rpc: Arc<dyn EthCall>) -> Self {
		Self { address, rpc }
	}

	pub fn address(&self) -> Address {
		self.address
	}

	#[instrument(skip(self))]
	pub async fn get(&self, account: Address) -> Result<AccountInfo, OnChainError> {
		let ret = call_contract(
			self.rpc.as_ref(),
			self.address,
			&IAddressIndexer::getCall { account },
		)
		.await?;
		Ok(AccountInfo {
			account,
			balance: ret.bal,
			is_contract: ret.isContract,
			codehash: ret.codehash,
		})
	}

	#[instrument(skip(self, accounts), fields(count = accounts.len()))]
	pub async fn get_batch(&self, accounts: &[Address]) -> Result<Vec<AccountInfo>, OnChainError> {
		let ret = call_contract(
			self.rpc.as_ref(),
			self.address,
			&IAddressIndexer::getBatchCall {
				accounts: accounts.to_vec(),
			},
		)
		.await?;

		if ret.balances.len() != accounts.len()
			|| ret.isContracts.len() != accounts.len()
			|| ret.codehashes.len() != accounts.len()
		{
			return Err(OnChainError::decode(
				"getBatch returned columns of unexpected length",
				None,
				Some(HashMap::from([(
					"expected".to_string(),
					accounts.len().to_string(),
				)])),
			));
		}

		Ok(accounts
			.iter()
			.zip(ret.balances)
			.zip(ret.isContracts)
			.zip(ret.codehashes)
			.map(|(((account, balance), is_contract), codehash)| AccountInfo {
				account: *account,
				balance,
				is_contract,
				codehash,
			})
			.collect())
	}
}
