//! Builder for on-chain network entries

use alloy::primitives::Address;

use crate::models::{ModuleAddresses, OnChainNetworkConfig};

pub struct OnChainNetworkBuilder {
	chain_name: String,
	rpc_url: String,
	modules: ModuleAddresses,
}

impl Default for OnChainNetworkBuilder {
	fn default() -> Self {
		Self {
			chain_name: "eth-mainnet".to_string(),
			rpc_url: "https://rpc.test".to_string(),
			modules: ModuleAddresses {
				erc20_indexer_proxy: Some(Address::repeat_byte(0x11)),
				uniswap_v2_indexer_proxy: Some(Address::repeat_byte(0x22)),
				address_indexer_proxy: Some(Address::repeat_byte(0x33)),
			},
		}
	}
}

impl OnChainNetworkBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn chain_name(mut self, name: &str) -> Self {
		self.chain_name = name.to_string();
		self
	}

	pub fn rpc_url(mut self, url: &str) -> Self {
		self.rpc_url = url.to_string();
		self
	}

	pub fn modules(mut self, modules: ModuleAddresses) -> Self {
		self.modules = modules;
		self
	}

	pub fn build(self) -> OnChainNetworkConfig {
		OnChainNetworkConfig {
			chain_name: self.chain_name,
			rpc_url: self.rpc_url,
			modules: self.modules,
		}
	}
}
