//! Read-only on-chain access through the deployed indexer contracts.
//!
//! - `abi`: `sol!` interfaces of the indexers
//! - `rpc`: JSON-RPC `eth_call` over the shared fetcher
//! - `erc20`, `address`, `uniswap`: typed clients per indexer
//! - `network`: assembly of the clients for one chain

mod abi;
mod address;
mod erc20;
mod error;
mod network;
mod rpc;
mod uniswap;

pub use abi::{IAddressIndexer, IErc20Indexer, IUniswapV2Indexer};
pub use address::{AccountInfo, AddressIndexerClient};
pub use erc20::{Erc20IndexerClient, Erc20Info};
pub use error::OnChainError;
pub use network::{NetworkClients, NetworkInput};
pub use rpc::{call_contract, EthCall, EvmRpcClient};
pub use uniswap::{PairInfo, PairPage, UniswapV2IndexerClient};
