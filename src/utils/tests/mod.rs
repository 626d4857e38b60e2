//! Test helper utilities
//!
//! - `builders`: Builders for pair JSON and network entries
//! - `http`: Scripted in-memory HTTP transport

pub mod builders {
	pub mod network;
	pub mod pair;
}


pub use builders::{network::OnChainNetworkBuilder, pair::PairBuilder};
pub use http::{ScriptedReply, ScriptedTransport};
