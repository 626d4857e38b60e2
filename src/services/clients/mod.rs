//! Market-data and explorer API clients.
//!
//! Every client wraps a [`RestClient`] over a shared [`crate::services::fetch::Fetcher`], so
//! retries and timeouts follow the client's `FetchConfig`. Clients needing an API key resolve
//! it when they are built.

mod aptos_indexer;
mod cmc_dexscan;
mod defillama;
mod dexguru;
mod dexscreener;
mod error;
mod explorers;
mod geckoterminal;
mod goldrush;
mod moralis;
mod rest;

pub use aptos_indexer::{AptosFungibleAssetMetadata, AptosIndexerClient, APTOS_INDEXER_URL};
pub use cmc_dexscan::{CmcDexScanClient, CMC_BASE_URL, CMC_DEFAULT_NETWORK};
pub use defillama::{
	DefiLlamaClient, DefiLlamaProtocol, LlamaPeggedAsset, LlamaStablecoinsResponse,
	DEFILLAMA_BASE_URL, DEFILLAMA_STABLECOINS_BASE_URL,
};
pub use dexguru::{
	DexguruClient, DexguruHistoryParams, DexguruPageParams, HistoryInterval, SortOrder,
	TransactionKind, DEXGURU_BASE_URL, DEXGURU_DEFAULT_TIMEOUT_MS,
};
pub use dexscreener::{
	DexscreenerClient, DexscreenerLiquidity, DexscreenerPair, DexscreenerPairInfo,
	DexscreenerPairsResponse, DexscreenerToken, DexscreenerTxnStats, DexscreenerWindows,
	DEXSCREENER_BASE_URL, MAX_TOKENS_PER_REQUEST,
};
pub use error::ClientError;
pub use explorers::{
	AptoscanClient, AptoscanFungibleAsset, AptoscanResponse, StellarExpertAsset,
	StellarExpertClient, StellarExpertRating, StellarExpertTomlInfo, StellarExpertTrustlines,
	XrpscanClient, XrpscanToken, APTOSCAN_BASE_URL, STELLAR_EXPERT_BASE_URL, XRPSCAN_BASE_URL,
};
pub use geckoterminal::{
	GeckoTerminalClient, GeckoTerminalTokenAttributes, GeckoTerminalTokenData,
	GeckoTerminalTokenResponse, GeckoTerminalVolume, OhlcvQuery, OhlcvTimeframe,
	GECKOTERMINAL_BASE_URL,
};
pub use goldrush::{
	GoldRushClient, GoldRushPagination, HistoricalPricesParams, QuoteCurrency,
	TokenBalancesParams, TokenHoldersParams, GOLDRUSH_API_KEY_ENV, GOLDRUSH_BASE_URL,
};
pub use moralis::{
	validate_token_data, MoralisClient, MoralisErc20Price, MORALIS_BASE_URL,
	MORALIS_DEFAULT_CHAIN,
};
pub use rest::{decode, default_fetcher, encode_segment, required_api_key, RestClient};
