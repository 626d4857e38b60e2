//! Aptos indexer GraphQL client.

use serde::{Deserialize, Serialize};
use serde_json::json;
use std::{collections::HashMap, sync::Arc};
use tracing::instrument;

use crate::{
	models::FetchConfig,
	services::{
		clients::{decode, default_fetcher, ClientError, RestClient},
		fetch::Fetcher,
	},
};

pub const APTOS_INDEXER_URL: &str = "https://api.mainnet.aptoslabs.com/v1/graphql";

const FUNGIBLE_ASSET_METADATA_QUERY: &str = r#"
query GetFungibleAssetMetadata($assetType: String!) {
	fungible_asset_metadata(
		where: { asset_type: { _eq: $assetType } }
		offset: 0
		limit: 100
	) {
		symbol
		name
		decimals
		asset_type
		project_uri
		icon_uri
		supply_aggregator_table_key_v1
		supply_v2
		last_transaction_timestamp
		__typename
	}
}
"#;

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct AptosFungibleAssetMetadata {
	pub symbol: String,
	pub name: String,
	pub decimals: u8,
	pub asset_type: String,
	pub project_uri: Option<String>,
	pub icon_uri: Option<String>,
	pub supply_aggregator_table_key_v1: Option<String>,
	/// Decimal string; may exceed `u64`
	pub supply_v2: Option<serde_json::Value>,
	pub last_transaction_timestamp: Option<String>,
	#[serde(rename = "__typename")]
	pub typename: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct GraphQlError {
	message: String,
}

#[derive(Debug, Clone, Deserialize)]
struct GraphQlResponse<T> {
	data: Option<T>,
	#[serde(default)]
	errors: Vec<GraphQlError>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct MetadataData {
	#[serde(default)]
	fungible_asset_metadata: Vec<AptosFungibleAssetMetadata>,
}

/// Client for the Aptos Labs indexer GraphQL endpoint.
///
/// The configured base URL is the GraphQL endpoint itself.
#[derive(Clone)]
pub struct AptosIndexerClient {
	rest: RestClient,
}

impl AptosIndexerClient {
	pub const NAME: &'static str = "aptos_indexer";

	pub fn default_config() -> FetchConfig {
		FetchConfig::new(APTOS_INDEXER_URL)
	}

	pub fn new(config: FetchConfig) -> Result<Self, ClientError> {
		let fetcher = default_fetcher(&config)?;
		Ok(Self::with_fetcher(config, fetcher))
	}

	pub fn with_fetcher(config: FetchConfig, fetcher: Arc<dyn Fetcher>) -> Self {
		Self {
			rest: RestClient::new(&config, fetcher),
		}
	}

	/// Metadata rows for one fungible asset type, e.g. `0x1::aptos_coin::AptosCoin`.
	///
	/// GraphQL errors are joined with `"; "` into one error.
	#[instrument(skip(self))]
	pub async fn get_fungible_asset_metadata(
		&self,
		asset_type: &str,
	) -> Result<Vec<AptosFungibleAssetMetadata>, ClientError> {
		let body = json!({
			"query": FUNGIBLE_ASSET_METADATA_QUERY,
			"variables": { "assetType": asset_type },
		});
		let value = self.rest.post_json(self.rest.base_url(), &body).await?;
		let response: GraphQlResponse<MetadataData> = decode(value, "Aptos indexer response")?;

		if !response.errors.is_empty() {
			let joined = response
				.errors
				.iter()
				.map(|e| e.message.as_str())
				.collect::<Vec<_>>()
				.join("; ");
			return Err(ClientError::unexpected_response(
				joined,
				None,
				Some(HashMap::from([(
					"asset_type".to_string(),
					asset_type.to_string(),
				)])),
			));
		}

		Ok(response
			.data
			.map(|data| data.fungible_asset_metadata)
			.unwrap_or_default())
	}
}
