use mockito::{Matcher, Server};
use reqwest::Method;
use serde_json::json;
use std::sync::Arc;

use token_indexer_sdk::{
	services::{
		clients::{ClientError, DexscreenerClient},
		fetch::ResponseBody,
	},
	utils::tests::PairBuilder,
};

use crate::integration::mocks::{test_fetch_config, MockFetcher};

const TOKEN: &str = "0x2ca12a3f9635fd69c21580def14f25c210ca9612";

fn client(server: &mockito::ServerGuard, retries: u32) -> DexscreenerClient {
	DexscreenerClient::new(test_fetch_config(&server.url(), retries)).unwrap()
}

#[tokio::test]
async fn test_token_summary_from_live_shape() {
	let mut server = Server::new_async().await;
	let body = json!({
		"schemaVersion": "1.0.0",
		"pairs": [
			PairBuilder::new()
				.pair_address("0xsmall")
				.base_token(TOKEN, "Kizuna", "KIZ")
				.liquidity(json!(1200.0))
				.volume(json!(300.0))
				.txns(json!(4), json!(1))
				.build(),
			PairBuilder::new()
				.chain_id("base")
				.pair_address("0xdeep")
				.base_token(TOKEN, "Kizuna", "KIZ")
				.liquidity(json!(5000.0))
				.volume(json!(700.0))
				.txns(json!(6), json!(9))
				.build(),
		]
	});
	let mock = server
		.mock("GET", format!("/latest/dex/tokens/{}", TOKEN).as_str())
		.with_status(200)
		.with_header("content-type", "application/json")
		.with_body(body.to_string())
		.expect(1)
		.create();

	let summary = client(&server, 0).get_token_summary(TOKEN).await.unwrap();

	assert_eq!(summary.token_name, "Kizuna");
	assert_eq!(summary.token_symbol, "KIZ");
	assert_eq!(summary.num_pairs, 2);
	assert_eq!(summary.liquidity_usd_total, 6200.0);
	assert_eq!(summary.volume_24h_total, 1000.0);
	assert_eq!(summary.transactions_24h.buys, 10);
	assert_eq!(summary.transactions_24h.sells, 10);
	assert_eq!(summary.chains.len(), 2);
	assert_eq!(
		summary.primary_record.unwrap().pair_address.as_deref(),
		Some("0xdeep")
	);
	mock.assert();
}

#[tokio::test]
async fn test_server_error_then_success() {
	let mut server = Server::new_async().await;
	let failing = server
		.mock("GET", Matcher::Regex("^/latest/dex/tokens/".to_string()))
		.with_status(503)
		.expect(1)
		.create();
	let ok = server
		.mock("GET", Matcher::Regex("^/latest/dex/tokens/".to_string()))
		.with_status(200)
		.with_body(r#"{"schemaVersion":"1.0.0","pairs":null}"#)
		.expect(1)
		.create();

	let pairs = client(&server, 1).get_pairs_by_token(TOKEN).await.unwrap();

	assert!(pairs.pairs.unwrap_or_default().is_empty());
	failing.assert();
	ok.assert();
}

#[tokio::test]
async fn test_search_encodes_query() {
	let mut server = Server::new_async().await;
	let mock = server
		.mock("GET", "/latest/dex/search")
		.match_query(Matcher::UrlEncoded("q".to_string(), "USD1/USDC".to_string()))
		.with_status(200)
		.with_body(r#"{"schemaVersion":"1.0.0","pairs":[]}"#)
		.create();

	let response = client(&server, 0).search_pairs("USD1/USDC").await.unwrap();

	assert_eq!(response.schema_version.as_deref(), Some("1.0.0"));
	mock.assert();
}

#[tokio::test]
async fn test_token_batch_path() {
	let mut server = Server::new_async().await;
	let pair = PairBuilder::new().build();
	let mock = server
		.mock("GET", "/tokens/v1/ethereum/0xaaa,0xbbb")
		.with_status(200)
		.with_body(json!([pair]).to_string())
		.create();

	let pairs = client(&server, 0)
		.get_tokens_by_addresses("ethereum", &["0xaaa", "0xbbb"])
		.await
		.unwrap();

	assert_eq!(pairs.len(), 1);
	assert_eq!(pairs[0].pair_address, "0xpair");
	mock.assert();
}

#[tokio::test]
async fn test_client_error_is_not_retried() {
	let mut server = Server::new_async().await;
	let mock = server
		.mock("GET", Matcher::Any)
		.with_status(400)
		.with_body("bad request")
		.expect(1)
		.create();

	let result = client(&server, 3).get_pairs_by_token_raw(TOKEN).await;

	assert!(matches!(result, Err(ClientError::Fetch(_))));
	mock.assert();
}

#[tokio::test]
async fn test_injected_fetcher_receives_requests() {
	let mut fetcher = MockFetcher::new();
	fetcher
		.expect_fetch()
		.withf(|request| {
			request.method == Method::GET
				&& request.url == "https://dex.test/token-profiles/latest/v1"
		})
		.times(1)
		.returning(|_| Ok(ResponseBody::Json(json!([{"tokenAddress": "0xabc"}]))));

	let client = DexscreenerClient::with_fetcher(
		DexscreenerClient::default_config().with_base_url("https://dex.test/"),
		Arc::new(fetcher),
	);
	let profiles = client.get_latest_token_profiles().await.unwrap();

	assert_eq!(profiles[0]["tokenAddress"], "0xabc");
}
