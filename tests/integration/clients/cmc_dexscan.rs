use mockito::{Matcher, Server};
use serde_json::json;

use token_indexer_sdk::{
	models::{SecretString, SecretValue},
	services::clients::{ClientError, CmcDexScanClient},
};

use crate::integration::mocks::test_fetch_config;

const TOKEN: &str = "0x2ca12a3f9635fd69c21580def14f25c210ca9612";

fn client(server: &mockito::ServerGuard) -> CmcDexScanClient {
	CmcDexScanClient::new(
		test_fetch_config(&server.url(), 0)
			.with_api_key(SecretValue::Plain(SecretString::from("cmc-key"))),
	)
	.unwrap()
}

fn cmc_pair(address: &str, liquidity: f64) -> serde_json::Value {
	json!({
		"base_asset_contract_address": TOKEN,
		"base_asset_name": "Kizuna",
		"base_asset_symbol": "KIZ",
		"network_slug": "ethereum",
		"contract_address": address,
		"dex_slug": "uniswap-v2",
		"quote": [{"convert_id": 2781, "liquidity": liquidity, "volume_24h": 10.0, "price": 0.5}]
	})
}

#[tokio::test]
async fn test_falls_back_to_next_endpoint() {
	let mut server = Server::new_async().await;
	let quotes = server
		.mock("GET", "/v4/dex/pairs/quotes/latest")
		.match_query(Matcher::Any)
		.match_header("X-CMC_PRO_API_KEY", "cmc-key")
		.with_status(200)
		.with_body(r#"{"status":{"error_code":"0"},"data":[]}"#)
		.expect(1)
		.create();
	let trade = server
		.mock("GET", "/v4/dex/pairs/trade/latest")
		.match_query(Matcher::AllOf(vec![
			Matcher::UrlEncoded("base_asset_contract_address".to_string(), TOKEN.to_string()),
			Matcher::UrlEncoded("network_slug".to_string(), "ethereum".to_string()),
		]))
		.with_status(200)
		.with_body(
			json!({
				"status": {"error_code": 0},
				"data": [cmc_pair("0xp1", 100.0), cmc_pair("0xp2", 400.0)]
			})
			.to_string(),
		)
		.expect(1)
		.create();

	let summary = client(&server)
		.get_token_summary(TOKEN, "ethereum")
		.await
		.unwrap();

	assert_eq!(summary.num_pairs, 2);
	assert_eq!(summary.liquidity_usd_total, 500.0);
	assert_eq!(summary.token_symbol, "KIZ");
	assert_eq!(
		summary.primary_record.unwrap().pair_address.as_deref(),
		Some("0xp2")
	);
	quotes.assert();
	trade.assert();
}

#[tokio::test]
async fn test_every_endpoint_empty() {
	let mut server = Server::new_async().await;
	let mock = server
		.mock("GET", Matcher::Any)
		.with_status(200)
		.with_body(r#"{"status":{"error_code":0},"data":[]}"#)
		.expect(4)
		.create();

	match client(&server).get_pairs_by_token(TOKEN, "ethereum").await {
		Err(ClientError::NotFound(ctx)) => {
			assert_eq!(ctx.message, "All endpoints failed to return valid data")
		}
		other => panic!("expected NotFound, got {:?}", other.map(|_| ())),
	}
	mock.assert();
}

#[tokio::test]
async fn test_api_error_code_is_surfaced() {
	let mut server = Server::new_async().await;
	let mock = server
		.mock("GET", Matcher::Any)
		.with_status(200)
		.with_body(r#"{"status":{"error_code":"1002","error_message":"API key missing."}}"#)
		.expect(4)
		.create();

	let error = client(&server)
		.get_pairs_by_token(TOKEN, "ethereum")
		.await
		.unwrap_err();

	assert!(error.to_string().contains("API Error 1002: API key missing."));
	mock.assert();
}

#[test]
fn test_api_key_is_required() {
	assert!(matches!(
		CmcDexScanClient::new(CmcDexScanClient::default_config()),
		Err(ClientError::Configuration(_))
	));
}
