use mockito::{Matcher, Server};
use serde_json::json;

use token_indexer_sdk::{
	models::{SecretString, SecretValue},
	services::clients::{ClientError, GoldRushClient, QuoteCurrency, TokenBalancesParams, TokenHoldersParams},
};

use crate::integration::mocks::test_fetch_config;

fn client(server: &mockito::ServerGuard) -> GoldRushClient {
	GoldRushClient::new(
		test_fetch_config(&server.url(), 0)
			.with_api_key(SecretValue::Plain(SecretString::from("cqt_key"))),
	)
	.unwrap()
}

fn holders_page(page: u32, has_more: bool) -> String {
	json!({
		"data": {
			"items": [{"address": format!("0xholder{}", page)}],
			"pagination": {"has_more": has_more, "page_number": page, "page_size": 100}
		},
		"error": false,
		"error_message": null,
		"error_code": null
	})
	.to_string()
}

#[tokio::test]
async fn test_holders_follow_pagination() {
	let mut server = Server::new_async().await;
	let path = "/eth-mainnet/tokens/0xtoken/token_holders_v2/";
	let first = server
		.mock("GET", path)
		.match_query(Matcher::UrlEncoded("page-number".to_string(), "0".to_string()))
		.match_header("authorization", "Bearer cqt_key")
		.with_status(200)
		.with_body(holders_page(0, true))
		.expect(1)
		.create();
	let second = server
		.mock("GET", path)
		.match_query(Matcher::UrlEncoded("page-number".to_string(), "1".to_string()))
		.with_status(200)
		.with_body(holders_page(1, false))
		.expect(1)
		.create();

	let params = TokenHoldersParams {
		chain_name: "eth-mainnet".to_string(),
		token_address: "0xtoken".to_string(),
		page_size: Some(100),
		..Default::default()
	};
	let pages = client(&server).get_token_holders(&params).await.unwrap();

	assert_eq!(pages.len(), 2);
	assert_eq!(pages[1]["items"][0]["address"], "0xholder1");
	first.assert();
	second.assert();
}

#[tokio::test]
async fn test_balances_query() {
	let mut server = Server::new_async().await;
	let mock = server
		.mock("GET", "/eth-mainnet/address/0xwallet/balances_v2/")
		.match_query(Matcher::AllOf(vec![
			Matcher::UrlEncoded("quote-currency".to_string(), "EUR".to_string()),
			Matcher::UrlEncoded("no-spam".to_string(), "true".to_string()),
		]))
		.with_status(200)
		.with_body(r#"{"data":{"items":[]},"error":false}"#)
		.create();

	let params = TokenBalancesParams {
		chain_name: "eth-mainnet".to_string(),
		wallet_address: "0xwallet".to_string(),
		quote_currency: Some(QuoteCurrency::Eur),
		no_spam: Some(true),
	};
	let data = client(&server)
		.get_token_balances_for_wallet_address(&params)
		.await
		.unwrap();

	assert_eq!(data, json!({"items": []}));
	mock.assert();
}

#[tokio::test]
async fn test_error_envelope() {
	let mut server = Server::new_async().await;
	let mock = server
		.mock("GET", Matcher::Any)
		.with_status(200)
		.with_body(r#"{"data":null,"error":true,"error_message":"Malformed address","error_code":400}"#)
		.create();

	let params = TokenBalancesParams {
		chain_name: "eth-mainnet".to_string(),
		wallet_address: "nope".to_string(),
		..Default::default()
	};
	match client(&server)
		.get_token_balances_for_wallet_address(&params)
		.await
	{
		Err(ClientError::UnexpectedResponse(ctx)) => {
			assert!(ctx.message.contains("Malformed address"))
		}
		other => panic!("expected an error envelope, got {:?}", other),
	}
	mock.assert();
}
