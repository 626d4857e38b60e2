use mockito::{Matcher, Server};
use serde_json::json;

use token_indexer_sdk::{
	models::{SecretString, SecretValue},
	services::clients::{ClientError, MoralisClient},
};

use crate::integration::mocks::test_fetch_config;

const WETH: &str = "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2";

fn client(server: &mockito::ServerGuard) -> MoralisClient {
	MoralisClient::new(
		test_fetch_config(&server.url(), 0)
			.with_api_key(SecretValue::Plain(SecretString::from("moralis-key"))),
	)
	.unwrap()
}

#[tokio::test]
async fn test_price_is_validated() {
	let mut server = Server::new_async().await;
	let mock = server
		.mock("GET", format!("/erc20/{}/price", WETH).as_str())
		.match_query(Matcher::UrlEncoded("chain".to_string(), "eth".to_string()))
		.match_header("X-API-Key", "moralis-key")
		.with_status(200)
		.with_body(
			json!({
				"tokenAddress": WETH,
				"tokenName": "Wrapped Ether",
				"tokenSymbol": "WETH",
				"usdPrice": "3120.55",
				"usdPriceFormatted": "3120.55",
				"24hrPercentChange": null,
				"exchangeName": "Uniswap v3"
			})
			.to_string(),
		)
		.create();

	let price = client(&server)
		.get_erc20_token_price(WETH, "eth")
		.await
		.unwrap();

	assert_eq!(price.token_address, WETH);
	assert_eq!(price.usd_price, 3120.55);
	assert!(price.percent_change_24h.is_none());
	assert_eq!(price.usd_price_24hr_percent_change, 0.0);
	mock.assert();
}

#[tokio::test]
async fn test_not_found_mentions_liquidity() {
	let mut server = Server::new_async().await;
	let mock = server
		.mock("GET", Matcher::Any)
		.with_status(404)
		.with_body(r#"{"message":"No pools found"}"#)
		.expect(1)
		.create();

	match client(&server).get_erc20_token_price(WETH, "bsc").await {
		Err(ClientError::NotFound(ctx)) => {
			assert!(ctx.message.contains("No liquidity pools found"));
			assert!(ctx.message.contains("bsc"));
		}
		other => panic!("expected NotFound, got {:?}", other),
	}
	mock.assert();
}

#[tokio::test]
async fn test_unauthorized() {
	let mut server = Server::new_async().await;
	let mock = server
		.mock("GET", Matcher::Any)
		.with_status(401)
		.create();

	assert!(matches!(
		client(&server).get_erc20_token_price(WETH, "eth").await,
		Err(ClientError::Unauthorized(_))
	));
	mock.assert();
}
