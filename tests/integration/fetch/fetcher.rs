use mockito::{Matcher, Server};
use reqwest::{Method, StatusCode};
use serde_json::json;
use std::{
	collections::HashMap,
	sync::Arc,
	time::{Duration, Instant},
};

use token_indexer_sdk::services::fetch::{
	FetchError, FetchRequest, Fetcher, RawResponse, ResponseBody, RetryPolicy, RetryingFetcher,
};

use crate::integration::mocks::{reqwest_fetcher, test_fetch_config, MockHttpTransport};

#[tokio::test]
async fn test_json_body_is_parsed() {
	let mut server = Server::new_async().await;
	let mock = server
		.mock("GET", "/tokens")
		.with_status(200)
		.with_header("content-type", "application/json")
		.with_body(r#"{"pairs":[]}"#)
		.expect(1)
		.create();

	let fetcher = reqwest_fetcher(&test_fetch_config(&server.url(), 2));
	let body = fetcher
		.fetch(FetchRequest::get(format!("{}/tokens", server.url())))
		.await
		.unwrap();

	assert_eq!(body, ResponseBody::Json(json!({"pairs": []})));
	mock.assert();
}

#[tokio::test]
async fn test_plain_text_body_is_kept() {
	let mut server = Server::new_async().await;
	let mock = server
		.mock("GET", "/health")
		.with_status(200)
		.with_body("ok")
		.create();

	let fetcher = reqwest_fetcher(&test_fetch_config(&server.url(), 0));
	let body = fetcher
		.fetch(FetchRequest::get(format!("{}/health", server.url())))
		.await
		.unwrap();

	assert_eq!(body, ResponseBody::Text("ok".to_string()));
	mock.assert();
}

#[tokio::test]
async fn test_not_found_is_attempted_once() {
	let mut server = Server::new_async().await;
	let mock = server
		.mock("GET", "/missing")
		.with_status(404)
		.with_body(r#"{"error":"not found"}"#)
		.expect(1)
		.create();

	let fetcher = reqwest_fetcher(&test_fetch_config(&server.url(), 3));
	let error = fetcher
		.fetch(FetchRequest::get(format!("{}/missing", server.url())))
		.await
		.unwrap_err();

	match &error {
		FetchError::PermanentHttp { status, body, .. } => {
			assert_eq!(*status, Some(StatusCode::NOT_FOUND));
			assert!(body.contains("not found"));
		}
		other => panic!("expected a permanent error, got {:?}", other),
	}
	assert!(!error.is_retryable());
	mock.assert();
}

#[tokio::test]
async fn test_server_errors_exhaust_retries() {
	let mut server = Server::new_async().await;
	let retries = 2;
	let mock = server
		.mock("GET", "/flaky")
		.with_status(500)
		.with_body("internal error")
		.expect(retries as usize + 1)
		.create();

	let fetcher = reqwest_fetcher(&test_fetch_config(&server.url(), retries));
	let error = fetcher
		.fetch(FetchRequest::get(format!("{}/flaky", server.url())))
		.await
		.unwrap_err();

	assert!(matches!(
		error,
		FetchError::TransientHttp {
			status: Some(StatusCode::INTERNAL_SERVER_ERROR),
			..
		}
	));
	assert!(error.to_string().contains("status 500"));
	mock.assert();
}

#[tokio::test]
async fn test_rate_limit_honours_retry_after() {
	let mut server = Server::new_async().await;
	let limited = server
		.mock("GET", "/limited")
		.with_status(429)
		.with_header("Retry-After", "1")
		.expect(1)
		.create();
	let ok = server
		.mock("GET", "/limited")
		.with_status(200)
		.with_body(r#"{"ok":true}"#)
		.expect(1)
		.create();

	let fetcher = reqwest_fetcher(&test_fetch_config(&server.url(), 1));
	let started = Instant::now();
	let body = fetcher
		.fetch(FetchRequest::get(format!("{}/limited", server.url())))
		.await
		.unwrap();

	assert!(started.elapsed() >= Duration::from_secs(1));
	assert_eq!(body.as_json(), Some(&json!({"ok": true})));
	limited.assert();
	ok.assert();
}

#[tokio::test]
async fn test_headers_and_body_are_sent() {
	let mut server = Server::new_async().await;
	let mock = server
		.mock("POST", "/graphql")
		.match_header("x-api-key", "secret")
		.match_header("content-type", "application/json")
		.match_body(Matcher::Json(json!({"query": "{ ping }"})))
		.with_status(200)
		.with_body(r#"{"data":{"ping":"pong"}}"#)
		.create();

	let fetcher = reqwest_fetcher(&test_fetch_config(&server.url(), 0));
	let headers = HashMap::from([
		("x-api-key".to_string(), "secret".to_string()),
		("content-type".to_string(), "application/json".to_string()),
	]);
	let body = fetcher
		.fetch_json(
			&format!("{}/graphql", server.url()),
			Method::POST,
			Some(headers),
			Some(r#"{"query":"{ ping }"}"#.to_string()),
		)
		.await
		.unwrap();

	assert_eq!(body.as_json().unwrap()["data"]["ping"], "pong");
	mock.assert();
}

#[tokio::test]
async fn test_unreachable_host_is_transient() {
	let fetcher = reqwest_fetcher(&test_fetch_config("http://127.0.0.1:1", 1));
	let error = fetcher
		.fetch(FetchRequest::get("http://127.0.0.1:1/never"))
		.await
		.unwrap_err();

	assert!(error.is_retryable());
	assert!(error.status().is_none());
}

#[tokio::test]
async fn test_transport_attempts_follow_policy() {
	let mut transport = MockHttpTransport::new();
	let mut sequence = mockall::Sequence::new();
	transport
		.expect_send()
		.times(2)
		.in_sequence(&mut sequence)
		.returning(|_| Ok(RawResponse::new(StatusCode::BAD_GATEWAY, "bad gateway")));
	transport
		.expect_send()
		.times(1)
		.in_sequence(&mut sequence)
		.returning(|_| Ok(RawResponse::new(StatusCode::OK, r#"[1,2,3]"#)));

	let fetcher = RetryingFetcher::new(
		Arc::new(transport),
		RetryPolicy::new(2, Duration::from_secs(1), Duration::from_millis(1)),
	);
	let body = fetcher
		.fetch(FetchRequest::get("https://api.test/values"))
		.await
		.unwrap();

	assert_eq!(body, ResponseBody::Json(json!([1, 2, 3])));
}
