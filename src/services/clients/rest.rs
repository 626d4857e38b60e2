//! Shared plumbing for the REST and GraphQL clients.

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::{collections::HashMap, sync::Arc};
use url::Url;

use crate::{
	models::{FetchConfig, SecretString},
	services::{
		clients::ClientError,
		fetch::{create_fetcher, FetchRequest, Fetcher, ResponseBody},
	},
};

/// Percent-encodes one path segment.
pub fn encode_segment(segment: &str) -> String {
	urlencoding::encode(segment).into_owned()
}

/// Deserializes `value` into `T`, naming `what` in the error.
pub fn decode<T: DeserializeOwned>(value: Value, what: &str) -> Result<T, ClientError> {
	serde_json::from_value(value).map_err(|e| {
		ClientError::unexpected_response(
			format!("Failed to decode {}", what),
			Some(Box::new(e)),
			None,
		)
	})
}

/// Resolves the API key a client cannot work without.
pub fn required_api_key(config: &FetchConfig, client: &str) -> Result<SecretString, ClientError> {
	let Some(api_key) = config.api_key.as_ref() else {
		return Err(ClientError::configuration(
			format!("{} API key is required", client),
			None,
			None,
		));
	};
	Ok(api_key.resolve()?)
}

/// Builds the production fetcher for a client config.
pub fn default_fetcher(config: &FetchConfig) -> Result<Arc<dyn Fetcher>, ClientError> {
	create_fetcher(config).map_err(|e| {
		ClientError::configuration("Failed to create HTTP client", Some(e.into()), None)
	})
}

/// Base URL, static headers and the shared fetcher of one API client.
#[derive(Clone)]
pub struct RestClient {
	base_url: String,
	headers: HashMap<String, String>,
	fetcher: Arc<dyn Fetcher>,
}

impl RestClient {
	pub fn new(config: &FetchConfig, fetcher: Arc<dyn Fetcher>) -> Self {
		let mut headers = HashMap::from([("Accept".to_string(), "application/json".to_string())]);
		headers.extend(config.headers.iter().map(|(k, v)| (k.clone(), v.clone())));
		Self {
			base_url: config.base_url.clone(),
			headers,
			fetcher,
		}
	}

	/// Adds a header sent with every request
	pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.insert(name.into(), value.into());
		self
	}

	/// Same headers and fetcher against another host
	pub fn with_base_url(mut self, base_url: &str) -> Self {
		self.base_url = base_url.trim_end_matches('/').to_string();
		self
	}

	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	/// `path` appended to the base URL; `path` starts with `/`
	pub fn url(&self, path: &str) -> String {
		format!("{}{}", self.base_url, path)
	}

	/// Like [`RestClient::url`], with query parameters appended in order.
	pub fn url_with_query<K, V>(&self, path: &str, query: &[(K, V)]) -> Result<String, ClientError>
	where
		K: AsRef<str>,
		V: AsRef<str>,
	{
		let mut url = Url::parse(&self.url(path)).map_err(|e| {
			ClientError::invalid_argument(
				format!("Invalid request URL for path {}", path),
				Some(Box::new(e)),
				None,
			)
		})?;
		if !query.is_empty() {
			let mut pairs = url.query_pairs_mut();
			for (key, value) in query {
				pairs.append_pair(key.as_ref(), value.as_ref());
			}
		}
		Ok(url.into())
	}

	/// Sends `request` with the client's headers filled in.
	pub async fn send(&self, request: FetchRequest) -> Result<ResponseBody, ClientError> {
		let request = request.with_default_headers(&self.headers);
		Ok(self.fetcher.fetch(request).await?)
	}

	/// GETs `url` and requires a JSON body.
	pub async fn get_json(&self, url: &str) -> Result<Value, ClientError> {
		let body = self.send(FetchRequest::get(url)).await?;
		expect_json(body, url)
	}

	/// GETs `url` and deserializes the JSON body.
	pub async fn get_typed<T: DeserializeOwned>(&self, url: &str) -> Result<T, ClientError> {
		let value = self.get_json(url).await?;
		decode(value, url)
	}

	/// POSTs a JSON body to `url` and requires a JSON answer.
	pub async fn post_json(&self, url: &str, body: &Value) -> Result<Value, ClientError> {
		let response = self.send(FetchRequest::post_json(url, body)).await?;
		expect_json(response, url)
	}
}

fn expect_json(body: ResponseBody, url: &str) -> Result<Value, ClientError> {
	match body {
		ResponseBody::Json(value) => Ok(value),
		ResponseBody::Text(text) => Err(ClientError::unexpected_response(
			"Expected a JSON response",
			None,
			Some(HashMap::from([
				("url".to_string(), url.to_string()),
				("body_length".to_string(), text.len().to_string()),
			])),
		)),
	}
}
