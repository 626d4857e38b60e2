use reqwest::Method;
use serde_json::Value;
use std::{collections::HashMap, time::Duration};

/// One HTTP request, independent of how many attempts it takes.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
	pub url: String,
	pub method: Method,
	pub headers: HashMap<String, String>,
	pub body: Option<String>,
}

impl FetchRequest {
	pub fn new(method: Method, url: impl Into<String>) -> Self {
		Self {
			url: url.into(),
			method,
			headers: HashMap::new(),
			body: None,
		}
	}

	pub fn get(url: impl Into<String>) -> Self {
		Self::new(Method::GET, url)
	}

	/// POST with a JSON body and matching `Content-Type`.
	pub fn post_json(url: impl Into<String>, body: &Value) -> Self {
		Self::new(Method::POST, url)
			.with_header("Content-Type", "application/json")
			.with_body(body.to_string())
	}

	pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.insert(name.into(), value.into());
		self
	}

	/// Adds headers that are not already set on the request.
	pub fn with_default_headers(mut self, headers: &HashMap<String, String>) -> Self {
		for (name, value) in headers {
			if !self
				.headers
				.keys()
				.any(|existing| existing.eq_ignore_ascii_case(name))
			{
				self.headers.insert(name.clone(), value.clone());
			}
		}
		self
	}

	pub fn with_body(mut self, body: impl Into<String>) -> Self {
		self.body = Some(body.into());
		self
	}
}

/// Body of a successful response.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
	/// The body parsed as JSON
	Json(Value),
	/// The raw body, when it is not valid JSON
	Text(String),
}

impl ResponseBody {
	/// Parses `raw` as JSON, keeping it as text when that fails.
	pub fn from_text(raw: String) -> Self {
		match serde_json::from_str::<Value>(&raw) {
			Ok(value) => Self::Json(value),
			Err(_) => Self::Text(raw),
		}
	}

	pub fn as_json(&self) -> Option<&Value> {
		match self {
			Self::Json(value) => Some(value),
			Self::Text(_) => None,
		}
	}

	pub fn into_json(self) -> Option<Value> {
		match self {
			Self::Json(value) => Some(value),
			Self::Text(_) => None,
		}
	}
}

/// Position of an attempt within one fetch, for logging and scheduling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestAttempt {
	/// 0-based attempt number
	pub index: u32,
	/// Wait that preceded this attempt
	pub delay_before: Duration,
}

impl RequestAttempt {
	pub fn first() -> Self {
		Self {
			index: 0,
			delay_before: Duration::ZERO,
		}
	}

	pub fn next(self, delay: Duration) -> Self {
		Self {
			index: self.index + 1,
			delay_before: delay,
		}
	}
}
