//! Secret values for API keys.
//!
//! Keys are configured either inline (`Plain`) or as the name of an environment variable
//! (`Environment`). Both are zeroized on drop, and resolution happens once when a client is
//! constructed.

use serde::{Deserialize, Serialize};
use std::{env, fmt};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{
	impl_case_insensitive_enum,
	models::security::error::{SecurityError, SecurityResult},
};

/// Where an API key comes from.
///
/// Deserializes from `{"type": "plain", "value": "..."}` or
/// `{"type": "environment", "value": "VAR_NAME"}`; the `type` tag is case-insensitive.
#[derive(Debug, Clone, Serialize, ZeroizeOnDrop)]
#[serde(tag = "type", content = "value")]
pub enum SecretValue {
	/// The key itself
	Plain(SecretString),
	/// Name of the environment variable holding the key
	Environment(String),
}

impl_case_insensitive_enum!(SecretValue, {
	"plain" => Plain,
	"environment" => Environment,
});

impl PartialEq for SecretValue {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Self::Plain(l0), Self::Plain(r0)) => l0.as_str() == r0.as_str(),
			(Self::Environment(l0), Self::Environment(r0)) => l0 == r0,
			_ => false,
		}
	}
}

/// A string that is zeroized when dropped.
#[derive(Clone, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct SecretString(String);

impl PartialEq for SecretString {
	fn eq(&self, other: &Self) -> bool {
		self.0 == other.0
	}
}

impl fmt::Debug for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("SecretString(***)")
	}
}

impl SecretValue {
	/// Resolves the key from its source.
	///
	/// Blank keys are rejected, so a client never sends an empty auth header.
	pub fn resolve(&self) -> SecurityResult<SecretString> {
		let resolved = match self {
			SecretValue::Plain(secret) => secret.clone(),
			SecretValue::Environment(env_var) => {
				env::var(env_var).map(SecretString::new).map_err(|e| {
					Box::new(SecurityError::parse_error(
						format!("Failed to get environment variable {}", env_var),
						Some(e.into()),
						None,
					))
				})?
			}
		};

		if resolved.as_str().trim().is_empty() {
			return Err(Box::new(SecurityError::validation_error(
				"Secret value is empty",
				None,
				None,
			)));
		}

		Ok(resolved)
	}

	/// Checks if the configured value is empty
	pub fn is_empty(&self) -> bool {
		match self {
			SecretValue::Plain(secret) => secret.as_str().trim().is_empty(),
			SecretValue::Environment(env_var) => env_var.trim().is_empty(),
		}
	}
}

impl Zeroize for SecretValue {
	fn zeroize(&mut self) {
		match self {
			SecretValue::Plain(secret) => secret.zeroize(),
			SecretValue::Environment(env_var) => env_var.clear(),
		}
	}
}

impl SecretString {
	pub fn new(value: String) -> Self {
		Self(value)
	}

	/// Exposes the secret. Use the reference immediately and do not store it.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl From<String> for SecretString {
	fn from(value: String) -> Self {
		Self::new(value)
	}
}

impl From<&str> for SecretString {
	fn from(value: &str) -> Self {
		Self::new(value.to_string())
	}
}

impl AsRef<str> for SecretString {
	fn as_ref(&self) -> &str {
		self.as_str()
	}
}
