//! Durable credential returned by the access-token exchange.

// self
use crate::{_prelude::*, auth::TokenSecret};

/// Access token (and, for OAuth 1 providers, its signing secret) issued after a
/// successful exchange.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessCredential {
	/// Access token value (`oauth_token`).
	pub value: TokenSecret,
	/// Signing secret paired with the token (`oauth_token_secret`).
	pub secret: Option<TokenSecret>,
	/// Additional response parameters (e.g. `user_id`, `screen_name`).
	#[serde(default)]
	pub extra: BTreeMap<String, String>,
}
impl AccessCredential {
	/// Creates a credential without a signing secret.
	pub fn bearer(value: impl Into<String>) -> Self {
		Self { value: TokenSecret::new(value), secret: None, extra: BTreeMap::new() }
	}

	/// Creates a credential with a signing secret.
	pub fn with_secret(value: impl Into<String>, secret: impl Into<String>) -> Self {
		Self {
			value: TokenSecret::new(value),
			secret: Some(TokenSecret::new(secret)),
			extra: BTreeMap::new(),
		}
	}

	/// Adds an extra response parameter.
	pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.extra.insert(key.into(), value.into());

		self
	}

	/// Looks up an extra response parameter.
	pub fn extra(&self, key: &str) -> Option<&str> {
		self.extra.get(key).map(String::as_str)
	}
}
