//! Request tokens issued by the first leg and the verifier-bearing form used by the third.

// self
use crate::{_prelude::*, auth::TokenSecret};

/// Temporary credential issued by the provider's request-token endpoint.
///
/// The value travels to the provider's authorization page; the secret only ever signs the
/// access-token call and never leaves this crate.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestToken {
	/// Token identifier sent back to the provider (`oauth_token`).
	pub value: String,
	/// Signing secret paired with the token (`oauth_token_secret`).
	pub secret: TokenSecret,
}
impl RequestToken {
	/// Creates a request token from its value and secret.
	pub fn new(value: impl Into<String>, secret: impl Into<String>) -> Self {
		Self { value: value.into(), secret: TokenSecret::new(secret) }
	}

	/// Pairs the token with the verifier returned on the provider callback.
	pub fn authorize(self, verifier: impl Into<String>) -> AuthorizedRequestToken {
		AuthorizedRequestToken { token: self, verifier: verifier.into() }
	}
}
impl Debug for RequestToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RequestToken")
			.field("value", &self.value)
			.field("secret", &self.secret)
			.finish()
	}
}

/// Request token that the user authorized, ready for the access-token exchange.
#[derive(Clone)]
pub struct AuthorizedRequestToken {
	/// Request token consumed from the session.
	pub token: RequestToken,
	/// Verifier proving the user approved the token (`oauth_verifier`).
	pub verifier: String,
}
impl AuthorizedRequestToken {
	/// Token identifier (`oauth_token`).
	pub fn value(&self) -> &str {
		&self.token.value
	}

	/// Signing secret for the exchange call.
	pub fn secret(&self) -> &TokenSecret {
		&self.token.secret
	}
}
impl Debug for AuthorizedRequestToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthorizedRequestToken")
			.field("token", &self.token)
			.field("verifier", &"<redacted>")
			.finish()
	}
}
