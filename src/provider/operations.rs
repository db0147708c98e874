//! Capability interface implemented per provider family.
//!
//! [`ProviderOperations`] covers the three remote/local steps of the three-legged handshake
//! plus the construction of the caller-facing identity. The exchange flow is written once
//! against this trait; [`crate::oauth::OAuth1Client`] is the HTTP-backed implementation and
//! tests substitute in-memory doubles.

// self
use crate::{
	_prelude::*,
	auth::{
		AccessCredential, AuthorizedRequestToken, ProviderId, ProviderUserId, RequestToken,
		TokenSecret,
	},
	provider::OAuth1Version,
};

/// Boxed future returned by [`ProviderOperations`] remote calls.
pub type ProviderFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + 'a + Send>>;

/// Remote and local operations needed to drive a three-legged handshake.
pub trait ProviderOperations
where
	Self: Send + Sync,
{
	/// Identifier of the provider these operations talk to.
	fn provider_id(&self) -> &ProviderId;

	/// Protocol edition spoken by the provider.
	fn version(&self) -> OAuth1Version;

	/// Obtains a temporary request token, registering `callback_url` where the edition
	/// allows it.
	fn fetch_request_token<'a>(&'a self, callback_url: &'a str)
	-> ProviderFuture<'a, RequestToken>;

	/// Builds the URL the user's browser is redirected to for approval. Performs no I/O.
	fn build_authorization_url(
		&self,
		token_value: &str,
		parameters: &AuthorizationParameters,
	) -> Url;

	/// Builds the sign-in URL for returning users; defaults to the authorization URL.
	fn build_authenticate_url(
		&self,
		token_value: &str,
		parameters: &AuthorizationParameters,
	) -> Url {
		self.build_authorization_url(token_value, parameters)
	}

	/// Exchanges an authorized request token for an access credential.
	fn exchange_for_access_token(
		&self,
		token: AuthorizedRequestToken,
	) -> ProviderFuture<'_, AccessCredential>;

	/// Derives the caller-facing identity from a fresh credential.
	///
	/// The default implementation uses only data returned with the token (`user_id`,
	/// `screen_name`) and makes no API call. Providers that need a profile lookup override it.
	fn create_identity(&self, credential: AccessCredential) -> ProviderFuture<'_, ConnectionData> {
		let data = ConnectionData::from_credential(self.provider_id().clone(), credential);

		Box::pin(async move { Ok(data) })
	}
}

/// Extra parameters appended to the authorization redirect.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthorizationParameters {
	/// Callback URL for editions that carry it on the redirect.
	pub callback_url: Option<String>,
	/// Additional provider-specific query parameters (e.g. `force_login`).
	pub extra: Vec<(String, String)>,
}
impl AuthorizationParameters {
	/// Empty parameter set.
	pub fn none() -> Self {
		Self::default()
	}

	/// Parameter set carrying only the callback URL.
	pub fn with_callback_url(callback_url: impl Into<String>) -> Self {
		Self { callback_url: Some(callback_url.into()), extra: Vec::new() }
	}

	/// Appends a provider-specific query parameter.
	pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.extra.push((key.into(), value.into()));

		self
	}
}

/// Authenticated identity returned to the caller after a completed handshake.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionData {
	/// Provider that authenticated the user.
	pub provider_id: ProviderId,
	/// Provider-assigned account identifier, when known.
	pub provider_user_id: Option<ProviderUserId>,
	/// Display name reported by the provider, when known.
	pub display_name: Option<String>,
	/// Access token used for subsequent API calls.
	pub access_token: TokenSecret,
	/// Signing secret paired with the access token.
	pub secret: Option<TokenSecret>,
}
impl ConnectionData {
	const USER_ID_KEYS: [&'static str; 3] = ["user_id", "xoauth_yahoo_guid", "encoded_user_id"];
	const DISPLAY_NAME_KEYS: [&'static str; 2] = ["screen_name", "username"];

	/// Derives connection data from the credential's token and response parameters.
	pub fn from_credential(provider_id: ProviderId, credential: AccessCredential) -> Self {
		let provider_user_id = Self::USER_ID_KEYS
			.iter()
			.find_map(|key| credential.extra(key))
			.and_then(|value| ProviderUserId::new(value).ok());
		let display_name = Self::DISPLAY_NAME_KEYS
			.iter()
			.find_map(|key| credential.extra(key))
			.map(ToOwned::to_owned);

		Self {
			provider_id,
			provider_user_id,
			display_name,
			access_token: credential.value,
			secret: credential.secret,
		}
	}
}
