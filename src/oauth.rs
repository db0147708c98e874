//! HTTP-backed OAuth 1.0/1.0a client implementing [`ProviderOperations`].

pub mod signature;

pub use oauth2;
pub use signature::{OAuthParameters, percent_encode};

// crates.io
use oauth2::{
	AsyncHttpClient, HttpClientError, HttpRequest,
	http::{
		Method,
		header::{AUTHORIZATION, CONTENT_TYPE},
	},
};
use url::form_urlencoded;
// self
use crate::{
	_prelude::*,
	auth::{AccessCredential, AuthorizedRequestToken, ProviderId, RequestToken, TokenSecret},
	error::{ConfigError, TransientError},
	http::{ProviderHttpClient, ResponseMetadata, ResponseMetadataSlot},
	provider::{
		AuthorizationParameters, OAuth1Version, ProviderCall, ProviderDescriptor,
		ProviderErrorContext, ProviderErrorKind, ProviderFuture, ProviderOperations,
		ProviderStrategy,
	},
};
#[cfg(feature = "reqwest")]
use crate::{error::TransportError, http::ReqwestHttpClient, provider::DefaultProviderStrategy};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Maps HTTP transport failures into crate [`Error`] values.
pub trait TransportErrorMapper<E>
where
	Self: 'static + Send + Sync,
	E: 'static + Send + Sync + StdError,
{
	/// Converts an [`HttpClientError`] emitted by the transport into a crate error.
	fn map_transport_error(
		&self,
		call: ProviderCall,
		metadata: Option<&ResponseMetadata>,
		error: HttpClientError<E>,
	) -> Error;
}

/// Default mapper for reqwest-backed transports.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransportErrorMapper;
#[cfg(feature = "reqwest")]
impl TransportErrorMapper<ReqwestError> for ReqwestTransportErrorMapper {
	fn map_transport_error(
		&self,
		call: ProviderCall,
		meta: Option<&ResponseMetadata>,
		err: HttpClientError<ReqwestError>,
	) -> Error {
		match err {
			HttpClientError::Reqwest(inner) => map_reqwest_error(call, meta, *inner),
			HttpClientError::Http(inner) => ConfigError::from(inner).into(),
			HttpClientError::Io(inner) => TransportError::Io(inner).into(),
			HttpClientError::Other(message) => map_generic_transport_error(call, meta, message),
			_ => map_generic_transport_error(call, meta, "unknown transport failure"),
		}
	}
}

#[cfg(feature = "reqwest")]
/// OAuth 1 client specialized for the crate's default reqwest transport stack.
pub type ReqwestOAuth1Client = OAuth1Client<ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// Signs and dispatches the request-token and access-token calls for one provider.
///
/// The client owns the consumer credentials, the provider descriptor, and the transport so
/// flows only see [`ProviderOperations`]. Every call is a signed form `POST`; responses are
/// parsed as `application/x-www-form-urlencoded`.
pub struct OAuth1Client<C, M>
where
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Provider descriptor that defines endpoints and quirks.
	pub descriptor: ProviderDescriptor,
	/// Consumer key registered with the provider.
	pub consumer_key: String,
	/// Strategy classifying failed provider responses.
	pub strategy: Arc<dyn ProviderStrategy>,
	/// HTTP client wrapper used for every provider call.
	pub http_client: Arc<C>,
	/// Mapper applied to transport-layer errors before surfacing them to callers.
	pub transport_mapper: Arc<M>,
	consumer_secret: TokenSecret,
}
impl<C, M> OAuth1Client<C, M>
where
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates a client that reuses the caller-provided transport + mapper pair.
	pub fn with_http_client(
		descriptor: ProviderDescriptor,
		consumer_key: impl Into<String>,
		consumer_secret: impl Into<String>,
		strategy: Arc<dyn ProviderStrategy>,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
	) -> Self {
		Self {
			descriptor,
			consumer_key: consumer_key.into(),
			strategy,
			http_client: http_client.into(),
			transport_mapper: mapper.into(),
			consumer_secret: TokenSecret::new(consumer_secret),
		}
	}

	/// Replaces the provider strategy.
	pub fn with_strategy(mut self, strategy: Arc<dyn ProviderStrategy>) -> Self {
		self.strategy = strategy;

		self
	}

	fn oauth_parameters(&self) -> OAuthParameters {
		OAuthParameters::new(&self.consumer_key, self.descriptor.quirks.signature_method)
	}

	async fn call_provider(
		&self,
		call: ProviderCall,
		url: &Url,
		oauth: OAuthParameters,
		token_secret: Option<&str>,
	) -> Result<ProviderResponse> {
		let mut extra = BTreeMap::new();

		self.strategy.augment_call(call, &mut extra);

		let form = extra.into_iter().collect::<Vec<_>>();
		let header =
			oauth.sign("POST", url, &form, self.consumer_secret.expose(), token_secret)?;
		let body = form_urlencoded::Serializer::new(String::new()).extend_pairs(form.iter()).finish();
		let request: HttpRequest = oauth2::http::Request::builder()
			.method(Method::POST)
			.uri(url.as_str())
			.header(AUTHORIZATION, header)
			.header(CONTENT_TYPE, FORM_CONTENT_TYPE)
			.body(body.into_bytes())
			.map_err(ConfigError::from)?;
		let meta = ResponseMetadataSlot::default();
		let handle = self.http_client.with_metadata(meta.clone());
		let response = handle.call(request).await.map_err(|err| {
			self.transport_mapper.map_transport_error(call, meta.take().as_ref(), err)
		})?;
		let status = response.status().as_u16();
		let body = String::from_utf8_lossy(response.body()).into_owned();

		if !response.status().is_success() {
			return Err(self.map_error_response(call, status, &body, meta.take()));
		}

		Ok(ProviderResponse { status, fields: parse_form(&body) })
	}

	fn map_error_response(
		&self,
		call: ProviderCall,
		status: u16,
		body: &str,
		meta: Option<ResponseMetadata>,
	) -> Error {
		let fields = parse_form(body);
		let mut ctx = ProviderErrorContext::new(call).with_http_status(status);

		if let Some(problem) = fields.get("oauth_problem") {
			ctx = ctx.with_oauth_problem(problem.as_str());
		}
		if let Some(advice) = fields.get("oauth_problem_advice") {
			ctx = ctx.with_problem_advice(advice.as_str());
		}
		if !body.trim().is_empty() {
			ctx = ctx.with_body_preview(body);
		}

		let reason = ctx.summary();

		match self.strategy.classify_error(&ctx) {
			ProviderErrorKind::TokenRejected => Error::TokenRejected { reason },
			ProviderErrorKind::InvalidConsumer => Error::InvalidConsumer { reason },
			ProviderErrorKind::Transient => TransientError::ProviderEndpoint {
				message: reason,
				status: Some(status),
				retry_after: meta.and_then(|value| value.retry_after),
			}
			.into(),
		}
	}
}
#[cfg(feature = "reqwest")]
impl OAuth1Client<ReqwestHttpClient, ReqwestTransportErrorMapper> {
	/// Creates a client for the descriptor and consumer credentials.
	///
	/// The client provisions its own reqwest-backed transport and the
	/// [`DefaultProviderStrategy`]; use [`OAuth1Client::with_strategy`] to swap the latter.
	pub fn new(
		descriptor: ProviderDescriptor,
		consumer_key: impl Into<String>,
		consumer_secret: impl Into<String>,
	) -> Self {
		Self::with_http_client(
			descriptor,
			consumer_key,
			consumer_secret,
			Arc::new(DefaultProviderStrategy),
			ReqwestHttpClient::default(),
			Arc::new(ReqwestTransportErrorMapper),
		)
	}
}
impl<C, M> ProviderOperations for OAuth1Client<C, M>
where
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn provider_id(&self) -> &ProviderId {
		&self.descriptor.id
	}

	fn version(&self) -> OAuth1Version {
		self.descriptor.version
	}

	fn fetch_request_token<'a>(
		&'a self,
		callback_url: &'a str,
	) -> ProviderFuture<'a, RequestToken> {
		Box::pin(async move {
			let mut oauth = self.oauth_parameters();

			if self.descriptor.version.uses_verifier() {
				oauth = oauth.with("oauth_callback", callback_url);
			}

			let response = self
				.call_provider(
					ProviderCall::RequestToken,
					&self.descriptor.endpoints.request_token,
					oauth,
					None,
				)
				.await?;
			let confirmed =
				response.fields.get("oauth_callback_confirmed").is_some_and(|value| value == "true");

			if self.descriptor.quirks.require_callback_confirmed && !confirmed {
				return Err(Error::TokenRejected {
					reason: "Provider did not confirm the callback URL".into(),
				});
			}

			let value = response.required("oauth_token")?;
			let secret = response.required("oauth_token_secret")?;

			Ok(RequestToken::new(value, secret))
		})
	}

	fn build_authorization_url(
		&self,
		token_value: &str,
		parameters: &AuthorizationParameters,
	) -> Url {
		build_redirect_url(&self.descriptor.endpoints.authorization, token_value, parameters)
	}

	fn build_authenticate_url(
		&self,
		token_value: &str,
		parameters: &AuthorizationParameters,
	) -> Url {
		build_redirect_url(self.descriptor.authenticate_endpoint(), token_value, parameters)
	}

	fn exchange_for_access_token(
		&self,
		token: AuthorizedRequestToken,
	) -> ProviderFuture<'_, AccessCredential> {
		Box::pin(async move {
			let mut oauth = self.oauth_parameters().with("oauth_token", token.value());

			if self.descriptor.version.uses_verifier() {
				oauth = oauth.with("oauth_verifier", token.verifier.as_str());
			}

			let mut response = self
				.call_provider(
					ProviderCall::AccessToken,
					&self.descriptor.endpoints.access_token,
					oauth,
					Some(token.secret().expose()),
				)
				.await?;
			let value = response.required("oauth_token")?;
			let secret = response.required("oauth_token_secret")?;

			response.fields.remove("oauth_token");
			response.fields.remove("oauth_token_secret");

			let mut credential = AccessCredential::with_secret(value, secret);

			credential.extra = response.fields;

			Ok(credential)
		})
	}
}
impl<C, M> Debug for OAuth1Client<C, M>
where
	C: ?Sized + ProviderHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("OAuth1Client")
			.field("descriptor", &self.descriptor)
			.field("consumer_key", &self.consumer_key)
			.field("consumer_secret", &self.consumer_secret)
			.finish()
	}
}

struct ProviderResponse {
	status: u16,
	fields: BTreeMap<String, String>,
}
impl ProviderResponse {
	fn required(&self, field: &'static str) -> Result<String> {
		self.fields
			.get(field)
			.filter(|value| !value.is_empty())
			.cloned()
			.ok_or_else(|| TransientError::MalformedResponse { field, status: Some(self.status) }.into())
	}
}

fn parse_form(body: &str) -> BTreeMap<String, String> {
	form_urlencoded::parse(body.trim().as_bytes()).into_owned().collect()
}

fn build_redirect_url(endpoint: &Url, token_value: &str, parameters: &AuthorizationParameters) -> Url {
	let mut url = endpoint.clone();
	let mut pairs = url.query_pairs_mut();

	pairs.append_pair("oauth_token", token_value);

	if let Some(callback_url) = parameters.callback_url.as_deref() {
		pairs.append_pair("oauth_callback", callback_url);
	}
	for (key, value) in &parameters.extra {
		pairs.append_pair(key, value);
	}

	drop(pairs);

	url
}

#[cfg(feature = "reqwest")]
fn map_reqwest_error(call: ProviderCall, meta: Option<&ResponseMetadata>, err: ReqwestError) -> Error {
	if err.is_builder() {
		return ConfigError::from(err).into();
	}
	if err.is_timeout() {
		return TransientError::ProviderEndpoint {
			message: format!("Request timed out during the {call} call"),
			status: meta.and_then(|value| value.status).or_else(|| err.status().map(|code| code.as_u16())),
			retry_after: meta.and_then(|value| value.retry_after),
		}
		.into();
	}

	TransportError::from(err).into()
}

#[cfg(feature = "reqwest")]
fn map_generic_transport_error(
	call: ProviderCall,
	meta: Option<&ResponseMetadata>,
	message: impl Display,
) -> Error {
	TransientError::ProviderEndpoint {
		message: format!("HTTP client error during the {call} call: {message}"),
		status: meta.and_then(|value| value.status),
		retry_after: meta.and_then(|value| value.retry_after),
	}
	.into()
}
