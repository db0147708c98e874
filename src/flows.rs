//! Three-legged exchange flow driven by one inbound request at a time.
//!
//! [`ExchangeFlow::obtain_or_continue`] looks at the inbound request: without a verifier it
//! fetches a request token, parks it in the session, and returns
//! [`ExchangeOutcome::Suspend`] with the provider URL the user must visit. When the provider
//! sends the user back with a verifier it consumes the parked token, exchanges it, and returns
//! [`ExchangeOutcome::Completed`].

pub mod callback;
pub mod return_to;

pub use callback::*;
pub use return_to::*;

// self
use crate::{
	_prelude::*,
	error::ConfigError,
	obs::{self, FlowOutcome, FlowPhase, FlowSpan},
	provider::{AuthorizationParameters, ConnectionData, ProviderOperations},
	store::{REQUEST_TOKEN_KEY, SessionStore},
};

/// Result of one [`ExchangeFlow::obtain_or_continue`] call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExchangeOutcome {
	/// The handshake is paused; redirect the user agent to this URL.
	Suspend(Url),
	/// The handshake finished with the authenticated identity.
	Completed(ConnectionData),
}
impl ExchangeOutcome {
	/// Redirect target when the flow suspended.
	pub fn redirect_url(&self) -> Option<&Url> {
		match self {
			Self::Suspend(url) => Some(url),
			Self::Completed(_) => None,
		}
	}

	/// Identity when the flow completed.
	pub fn into_connection(self) -> Option<ConnectionData> {
		match self {
			Self::Suspend(_) => None,
			Self::Completed(data) => Some(data),
		}
	}
}

/// Orchestrates the request-token, redirect, and access-token legs against one provider.
///
/// The flow holds only immutable configuration; per-user state lives in the
/// [`SessionStore`] passed to each call.
#[derive(Clone)]
pub struct ExchangeFlow {
	operations: Arc<dyn ProviderOperations>,
	return_parameters: ReturnParameters,
	verifier_parameter: String,
	use_authenticate_endpoint: bool,
}
impl ExchangeFlow {
	/// Query parameter carrying the provider's verifier on the callback.
	pub const DEFAULT_VERIFIER_PARAMETER: &'static str = "oauth_verifier";

	/// Starts building a flow.
	pub fn builder() -> ExchangeFlowBuilder {
		ExchangeFlowBuilder::default()
	}

	/// Provider operations used by the flow.
	pub fn operations(&self) -> &Arc<dyn ProviderOperations> {
		&self.operations
	}

	/// Parameter names echoed onto the callback URL.
	pub fn return_parameters(&self) -> &ReturnParameters {
		&self.return_parameters
	}

	/// Name of the verifier parameter read from callbacks.
	pub fn verifier_parameter(&self) -> &str {
		&self.verifier_parameter
	}

	/// Renders the callback URL registered with the provider for `request`.
	pub fn build_return_to_url(&self, request: &CallbackRequest) -> String {
		self.return_parameters.build_return_to_url(request)
	}

	/// Runs whichever handshake leg `request` calls for.
	///
	/// A verifier parameter with visible text selects the exchange leg; anything else,
	/// including a blank verifier, starts a new authorization. Neither leg retries.
	pub async fn obtain_or_continue(
		&self,
		request: &CallbackRequest,
		store: &dyn SessionStore,
	) -> Result<ExchangeOutcome> {
		match request.parameter(&self.verifier_parameter).filter(|value| !value.trim().is_empty()) {
			Some(verifier) =>
				self.complete_exchange(verifier, store).await.map(ExchangeOutcome::Completed),
			None => self.begin_authorization(request, store).await.map(ExchangeOutcome::Suspend),
		}
	}

	async fn begin_authorization(
		&self,
		request: &CallbackRequest,
		store: &dyn SessionStore,
	) -> Result<Url> {
		const PHASE: FlowPhase = FlowPhase::Authorize;

		let span = FlowSpan::new(PHASE, "begin_authorization");

		obs::record_flow_outcome(PHASE, FlowOutcome::Attempt);

		let result: Result<Url> = span
			.instrument(async {
				span.event("requesting a new request token; any parked token is replaced");

				let callback_url = self.build_return_to_url(request);
				let token = self.operations.fetch_request_token(&callback_url).await?;
				let token_value = token.value.clone();

				store.put(REQUEST_TOKEN_KEY, token).await?;

				let parameters = if self.operations.version().callback_on_authorization() {
					AuthorizationParameters::with_callback_url(callback_url)
				} else {
					AuthorizationParameters::none()
				};

				Ok(if self.use_authenticate_endpoint {
					self.operations.build_authenticate_url(&token_value, &parameters)
				} else {
					self.operations.build_authorization_url(&token_value, &parameters)
				})
			})
			.await;

		match &result {
			Ok(_) => obs::record_flow_outcome(PHASE, FlowOutcome::Suspended),
			Err(_) => obs::record_flow_outcome(PHASE, FlowOutcome::Failure),
		}

		result
	}

	async fn complete_exchange(
		&self,
		verifier: &str,
		store: &dyn SessionStore,
	) -> Result<ConnectionData> {
		const PHASE: FlowPhase = FlowPhase::Exchange;

		let span = FlowSpan::new(PHASE, "complete_exchange");

		obs::record_flow_outcome(PHASE, FlowOutcome::Attempt);

		let result: Result<ConnectionData> = span
			.instrument(async {
				// Cleared before the remote call so a failed exchange cannot be replayed.
				let token = store
					.take_and_clear(REQUEST_TOKEN_KEY)
					.await?
					.ok_or(Error::MissingSessionToken)?;
				let credential =
					self.operations.exchange_for_access_token(token.authorize(verifier)).await?;

				self.operations.create_identity(credential).await
			})
			.await;

		match &result {
			Ok(_) => obs::record_flow_outcome(PHASE, FlowOutcome::Success),
			Err(_) => obs::record_flow_outcome(PHASE, FlowOutcome::Failure),
		}

		result
	}
}
impl Debug for ExchangeFlow {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ExchangeFlow")
			.field("provider_id", self.operations.provider_id())
			.field("version", &self.operations.version())
			.field("return_parameters", &self.return_parameters)
			.field("verifier_parameter", &self.verifier_parameter)
			.field("use_authenticate_endpoint", &self.use_authenticate_endpoint)
			.finish()
	}
}

/// Builder for [`ExchangeFlow`]; collaborators are validated by [`Self::build`].
#[derive(Default)]
pub struct ExchangeFlowBuilder {
	operations: Option<Arc<dyn ProviderOperations>>,
	return_parameters: Vec<String>,
	verifier_parameter: Option<String>,
	use_authenticate_endpoint: bool,
}
impl ExchangeFlowBuilder {
	/// Sets the provider operations (required).
	pub fn operations(mut self, operations: Arc<dyn ProviderOperations>) -> Self {
		self.operations = Some(operations);

		self
	}

	/// Adds one inbound parameter name to echo onto the callback URL.
	pub fn return_to_url_parameter(mut self, name: impl Into<String>) -> Self {
		self.return_parameters.push(name.into());

		self
	}

	/// Adds several inbound parameter names to echo onto the callback URL.
	pub fn return_to_url_parameters<I, S>(mut self, names: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.return_parameters.extend(names.into_iter().map(Into::into));

		self
	}

	/// Overrides the verifier parameter name (defaults to `oauth_verifier`).
	pub fn verifier_parameter(mut self, name: impl Into<String>) -> Self {
		self.verifier_parameter = Some(name.into());

		self
	}

	/// Sends users to the provider's sign-in endpoint instead of its authorize endpoint.
	///
	/// Defaults to `false`. "Sign in with" flows should enable it so returning users who
	/// already approved the consumer skip the consent page.
	pub fn use_authenticate_endpoint(mut self, enabled: bool) -> Self {
		self.use_authenticate_endpoint = enabled;

		self
	}

	/// Validates the configuration and builds the flow.
	pub fn build(self) -> Result<ExchangeFlow, ConfigError> {
		let operations = self.operations.ok_or(ConfigError::MissingProviderOperations)?;
		let return_parameters = ReturnParameters::new(self.return_parameters)?;
		let verifier_parameter = self
			.verifier_parameter
			.unwrap_or_else(|| ExchangeFlow::DEFAULT_VERIFIER_PARAMETER.to_owned());

		if verifier_parameter.trim().is_empty() {
			return Err(ConfigError::EmptyParameterName);
		}

		Ok(ExchangeFlow {
			operations,
			return_parameters,
			verifier_parameter,
			use_authenticate_endpoint: self.use_authenticate_endpoint,
		})
	}
}
impl Debug for ExchangeFlowBuilder {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ExchangeFlowBuilder")
			.field("operations_set", &self.operations.is_some())
			.field("return_parameters", &self.return_parameters)
			.field("verifier_parameter", &self.verifier_parameter)
			.field("use_authenticate_endpoint", &self.use_authenticate_endpoint)
			.finish()
	}
}
