// self
use crate::{
	_prelude::*,
	auth::ProviderId,
	provider::{OAuth1Version, ProviderDescriptor, ProviderEndpoints, ProviderQuirks},
};

/// Errors raised while constructing or validating descriptors.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum ProviderDescriptorError {
	/// Request-token endpoint is mandatory for the first leg.
	#[error("Missing request token endpoint.")]
	MissingRequestTokenEndpoint,
	/// Authorization endpoint is mandatory for the user redirect.
	#[error("Missing authorization endpoint.")]
	MissingAuthorizationEndpoint,
	/// Access-token endpoint is mandatory for the exchange.
	#[error("Missing access token endpoint.")]
	MissingAccessTokenEndpoint,
	/// Endpoints must use HTTPS.
	#[error("The {endpoint} endpoint must use HTTPS: {url}.")]
	InsecureEndpoint {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// Callback confirmation only exists in OAuth 1.0a.
	#[error("The `require_callback_confirmed` quirk requires OAuth 1.0a.")]
	CallbackConfirmationWithoutRevisionA,
}

/// Builder for [`ProviderDescriptor`] values.
#[derive(Debug)]
pub struct ProviderDescriptorBuilder {
	/// Identifier for the descriptor being constructed.
	pub id: ProviderId,
	/// Request-token endpoint.
	pub request_token_endpoint: Option<Url>,
	/// Authorization endpoint.
	pub authorization_endpoint: Option<Url>,
	/// Optional sign-in endpoint.
	pub authenticate_endpoint: Option<Url>,
	/// Access-token endpoint.
	pub access_token_endpoint: Option<Url>,
	/// Protocol edition spoken by the provider.
	pub version: OAuth1Version,
	/// Provider-specific quirks.
	pub quirks: ProviderQuirks,
}
impl ProviderDescriptorBuilder {
	/// Creates a new builder seeded with the provided identifier.
	pub fn new(id: ProviderId) -> Self {
		Self {
			id,
			request_token_endpoint: None,
			authorization_endpoint: None,
			authenticate_endpoint: None,
			access_token_endpoint: None,
			version: OAuth1Version::default(),
			quirks: ProviderQuirks::default(),
		}
	}

	/// Sets the request-token endpoint.
	pub fn request_token_endpoint(mut self, url: Url) -> Self {
		self.request_token_endpoint = Some(url);

		self
	}

	/// Sets the authorization endpoint.
	pub fn authorization_endpoint(mut self, url: Url) -> Self {
		self.authorization_endpoint = Some(url);

		self
	}

	/// Sets the optional sign-in endpoint.
	pub fn authenticate_endpoint(mut self, url: Url) -> Self {
		self.authenticate_endpoint = Some(url);

		self
	}

	/// Sets the access-token endpoint.
	pub fn access_token_endpoint(mut self, url: Url) -> Self {
		self.access_token_endpoint = Some(url);

		self
	}

	/// Overrides the protocol edition (defaults to 1.0a).
	pub fn version(mut self, version: OAuth1Version) -> Self {
		self.version = version;

		self
	}

	/// Overrides the provider quirks.
	pub fn quirks(mut self, quirks: ProviderQuirks) -> Self {
		self.quirks = quirks;

		self
	}

	/// Consumes the builder and validates the resulting descriptor.
	pub fn build(self) -> Result<ProviderDescriptor, ProviderDescriptorError> {
		let request_token = self
			.request_token_endpoint
			.ok_or(ProviderDescriptorError::MissingRequestTokenEndpoint)?;
		let authorization = self
			.authorization_endpoint
			.ok_or(ProviderDescriptorError::MissingAuthorizationEndpoint)?;
		let access_token =
			self.access_token_endpoint.ok_or(ProviderDescriptorError::MissingAccessTokenEndpoint)?;
		let endpoints = ProviderEndpoints {
			request_token,
			authorization,
			authenticate: self.authenticate_endpoint,
			access_token,
		};
		let descriptor = ProviderDescriptor {
			id: self.id,
			endpoints,
			version: self.version,
			quirks: self.quirks,
		};

		descriptor.validate()?;

		Ok(descriptor)
	}
}

impl ProviderDescriptor {
	/// Validates invariants for the descriptor.
	pub(crate) fn validate(&self) -> Result<(), ProviderDescriptorError> {
		if self.quirks.require_callback_confirmed && !self.version.uses_verifier() {
			return Err(ProviderDescriptorError::CallbackConfirmationWithoutRevisionA);
		}

		validate_endpoint("request_token", &self.endpoints.request_token)?;
		validate_endpoint("authorization", &self.endpoints.authorization)?;

		if let Some(authenticate) = self.endpoints.authenticate.as_ref() {
			validate_endpoint("authenticate", authenticate)?;
		}

		validate_endpoint("access_token", &self.endpoints.access_token)?;

		Ok(())
	}
}

fn validate_endpoint(name: &'static str, url: &Url) -> Result<(), ProviderDescriptorError> {
	if url.scheme() != "https" {
		Err(ProviderDescriptorError::InsecureEndpoint { endpoint: name, url: url.to_string() })
	} else {
		Ok(())
	}
}
