//! Provider descriptor data structures shared by clients and flows.
//!
//! The module exposes validated metadata, a builder, and protocol-edition helpers so
//! providers can describe their handshake endpoints in a transport-agnostic way.

/// Builder API for assembling provider descriptors.
pub mod builder;
/// Provider-specific quirk toggles.
pub mod quirks;
/// OAuth 1 protocol editions.
pub mod version;

pub use builder::*;
pub use quirks::*;
pub use version::*;

// self
use crate::{_prelude::*, auth::ProviderId, error::ConfigError};

/// Endpoint set declared by a provider descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderEndpoints {
	/// Endpoint issuing temporary request tokens (first leg).
	pub request_token: Url,
	/// Page where the user approves the request token (second leg).
	pub authorization: Url,
	/// Optional sign-in page that skips re-approval for returning users.
	#[serde(default)]
	pub authenticate: Option<Url>,
	/// Endpoint exchanging an authorized request token for an access token (third leg).
	pub access_token: Url,
}

/// Immutable provider descriptor consumed by clients and flows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderDescriptor {
	/// Descriptor identifier.
	pub id: ProviderId,
	/// Endpoint definitions exposed by the provider.
	pub endpoints: ProviderEndpoints,
	/// Protocol edition spoken by the provider.
	#[serde(default)]
	pub version: OAuth1Version,
	/// Provider-specific quirks.
	#[serde(default)]
	pub quirks: ProviderQuirks,
}
impl ProviderDescriptor {
	/// Creates a new builder for the provided identifier.
	pub fn builder(id: ProviderId) -> ProviderDescriptorBuilder {
		ProviderDescriptorBuilder::new(id)
	}

	/// Decodes and validates a descriptor from JSON configuration.
	pub fn from_json_str(json: &str) -> Result<Self> {
		let de = &mut serde_json::Deserializer::from_str(json);
		let descriptor: Self = serde_path_to_error::deserialize(de).map_err(ConfigError::from)?;

		descriptor.validate().map_err(ConfigError::from)?;

		Ok(descriptor)
	}

	/// Sign-in endpoint, falling back to the authorization endpoint.
	pub fn authenticate_endpoint(&self) -> &Url {
		self.endpoints.authenticate.as_ref().unwrap_or(&self.endpoints.authorization)
	}
}
