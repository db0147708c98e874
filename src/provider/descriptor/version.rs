// self
use crate::_prelude::*;

/// OAuth 1 protocol editions that change where the callback URL travels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OAuth1Version {
	/// OAuth Core 1.0: the callback rides on the authorization redirect and no verifier is
	/// sent to the access-token endpoint.
	#[serde(rename = "core_10")]
	Core10,
	/// OAuth Core 1.0 Revision A: the callback is registered with the request token and the
	/// verifier accompanies the exchange.
	#[default]
	#[serde(rename = "core_10_revision_a")]
	Core10RevisionA,
}
impl OAuth1Version {
	/// Returns a stable label suitable for span fields and configuration.
	pub const fn as_str(self) -> &'static str {
		match self {
			OAuth1Version::Core10 => "core_10",
			OAuth1Version::Core10RevisionA => "core_10_revision_a",
		}
	}

	/// Whether the authorization redirect must carry `oauth_callback`.
	pub const fn callback_on_authorization(self) -> bool {
		matches!(self, OAuth1Version::Core10)
	}

	/// Whether the request-token call registers `oauth_callback` and the exchange sends
	/// `oauth_verifier`.
	pub const fn uses_verifier(self) -> bool {
		matches!(self, OAuth1Version::Core10RevisionA)
	}
}
impl Display for OAuth1Version {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
