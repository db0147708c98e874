// self
use crate::_prelude::*;

/// Signature methods supported when signing provider calls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignatureMethod {
	/// HMAC over SHA-1 (RFC 5849 §3.4.2).
	#[default]
	#[serde(rename = "HMAC-SHA1")]
	HmacSha1,
	/// HMAC over SHA-256, accepted by a number of newer providers.
	#[serde(rename = "HMAC-SHA256")]
	HmacSha256,
	/// Unsigned key concatenation; only safe over TLS (RFC 5849 §3.4.4).
	#[serde(rename = "PLAINTEXT")]
	Plaintext,
}
impl SignatureMethod {
	/// Returns the `oauth_signature_method` value.
	pub const fn as_str(self) -> &'static str {
		match self {
			SignatureMethod::HmacSha1 => "HMAC-SHA1",
			SignatureMethod::HmacSha256 => "HMAC-SHA256",
			SignatureMethod::Plaintext => "PLAINTEXT",
		}
	}
}

/// Provider-specific quirks that influence how clients sign and validate calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderQuirks {
	/// Signature method used for every provider call.
	pub signature_method: SignatureMethod,
	/// Rejects request tokens whose response lacks `oauth_callback_confirmed=true`.
	pub require_callback_confirmed: bool,
}
impl Default for ProviderQuirks {
	fn default() -> Self {
		Self { signature_method: SignatureMethod::HmacSha1, require_callback_confirmed: false }
	}
}
