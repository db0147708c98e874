//! Authorization header encodings for bearer-style access tokens.
//!
//! OAuth 2 settled on `Bearer`, but providers frozen on earlier drafts still expect the
//! `OAuth` (draft 10) or `Token token="..."` (draft 8) forms. The version is chosen once
//! per provider and never negotiated.

// self
use crate::_prelude::*;

/// Protocol edition that decides how an access token is rendered into the
/// `Authorization` header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BearerVersion {
	/// RFC 6750 bearer tokens.
	#[default]
	Standard,
	/// OAuth 2 draft 10.
	#[serde(rename = "draft_10")]
	Draft10,
	/// OAuth 2 draft 8.
	#[serde(rename = "draft_8")]
	Draft8,
}
impl BearerVersion {
	/// Returns a stable label suitable for configuration files.
	pub const fn as_str(self) -> &'static str {
		match self {
			BearerVersion::Standard => "standard",
			BearerVersion::Draft10 => "draft_10",
			BearerVersion::Draft8 => "draft_8",
		}
	}

	/// Renders the `Authorization` header value for the access token.
	///
	/// The token is treated as opaque; any string, including the empty one, is accepted.
	pub fn authorization_header_value(self, access_token: &str) -> String {
		match self {
			BearerVersion::Standard => format!("BEARER {access_token}"),
			BearerVersion::Draft10 => format!("OAuth {access_token}"),
			BearerVersion::Draft8 => format!("Token token=\"{access_token}\""),
		}
	}
}
impl Display for BearerVersion {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for BearerVersion {
	type Err = UnknownBearerVersion;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"standard" => Ok(Self::Standard),
			"draft_10" => Ok(Self::Draft10),
			"draft_8" => Ok(Self::Draft8),
			other => Err(UnknownBearerVersion(other.to_owned())),
		}
	}
}

/// Error returned when parsing an unrecognized [`BearerVersion`] label.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Unknown bearer version `{0}`.")]
pub struct UnknownBearerVersion(pub String);
