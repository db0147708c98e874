//! Request signing contracts that attach access credentials to arbitrary HTTP clients.

// std
#[cfg(feature = "reqwest")] use std::convert::Infallible;
// crates.io
use oauth2::{
	HttpRequest,
	http::{HeaderValue, header::AUTHORIZATION},
};
// self
use crate::{
	_prelude::*,
	auth::{AccessCredential, BearerVersion},
	error::ConfigError,
};

/// Describes how to attach an [`AccessCredential`] to an outbound request without
/// constraining the HTTP client type.
pub trait RequestSignerExt<Request, Error>
where
	Self: Send + Sync,
{
	/// Consumes the provided request and injects authorization state derived from the
	/// credential.
	fn attach_token(&self, request: Request, credential: &AccessCredential)
	-> Result<Request, Error>;
}

/// Adds `Authorization` headers in one of the bearer-style encodings.
///
/// The encoding is fixed per signer; pick it to match the provider's protocol edition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BearerSigner {
	/// Header encoding applied to every request.
	pub version: BearerVersion,
}
impl BearerSigner {
	/// Creates a signer for the given encoding.
	pub fn new(version: BearerVersion) -> Self {
		Self { version }
	}

	/// Renders the header value for `credential`.
	pub fn header_value(&self, credential: &AccessCredential) -> String {
		self.version.authorization_header_value(credential.value.expose())
	}
}
impl RequestSignerExt<HttpRequest, ConfigError> for BearerSigner {
	fn attach_token(
		&self,
		mut request: HttpRequest,
		credential: &AccessCredential,
	) -> Result<HttpRequest, ConfigError> {
		let mut value = HeaderValue::try_from(self.header_value(credential))
			.map_err(oauth2::http::Error::from)?;

		value.set_sensitive(true);
		request.headers_mut().insert(AUTHORIZATION, value);

		Ok(request)
	}
}
#[cfg(feature = "reqwest")]
impl RequestSignerExt<reqwest::RequestBuilder, Infallible> for BearerSigner {
	fn attach_token(
		&self,
		request: reqwest::RequestBuilder,
		credential: &AccessCredential,
	) -> Result<reqwest::RequestBuilder, Infallible> {
		Ok(request.header(reqwest::header::AUTHORIZATION, self.header_value(credential)))
	}
}
