//! Inbound request view handed to the exchange flow.

// self
use crate::_prelude::*;

/// The parts of an inbound HTTP request the exchange flow reads.
///
/// The request URL is kept without query or fragment; its decoded query parameters are kept
/// in arrival order so repeated names resolve to their first value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallbackRequest {
	request_url: Url,
	parameters: Vec<(String, String)>,
}
impl CallbackRequest {
	/// Creates a request view from the canonical URL and already-decoded parameters.
	///
	/// Any query or fragment on `request_url` is discarded.
	pub fn new<I, K, V>(mut request_url: Url, parameters: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		request_url.set_query(None);
		request_url.set_fragment(None);

		Self {
			request_url,
			parameters: parameters.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
		}
	}

	/// Canonical request URL without its query string.
	pub fn request_url(&self) -> &Url {
		&self.request_url
	}

	/// First value of the named parameter, if the request carried it.
	pub fn parameter(&self, name: &str) -> Option<&str> {
		self.parameters.iter().find(|(key, _)| key == name).map(|(_, value)| value.as_str())
	}

	/// All parameters in arrival order.
	pub fn parameters(&self) -> impl Iterator<Item = (&str, &str)> {
		self.parameters.iter().map(|(key, value)| (key.as_str(), value.as_str()))
	}
}
impl From<Url> for CallbackRequest {
	fn from(url: Url) -> Self {
		let parameters = url.query_pairs().into_owned().collect::<Vec<_>>();

		Self::new(url, parameters)
	}
}
impl From<&Url> for CallbackRequest {
	fn from(url: &Url) -> Self {
		Self::from(url.clone())
	}
}
