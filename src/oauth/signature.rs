//! RFC 5849 request signing and `Authorization: OAuth` header rendering.

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use rand::{Rng, distr::Alphanumeric};
use sha1::Sha1;
use sha2::Sha256;
// self
use crate::{_prelude::*, error::ConfigError, provider::SignatureMethod};

const NONCE_LEN: usize = 32;
const OAUTH_VERSION: &str = "1.0";
// RFC 5849 §3.6: everything except ALPHA / DIGIT / "-" / "." / "_" / "~".
const RFC5849_ENCODE_SET: &AsciiSet =
	&NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

/// Percent-encodes a value with the RFC 5849 unreserved set.
pub fn percent_encode(value: &str) -> String {
	utf8_percent_encode(value, RFC5849_ENCODE_SET).to_string()
}

/// Protocol parameters for one signed call.
///
/// A fresh nonce and the current timestamp are generated on construction; tests pin them
/// with [`OAuthParameters::with_nonce`] and [`OAuthParameters::with_timestamp`].
#[derive(Clone)]
pub struct OAuthParameters {
	method: SignatureMethod,
	params: BTreeMap<String, String>,
}
impl OAuthParameters {
	/// Seeds the parameter set for a consumer.
	pub fn new(consumer_key: &str, method: SignatureMethod) -> Self {
		let mut params = BTreeMap::new();

		params.insert("oauth_consumer_key".into(), consumer_key.into());
		params.insert("oauth_nonce".into(), random_nonce());
		params.insert("oauth_signature_method".into(), method.as_str().into());
		params.insert(
			"oauth_timestamp".into(),
			OffsetDateTime::now_utc().unix_timestamp().to_string(),
		);
		params.insert("oauth_version".into(), OAUTH_VERSION.into());

		Self { method, params }
	}

	/// Overrides the generated nonce.
	pub fn with_nonce(self, nonce: impl Into<String>) -> Self {
		self.with("oauth_nonce", nonce)
	}

	/// Overrides the generated timestamp (seconds since the Unix epoch).
	pub fn with_timestamp(self, timestamp: i64) -> Self {
		self.with("oauth_timestamp", timestamp.to_string())
	}

	/// Adds or replaces a protocol parameter (e.g. `oauth_token`, `oauth_verifier`).
	pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.params.insert(key.into(), value.into());

		self
	}

	/// Looks up a protocol parameter.
	pub fn get(&self, key: &str) -> Option<&str> {
		self.params.get(key).map(String::as_str)
	}

	/// Builds the signature base string (RFC 5849 §3.4.1).
	///
	/// Query parameters of `url` and the form body parameters are folded into the
	/// normalized parameter string alongside the protocol parameters.
	pub fn signature_base_string(
		&self,
		http_method: &str,
		url: &Url,
		form: &[(String, String)],
	) -> String {
		let query = url.query_pairs().map(|(k, v)| (k.into_owned(), v.into_owned()));
		let protocol = self
			.params
			.iter()
			.filter(|(key, _)| key.as_str() != "oauth_signature" && key.as_str() != "realm")
			.map(|(k, v)| (k.clone(), v.clone()));
		let pairs = protocol.chain(query).chain(form.iter().cloned()).collect::<Vec<_>>();

		format!(
			"{}&{}&{}",
			http_method.to_ascii_uppercase(),
			percent_encode(&base_string_uri(url)),
			percent_encode(&normalize_parameters(&pairs)),
		)
	}

	/// Signs the call and renders the `Authorization` header value.
	pub fn sign(
		mut self,
		http_method: &str,
		url: &Url,
		form: &[(String, String)],
		consumer_secret: &str,
		token_secret: Option<&str>,
	) -> Result<String> {
		let base = self.signature_base_string(http_method, url, form);
		let signature = compute_signature(self.method, &base, consumer_secret, token_secret)?;

		self.params.insert("oauth_signature".into(), signature);

		Ok(self.header_value())
	}

	fn header_value(&self) -> String {
		let rendered = self
			.params
			.iter()
			.map(|(key, value)| format!("{}=\"{}\"", percent_encode(key), percent_encode(value)))
			.collect::<Vec<_>>()
			.join(", ");

		format!("OAuth {rendered}")
	}
}
impl Debug for OAuthParameters {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("OAuthParameters")
			.field("method", &self.method)
			.field("keys", &self.params.keys().collect::<Vec<_>>())
			.finish()
	}
}

/// Base string URI: lowercase scheme and host, default ports dropped, no query or fragment.
pub fn base_string_uri(url: &Url) -> String {
	let host = url.host_str().unwrap_or_default();

	match url.port() {
		Some(port) => format!("{}://{host}:{port}{}", url.scheme(), url.path()),
		None => format!("{}://{host}{}", url.scheme(), url.path()),
	}
}

/// Encodes, sorts (by name, then value), and joins request parameters.
pub fn normalize_parameters(pairs: &[(String, String)]) -> String {
	let mut encoded = pairs
		.iter()
		.map(|(key, value)| (percent_encode(key), percent_encode(value)))
		.collect::<Vec<_>>();

	encoded.sort();

	encoded.into_iter().map(|(key, value)| format!("{key}={value}")).collect::<Vec<_>>().join("&")
}

fn compute_signature(
	method: SignatureMethod,
	base: &str,
	consumer_secret: &str,
	token_secret: Option<&str>,
) -> Result<String> {
	let key = format!(
		"{}&{}",
		percent_encode(consumer_secret),
		percent_encode(token_secret.unwrap_or_default())
	);
	let invalid_key = |_| ConfigError::InvalidSigningKey { method: method.as_str() };

	match method {
		SignatureMethod::HmacSha1 => {
			let mut mac = <Hmac<Sha1>>::new_from_slice(key.as_bytes()).map_err(invalid_key)?;

			mac.update(base.as_bytes());

			Ok(STANDARD.encode(mac.finalize().into_bytes()))
		},
		SignatureMethod::HmacSha256 => {
			let mut mac = <Hmac<Sha256>>::new_from_slice(key.as_bytes()).map_err(invalid_key)?;

			mac.update(base.as_bytes());

			Ok(STANDARD.encode(mac.finalize().into_bytes()))
		},
		SignatureMethod::Plaintext => Ok(key),
	}
}

fn random_nonce() -> String {
	rand::rng().sample_iter(Alphanumeric).take(NONCE_LEN).map(char::from).collect()
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	const REQUEST_TOKEN_BASE: &str = "POST&https%3A%2F%2Fapi.example.com%2Foauth%2Frequest_token&oauth_callback%3Dhttps%253A%252F%252Fapp.example.com%252Fcb%253Fa%253D1%26oauth_consumer_key%3Dkey%26oauth_nonce%3Dnonce%26oauth_signature_method%3DHMAC-SHA1%26oauth_timestamp%3D1700000000%26oauth_version%3D1.0";

	fn request_token_params(method: SignatureMethod) -> OAuthParameters {
		OAuthParameters::new("key", method)
			.with_nonce("nonce")
			.with_timestamp(1_700_000_000)
			.with("oauth_callback", "https://app.example.com/cb?a=1")
	}

	fn request_token_url() -> Url {
		Url::parse("https://api.example.com/oauth/request_token")
			.expect("Request token URL fixture should parse.")
	}

	#[test]
	fn encoding_keeps_only_unreserved_characters() {
		assert_eq!(percent_encode("Ladies + Gentlemen"), "Ladies%20%2B%20Gentlemen");
		assert_eq!(percent_encode("a-b.c_d~e"), "a-b.c_d~e");
		assert_eq!(percent_encode("☃"), "%E2%98%83");
	}

	#[test]
	fn base_string_uri_normalizes_authority() {
		let url = Url::parse("HTTP://Example.COM:80/r%20v/X?id=123#frag")
			.expect("Mixed-case URL fixture should parse.");

		assert_eq!(base_string_uri(&url), "http://example.com/r%20v/X");

		let url = Url::parse("https://www.example.net:8080/?q=1")
			.expect("Custom-port URL fixture should parse.");

		assert_eq!(base_string_uri(&url), "https://www.example.net:8080/");
	}

	#[test]
	fn parameters_sort_by_name_then_value() {
		let pairs = [
			("b".to_owned(), "x y".to_owned()),
			("a".to_owned(), "2".to_owned()),
			("c@".to_owned(), String::new()),
			("a".to_owned(), "1".to_owned()),
		];

		assert_eq!(normalize_parameters(&pairs), "a=1&a=2&b=x%20y&c%40=");
	}

	#[test]
	fn base_string_matches_rfc_layout() {
		let params = request_token_params(SignatureMethod::HmacSha1);

		assert_eq!(
			params.signature_base_string("post", &request_token_url(), &[]),
			REQUEST_TOKEN_BASE
		);
	}

	#[test]
	fn query_and_form_parameters_are_signed() {
		let url = Url::parse("https://api.example.com/1/statuses/update.json?include_entities=true")
			.expect("API URL fixture should parse.");
		let params = OAuthParameters::new("key", SignatureMethod::HmacSha1)
			.with_nonce("n")
			.with_timestamp(1);
		let form = [("status".to_owned(), "Hello Ladies + Gentlemen".to_owned())];
		let base = params.signature_base_string("POST", &url, &form);

		assert!(
			base.starts_with("POST&https%3A%2F%2Fapi.example.com%2F1%2Fstatuses%2Fupdate.json&")
		);
		assert!(base.contains("include_entities%3Dtrue"));
		assert!(base.contains("status%3DHello%2520Ladies%2520%252B%2520Gentlemen"));
	}

	#[test]
	fn hmac_signatures_are_deterministic() {
		let sha1 = request_token_params(SignatureMethod::HmacSha1)
			.sign("POST", &request_token_url(), &[], "secret", None)
			.expect("HMAC-SHA1 signing should succeed.");

		assert!(sha1.contains("oauth_signature=\"CHOfZbIkvmU5dWU83mSuBpO4f%2BU%3D\""));

		let sha256 = request_token_params(SignatureMethod::HmacSha256)
			.sign("POST", &request_token_url(), &[], "secret", None)
			.expect("HMAC-SHA256 signing should succeed.");

		assert!(sha256.contains(
			"oauth_signature=\"4peFTtm%2F07oML59ueizydMJVJ7r%2FG7cGskHLu3pXXKs%3D\""
		));
	}

	#[test]
	fn plaintext_signature_is_the_encoded_key() {
		let header = OAuthParameters::new("dpf43f3p2l4k3l03", SignatureMethod::Plaintext)
			.with_nonce("n")
			.with_timestamp(1)
			.sign("POST", &request_token_url(), &[], "kd94hf93k423kf44", Some("pfkkdhi9sl3r4s00"))
			.expect("PLAINTEXT signing should succeed.");

		assert!(header.contains("oauth_signature=\"kd94hf93k423kf44%26pfkkdhi9sl3r4s00\""));
	}

	#[test]
	fn header_lists_sorted_quoted_parameters() {
		let header = request_token_params(SignatureMethod::Plaintext)
			.sign("POST", &request_token_url(), &[], "cs", None)
			.expect("PLAINTEXT signing should succeed.");

		assert_eq!(
			header,
			"OAuth oauth_callback=\"https%3A%2F%2Fapp.example.com%2Fcb%3Fa%3D1\", \
			 oauth_consumer_key=\"key\", oauth_nonce=\"nonce\", \
			 oauth_signature=\"cs%26\", oauth_signature_method=\"PLAINTEXT\", \
			 oauth_timestamp=\"1700000000\", oauth_version=\"1.0\""
		);
	}

	#[test]
	fn generated_nonces_differ() {
		let a = OAuthParameters::new("key", SignatureMethod::HmacSha1);
		let b = OAuthParameters::new("key", SignatureMethod::HmacSha1);

		assert_eq!(a.get("oauth_nonce").map(str::len), Some(NONCE_LEN));
		assert_ne!(a.get("oauth_nonce"), b.get("oauth_nonce"));
	}
}
