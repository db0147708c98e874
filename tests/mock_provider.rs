mod common;

// std
use std::{collections::BTreeMap, sync::Arc};
// self
use common::*;
use oauth_handshake::{
	auth::{BearerVersion, ProviderId},
	error::Error,
	provider::{
		DefaultProviderStrategy, OAuth1Version, ProviderCall, ProviderDescriptor,
		ProviderDescriptorBuilder, ProviderDescriptorError, ProviderErrorContext,
		ProviderErrorKind, ProviderOperations, ProviderQuirks, ProviderStrategy,
	},
	url::Url,
};

fn url(value: &str) -> Url {
	Url::parse(value).expect("Failed to parse mock provider URL.")
}

fn builder(id: &str) -> ProviderDescriptorBuilder {
	let provider_id =
		ProviderId::new(id).expect("Failed to build provider identifier for mock descriptor.");

	ProviderDescriptor::builder(provider_id)
}

#[test]
fn descriptor_rejects_missing_and_insecure_endpoints() {
	let err = builder("mock-missing")
		.request_token_endpoint(url("https://example.com/request"))
		.authorization_endpoint(url("https://example.com/authorize"))
		.build()
		.expect_err("Descriptor builder should reject a missing access token endpoint.");

	assert_eq!(err, ProviderDescriptorError::MissingAccessTokenEndpoint);

	let err = builder("mock-insecure")
		.request_token_endpoint(url("https://example.com/request"))
		.authorization_endpoint(url("http://example.com/authorize"))
		.access_token_endpoint(url("https://example.com/access"))
		.build()
		.expect_err("Descriptor builder should reject insecure authorization endpoints.");

	assert!(matches!(
		err,
		ProviderDescriptorError::InsecureEndpoint { endpoint: "authorization", .. }
	));
}

#[test]
fn callback_confirmation_requires_revision_a() {
	let quirks = ProviderQuirks { require_callback_confirmed: true, ..ProviderQuirks::default() };
	let err = builder("core-10")
		.request_token_endpoint(url("https://example.com/request"))
		.authorization_endpoint(url("https://example.com/authorize"))
		.access_token_endpoint(url("https://example.com/access"))
		.version(OAuth1Version::Core10)
		.quirks(quirks)
		.build()
		.expect_err("Callback confirmation should require OAuth 1.0a.");

	assert_eq!(err, ProviderDescriptorError::CallbackConfirmationWithoutRevisionA);
}

#[test]
fn default_strategy_prefers_problem_reporting() {
	let strategy = DefaultProviderStrategy;
	let ctx = ProviderErrorContext::new(ProviderCall::AccessToken)
		.with_http_status(500)
		.with_oauth_problem("token_expired");

	assert_eq!(strategy.classify_error(&ctx), ProviderErrorKind::TokenRejected);
	assert_eq!(
		strategy.classify_error(
			&ProviderErrorContext::new(ProviderCall::RequestToken).with_http_status(502)
		),
		ProviderErrorKind::Transient
	);
	assert_eq!(
		strategy.classify_error(
			&ProviderErrorContext::new(ProviderCall::RequestToken).with_http_status(401)
		),
		ProviderErrorKind::InvalidConsumer
	);
}

struct XAuthStrategy;
impl ProviderStrategy for XAuthStrategy {
	fn classify_error(&self, ctx: &ProviderErrorContext) -> ProviderErrorKind {
		DefaultProviderStrategy.classify_error(ctx)
	}

	fn augment_call(&self, call: ProviderCall, form: &mut BTreeMap<String, String>) {
		if call == ProviderCall::RequestToken {
			form.insert("x_auth_access_type".into(), "read".into());
		}
	}
}

#[tokio::test]
async fn strategy_parameters_are_posted_in_the_body() {
	let (client, recorder) = recording_client_with(
		descriptor("https://provider.example.com", OAuth1Version::Core10RevisionA),
		Arc::new(XAuthStrategy),
	);

	recorder.respond(200, "oauth_token=rt1&oauth_token_secret=s1");

	client.fetch_request_token("oob").await.expect("Request token call should succeed.");

	let request = recorder.request(0);

	assert_eq!(request.body().as_slice(), b"x_auth_access_type=read");
	assert!(!oauth_header_params(&request).contains_key("x_auth_access_type"));
}

#[test]
fn header_formats_are_byte_exact() {
	assert_eq!(BearerVersion::Standard.authorization_header_value("abc123"), "BEARER abc123");
	assert_eq!(BearerVersion::Draft10.authorization_header_value("abc123"), "OAuth abc123");
	assert_eq!(
		BearerVersion::Draft8.authorization_header_value("abc123"),
		"Token token=\"abc123\""
	);
	assert_eq!(
		"draft_8".parse::<BearerVersion>().expect("Known version should parse."),
		BearerVersion::Draft8
	);
}

#[test]
fn descriptor_json_errors_surface_as_config() {
	let err = ProviderDescriptor::from_json_str("{}").expect_err("Empty JSON should fail.");

	assert!(matches!(err, Error::Config(_)));
}
