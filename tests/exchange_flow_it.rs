#![cfg(feature = "reqwest")]

mod common;

// std
use std::sync::Arc;
// crates.io
use httpmock::prelude::*;
// self
use common::*;
use oauth_handshake::{
	error::Error,
	flows::{CallbackRequest, ExchangeFlow, ExchangeOutcome},
	provider::{OAuth1Version, ProviderOperations},
	store::{MemorySessionStore, REQUEST_TOKEN_KEY},
	url::Url,
};

fn build_flow(server: &MockServer, version: OAuth1Version) -> ExchangeFlow {
	let operations: Arc<dyn ProviderOperations> =
		reqwest_client(descriptor(&server.url(""), version));

	ExchangeFlow::builder()
		.operations(operations)
		.return_to_url_parameters(["next"])
		.build()
		.expect("Exchange flow should build.")
}

fn inbound(raw: &str) -> CallbackRequest {
	CallbackRequest::from(Url::parse(raw).expect("Inbound request URL should parse."))
}

#[tokio::test]
async fn revision_a_handshake_round_trips() {
	let server = MockServer::start_async().await;
	let flow = build_flow(&server, OAuth1Version::Core10RevisionA);
	let store = MemorySessionStore::default();
	let request_token = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/oauth/request_token")
				.header("content-type", "application/x-www-form-urlencoded")
				.header_exists("authorization");
			then.status(200)
				.header("content-type", "application/x-www-form-urlencoded")
				.body("oauth_token=rt1&oauth_token_secret=s1&oauth_callback_confirmed=true");
		})
		.await;
	let outcome = flow
		.obtain_or_continue(&inbound("https://app.example.com/signin?next=%2Fhome"), &store)
		.await
		.expect("Authorization leg should succeed.");

	request_token.assert_async().await;

	let ExchangeOutcome::Suspend(redirect) = outcome else {
		panic!("Authorization leg should suspend.");
	};

	assert_eq!(redirect.path(), "/oauth/authorize");
	assert_eq!(redirect.query(), Some("oauth_token=rt1"));
	assert_eq!(store.peek(REQUEST_TOKEN_KEY).map(|token| token.value), Some("rt1".into()));

	let access_token = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/access_token").header_exists("authorization");
			then.status(200).body(
				"oauth_token=ac1&oauth_token_secret=as1&user_id=6253282&screen_name=twitterapi",
			);
		})
		.await;
	let outcome = flow
		.obtain_or_continue(
			&inbound("https://app.example.com/signin?oauth_token=rt1&oauth_verifier=v1"),
			&store,
		)
		.await
		.expect("Exchange leg should succeed.");

	access_token.assert_async().await;

	let connection = outcome.into_connection().expect("Exchange leg should complete.");

	assert_eq!(connection.access_token.expose(), "ac1");
	assert_eq!(connection.secret.as_ref().map(|secret| secret.expose()), Some("as1"));
	assert_eq!(connection.provider_user_id.as_deref(), Some("6253282"));
	assert_eq!(connection.display_name.as_deref(), Some("twitterapi"));
	assert!(store.is_empty());
}

#[tokio::test]
async fn core_10_redirect_carries_callback() {
	let server = MockServer::start_async().await;
	let flow = build_flow(&server, OAuth1Version::Core10);
	let store = MemorySessionStore::default();
	let request_token = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/request_token");
			then.status(200).body("oauth_token=rt1&oauth_token_secret=s1");
		})
		.await;
	let outcome = flow
		.obtain_or_continue(&inbound("https://app.example.com/signin?next=%2Fhome&x=1"), &store)
		.await
		.expect("Authorization leg should succeed.");

	request_token.assert_async().await;

	let redirect = outcome.redirect_url().expect("Authorization leg should suspend.");
	let pairs = redirect.query_pairs().into_owned().collect::<Vec<_>>();

	assert_eq!(
		pairs,
		vec![
			("oauth_token".to_owned(), "rt1".to_owned()),
			("oauth_callback".to_owned(), "https://app.example.com/signin?next=%2Fhome".to_owned()),
		]
	);
}

#[tokio::test]
async fn rejected_exchange_clears_session_and_reports() {
	let server = MockServer::start_async().await;
	let flow = build_flow(&server, OAuth1Version::Core10RevisionA);
	let store = MemorySessionStore::default();

	server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/request_token");
			then.status(200).body("oauth_token=rt1&oauth_token_secret=s1");
		})
		.await;

	let access_token = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/access_token");
			then.status(401).body("oauth_problem=token_rejected");
		})
		.await;

	flow.obtain_or_continue(&inbound("https://app.example.com/signin"), &store)
		.await
		.expect("Authorization leg should succeed.");

	let callback = inbound("https://app.example.com/signin?oauth_verifier=v1");
	let err = flow
		.obtain_or_continue(&callback, &store)
		.await
		.expect_err("Rejected token should fail the exchange.");

	access_token.assert_async().await;

	assert!(matches!(err, Error::TokenRejected { .. }));
	assert!(store.is_empty());

	let err = flow
		.obtain_or_continue(&callback, &store)
		.await
		.expect_err("Replayed callback should fail without a provider call.");

	assert!(matches!(err, Error::MissingSessionToken));

	access_token.assert_async().await;
}
