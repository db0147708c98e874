//! Starts a Twitter-style sign-in: loads the provider from JSON, runs the authorization leg,
//! and prints where the user would be redirected.
//!
//! Set `CONSUMER_KEY` and `CONSUMER_SECRET` to real application credentials to reach the
//! provider; with the placeholders the provider rejects the consumer and the demo prints the
//! classified error instead.

// std
use std::{env, sync::Arc};
// crates.io
use color_eyre::Result;
use url::Url;
// self
use oauth_handshake::{
	flows::{CallbackRequest, ExchangeFlow, ExchangeOutcome},
	oauth::OAuth1Client,
	provider::{ProviderDescriptor, ProviderOperations},
	store::{MemorySessionStore, REQUEST_TOKEN_KEY},
};

const TWITTER: &str = r#"{
	"id": "twitter",
	"endpoints": {
		"request_token": "https://api.twitter.com/oauth/request_token",
		"authorization": "https://api.twitter.com/oauth/authorize",
		"authenticate": "https://api.twitter.com/oauth/authenticate",
		"access_token": "https://api.twitter.com/oauth/access_token"
	},
	"version": "core_10_revision_a",
	"quirks": { "require_callback_confirmed": true }
}"#;

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let descriptor = ProviderDescriptor::from_json_str(TWITTER)?;
	let consumer_key = env::var("CONSUMER_KEY").unwrap_or_else(|_| "demo-consumer".into());
	let consumer_secret = env::var("CONSUMER_SECRET").unwrap_or_else(|_| "demo-secret".into());
	let operations: Arc<dyn ProviderOperations> =
		Arc::new(OAuth1Client::new(descriptor, consumer_key, consumer_secret));
	let flow = ExchangeFlow::builder()
		.operations(operations)
		.return_to_url_parameter("next")
		.use_authenticate_endpoint(true)
		.build()?;
	// One store per browser session; a web host would look it up from its session cookie.
	let session = MemorySessionStore::default();
	let inbound = CallbackRequest::from(Url::parse(
		"https://app.example.com/signin/twitter?next=%2Fdashboard",
	)?);

	println!("Callback registered with the provider: {}.", flow.build_return_to_url(&inbound));

	match flow.obtain_or_continue(&inbound, &session).await {
		Ok(ExchangeOutcome::Suspend(redirect)) => {
			println!("Redirect the user agent to {redirect}.");
			println!(
				"Parked request token: {:?}.",
				session.peek(REQUEST_TOKEN_KEY).map(|token| token.value)
			);
		},
		Ok(ExchangeOutcome::Completed(connection)) =>
			println!("Signed in as {:?}.", connection.display_name),
		Err(e) if e.is_provider_call_failure() => println!("Provider refused the handshake: {e}"),
		Err(e) => return Err(e.into()),
	}

	Ok(())
}
