//! Demonstrates driving a full handshake through a custom HTTP client and error mapper.
//!
//! 1. Implement [`ProviderHttpClient`] so the transport records [`ResponseMetadata`] via the
//!    provided [`ResponseMetadataSlot`].
//! 2. Provide a [`TransportErrorMapper`] that understands the transport error type and the
//!    captured metadata.
//! 3. Pass both to [`OAuth1Client::with_http_client`] and hand the client to an
//!    [`ExchangeFlow`].

// std
use std::{
	error::Error as StdError,
	fmt::{Display, Formatter, Result as FmtResult},
	future::Future,
	pin::Pin,
	sync::Arc,
};
// crates.io
use color_eyre::Result;
use url::Url;
// self
use oauth_handshake::{
	auth::ProviderId,
	error::{Error, TransientError},
	flows::{CallbackRequest, ExchangeFlow, ExchangeOutcome},
	http::{ProviderHttpClient, ResponseMetadata, ResponseMetadataSlot},
	oauth::{
		OAuth1Client, TransportErrorMapper,
		oauth2::{AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse},
	},
	provider::{DefaultProviderStrategy, ProviderCall, ProviderDescriptor, ProviderOperations},
	store::MemorySessionStore,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let descriptor = ProviderDescriptor::builder(ProviderId::new("mock-provider")?)
		.request_token_endpoint(Url::parse("https://provider.example.com/oauth/request_token")?)
		.authorization_endpoint(Url::parse("https://provider.example.com/oauth/authorize")?)
		.access_token_endpoint(Url::parse("https://provider.example.com/oauth/access_token")?)
		.build()?;
	let flow = build_flow(descriptor.clone(), MockHttpClient::default())?;
	let session = MemorySessionStore::default();
	let outcome = flow
		.obtain_or_continue(
			&CallbackRequest::from(Url::parse("https://app.example.com/signin")?),
			&session,
		)
		.await?;

	if let ExchangeOutcome::Suspend(redirect) = outcome {
		println!("Mock provider wants the user at {redirect}.");
	}

	let outcome = flow
		.obtain_or_continue(
			&CallbackRequest::from(Url::parse(
				"https://app.example.com/signin?oauth_token=mock-request&oauth_verifier=mock-verifier",
			)?),
			&session,
		)
		.await?;

	if let ExchangeOutcome::Completed(connection) = outcome {
		println!(
			"Connected {:?} with access token {}.",
			connection.display_name,
			connection.access_token.expose()
		);
	}

	let failing_flow = build_flow(
		descriptor,
		MockHttpClient::transport_error(MockTransportError::DnsFailure {
			host: "provider.example.com",
		}),
	)?;

	match failing_flow
		.obtain_or_continue(
			&CallbackRequest::from(Url::parse("https://app.example.com/signin")?),
			&session,
		)
		.await
	{
		Ok(_) => println!("Mock transport unexpectedly succeeded."),
		Err(e) => println!("Transport error mapped by the client: {e}"),
	}

	Ok(())
}

fn build_flow(descriptor: ProviderDescriptor, http_client: MockHttpClient) -> Result<ExchangeFlow> {
	let client: OAuth1Client<MockHttpClient, MockTransportErrorMapper> =
		OAuth1Client::with_http_client(
			descriptor,
			"demo-consumer",
			"demo-secret",
			Arc::new(DefaultProviderStrategy),
			http_client,
			Arc::new(MockTransportErrorMapper),
		);
	let operations: Arc<dyn ProviderOperations> = Arc::new(client);

	Ok(ExchangeFlow::builder().operations(operations).build()?)
}

#[derive(Clone, Debug)]
enum MockTransportError {
	DnsFailure { host: &'static str },
}
impl Display for MockTransportError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::DnsFailure { host } => write!(f, "DNS lookup failed for {host}"),
		}
	}
}
impl StdError for MockTransportError {}

#[derive(Clone, Default)]
enum MockBehavior {
	#[default]
	Success,
	TransportError(MockTransportError),
}

#[derive(Clone, Default)]
struct MockHttpClient {
	behavior: MockBehavior,
}
impl MockHttpClient {
	fn transport_error(error: MockTransportError) -> Self {
		Self { behavior: MockBehavior::TransportError(error) }
	}
}
impl ProviderHttpClient for MockHttpClient {
	type Handle = MockHttpHandle;
	type TransportError = MockTransportError;

	fn with_metadata(&self, slot: ResponseMetadataSlot) -> Self::Handle {
		MockHttpHandle { slot, behavior: self.behavior.clone() }
	}
}

struct MockHttpHandle {
	slot: ResponseMetadataSlot,
	behavior: MockBehavior,
}
impl<'a> AsyncHttpClient<'a> for MockHttpHandle {
	type Error = HttpClientError<MockTransportError>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'a + Send + Sync>>;

	fn call(&'a self, request: HttpRequest) -> Self::Future {
		let slot = self.slot.clone();
		let behavior = self.behavior.clone();

		Box::pin(async move {
			slot.take();

			match behavior {
				MockBehavior::Success => {
					slot.store(ResponseMetadata { status: Some(200), retry_after: None });

					let body: &[u8] = if request.uri().path().ends_with("request_token") {
						b"oauth_token=mock-request&oauth_token_secret=mock-request-secret"
					} else {
						b"oauth_token=mock-access&oauth_token_secret=mock-access-secret&screen_name=demo"
					};

					Ok(HttpResponse::new(body.to_vec()))
				},
				// The oauth2 crate keeps the `Reqwest` variant name even though the boxed
				// payload can be any transport error.
				MockBehavior::TransportError(error) => Err(HttpClientError::Reqwest(Box::new(error))),
			}
		})
	}
}

#[derive(Clone, Default)]
struct MockTransportErrorMapper;
impl TransportErrorMapper<MockTransportError> for MockTransportErrorMapper {
	fn map_transport_error(
		&self,
		call: ProviderCall,
		metadata: Option<&ResponseMetadata>,
		error: HttpClientError<MockTransportError>,
	) -> Error {
		let message = match error {
			HttpClientError::Reqwest(inner) =>
				format!("mock transport failed during the {call} call: {inner}"),
			HttpClientError::Other(text) =>
				format!("mock transport failed during the {call} call: {text}"),
			_ => format!("mock transport failed during the {call} call"),
		};

		TransientError::ProviderEndpoint {
			message,
			status: metadata.and_then(|meta| meta.status),
			retry_after: metadata.and_then(|meta| meta.retry_after),
		}
		.into()
	}
}
