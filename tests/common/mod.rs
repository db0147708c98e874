#![allow(dead_code)]

// std
use std::{
	collections::{BTreeMap, VecDeque},
	future::Future,
	pin::Pin,
	sync::Arc,
};
// crates.io
use oauth2::{AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse, http::StatusCode};
use parking_lot::Mutex;
use percent_encoding::percent_decode_str;
// self
use oauth_handshake::{
	auth::ProviderId,
	error::{Error, TransportError},
	http::{ProviderHttpClient, ResponseMetadata, ResponseMetadataSlot},
	oauth::{OAuth1Client, TransportErrorMapper},
	provider::{
		DefaultProviderStrategy, OAuth1Version, ProviderCall, ProviderDescriptor, ProviderQuirks,
		ProviderStrategy,
	},
	url::Url,
};

pub const CONSUMER_KEY: &str = "consumer-it";
pub const CONSUMER_SECRET: &str = "consumer-secret-it";

pub fn descriptor(base: &str, version: OAuth1Version) -> ProviderDescriptor {
	descriptor_with_quirks(base, version, ProviderQuirks::default())
}

pub fn descriptor_with_quirks(
	base: &str,
	version: OAuth1Version,
	quirks: ProviderQuirks,
) -> ProviderDescriptor {
	let provider_id = ProviderId::new("mock-oauth1").expect("Provider identifier should be valid.");
	let endpoint = |path: &str| {
		Url::parse(&format!("{}{path}", base.trim_end_matches('/')))
			.expect("Mock endpoint should parse successfully.")
	};

	ProviderDescriptor::builder(provider_id)
		.request_token_endpoint(endpoint("/oauth/request_token"))
		.authorization_endpoint(endpoint("/oauth/authorize"))
		.authenticate_endpoint(endpoint("/oauth/authenticate"))
		.access_token_endpoint(endpoint("/oauth/access_token"))
		.version(version)
		.quirks(quirks)
		.build()
		.expect("Provider descriptor should build successfully.")
}

/// Decodes an `Authorization: OAuth ...` header into its parameters.
pub fn oauth_header_params(request: &HttpRequest) -> BTreeMap<String, String> {
	let header = request
		.headers()
		.get("authorization")
		.and_then(|value| value.to_str().ok())
		.expect("Request should carry an Authorization header.");
	let params = header.strip_prefix("OAuth ").expect("Header should use the OAuth scheme.");

	params
		.split(", ")
		.map(|pair| {
			let (key, value) = pair.split_once('=').expect("Header pair should contain `=`.");
			let value = value.trim_matches('"');

			(
				percent_decode_str(key).decode_utf8_lossy().into_owned(),
				percent_decode_str(value).decode_utf8_lossy().into_owned(),
			)
		})
		.collect()
}

/// Canned provider responses plus every request the client sent.
#[derive(Default)]
pub struct Recorder {
	pub requests: Mutex<Vec<HttpRequest>>,
	responses: Mutex<VecDeque<(u16, String)>>,
}
impl Recorder {
	pub fn respond(&self, status: u16, body: impl Into<String>) {
		self.responses.lock().push_back((status, body.into()));
	}

	pub fn request(&self, idx: usize) -> HttpRequest {
		self.requests.lock().get(idx).cloned().expect("Recorded request should exist.")
	}
}

/// Transport that replays canned responses instead of touching the network.
#[derive(Clone, Default)]
pub struct RecordingTransport(pub Arc<Recorder>);
impl ProviderHttpClient for RecordingTransport {
	type Handle = RecordingHandle;
	type TransportError = std::io::Error;

	fn with_metadata(&self, slot: ResponseMetadataSlot) -> Self::Handle {
		RecordingHandle { recorder: self.0.clone(), slot }
	}
}

pub struct RecordingHandle {
	recorder: Arc<Recorder>,
	slot: ResponseMetadataSlot,
}
impl<'c> AsyncHttpClient<'c> for RecordingHandle {
	type Error = HttpClientError<std::io::Error>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'c + Send + Sync>>;

	fn call(&'c self, request: HttpRequest) -> Self::Future {
		Box::pin(async move {
			self.slot.take();
			self.recorder.requests.lock().push(request);

			let (status, body) = self
				.recorder
				.responses
				.lock()
				.pop_front()
				.ok_or_else(|| HttpClientError::Other("no canned response left".into()))?;
			let code = StatusCode::from_u16(status)
				.map_err(|err| HttpClientError::Other(err.to_string()))?;

			self.slot.store(ResponseMetadata { status: Some(status), retry_after: None });

			let mut response = HttpResponse::new(body.into_bytes());

			*response.status_mut() = code;

			Ok(response)
		})
	}
}

/// Maps recording-transport failures onto the crate's transport errors.
#[derive(Debug, Default)]
pub struct IoErrorMapper;
impl TransportErrorMapper<std::io::Error> for IoErrorMapper {
	fn map_transport_error(
		&self,
		_call: ProviderCall,
		_metadata: Option<&ResponseMetadata>,
		error: HttpClientError<std::io::Error>,
	) -> Error {
		match error {
			HttpClientError::Reqwest(inner) => TransportError::Io(*inner).into(),
			other => TransportError::network(other).into(),
		}
	}
}

pub type RecordingClient = OAuth1Client<RecordingTransport, IoErrorMapper>;

pub fn recording_client(descriptor: ProviderDescriptor) -> (Arc<RecordingClient>, Arc<Recorder>) {
	recording_client_with(descriptor, Arc::new(DefaultProviderStrategy))
}

pub fn recording_client_with(
	descriptor: ProviderDescriptor,
	strategy: Arc<dyn ProviderStrategy>,
) -> (Arc<RecordingClient>, Arc<Recorder>) {
	let transport = RecordingTransport::default();
	let recorder = transport.0.clone();
	let client = OAuth1Client::with_http_client(
		descriptor,
		CONSUMER_KEY,
		CONSUMER_SECRET,
		strategy,
		transport,
		Arc::new(IoErrorMapper),
	);

	(Arc::new(client), recorder)
}

#[cfg(feature = "reqwest")]
pub fn reqwest_client(descriptor: ProviderDescriptor) -> Arc<oauth_handshake::oauth::ReqwestOAuth1Client> {
	use oauth_handshake::{http::ReqwestHttpClient, oauth::ReqwestTransportErrorMapper};

	let client = oauth_handshake::reqwest::Client::builder()
		.danger_accept_invalid_certs(true)
		.danger_accept_invalid_hostnames(true)
		.build()
		.expect("Failed to build insecure Reqwest client for tests.");

	Arc::new(OAuth1Client::with_http_client(
		descriptor,
		CONSUMER_KEY,
		CONSUMER_SECRET,
		Arc::new(DefaultProviderStrategy),
		ReqwestHttpClient::with_client(client),
		Arc::new(ReqwestTransportErrorMapper),
	))
}
