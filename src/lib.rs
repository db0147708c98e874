//! Client-side OAuth 1.0a handshakes: fetch a request token, suspend for the user's
//! authorization redirect, and exchange the verifier for an access credential, plus the
//! bearer-style header encodings used by OAuth 2 providers and their drafts.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod error;
pub mod ext;
pub mod flows;
pub mod http;
pub mod oauth;
pub mod obs;
pub mod provider;
pub mod store;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		flows::ExchangeFlow,
		http::ReqwestHttpClient,
		oauth::{OAuth1Client, ReqwestTransportErrorMapper},
		provider::{DefaultProviderStrategy, ProviderDescriptor, ProviderOperations},
	};

	/// OAuth 1 client type alias used by reqwest-backed integration tests.
	pub type ReqwestTestClient = OAuth1Client<ReqwestHttpClient, ReqwestTransportErrorMapper>;

	/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestHttpClient::with_client(client)
	}

	/// Constructs an [`OAuth1Client`] for the descriptor using the default strategy and the
	/// reqwest transport used across integration tests.
	pub fn build_reqwest_test_client(
		descriptor: ProviderDescriptor,
		consumer_key: &str,
		consumer_secret: &str,
	) -> Arc<ReqwestTestClient> {
		Arc::new(OAuth1Client::with_http_client(
			descriptor,
			consumer_key,
			consumer_secret,
			Arc::new(DefaultProviderStrategy),
			test_reqwest_http_client(),
			Arc::new(ReqwestTransportErrorMapper),
		))
	}

	/// Wires an [`ExchangeFlow`] around the reqwest test client with the provided return
	/// parameters.
	pub fn build_reqwest_test_flow<I, S>(
		descriptor: ProviderDescriptor,
		consumer_key: &str,
		consumer_secret: &str,
		return_to_url_parameters: I,
	) -> ExchangeFlow
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let operations: Arc<dyn ProviderOperations> =
			build_reqwest_test_client(descriptor, consumer_key, consumer_secret);

		ExchangeFlow::builder()
			.operations(operations)
			.return_to_url_parameters(return_to_url_parameters)
			.build()
			.expect("Failed to build exchange flow for tests.")
	}
}

mod _prelude {
	pub use std::{
		collections::{BTreeMap, HashMap},
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
