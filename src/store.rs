//! Session-scoped storage for request tokens parked between the two handshake phases.
//!
//! A [`SessionStore`] represents one user's session. The exchange flow writes the request
//! token under [`REQUEST_TOKEN_KEY`] before redirecting and removes it while reading it back
//! on the callback, so each token is consumed at most once.

pub mod memory;

pub use memory::MemorySessionStore;

// self
use crate::{_prelude::*, auth::RequestToken};

/// Session key under which the pending request token is parked.
pub const REQUEST_TOKEN_KEY: &str = "oauthToken";

/// Future returned by [`SessionStore`] operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Per-session storage contract used by the exchange flow.
pub trait SessionStore
where
	Self: Send + Sync,
{
	/// Stores `token` under `key`, replacing any earlier value.
	fn put<'a>(&'a self, key: &'a str, token: RequestToken) -> StoreFuture<'a, ()>;

	/// Removes the value under `key` and returns it, if one was present.
	///
	/// Implementations must make the read and the removal a single step so concurrent
	/// callbacks for the same session cannot both observe the token.
	fn take_and_clear<'a>(&'a self, key: &'a str) -> StoreFuture<'a, Option<RequestToken>>;
}

/// Error type produced by [`SessionStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum StoreError {
	/// Backend-level failure for the session storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}
