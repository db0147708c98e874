//! Thread-safe in-memory [`SessionStore`] for local development and tests.

// self
use crate::{
	_prelude::*,
	auth::RequestToken,
	store::{SessionStore, StoreError, StoreFuture},
};

type SessionMap = Arc<RwLock<HashMap<String, RequestToken>>>;

/// One session's attributes kept in-process.
///
/// Clones share the same map, so a clone handed to the flow observes writes made through the
/// original.
#[derive(Clone, Debug, Default)]
pub struct MemorySessionStore(SessionMap);
impl MemorySessionStore {
	/// Returns the token stored under `key` without removing it.
	pub fn peek(&self, key: &str) -> Option<RequestToken> {
		self.0.read().get(key).cloned()
	}

	/// Number of attributes currently stored.
	pub fn len(&self) -> usize {
		self.0.read().len()
	}

	/// Returns `true` when the session holds no attributes.
	pub fn is_empty(&self) -> bool {
		self.0.read().is_empty()
	}

	fn put_now(map: SessionMap, key: String, token: RequestToken) -> Result<(), StoreError> {
		map.write().insert(key, token);

		Ok(())
	}

	fn take_now(map: SessionMap, key: &str) -> Option<RequestToken> {
		map.write().remove(key)
	}
}
impl SessionStore for MemorySessionStore {
	fn put<'a>(&'a self, key: &'a str, token: RequestToken) -> StoreFuture<'a, ()> {
		let map = self.0.clone();
		let key = key.to_owned();

		Box::pin(async move { Self::put_now(map, key, token) })
	}

	fn take_and_clear<'a>(&'a self, key: &'a str) -> StoreFuture<'a, Option<RequestToken>> {
		let map = self.0.clone();

		Box::pin(async move { Ok(Self::take_now(map, key)) })
	}
}
