//! Return-to URL assembly for the authorization leg.

// crates.io
use url::form_urlencoded;
// self
use crate::{_prelude::*, error::ConfigError, flows::CallbackRequest};

/// Ordered set of inbound parameter names echoed onto the callback URL.
///
/// Names keep their configured order and duplicates are dropped on insertion.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReturnParameters(Vec<String>);
impl ReturnParameters {
	/// Builds the set from `names`, rejecting empty names.
	pub fn new<I, S>(names: I) -> Result<Self, ConfigError>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let mut parameters = Self::default();

		for name in names {
			parameters.push(name)?;
		}

		Ok(parameters)
	}

	/// Appends `name` unless it is already present.
	pub fn push(&mut self, name: impl Into<String>) -> Result<(), ConfigError> {
		let name = name.into();

		if name.trim().is_empty() {
			return Err(ConfigError::EmptyParameterName);
		}
		if !self.0.contains(&name) {
			self.0.push(name);
		}

		Ok(())
	}

	/// Iterates over the names in configured order.
	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.0.iter().map(String::as_str)
	}

	/// Number of configured names.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns `true` when no names are configured.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Renders the URL the provider should send the user back to.
	///
	/// Every configured name present on `request` is appended as `name=value` in configured
	/// order; absent names are skipped. No separator is emitted when nothing is appended.
	pub fn build_return_to_url(&self, request: &CallbackRequest) -> String {
		let mut serializer = form_urlencoded::Serializer::new(String::new());
		let mut appended = false;

		for name in self.iter() {
			if let Some(value) = request.parameter(name) {
				serializer.append_pair(name, value);

				appended = true;
			}
		}

		let base = request.request_url().as_str();

		if appended { format!("{base}?{}", serializer.finish()) } else { base.to_owned() }
	}
}
