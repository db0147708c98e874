//! Provider strategy hooks that customize handshake calls.
//!
//! Implementations add provider-specific signed parameters and normalize error mapping
//! without tying clients to any particular HTTP client.

// self
use crate::_prelude::*;

/// Provider call made during a handshake.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderCall {
	/// First leg: obtain a temporary request token.
	RequestToken,
	/// Third leg: exchange the authorized request token for an access token.
	AccessToken,
}
impl ProviderCall {
	/// Returns a stable label suitable for span fields and error messages.
	pub const fn as_str(self) -> &'static str {
		match self {
			ProviderCall::RequestToken => "request_token",
			ProviderCall::AccessToken => "access_token",
		}
	}
}
impl Display for ProviderCall {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Strategy hook that allows providers to decorate calls and classify errors.
///
/// Implementors are required to be `Send + Sync`, and the hooks use crate-owned data types
/// so downstream crates never depend on reqwest-specific structures. Override only what you
/// need; `augment_call` has a default no-op implementation.
pub trait ProviderStrategy: Send + Sync {
	/// Maps a failed provider response into the crate taxonomy.
	fn classify_error(&self, ctx: &ProviderErrorContext) -> ProviderErrorKind;

	/// Gives providers a chance to add signed form parameters before dispatching.
	///
	/// Parameters added here are sent in the request body and included in the signature
	/// base string (e.g. Twitter's `x_auth_access_type`).
	fn augment_call(&self, _call: ProviderCall, _form: &mut BTreeMap<String, String>) {}
}

/// Canonical provider error categories used by strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProviderErrorKind {
	/// Provider rejected the request token or the verifier.
	TokenRejected,
	/// Provider rejected the consumer key or the request signature.
	InvalidConsumer,
	/// Failure is temporary; the user may restart the handshake.
	Transient,
}

/// Context passed to provider strategies when classifying failed calls.
///
/// The struct keeps only primitive data (status code, OAuth Problem Reporting fields, body
/// preview) so strategies stay decoupled from any HTTP client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderErrorContext {
	/// Call associated with the failure.
	pub call: ProviderCall,
	/// HTTP status code returned by the provider, when available.
	pub http_status: Option<u16>,
	/// Provider-supplied `oauth_problem` field.
	pub oauth_problem: Option<String>,
	/// Provider-supplied `oauth_problem_advice` field.
	pub problem_advice: Option<String>,
	/// Preview of the response body.
	pub body_preview: Option<String>,
}
impl ProviderErrorContext {
	const BODY_PREVIEW_LIMIT: usize = 256;

	/// Creates a new context scoped to the provided call.
	pub fn new(call: ProviderCall) -> Self {
		Self {
			call,
			http_status: None,
			oauth_problem: None,
			problem_advice: None,
			body_preview: None,
		}
	}

	/// Adds an HTTP status code (e.g., 400, 401, 500).
	pub fn with_http_status(mut self, status: u16) -> Self {
		self.http_status = Some(status);

		self
	}

	/// Adds the `oauth_problem` value returned by the provider.
	pub fn with_oauth_problem(mut self, problem: impl Into<String>) -> Self {
		self.oauth_problem = Some(problem.into());

		self
	}

	/// Adds the `oauth_problem_advice` value returned by the provider.
	pub fn with_problem_advice(mut self, advice: impl Into<String>) -> Self {
		self.problem_advice = Some(advice.into());

		self
	}

	/// Adds a body preview.
	pub fn with_body_preview(mut self, body: impl Into<String>) -> Self {
		self.body_preview = Some(truncate_preview(body.into()));

		self
	}

	/// Human-readable summary used in error reasons.
	pub fn summary(&self) -> String {
		let detail = self
			.problem_advice
			.as_deref()
			.or(self.oauth_problem.as_deref())
			.or(self.body_preview.as_deref())
			.filter(|value| !value.trim().is_empty());

		match (detail, self.http_status) {
			(Some(detail), _) => format!("{} call failed: {detail}", self.call),
			(None, Some(status)) => format!("{} call failed with HTTP {status}", self.call),
			(None, None) => format!("{} call failed", self.call),
		}
	}
}

/// Default strategy built on the OAuth Problem Reporting extension.
///
/// It prioritizes the structured `oauth_problem` field, then falls back to body text hints,
/// and finally the HTTP status code. Transport failures never reach strategies; they are
/// mapped by [`crate::oauth::TransportErrorMapper`].
#[derive(Debug, Default)]
pub struct DefaultProviderStrategy;
impl Display for DefaultProviderStrategy {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("default-provider-strategy")
	}
}
impl ProviderStrategy for DefaultProviderStrategy {
	fn classify_error(&self, ctx: &ProviderErrorContext) -> ProviderErrorKind {
		if let Some(kind) = ctx.oauth_problem.as_deref().and_then(classify_problem) {
			return kind;
		}
		if let Some(kind) = classify_body(ctx.body_preview.as_deref()) {
			return kind;
		}

		classify_status(ctx.http_status)
	}
}

fn truncate_preview(body: String) -> String {
	if body.chars().count() <= ProviderErrorContext::BODY_PREVIEW_LIMIT {
		return body;
	}

	let mut buf = String::new();

	for (idx, ch) in body.chars().enumerate() {
		if idx >= ProviderErrorContext::BODY_PREVIEW_LIMIT {
			buf.push('…');

			break;
		}
		buf.push(ch);
	}

	buf
}

fn classify_problem(problem: &str) -> Option<ProviderErrorKind> {
	match problem.trim().to_ascii_lowercase().as_str() {
		"token_used" | "token_expired" | "token_revoked" | "token_rejected" | "verifier_invalid"
		| "permission_denied" | "permission_unknown" | "user_refused" =>
			Some(ProviderErrorKind::TokenRejected),
		"consumer_key_unknown"
		| "consumer_key_rejected"
		| "consumer_key_refused"
		| "signature_invalid"
		| "signature_method_rejected"
		| "nonce_used"
		| "timestamp_refused"
		| "parameter_rejected"
		| "parameter_absent"
		| "version_rejected" => Some(ProviderErrorKind::InvalidConsumer),
		_ => None,
	}
}

fn classify_body(body: Option<&str>) -> Option<ProviderErrorKind> {
	let lowered = body?.to_ascii_lowercase();

	match lowered.as_str() {
		text if text.contains("verifier") || text.contains("token_rejected") =>
			Some(ProviderErrorKind::TokenRejected),
		text if text.contains("signature") || text.contains("consumer") =>
			Some(ProviderErrorKind::InvalidConsumer),
		text if text.contains("temporarily_unavailable") || text.contains("retry") =>
			Some(ProviderErrorKind::Transient),
		_ => None,
	}
}

fn classify_status(status: Option<u16>) -> ProviderErrorKind {
	match status {
		Some(400 | 403 | 404 | 410) => ProviderErrorKind::TokenRejected,
		Some(401) => ProviderErrorKind::InvalidConsumer,
		_ => ProviderErrorKind::Transient,
	}
}
