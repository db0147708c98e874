//! Optional observability helpers for handshake flows.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `oauth_handshake.flow` with the `phase`
//!   (authorize or exchange) and `stage` (call site) fields.
//! - Enable `metrics` to increment the `oauth_handshake_flow_total` counter for every
//!   attempt/suspension/success/failure, labeled by `phase` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Handshake phases observed by the exchange flow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowPhase {
	/// Request-token acquisition ending in the authorization redirect.
	Authorize,
	/// Verifier exchange ending in an access credential.
	Exchange,
}
impl FlowPhase {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowPhase::Authorize => "authorize",
			FlowPhase::Exchange => "exchange",
		}
	}
}
impl Display for FlowPhase {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowOutcome {
	/// Entry to a flow phase.
	Attempt,
	/// Phase ended by redirecting the user to the provider.
	Suspended,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl FlowOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowOutcome::Attempt => "attempt",
			FlowOutcome::Suspended => "suspended",
			FlowOutcome::Success => "success",
			FlowOutcome::Failure => "failure",
		}
	}
}
impl Display for FlowOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
