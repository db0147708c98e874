// self
use crate::obs::{FlowOutcome, FlowPhase};

/// Records a phase outcome via the global metrics recorder (when enabled).
pub fn record_flow_outcome(phase: FlowPhase, outcome: FlowOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"oauth_handshake_flow_total",
			"phase" => phase.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (phase, outcome);
	}
}
