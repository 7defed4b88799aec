// self
use crate::obs::{AttemptResult, FlowKind, FlowOutcome};

/// Records a flow outcome via the global metrics recorder (when enabled).
pub fn record_flow_outcome(kind: FlowKind, outcome: FlowOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"mytoken_client_flow_total",
			"flow" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}

/// Records the result of one polling attempt (when enabled).
pub fn record_poll_attempt(kind: FlowKind, result: AttemptResult) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"mytoken_client_poll_attempt_total",
			"flow" => kind.as_str(),
			"result" => result.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, result);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn recorders_noop_without_metrics() {
		record_flow_outcome(FlowKind::AuthorizationCode, FlowOutcome::Failure);
		record_poll_attempt(FlowKind::SshKeyAddition, AttemptResult::Pending);
	}
}
