// self
use crate::{
	_prelude::*,
	obs::{CallKind, CallOutcome},
};

/// Bumps `looker_mcp_call_total{call, outcome}` on the global recorder.
///
/// Compiles to nothing unless the `metrics` feature is enabled.
pub fn record_call_outcome(kind: CallKind, outcome: CallOutcome) {
	#[cfg(feature = "metrics")]
	metrics::counter!(
		"looker_mcp_call_total",
		"call" => kind.as_str(),
		"outcome" => outcome.as_str()
	)
	.increment(1);

	#[cfg(not(feature = "metrics"))]
	let _ = (kind, outcome);
}

/// Records the terminal outcome of a finished call.
pub fn record_call_result<T>(kind: CallKind, result: &Result<T>) {
	record_call_outcome(kind, CallOutcome::of(result));
}
