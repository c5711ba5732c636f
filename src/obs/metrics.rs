// self
use crate::{
	_prelude::*,
	obs::{CallKind, CallOutcome},
};

/// Increments `duo_universal_call_total{call, outcome}`.
pub(crate) fn count_outcome(kind: CallKind, outcome: CallOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"duo_universal_call_total",
			"call" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}
	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}

/// Increments `duo_universal_call_error_total{call, error_kind}`.
pub(crate) fn count_error(kind: CallKind, error: ErrorKind) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"duo_universal_call_error_total",
			"call" => kind.as_str(),
			"error_kind" => error.as_str()
		)
		.increment(1);
	}
	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, error);
	}
}
