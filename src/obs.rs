//! Call instrumentation shared by every provider operation.
//!
//! Each public operation runs through `observe` or `observe_sync`. With the `tracing`
//! feature the call executes inside a `duo_universal.call` span tagged with the operation
//! and the endpoint it targets, and the outcome is logged when it returns. With the
//! `metrics` feature every attempt and result increments `duo_universal_call_total`, and
//! failures also increment `duo_universal_call_error_total` labeled by [`ErrorKind`].
//! Without either feature the helpers only hand the result back.

mod metrics;
mod tracing;

// self
use crate::{
	_prelude::*,
	consts::{AUTHORIZE_ENDPOINT, HEALTH_CHECK_ENDPOINT, TOKEN_ENDPOINT},
};

/// Provider operation a span or metric refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallKind {
	/// `POST` to the health check endpoint.
	HealthCheck,
	/// Local construction of the signed authorize request.
	Authorize,
	/// `POST` of an authorization code to the token endpoint.
	TokenExchange,
}
impl CallKind {
	/// Label used for the `call` span field and metric label.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallKind::HealthCheck => "health_check",
			CallKind::Authorize => "authorize",
			CallKind::TokenExchange => "token_exchange",
		}
	}

	/// Endpoint path the operation is bound to.
	pub const fn endpoint(self) -> &'static str {
		match self {
			CallKind::HealthCheck => HEALTH_CHECK_ENDPOINT,
			CallKind::Authorize => AUTHORIZE_ENDPOINT,
			CallKind::TokenExchange => TOKEN_ENDPOINT,
		}
	}
}
impl Display for CallKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Value of the `outcome` metric label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallOutcome {
	/// The operation was entered.
	Attempt,
	/// The operation returned `Ok`.
	Success,
	/// The operation returned `Err`.
	Failure,
}
impl CallOutcome {
	/// Final outcome of `result`.
	pub fn of<T>(result: &Result<T>) -> Self {
		if result.is_ok() { CallOutcome::Success } else { CallOutcome::Failure }
	}

	/// Label used for the `outcome` metric label.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallOutcome::Attempt => "attempt",
			CallOutcome::Success => "success",
			CallOutcome::Failure => "failure",
		}
	}
}
impl Display for CallOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Runs an async provider call with its span, counters, and outcome log.
pub(crate) async fn observe<T, F>(kind: CallKind, call: F) -> Result<T>
where
	F: Future<Output = Result<T>>,
{
	metrics::count_outcome(kind, CallOutcome::Attempt);

	let result = tracing::in_span(kind, call).await;

	finish(kind, &result);

	result
}

/// Synchronous counterpart of [`observe`].
pub(crate) fn observe_sync<T>(kind: CallKind, call: impl FnOnce() -> Result<T>) -> Result<T> {
	metrics::count_outcome(kind, CallOutcome::Attempt);

	let result = tracing::in_span_sync(kind, call);

	finish(kind, &result);

	result
}

fn finish<T>(kind: CallKind, result: &Result<T>) {
	metrics::count_outcome(kind, CallOutcome::of(result));

	if let Err(err) = result {
		metrics::count_error(kind, err.kind());
	}

	tracing::log_outcome(kind, result);
}
