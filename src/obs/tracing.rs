// self
use crate::{_prelude::*, obs::CallKind};

#[cfg(feature = "tracing")]
fn span(kind: CallKind) -> tracing::Span {
	tracing::info_span!("duo_universal.call", call = kind.as_str(), endpoint = kind.endpoint())
}

/// Awaits `call` inside the span for `kind`.
pub(crate) async fn in_span<F>(kind: CallKind, call: F) -> F::Output
where
	F: Future,
{
	#[cfg(feature = "tracing")]
	{
		use tracing::Instrument;

		call.instrument(span(kind)).await
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = kind;

		call.await
	}
}

pub(crate) fn in_span_sync<T>(kind: CallKind, call: impl FnOnce() -> T) -> T {
	#[cfg(feature = "tracing")]
	{
		span(kind).in_scope(call)
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = kind;

		call()
	}
}

/// `debug` on success, `warn` with the error kind on failure.
pub(crate) fn log_outcome<T>(kind: CallKind, result: &Result<T>) {
	#[cfg(feature = "tracing")]
	{
		match result {
			Ok(_) => tracing::debug!(call = kind.as_str(), "Provider call succeeded."),
			Err(err) => tracing::warn!(
				call = kind.as_str(),
				error_kind = err.kind().as_str(),
				error = %err,
				"Provider call failed."
			),
		}
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (kind, result);
	}
}
