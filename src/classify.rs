//! Normalizes provider bodies into success values or a single [`Error`].
//!
//! The provider signals failure at the application level (`stat`, `error` fields) even on
//! HTTP 200, so nothing here looks at status codes. Failure messages are derived in
//! priority order:
//!
//! 1. `message` + `message_detail` -> `"{message}: {message_detail}"`,
//! 2. `error` + `error_description` -> `"{error}: {error_description}"`,
//! 3. otherwise the fixed malformed-response text.
//!
//! The first two produce [`ErrorKind::ProviderRejected`], the last
//! [`ErrorKind::MalformedResponse`].

// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	consts::MALFORMED_RESPONSE,
	model::{HealthCheckResponse, TokenResponse},
};

/// Parses a raw response body as JSON.
pub fn parse_body(body: &[u8]) -> Result<Value> {
	serde_json::from_slice(body).map_err(|e| malformed().with_source(e))
}

/// Classifies a health check body; success requires `stat == "OK"`.
pub fn classify_health_check(payload: Value) -> Result<HealthCheckResponse> {
	if stat(&payload) != Some("OK") {
		return Err(failure(&payload));
	}

	deserialize(payload)
}

/// Classifies a token endpoint body.
///
/// Any `error` field, or a `stat` other than `"OK"`, is a failure; otherwise every
/// [`TokenResponse`] field must be present.
pub fn classify_token_response(payload: Value) -> Result<TokenResponse> {
	let failed = payload.get("error").is_some_and(|value| !value.is_null())
		|| stat(&payload).is_some_and(|value| value != "OK");

	if failed || !payload.is_object() {
		return Err(failure(&payload));
	}

	deserialize(payload)
}

/// Builds the error for a failed body.
pub fn failure(payload: &Value) -> Error {
	match failure_message(payload) {
		Some(message) => Error::new(ErrorKind::ProviderRejected, message),
		None => malformed(),
	}
}

/// Derives the failure message, or `None` when neither error shape is present.
pub fn failure_message(payload: &Value) -> Option<String> {
	joined(payload, "message", "message_detail")
		.or_else(|| joined(payload, "error", "error_description"))
}

fn stat(payload: &Value) -> Option<&str> {
	payload.get("stat").and_then(Value::as_str)
}

fn joined(payload: &Value, head: &str, detail: &str) -> Option<String> {
	let head = field_text(payload, head)?;
	let detail = field_text(payload, detail)?;

	Some(format!("{head}: {detail}"))
}

fn field_text(payload: &Value, key: &str) -> Option<String> {
	match payload.get(key)? {
		Value::Null | Value::Bool(false) => None,
		Value::String(text) if text.is_empty() => None,
		Value::String(text) => Some(text.clone()),
		other => Some(other.to_string()),
	}
}

fn deserialize<T>(payload: Value) -> Result<T>
where
	T: DeserializeOwned,
{
	serde_path_to_error::deserialize(payload).map_err(|e| malformed().with_source(e))
}

fn malformed() -> Error {
	Error::new(ErrorKind::MalformedResponse, MALFORMED_RESPONSE)
}
