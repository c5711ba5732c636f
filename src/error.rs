//! Client-wide error type shared by configuration, signing, transport, and provider paths.
//!
//! Every failure surfaces as a single [`Error`] carrying an [`ErrorKind`], a readable
//! message, and (optionally) the underlying cause, so callers catch one type while still
//! inspecting the source for diagnostics.

// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

pub(crate) type BoxError = Box<dyn StdError + Send + Sync>;

/// Failure categories surfaced by [`Error::kind`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
	/// Client identifier has the wrong length.
	InvalidClientId,
	/// Client secret has the wrong length.
	InvalidClientSecret,
	/// API host or redirect URL is malformed.
	InvalidConfig,
	/// Caller passed an unusable username, state, or authorization code.
	InvalidArgument,
	/// Provider answered with an application-level failure.
	ProviderRejected,
	/// Network failure or request construction failure inside the transport.
	TransportFailure,
	/// Provider body could not be parsed or lacked the expected fields.
	MalformedResponse,
	/// ID token failed signature, claim, username, or nonce checks.
	TokenVerification,
	/// Callback `state` does not match the issued authorization request.
	StateMismatch,
	/// Claims could not be signed.
	Signing,
}
impl ErrorKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			ErrorKind::InvalidClientId => "invalid_client_id",
			ErrorKind::InvalidClientSecret => "invalid_client_secret",
			ErrorKind::InvalidConfig => "invalid_config",
			ErrorKind::InvalidArgument => "invalid_argument",
			ErrorKind::ProviderRejected => "provider_rejected",
			ErrorKind::TransportFailure => "transport_failure",
			ErrorKind::MalformedResponse => "malformed_response",
			ErrorKind::TokenVerification => "token_verification",
			ErrorKind::StateMismatch => "state_mismatch",
			ErrorKind::Signing => "signing",
		}
	}

	/// Returns `true` for failures raised while validating a [`ClientConfig`](crate::ClientConfig).
	pub const fn is_config(self) -> bool {
		matches!(
			self,
			ErrorKind::InvalidClientId | ErrorKind::InvalidClientSecret | ErrorKind::InvalidConfig
		)
	}
}
impl Display for ErrorKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct Error {
	kind: ErrorKind,
	message: String,
	#[source]
	source: Option<BoxError>,
}
impl Error {
	/// Creates an error without an inner cause.
	pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
		Self { kind, message: message.into(), source: None }
	}

	/// Attaches the underlying cause.
	pub fn with_source(mut self, src: impl 'static + Send + Sync + StdError) -> Self {
		self.source = Some(Box::new(src));

		self
	}

	/// Wraps a transport failure, reusing the transport's own message.
	pub fn transport(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::new(ErrorKind::TransportFailure, src.to_string()).with_source(src)
	}

	/// Failure category.
	pub fn kind(&self) -> ErrorKind {
		self.kind
	}

	/// Human-readable message, identical to the `Display` output.
	pub fn message(&self) -> &str {
		&self.message
	}

	pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
		Self::new(ErrorKind::InvalidArgument, message)
	}

	pub(crate) fn token_verification(message: impl Into<String>) -> Self {
		Self::new(ErrorKind::TokenVerification, message)
	}
}
impl From<jsonwebtoken::errors::Error> for Error {
	fn from(e: jsonwebtoken::errors::Error) -> Self {
		Self::new(ErrorKind::Signing, "Unable to sign JWT.").with_source(e)
	}
}
