//! The client secret and the HMAC keys derived from it.

// crates.io
use jsonwebtoken::{DecodingKey, EncodingKey};
// self
use crate::_prelude::*;

/// Shared HMAC secret issued with the client id.
///
/// It signs outgoing assertions and request JWTs and verifies returned ID tokens. Neither
/// `Debug` nor `Display` prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientSecret(Box<str>);
impl ClientSecret {
	pub(crate) fn new(value: impl Into<String>) -> Self {
		Self(value.into().into_boxed_str())
	}

	/// Raw secret text.
	pub fn expose(&self) -> &str {
		&self.0
	}

	pub(crate) fn encoding_key(&self) -> EncodingKey {
		EncodingKey::from_secret(self.0.as_bytes())
	}

	pub(crate) fn decoding_key(&self) -> DecodingKey {
		DecodingKey::from_secret(self.0.as_bytes())
	}
}
impl Debug for ClientSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("ClientSecret(***)")
	}
}
impl Display for ClientSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("***")
	}
}
