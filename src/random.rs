//! Random hex strings for `state`, `nonce`, and `jti` values.

// crates.io
use rand::RngCore;

/// Source of cryptographically random hex strings.
///
/// Implementations must be safe to call concurrently; every call returns a fresh value.
pub trait RandomSource: Send + Sync {
	/// Returns exactly `len` lowercase hex characters.
	fn random_hex(&self, len: usize) -> String;
}

/// Thread-local CSPRNG backed source.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsRandom;
impl RandomSource for OsRandom {
	fn random_hex(&self, len: usize) -> String {
		let mut bytes = vec![0_u8; len.div_ceil(2)];

		rand::rng().fill_bytes(&mut bytes);

		let mut hex = hex::encode(bytes);

		hex.truncate(len);

		hex
	}
}
