//! Signed JWT client assertions.
//!
//! Every protected call authenticates the relying application with a fresh assertion:
//! `iss = sub = client_id`, `aud` = the exact endpoint URL being called, a random `jti`,
//! and a validity window of [`JWT_EXPIRATION`] seconds. Assertions are never cached or
//! reused across endpoints or attempts.

// crates.io
use jsonwebtoken::Header;
// self
use crate::{
	_prelude::*,
	clock::Clock,
	config::ClientSecret,
	consts::{JTI_LENGTH, JWT_EXPIRATION, SIG_ALGORITHM},
	random::RandomSource,
};

/// Signs a JSON claims payload with the client secret.
///
/// The seam exists so tests can substitute a deterministic signer; production code uses
/// [`Hs512Signer`].
pub trait ClaimsSigner: Send + Sync {
	/// Produces a compact signed token for `claims`.
	fn sign(&self, claims: &Value, secret: &ClientSecret) -> Result<String>;
}

/// HMAC-SHA512 compact JWS signer.
#[derive(Clone, Copy, Debug, Default)]
pub struct Hs512Signer;
impl ClaimsSigner for Hs512Signer {
	fn sign(&self, claims: &Value, secret: &ClientSecret) -> Result<String> {
		let header = Header::new(SIG_ALGORITHM);

		Ok(jsonwebtoken::encode(&header, claims, &secret.encoding_key())?)
	}
}

/// Claims carried by a client assertion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientAssertionClaims {
	/// Issuer, always the client id.
	pub iss: String,
	/// Subject, always the client id.
	pub sub: String,
	/// Exact endpoint URL the assertion is presented to.
	pub aud: String,
	/// Random token identifier.
	pub jti: String,
	/// Issued-at, epoch seconds.
	pub iat: i64,
	/// Expiry, epoch seconds; always `iat + JWT_EXPIRATION`.
	pub exp: i64,
}

/// Builds client assertions from borrowed collaborators.
pub struct AssertionBuilder<'a> {
	client_id: &'a str,
	secret: &'a ClientSecret,
	clock: &'a dyn Clock,
	random: &'a dyn RandomSource,
	signer: &'a dyn ClaimsSigner,
}
impl<'a> AssertionBuilder<'a> {
	/// Creates a builder for `client_id`.
	pub fn new(
		client_id: &'a str,
		secret: &'a ClientSecret,
		clock: &'a dyn Clock,
		random: &'a dyn RandomSource,
		signer: &'a dyn ClaimsSigner,
	) -> Self {
		Self { client_id, secret, clock, random, signer }
	}

	/// Assembles fresh claims for `audience` without signing them.
	pub fn claims(&self, audience: &str) -> ClientAssertionClaims {
		let now = self.clock.now_epoch_seconds();

		ClientAssertionClaims {
			iss: self.client_id.to_owned(),
			sub: self.client_id.to_owned(),
			aud: audience.to_owned(),
			jti: self.random.random_hex(JTI_LENGTH),
			iat: now,
			exp: now + JWT_EXPIRATION,
		}
	}

	/// Builds and signs a new assertion for `audience`.
	pub fn build(&self, audience: &str) -> Result<String> {
		self.sign_claims(&self.claims(audience))
	}

	/// Signs any serializable payload with the client secret.
	pub fn sign_claims<T>(&self, claims: &T) -> Result<String>
	where
		T: ?Sized + Serialize,
	{
		let value = serde_json::to_value(claims).map_err(|e| {
			Error::new(ErrorKind::Signing, "Unable to encode JWT claims.").with_source(e)
		})?;

		self.signer.sign(&value, self.secret)
	}
}
impl Debug for AssertionBuilder<'_> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AssertionBuilder").field("client_id", &self.client_id).finish()
	}
}
