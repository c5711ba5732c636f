//! Wire types exchanged with the provider.

mod authorize;

pub use authorize::*;

// self
use crate::_prelude::*;

/// Form body posted to the health check endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthCheckRequest {
	/// Client identifier.
	pub client_id: String,
	/// Signed client assertion whose audience is the health check URL.
	pub client_assertion: String,
}
impl HealthCheckRequest {
	/// Form fields in wire order.
	pub fn form_pairs(&self) -> [(&'static str, &str); 2] {
		[
			("client_id", self.client_id.as_str()),
			("client_assertion", self.client_assertion.as_str()),
		]
	}
}

/// Health check body returned by the provider.
///
/// Only `stat` is typed. Everything else stays raw JSON so a successful body reaches the
/// caller exactly as the provider sent it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HealthCheckResponse {
	/// `"OK"` on success, `"FAIL"` otherwise.
	pub stat: String,
	/// Every other top-level field, e.g. `response`, `code`, `message`.
	#[serde(flatten)]
	pub body: Map<String, Value>,
}
impl HealthCheckResponse {
	/// Whether the provider reported itself healthy.
	pub fn is_ok(&self) -> bool {
		self.stat == "OK"
	}

	/// Provider time from `response.timestamp`, truncated to whole epoch seconds.
	pub fn timestamp(&self) -> Option<i64> {
		let value = self.body.get("response")?.get("timestamp")?;

		value.as_i64().or_else(|| value.as_f64().map(|seconds| seconds as i64))
	}
}

/// Form body posted to the token endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRequest {
	/// Always `authorization_code`.
	pub grant_type: String,
	/// Code received on the redirect.
	pub code: String,
	/// Redirect URL used for the authorization request.
	pub redirect_uri: String,
	/// Client identifier.
	pub client_id: String,
	/// Always the JWT bearer assertion type.
	pub client_assertion_type: String,
	/// Signed client assertion whose audience is the token URL.
	pub client_assertion: String,
}
impl TokenRequest {
	/// Form fields in wire order.
	pub fn form_pairs(&self) -> [(&'static str, &str); 6] {
		[
			("grant_type", self.grant_type.as_str()),
			("code", self.code.as_str()),
			("redirect_uri", self.redirect_uri.as_str()),
			("client_id", self.client_id.as_str()),
			("client_assertion_type", self.client_assertion_type.as_str()),
			("client_assertion", self.client_assertion.as_str()),
		]
	}
}

/// Successful token endpoint body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
	/// Opaque access token.
	pub access_token: String,
	/// Access token lifetime in seconds.
	pub expires_in: i64,
	/// HS512-signed ID token carrying the 2FA result.
	pub id_token: String,
	/// Token type, normally `Bearer`.
	pub token_type: String,
}

/// Verified claims of the ID token returned by the token endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IdTokenClaims {
	/// Issuer, the token endpoint URL.
	pub iss: String,
	/// Audience, the client id.
	pub aud: String,
	/// Expiry, epoch seconds.
	pub exp: i64,
	/// Issued-at, epoch seconds.
	pub iat: i64,
	/// Subject identifier.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub sub: Option<String>,
	/// Username the 2FA result belongs to.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub preferred_username: Option<String>,
	/// Nonce echoed from the authorization request.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub nonce: Option<String>,
	/// Time the user authenticated, epoch seconds.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub auth_time: Option<i64>,
	/// Outcome of the authentication.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub auth_result: Option<AuthResult>,
	/// Device, location, and factor details; kept as raw JSON.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub auth_context: Option<Value>,
	/// Fields this crate does not model.
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}
impl IdTokenClaims {
	/// Whether the provider reported the authentication as allowed.
	pub fn is_allowed(&self) -> bool {
		self.auth_result.as_ref().is_some_and(|result| result.result == "allow")
	}
}

/// `auth_result` claim.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResult {
	/// `allow` or `deny`.
	pub result: String,
	/// Machine-readable status.
	pub status: String,
	/// Human-readable status.
	pub status_msg: String,
}
