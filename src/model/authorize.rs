// self
use crate::{_prelude::*, consts::AUTHORIZE_ENDPOINT};

/// Claims signed into the `request` parameter of an authorization redirect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationRequestPayload {
	/// Always `code`.
	pub response_type: String,
	/// Always `openid`.
	pub scope: String,
	/// Expiry, epoch seconds.
	pub exp: i64,
	/// Client identifier.
	pub client_id: String,
	/// Registered redirect URL.
	pub redirect_uri: String,
	/// Caller-supplied state, round-tripped through the redirect.
	pub state: String,
	/// Username being authenticated.
	pub duo_uname: String,
	/// Issuer, the client id.
	pub iss: String,
	/// Audience, the provider base URL.
	pub aud: String,
	/// Per-request nonce echoed back inside the ID token.
	pub nonce: String,
	/// Ask the provider to return `duo_code` instead of `code`.
	pub use_duo_code_attribute: bool,
}

/// Authorization redirect produced by
/// [`Client::build_authorization_request`](crate::Client::build_authorization_request).
///
/// Keep this value (or at least `state` and `nonce`) in the user's session; the callback is
/// checked with [`verify_callback`](Self::verify_callback) and the nonce is handed to
/// [`Client::exchange_authorization_code`](crate::Client::exchange_authorization_code).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationRequest {
	/// Always `code`.
	pub response_type: String,
	/// Client identifier.
	pub client_id: String,
	/// Always `openid`.
	pub scope: String,
	/// Registered redirect URL.
	pub redirect_uri: String,
	/// Signed [`AuthorizationRequestPayload`].
	pub request: String,
	/// State bound to this attempt.
	pub state: String,
	/// Nonce bound to this attempt.
	pub nonce: String,
	/// Whether the callback carries `duo_code` instead of `code`.
	pub use_duo_code_attribute: bool,
	base_url: Url,
}
impl AuthorizationRequest {
	pub(crate) fn new(
		base_url: Url,
		client_id: String,
		redirect_uri: String,
		request: String,
		state: String,
		nonce: String,
		use_duo_code_attribute: bool,
	) -> Self {
		Self {
			response_type: "code".into(),
			client_id,
			scope: "openid".into(),
			redirect_uri,
			request,
			state,
			nonce,
			use_duo_code_attribute,
			base_url,
		}
	}

	/// Provider authorize URL the user agent should be sent to.
	pub fn authorize_url(&self) -> Url {
		let mut url = self.base_url.clone();

		url.set_path(AUTHORIZE_ENDPOINT);
		url.query_pairs_mut()
			.append_pair("response_type", &self.response_type)
			.append_pair("client_id", &self.client_id)
			.append_pair("scope", &self.scope)
			.append_pair("redirect_uri", &self.redirect_uri)
			.append_pair("request", &self.request);

		url
	}

	/// Name of the callback query parameter that carries the authorization code.
	pub fn code_parameter(&self) -> &'static str {
		if self.use_duo_code_attribute { "duo_code" } else { "code" }
	}

	/// Validates the returned `state` parameter after the redirect.
	pub fn verify_state(&self, returned_state: &str) -> Result<()> {
		if returned_state == self.state {
			Ok(())
		} else {
			Err(Error::new(ErrorKind::StateMismatch, "Authorization state mismatch."))
		}
	}

	/// Extracts the authorization code from a callback URL after checking its `state`.
	pub fn verify_callback(&self, callback: &Url) -> Result<String> {
		let mut state = None;
		let mut code = None;

		for (key, value) in callback.query_pairs() {
			match key.as_ref() {
				"state" => state = Some(value.into_owned()),
				key if key == self.code_parameter() => code = Some(value.into_owned()),
				_ => {},
			}
		}

		let state = state
			.ok_or_else(|| Error::new(ErrorKind::StateMismatch, "Callback is missing state."))?;

		self.verify_state(&state)?;

		code.filter(|value| !value.is_empty()).ok_or_else(|| {
			Error::invalid_argument(format!("Callback is missing {}.", self.code_parameter()))
		})
	}
}
