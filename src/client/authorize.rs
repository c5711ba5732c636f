//! Signed authorization requests for the redirect-based flow.
//!
//! The caller supplies `state` (usually from [`Client::generate_state`]) and the client
//! adds a fresh `nonce`. Both are returned in the [`AuthorizationRequest`]: `state` is
//! checked when the redirect comes back, `nonce` when the code is exchanged.

// self
use crate::{
	_prelude::*,
	client::Client,
	consts::{DEFAULT_STATE_LENGTH, JWT_EXPIRATION, MAXIMUM_STATE_LENGTH, MINIMUM_STATE_LENGTH},
	http::ProviderHttpClient,
	model::{AuthorizationRequest, AuthorizationRequestPayload},
	obs::{self, CallKind},
};

impl<C> Client<C>
where
	C: ?Sized + ProviderHttpClient,
{
	/// Builds a signed authorization request for `username`, bound to `state`.
	pub fn build_authorization_request(
		&self,
		username: &str,
		state: &str,
	) -> Result<AuthorizationRequest> {
		obs::observe_sync(CallKind::Authorize, || self.sign_authorization_request(username, state))
	}

	/// Shortcut for [`build_authorization_request`](Self::build_authorization_request)
	/// returning only the authorize URL.
	pub fn create_auth_url(&self, username: &str, state: &str) -> Result<Url> {
		Ok(self.build_authorization_request(username, state)?.authorize_url())
	}

	fn sign_authorization_request(
		&self,
		username: &str,
		state: &str,
	) -> Result<AuthorizationRequest> {
		validate_state(state)?;

		if username.is_empty() {
			return Err(Error::invalid_argument("The username is invalid."));
		}

		let config = &self.config;
		let nonce = self.random.random_hex(DEFAULT_STATE_LENGTH);
		let payload = AuthorizationRequestPayload {
			response_type: "code".into(),
			scope: "openid".into(),
			exp: self.clock.now_epoch_seconds() + JWT_EXPIRATION,
			client_id: config.client_id().to_owned(),
			redirect_uri: config.redirect_url().to_owned(),
			state: state.to_owned(),
			duo_uname: username.to_owned(),
			iss: config.client_id().to_owned(),
			aud: config.endpoint_url(""),
			nonce,
			use_duo_code_attribute: config.use_duo_code_attribute(),
		};
		let request = self.assertion_builder().sign_claims(&payload)?;

		Ok(AuthorizationRequest::new(
			config.base_url().clone(),
			payload.client_id,
			payload.redirect_uri,
			request,
			payload.state,
			payload.nonce,
			payload.use_duo_code_attribute,
		))
	}
}

fn validate_state(state: &str) -> Result<()> {
	let len = state.chars().count();

	if !(MINIMUM_STATE_LENGTH..=MAXIMUM_STATE_LENGTH).contains(&len) {
		return Err(Error::invalid_argument(format!(
			"State must be at least {MINIMUM_STATE_LENGTH} characters long and no longer than \
			 {MAXIMUM_STATE_LENGTH} characters."
		)));
	}

	Ok(())
}
