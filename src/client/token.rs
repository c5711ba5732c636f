//! Authorization code exchange and ID token verification.
//!
//! The token endpoint answers with an HS512 ID token signed with the client secret. The
//! client accepts its claims only when the signature verifies, `aud` is the client id,
//! `iss` is the token endpoint URL, `exp`/`iat` fall inside [`JWT_LEEWAY`] of the local
//! clock, `preferred_username` equals the username the flow started with, and (when one
//! was kept) `nonce` equals the nonce of the authorization request.

// crates.io
use jsonwebtoken::Validation;
// self
use crate::{
	_prelude::*,
	classify,
	client::Client,
	consts::{CLIENT_ASSERTION_TYPE, GRANT_TYPE, JWT_LEEWAY, SIG_ALGORITHM, TOKEN_ENDPOINT},
	http::ProviderHttpClient,
	model::{IdTokenClaims, TokenRequest},
	obs::{self, CallKind},
};

impl<C> Client<C>
where
	C: ?Sized + ProviderHttpClient,
{
	/// Exchanges an authorization code for the verified 2FA result of `username`.
	///
	/// Pass the `nonce` of the [`AuthorizationRequest`](crate::model::AuthorizationRequest)
	/// that started the flow to bind the result to it; `None` skips the nonce check.
	pub async fn exchange_authorization_code(
		&self,
		code: &str,
		username: &str,
		nonce: Option<&str>,
	) -> Result<IdTokenClaims> {
		obs::observe(CallKind::TokenExchange, async {
			if code.is_empty() {
				return Err(Error::invalid_argument("Missing authorization code."));
			}
			if username.is_empty() {
				return Err(Error::invalid_argument("The username is invalid."));
			}

			let audience = self.config.endpoint_url(TOKEN_ENDPOINT);
			let request = TokenRequest {
				grant_type: GRANT_TYPE.into(),
				code: code.to_owned(),
				redirect_uri: self.config.redirect_url().to_owned(),
				client_id: self.config.client_id().to_owned(),
				client_assertion_type: CLIENT_ASSERTION_TYPE.into(),
				client_assertion: self.assertion_builder().build(&audience)?,
			};
			let payload = self.post_form(&audience, &request.form_pairs()).await?;
			let response = classify::classify_token_response(payload)?;

			self.verify_id_token(&response.id_token, &audience, username, nonce)
		})
		.await
	}

	fn verify_id_token(
		&self,
		id_token: &str,
		issuer: &str,
		username: &str,
		nonce: Option<&str>,
	) -> Result<IdTokenClaims> {
		let mut validation = Validation::new(SIG_ALGORITHM);

		// Expiry is checked against the injected clock below.
		validation.validate_exp = false;
		validation.set_required_spec_claims(&["exp", "iat", "iss", "aud"]);
		validation.set_audience(&[self.config.client_id()]);
		validation.set_issuer(&[issuer]);

		let key = self.config.client_secret().decoding_key();
		let claims = jsonwebtoken::decode::<IdTokenClaims>(id_token, &key, &validation)
			.map_err(|e| {
				Error::token_verification("Unable to verify the ID token.").with_source(e)
			})?
			.claims;
		let now = self.clock.now_epoch_seconds();

		if claims.exp.saturating_add(JWT_LEEWAY) < now {
			return Err(Error::token_verification("The ID token has expired."));
		}
		if claims.iat.saturating_sub(JWT_LEEWAY) > now {
			return Err(Error::token_verification("The ID token was issued in the future."));
		}
		if claims.preferred_username.as_deref() != Some(username) {
			return Err(Error::token_verification("The username is invalid."));
		}
		if let Some(expected) = nonce.filter(|value| !value.is_empty())
			&& claims.nonce.as_deref() != Some(expected)
		{
			return Err(Error::token_verification("The nonce is invalid."));
		}

		Ok(claims)
	}
}
