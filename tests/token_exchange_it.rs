mod support;

// std
use std::sync::Arc;
// crates.io
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde_json::{Value, json};
// self
use duo_universal::{Client, ErrorKind, assertion::ClientAssertionClaims, consts::SIG_ALGORITHM};
use support::*;

const NOW: i64 = 1_700_000_000;
const NONCE: &str = "abcdefabcdefabcdefabcdefabcdefabcdef";

fn id_token_claims() -> Value {
	json!({
		"iss": TOKEN_URL,
		"aud": CLIENT_ID,
		"exp": NOW + 300,
		"iat": NOW,
		"sub": "alice",
		"preferred_username": "alice",
		"nonce": NONCE,
		"auth_time": NOW,
		"auth_result": { "result": "allow", "status": "allow", "status_msg": "Login Successful" },
		"auth_context": { "factor": "duo_push", "result": "success" },
	})
}

fn sign(claims: &Value, secret: &str) -> String {
	jsonwebtoken::encode(
		&Header::new(SIG_ALGORITHM),
		claims,
		&EncodingKey::from_secret(secret.as_bytes()),
	)
	.expect("ID token fixture should sign.")
}

fn token_body(id_token: String) -> Scripted {
	Scripted::Json(
		200,
		json!({
			"access_token": "access-token",
			"expires_in": 3600,
			"id_token": id_token,
			"token_type": "Bearer",
		}),
	)
}

fn client_at(now: i64, transport: ScriptedHttpClient) -> Client<ScriptedHttpClient> {
	scripted_client(transport).with_clock(Arc::new(FixedClock(now)))
}

fn with_claim(key: &str, value: Value) -> Value {
	let mut claims = id_token_claims();

	claims[key] = value;

	claims
}

#[tokio::test]
async fn verified_claims_are_returned() {
	let transport =
		ScriptedHttpClient::replying([token_body(sign(&id_token_claims(), CLIENT_SECRET))]);
	let claims = client_at(NOW + 5, transport.clone())
		.exchange_authorization_code("auth-code", "alice", Some(NONCE))
		.await
		.expect("Valid ID token should verify.");

	assert!(claims.is_allowed());
	assert_eq!(claims.preferred_username.as_deref(), Some("alice"));
	assert_eq!(
		claims.auth_context.as_ref().and_then(|context| context.get("factor")),
		Some(&json!("duo_push"))
	);

	let requests = transport.requests();
	let form = &requests[0].form;

	assert_eq!(requests[0].url, TOKEN_URL);
	assert_eq!(form["grant_type"], "authorization_code");
	assert_eq!(form["code"], "auth-code");
	assert_eq!(form["redirect_uri"], REDIRECT_URL);
	assert_eq!(form["client_id"], CLIENT_ID);
	assert_eq!(
		form["client_assertion_type"],
		"urn:ietf:params:oauth:client-assertion-type:jwt-bearer"
	);

	let mut validation = Validation::new(SIG_ALGORITHM);

	// Signed against the fixed clock.
	validation.validate_exp = false;
	validation.set_audience(&[TOKEN_URL]);
	validation.set_issuer(&[CLIENT_ID]);

	let assertion = jsonwebtoken::decode::<ClientAssertionClaims>(
		&form["client_assertion"],
		&DecodingKey::from_secret(CLIENT_SECRET.as_bytes()),
		&validation,
	)
	.expect("Token assertion should target the token endpoint.");

	assert_eq!(assertion.claims.aud, TOKEN_URL);
}

#[tokio::test]
async fn missing_nonce_skips_nonce_check() {
	let transport = ScriptedHttpClient::replying([token_body(sign(
		&with_claim("nonce", json!("unrelated")),
		CLIENT_SECRET,
	))]);

	client_at(NOW, transport)
		.exchange_authorization_code("auth-code", "alice", None)
		.await
		.expect("Nonce should not be checked when none was kept.");
}

#[tokio::test]
async fn mismatched_claims_are_rejected() {
	let cases = [
		("nonce", with_claim("nonce", json!("other-nonce"))),
		("username", with_claim("preferred_username", json!("mallory"))),
		("audience", with_claim("aud", json!("DIOTHERCLIENTXXXXXXX"))),
		("issuer", with_claim("iss", json!("https://api-999999.duo.com/oauth/v1/token"))),
	];

	for (label, claims) in cases {
		let transport = ScriptedHttpClient::replying([token_body(sign(&claims, CLIENT_SECRET))]);
		let err = client_at(NOW, transport)
			.exchange_authorization_code("auth-code", "alice", Some(NONCE))
			.await
			.expect_err("Mismatched claim should be rejected.");

		assert_eq!(err.kind(), ErrorKind::TokenVerification, "{label}");
	}
}

#[tokio::test]
async fn foreign_signature_is_rejected() {
	let transport = ScriptedHttpClient::replying([token_body(sign(
		&id_token_claims(),
		"0000000000000000000000000000000000000000",
	))]);
	let err = client_at(NOW, transport)
		.exchange_authorization_code("auth-code", "alice", Some(NONCE))
		.await
		.expect_err("Foreign signature should be rejected.");

	assert_eq!(err.kind(), ErrorKind::TokenVerification);
}

#[tokio::test]
async fn expiry_honors_leeway() {
	let token = sign(&id_token_claims(), CLIENT_SECRET);
	let transport = ScriptedHttpClient::replying([token_body(token.clone()), token_body(token)]);
	let expiry = NOW + 300;

	client_at(expiry + 60, transport.clone())
		.exchange_authorization_code("auth-code", "alice", Some(NONCE))
		.await
		.expect("Token inside the leeway should verify.");

	let err = client_at(expiry + 61, transport)
		.exchange_authorization_code("auth-code", "alice", Some(NONCE))
		.await
		.expect_err("Expired token should be rejected.");

	assert_eq!(err.kind(), ErrorKind::TokenVerification);
	assert_eq!(err.message(), "The ID token has expired.");
}

#[tokio::test]
async fn token_issued_in_the_future_is_rejected() {
	let transport =
		ScriptedHttpClient::replying([token_body(sign(&id_token_claims(), CLIENT_SECRET))]);
	let err = client_at(NOW - 61, transport)
		.exchange_authorization_code("auth-code", "alice", Some(NONCE))
		.await
		.expect_err("Future token should be rejected.");

	assert_eq!(err.kind(), ErrorKind::TokenVerification);
}

#[tokio::test]
async fn extreme_time_claims_do_not_overflow() {
	let mut claims = with_claim("exp", json!(i64::MAX));

	claims["iat"] = json!(i64::MIN);

	let transport = ScriptedHttpClient::replying([token_body(sign(&claims, CLIENT_SECRET))]);
	let verified = client_at(NOW, transport)
		.exchange_authorization_code("auth-code", "alice", Some(NONCE))
		.await
		.expect("Boundary timestamps should be compared without wrapping.");

	assert_eq!((verified.exp, verified.iat), (i64::MAX, i64::MIN));

	let transport = ScriptedHttpClient::replying([token_body(sign(
		&with_claim("iat", json!(i64::MAX)),
		CLIENT_SECRET,
	))]);
	let err = client_at(NOW, transport)
		.exchange_authorization_code("auth-code", "alice", Some(NONCE))
		.await
		.expect_err("Far-future issue time should be rejected.");

	assert_eq!(err.message(), "The ID token was issued in the future.");
}

#[tokio::test]
async fn provider_errors_and_incomplete_bodies_fail() {
	let transport = ScriptedHttpClient::replying([
		Scripted::Json(
			400,
			json!({ "error": "invalid_grant", "error_description": "Code already used." }),
		),
		Scripted::Json(200, json!({ "access_token": "access-token", "token_type": "Bearer" })),
	]);
	let client = client_at(NOW, transport);
	let err = client
		.exchange_authorization_code("auth-code", "alice", None)
		.await
		.expect_err("Error body should be rejected.");

	assert_eq!(err.kind(), ErrorKind::ProviderRejected);
	assert_eq!(err.message(), "invalid_grant: Code already used.");

	let err = client
		.exchange_authorization_code("auth-code", "alice", None)
		.await
		.expect_err("Incomplete body should be rejected.");

	assert_eq!(err.kind(), ErrorKind::MalformedResponse);
}

#[tokio::test]
async fn empty_arguments_fail_before_any_request() {
	let transport = ScriptedHttpClient::default();
	let client = client_at(NOW, transport.clone());

	for (code, username) in [("", "alice"), ("auth-code", "")] {
		let err = client
			.exchange_authorization_code(code, username, None)
			.await
			.expect_err("Empty argument should be rejected.");

		assert_eq!(err.kind(), ErrorKind::InvalidArgument);
	}

	assert!(transport.requests().is_empty());
}
