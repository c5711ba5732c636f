mod support;

// std
use std::sync::Arc;
// crates.io
use jsonwebtoken::{DecodingKey, Validation};
// self
use duo_universal::{
	Client, ClientConfig, ErrorKind,
	consts::SIG_ALGORITHM,
	model::AuthorizationRequestPayload,
	random::RandomSource,
	url::Url,
};
use support::*;

const NOW: i64 = 1_700_000_000;
const STATE: &str = "0123456789abcdef0123456789abcdef0123";

struct FixedRandom;
impl RandomSource for FixedRandom {
	fn random_hex(&self, len: usize) -> String {
		"f".repeat(len)
	}
}

fn decode_request(token: &str) -> AuthorizationRequestPayload {
	let mut validation = Validation::new(SIG_ALGORITHM);

	// Signed against a fixed clock in the past.
	validation.validate_exp = false;
	validation.set_audience(&["https://api-123456.duo.com"]);
	validation.set_issuer(&[CLIENT_ID]);

	jsonwebtoken::decode::<AuthorizationRequestPayload>(
		token,
		&DecodingKey::from_secret(CLIENT_SECRET.as_bytes()),
		&validation,
	)
	.expect("Request JWT should verify with the client secret.")
	.claims
}

#[test]
fn authorization_request_signs_expected_claims() {
	let client = scripted_client(ScriptedHttpClient::default())
		.with_clock(Arc::new(FixedClock(NOW)))
		.with_random_source(Arc::new(FixedRandom));
	let request =
		client.build_authorization_request("alice", STATE).expect("Request should be built.");

	assert_eq!(request.state, STATE);
	assert_eq!(request.nonce, "f".repeat(36));
	assert_eq!(request.code_parameter(), "duo_code");

	let payload = decode_request(&request.request);

	assert_eq!(payload.response_type, "code");
	assert_eq!(payload.scope, "openid");
	assert_eq!(payload.exp, NOW + 300);
	assert_eq!(payload.client_id, CLIENT_ID);
	assert_eq!(payload.redirect_uri, REDIRECT_URL);
	assert_eq!(payload.state, STATE);
	assert_eq!(payload.duo_uname, "alice");
	assert_eq!(payload.nonce, request.nonce);
	assert!(payload.use_duo_code_attribute);

	let url = request.authorize_url();

	assert_eq!(url.scheme(), "https");
	assert_eq!(url.host_str(), Some(API_HOST));
	assert_eq!(url.path(), "/oauth/v1/authorize");
	assert!(url.query_pairs().any(|(key, value)| key == "request" && value == request.request));
}

#[test]
fn code_attribute_flag_is_forwarded() {
	let config = ClientConfig::builder(CLIENT_ID, CLIENT_SECRET, API_HOST, REDIRECT_URL)
		.use_duo_code_attribute(false)
		.build()
		.expect("Fixture config should validate.");
	let client: Client<ScriptedHttpClient> =
		Client::with_http_client(config, ScriptedHttpClient::default());
	let request =
		client.build_authorization_request("alice", STATE).expect("Request should be built.");

	assert_eq!(request.code_parameter(), "code");
	assert!(!decode_request(&request.request).use_duo_code_attribute);
}

#[test]
fn state_and_username_are_validated() {
	let client = scripted_client(ScriptedHttpClient::default());
	let short = "s".repeat(21);
	let long = "s".repeat(1025);

	for state in ["", short.as_str(), long.as_str()] {
		let err = client
			.build_authorization_request("alice", state)
			.expect_err("Out-of-range state should be rejected.");

		assert_eq!(err.kind(), ErrorKind::InvalidArgument);
	}

	assert!(client.build_authorization_request("alice", &"s".repeat(22)).is_ok());
	assert!(client.build_authorization_request("alice", &"s".repeat(1024)).is_ok());
	assert_eq!(
		client
			.build_authorization_request("", STATE)
			.expect_err("Empty username should be rejected.")
			.kind(),
		ErrorKind::InvalidArgument
	);
}

#[test]
fn generated_state_is_fresh_hex() {
	let client = scripted_client(ScriptedHttpClient::default());
	let first = client.generate_state();
	let second = client.generate_state();

	assert_eq!(first.len(), 36);
	assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
	assert_ne!(first, second);
	assert!(client.build_authorization_request("alice", &first).is_ok());
}

#[test]
fn each_request_gets_its_own_nonce() {
	let client = scripted_client(ScriptedHttpClient::default());
	let state = client.generate_state();
	let first = client.build_authorization_request("alice", &state).expect("Request should build.");
	let second =
		client.build_authorization_request("alice", &state).expect("Request should build.");

	assert_ne!(first.nonce, second.nonce);
}

#[test]
fn callback_round_trip_yields_code() {
	let client = scripted_client(ScriptedHttpClient::default());
	let request =
		client.build_authorization_request("alice", STATE).expect("Request should be built.");
	let callback = Url::parse(&format!("{REDIRECT_URL}?duo_code=auth-code-1&state={STATE}"))
		.expect("Callback URL should parse.");

	assert_eq!(request.verify_callback(&callback).expect("Callback should verify."), "auth-code-1");

	let forged = Url::parse(&format!("{REDIRECT_URL}?duo_code=auth-code-1&state=forged-state"))
		.expect("Callback URL should parse.");

	assert_eq!(
		request.verify_callback(&forged).expect_err("Forged state should fail.").kind(),
		ErrorKind::StateMismatch
	);
}
