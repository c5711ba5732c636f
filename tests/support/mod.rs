//! Scripted transport and deterministic collaborators shared by integration tests.

#![allow(dead_code)]

// std
use std::{
	collections::{HashMap, VecDeque},
	error::Error as StdError,
	fmt::{Display, Formatter, Result as FmtResult},
	future::{self, Future},
	pin::Pin,
	sync::{Arc, Mutex},
};
// crates.io
use serde_json::Value;
// self
use duo_universal::{
	Client, ClientConfig,
	clock::Clock,
	http::ProviderHttpClient,
	oauth2::{
		AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse,
		http::{StatusCode, header},
	},
	url::form_urlencoded,
};

pub const CLIENT_ID: &str = "12345678901234567890";
pub const CLIENT_SECRET: &str = "1234567890123456789012345678901234567890";
pub const API_HOST: &str = "api-123456.duo.com";
pub const REDIRECT_URL: &str = "https://redirect-example.com/callback";
pub const HEALTH_CHECK_URL: &str = "https://api-123456.duo.com/oauth/v1/health_check";
pub const TOKEN_URL: &str = "https://api-123456.duo.com/oauth/v1/token";

pub fn config() -> ClientConfig {
	ClientConfig::new(CLIENT_ID, CLIENT_SECRET, API_HOST, REDIRECT_URL)
		.expect("Fixture config should validate.")
}

pub fn scripted_client(http_client: ScriptedHttpClient) -> Client<ScriptedHttpClient> {
	Client::with_http_client(config(), http_client)
}

#[derive(Debug)]
pub enum FakeTransportError {
	ConnectionRefused,
}
impl Display for FakeTransportError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::ConnectionRefused => write!(f, "connect ECONNREFUSED 127.0.0.1:443"),
		}
	}
}
impl StdError for FakeTransportError {}

pub enum Scripted {
	Json(u16, Value),
	Raw(u16, &'static str),
	ConnectionRefused,
}

#[derive(Clone, Debug)]
pub struct RecordedRequest {
	pub method: String,
	pub url: String,
	pub content_type: Option<String>,
	pub user_agent: Option<String>,
	pub form: HashMap<String, String>,
}

#[derive(Default)]
struct ScriptState {
	responses: VecDeque<Scripted>,
	requests: Vec<RecordedRequest>,
}

/// Transport that replays queued responses and records every request.
#[derive(Clone, Default)]
pub struct ScriptedHttpClient(Arc<Mutex<ScriptState>>);
impl ScriptedHttpClient {
	pub fn replying(responses: impl IntoIterator<Item = Scripted>) -> Self {
		let client = Self::default();

		client.lock().responses.extend(responses);

		client
	}

	pub fn requests(&self) -> Vec<RecordedRequest> {
		self.lock().requests.clone()
	}

	fn lock(&self) -> std::sync::MutexGuard<'_, ScriptState> {
		self.0.lock().expect("Script state lock should not be poisoned.")
	}
}
impl ProviderHttpClient for ScriptedHttpClient {
	type Handle = ScriptedHandle;
	type TransportError = FakeTransportError;

	fn handle(&self) -> Self::Handle {
		ScriptedHandle(self.clone())
	}
}

pub struct ScriptedHandle(ScriptedHttpClient);
impl<'c> AsyncHttpClient<'c> for ScriptedHandle {
	type Error = HttpClientError<FakeTransportError>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'c + Send + Sync>>;

	fn call(&'c self, request: HttpRequest) -> Self::Future {
		let header_value = |name: header::HeaderName| {
			request.headers().get(name).and_then(|value| value.to_str().ok()).map(str::to_owned)
		};
		let recorded = RecordedRequest {
			method: request.method().to_string(),
			url: request.uri().to_string(),
			content_type: header_value(header::CONTENT_TYPE),
			user_agent: header_value(header::USER_AGENT),
			form: form_urlencoded::parse(request.body()).into_owned().collect(),
		};
		let mut state = self.0.lock();

		state.requests.push(recorded);

		let scripted = state.responses.pop_front().expect("A scripted response should be queued.");
		let result = match scripted {
			Scripted::Json(status, body) => Ok(response(status, body.to_string().into_bytes())),
			Scripted::Raw(status, body) => Ok(response(status, body.as_bytes().to_vec())),
			Scripted::ConnectionRefused =>
				Err(HttpClientError::Reqwest(Box::new(FakeTransportError::ConnectionRefused))),
		};

		Box::pin(future::ready(result))
	}
}

fn response(status: u16, body: Vec<u8>) -> HttpResponse {
	let mut response = HttpResponse::new(body);

	*response.status_mut() = StatusCode::from_u16(status).expect("Fixture status should be valid.");

	response
}

/// Clock pinned to a fixed instant.
pub struct FixedClock(pub i64);
impl Clock for FixedClock {
	fn now_epoch_seconds(&self) -> i64 {
		self.0
	}
}
