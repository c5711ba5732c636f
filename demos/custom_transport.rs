//! Demonstrates plugging a non-reqwest transport into the client.
//!
//! 1. Implement [`ProviderHttpClient`] and return a handle that implements
//!    [`AsyncHttpClient`].
//! 2. Return the provider's body for every status; only report errors when no response
//!    exists.
//! 3. Pass the transport to [`Client::with_http_client`].

// std
use std::{
	error::Error as StdError,
	fmt::{Display, Formatter, Result as FmtResult},
	future::Future,
	pin::Pin,
};
// crates.io
use color_eyre::Result;
// self
use duo_universal::{
	Client, ClientConfig,
	http::ProviderHttpClient,
	oauth2::{AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let config = ClientConfig::new(
		"DIXXXXXXXXXXXXXXXXXX",
		"deadbeefdeadbeefdeadbeefdeadbeefdeadbeef",
		"api-123456.duo.com",
		"https://app.example.com/duo/callback",
	)?;
	let client: Client<MockHttpClient> =
		Client::with_http_client(config.clone(), MockHttpClient::Healthy);
	let response = client.health_check().await?;

	println!("Mock provider answered with stat {}.", response.stat);

	let failing: Client<MockHttpClient> = Client::with_http_client(
		config,
		MockHttpClient::Unreachable(MockTransportError::DnsFailure { host: "api-123456.duo.com" }),
	);

	match failing.health_check().await {
		Ok(_) => println!("Mock transport unexpectedly succeeded."),
		Err(e) => println!("Transport error surfaced as {}: {e}.", e.kind()),
	}

	Ok(())
}

#[derive(Clone, Debug)]
enum MockTransportError {
	DnsFailure { host: &'static str },
}
impl Display for MockTransportError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::DnsFailure { host } => write!(f, "DNS lookup failed for {host}"),
		}
	}
}
impl StdError for MockTransportError {}

#[derive(Clone)]
enum MockHttpClient {
	Healthy,
	Unreachable(MockTransportError),
}
impl ProviderHttpClient for MockHttpClient {
	type Handle = MockHttpHandle;
	type TransportError = MockTransportError;

	fn handle(&self) -> Self::Handle {
		MockHttpHandle(self.clone())
	}
}

struct MockHttpHandle(MockHttpClient);
impl<'a> AsyncHttpClient<'a> for MockHttpHandle {
	type Error = HttpClientError<MockTransportError>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'a + Send + Sync>>;

	fn call(&'a self, _request: HttpRequest) -> Self::Future {
		let behavior = self.0.clone();

		Box::pin(async move {
			match behavior {
				MockHttpClient::Healthy => Ok(HttpResponse::new(
					b"{\"stat\":\"OK\",\"response\":{\"timestamp\":1700000000}}".to_vec(),
				)),
				// The oauth2 crate names the variant after reqwest, but it boxes any transport
				// error.
				MockHttpClient::Unreachable(error) =>
					Err(HttpClientError::Reqwest(Box::new(error))),
			}
		})
	}
}
