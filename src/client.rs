//! Provider client orchestrating assertions, transport, and classification.

mod authorize;
mod health_check;
mod token;

// crates.io
use oauth2::{
	AsyncHttpClient,
	http::{Method, Request, header},
};
// self
use crate::{
	_prelude::*,
	assertion::{AssertionBuilder, ClaimsSigner, Hs512Signer},
	classify,
	clock::{Clock, SystemClock},
	config::ClientConfig,
	consts::{DEFAULT_STATE_LENGTH, USER_AGENT},
	http::{self, ProviderHttpClient},
	random::{OsRandom, RandomSource},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestProviderClient = Client<ReqwestHttpClient>;

/// Client for a single provider application.
///
/// The client owns a validated [`ClientConfig`] plus the collaborators every call needs:
/// the HTTP transport, the JWT signer, the clock, and the random source. Configuration is
/// read-only after construction and each call generates its own assertion, `jti`, and
/// timestamps, so one instance can serve any number of concurrent calls without locking.
/// No call retries, caches, or keeps state from a previous call.
pub struct Client<C>
where
	C: ?Sized + ProviderHttpClient,
{
	config: Arc<ClientConfig>,
	http_client: Arc<C>,
	signer: Arc<dyn ClaimsSigner>,
	clock: Arc<dyn Clock>,
	random: Arc<dyn RandomSource>,
}
impl<C> Client<C>
where
	C: ?Sized + ProviderHttpClient,
{
	/// Creates a client that reuses the caller-provided transport.
	pub fn with_http_client(config: ClientConfig, http_client: impl Into<Arc<C>>) -> Self {
		Self {
			config: Arc::new(config),
			http_client: http_client.into(),
			signer: Arc::new(Hs512Signer),
			clock: Arc::new(SystemClock),
			random: Arc::new(OsRandom),
		}
	}

	/// Replaces the JWT signer.
	pub fn with_signer(mut self, signer: Arc<dyn ClaimsSigner>) -> Self {
		self.signer = signer;

		self
	}

	/// Replaces the clock.
	pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
		self.clock = clock;

		self
	}

	/// Replaces the random source.
	pub fn with_random_source(mut self, random: Arc<dyn RandomSource>) -> Self {
		self.random = random;

		self
	}

	/// Validated configuration backing this client.
	pub fn config(&self) -> &ClientConfig {
		&self.config
	}

	/// Returns a fresh random hex string of [`DEFAULT_STATE_LENGTH`] characters.
	///
	/// Use it as the `state` of an authorization request and keep it in the user's session
	/// so the callback can be bound to the originating request.
	pub fn generate_state(&self) -> String {
		self.random.random_hex(DEFAULT_STATE_LENGTH)
	}

	pub(crate) fn assertion_builder(&self) -> AssertionBuilder<'_> {
		AssertionBuilder::new(
			self.config.client_id(),
			self.config.client_secret(),
			self.clock.as_ref(),
			self.random.as_ref(),
			self.signer.as_ref(),
		)
	}

	/// POSTs a URL-encoded form to `url` and parses the JSON body, whatever the status.
	///
	/// A non-2xx response without a body has nothing to classify and fails like the
	/// transport itself did.
	pub(crate) async fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<Value> {
		let body = url::form_urlencoded::Serializer::new(String::new()).extend_pairs(form).finish();
		let request = Request::builder()
			.method(Method::POST)
			.uri(url)
			.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
			.header(header::ACCEPT, "application/json")
			.header(header::USER_AGENT, USER_AGENT)
			.body(body.into_bytes())
			.map_err(Error::transport)?;
		let handle = self.http_client.handle();
		let response = handle.call(request).await.map_err(http::map_transport_error)?;
		let status = response.status();

		if !status.is_success() && response.body().trim_ascii().is_empty() {
			return Err(Error::new(
				ErrorKind::TransportFailure,
				format!("Request failed with status code {}", status.as_u16()),
			));
		}

		classify::parse_body(response.body())
	}
}
#[cfg(feature = "reqwest")]
impl Client<ReqwestHttpClient> {
	/// Creates a client backed by [`ReqwestHttpClient::new`].
	pub fn new(config: ClientConfig) -> Result<Self> {
		Ok(Self::with_http_client(config, ReqwestHttpClient::new()?))
	}
}
impl<C> Clone for Client<C>
where
	C: ?Sized + ProviderHttpClient,
{
	fn clone(&self) -> Self {
		Self {
			config: Arc::clone(&self.config),
			http_client: Arc::clone(&self.http_client),
			signer: Arc::clone(&self.signer),
			clock: Arc::clone(&self.clock),
			random: Arc::clone(&self.random),
		}
	}
}
impl<C> Debug for Client<C>
where
	C: ?Sized + ProviderHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Client").field("config", &self.config).finish_non_exhaustive()
	}
}
