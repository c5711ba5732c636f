//! Validated client configuration.
//!
//! A [`ClientConfig`] only exists once every check has passed, so a [`Client`](crate::Client)
//! built from one is never partially initialized. Checks run in a fixed order and stop at
//! the first failure:
//!
//! 1. client id length ([`ErrorKind::InvalidClientId`]),
//! 2. client secret length ([`ErrorKind::InvalidClientSecret`]),
//! 3. API host pattern ([`ErrorKind::InvalidConfig`]),
//! 4. redirect URL syntax ([`ErrorKind::InvalidConfig`]).
//!
//! No network I/O happens here.

mod secret;

pub use secret::*;

// std
use std::sync::LazyLock;
// crates.io
use oauth2::RedirectUrl;
use regex::Regex;
// self
use crate::{
	_prelude::*,
	consts::{
		CLIENT_ID_LENGTH, CLIENT_SECRET_LENGTH, INVALID_CLIENT_ID_ERROR,
		INVALID_CLIENT_SECRET_ERROR, PARSING_CONFIG_ERROR,
	},
};

static API_HOST_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^api-[a-zA-Z0-9]+\.duo(security)?\.com$").expect("API host pattern must compile.")
});

/// Immutable, validated client settings.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ClientConfigBuilder", into = "ClientConfigBuilder")]
pub struct ClientConfig {
	client_id: String,
	client_secret: ClientSecret,
	api_host: String,
	redirect_url: String,
	use_duo_code_attribute: bool,
	base_url: Url,
}
impl ClientConfig {
	/// Starts a builder; [`ClientConfigBuilder::build`] performs validation.
	pub fn builder(
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
		api_host: impl Into<String>,
		redirect_url: impl Into<String>,
	) -> ClientConfigBuilder {
		ClientConfigBuilder::new(client_id, client_secret, api_host, redirect_url)
	}

	/// Validates and builds a config with `use_duo_code_attribute` left at its default (`true`).
	pub fn new(
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
		api_host: impl Into<String>,
		redirect_url: impl Into<String>,
	) -> Result<Self> {
		Self::builder(client_id, client_secret, api_host, redirect_url).build()
	}

	/// Client identifier issued by the provider.
	pub fn client_id(&self) -> &str {
		&self.client_id
	}

	/// Client secret used to sign every JWT.
	pub fn client_secret(&self) -> &ClientSecret {
		&self.client_secret
	}

	/// Provider API host, e.g. `api-123456.duo.com`.
	pub fn api_host(&self) -> &str {
		&self.api_host
	}

	/// Redirect URL registered with the provider, exactly as configured.
	pub fn redirect_url(&self) -> &str {
		&self.redirect_url
	}

	/// Whether the provider should return `duo_code` instead of `code` on redirect.
	pub fn use_duo_code_attribute(&self) -> bool {
		self.use_duo_code_attribute
	}

	/// `https://{api_host}`.
	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	/// Absolute URL of an endpoint path, used both as request target and JWT audience.
	pub fn endpoint_url(&self, path: &str) -> String {
		format!("{}{path}", self.base_url.as_str().trim_end_matches('/'))
	}
}
impl Debug for ClientConfig {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ClientConfig")
			.field("client_id", &self.client_id)
			.field("client_secret", &self.client_secret)
			.field("api_host", &self.api_host)
			.field("redirect_url", &self.redirect_url)
			.field("use_duo_code_attribute", &self.use_duo_code_attribute)
			.finish()
	}
}
impl TryFrom<ClientConfigBuilder> for ClientConfig {
	type Error = Error;

	fn try_from(builder: ClientConfigBuilder) -> Result<Self> {
		builder.build()
	}
}

/// Unvalidated settings for [`ClientConfig`]; also the serde representation.
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfigBuilder {
	/// Client identifier issued by the provider.
	pub client_id: String,
	/// Client secret issued by the provider.
	pub client_secret: String,
	/// Provider API host.
	pub api_host: String,
	/// Redirect URL registered with the provider.
	pub redirect_url: String,
	/// Request `duo_code` instead of `code` on the redirect (defaults to `true`).
	#[serde(default = "default_use_duo_code_attribute")]
	pub use_duo_code_attribute: bool,
}
impl ClientConfigBuilder {
	/// Creates a builder with `use_duo_code_attribute` set to `true`.
	pub fn new(
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
		api_host: impl Into<String>,
		redirect_url: impl Into<String>,
	) -> Self {
		Self {
			client_id: client_id.into(),
			client_secret: client_secret.into(),
			api_host: api_host.into(),
			redirect_url: redirect_url.into(),
			use_duo_code_attribute: default_use_duo_code_attribute(),
		}
	}

	/// Overrides the `use_duo_code_attribute` flag.
	pub fn use_duo_code_attribute(mut self, enabled: bool) -> Self {
		self.use_duo_code_attribute = enabled;

		self
	}

	/// Consumes the builder and validates every field.
	pub fn build(self) -> Result<ClientConfig> {
		validate_client_id(&self.client_id)?;
		validate_client_secret(&self.client_secret)?;
		validate_api_host(&self.api_host)?;
		validate_redirect_url(&self.redirect_url)?;

		let base_url = Url::parse(&format!("https://{}", self.api_host)).map_err(|e| {
			Error::new(ErrorKind::InvalidConfig, PARSING_CONFIG_ERROR).with_source(e)
		})?;

		Ok(ClientConfig {
			client_id: self.client_id,
			client_secret: ClientSecret::new(self.client_secret),
			api_host: self.api_host,
			redirect_url: self.redirect_url,
			use_duo_code_attribute: self.use_duo_code_attribute,
			base_url,
		})
	}
}
impl From<ClientConfig> for ClientConfigBuilder {
	fn from(config: ClientConfig) -> Self {
		Self {
			client_id: config.client_id,
			client_secret: config.client_secret.expose().to_owned(),
			api_host: config.api_host,
			redirect_url: config.redirect_url,
			use_duo_code_attribute: config.use_duo_code_attribute,
		}
	}
}
impl Debug for ClientConfigBuilder {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ClientConfigBuilder")
			.field("client_id", &self.client_id)
			.field("client_secret", &"***")
			.field("api_host", &self.api_host)
			.field("redirect_url", &self.redirect_url)
			.field("use_duo_code_attribute", &self.use_duo_code_attribute)
			.finish()
	}
}

fn default_use_duo_code_attribute() -> bool {
	true
}

fn validate_client_id(client_id: &str) -> Result<()> {
	if client_id.chars().count() != CLIENT_ID_LENGTH {
		return Err(Error::new(ErrorKind::InvalidClientId, INVALID_CLIENT_ID_ERROR));
	}

	Ok(())
}

fn validate_client_secret(client_secret: &str) -> Result<()> {
	if client_secret.chars().count() != CLIENT_SECRET_LENGTH {
		return Err(Error::new(ErrorKind::InvalidClientSecret, INVALID_CLIENT_SECRET_ERROR));
	}

	Ok(())
}

fn validate_api_host(api_host: &str) -> Result<()> {
	if !API_HOST_PATTERN.is_match(api_host) {
		return Err(Error::new(ErrorKind::InvalidConfig, PARSING_CONFIG_ERROR));
	}

	Ok(())
}

fn validate_redirect_url(redirect_url: &str) -> Result<()> {
	RedirectUrl::new(redirect_url.to_owned())
		.map_err(|e| Error::new(ErrorKind::InvalidConfig, PARSING_CONFIG_ERROR).with_source(e))?;

	Ok(())
}
