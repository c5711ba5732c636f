//! Duo Universal Prompt client: signed client assertions, provider health checks,
//! authorization requests, and verified 2FA results over OAuth 2.0/OIDC.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod assertion;
pub mod classify;
pub mod client;
pub mod clock;
pub mod config;
pub mod consts;
pub mod error;
pub mod http;
pub mod model;
pub mod obs;
pub mod random;

pub use client::Client;
pub use config::{ClientConfig, ClientSecret};
pub use error::{Error, ErrorKind, Result};

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::{Map, Value};
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{Error, ErrorKind, Result};
}

pub use oauth2;
#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _, tokio as _};
