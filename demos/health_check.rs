//! Checks that the Duo API host accepts this application's credentials.
//!
//! Reads `DUO_CLIENT_ID`, `DUO_CLIENT_SECRET`, `DUO_API_HOST`, and `DUO_REDIRECT_URL` from the
//! environment.

// std
use std::env;
// crates.io
use color_eyre::Result;
// self
use duo_universal::{Client, ClientConfig};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let config = ClientConfig::new(
		env::var("DUO_CLIENT_ID")?,
		env::var("DUO_CLIENT_SECRET")?,
		env::var("DUO_API_HOST")?,
		env::var("DUO_REDIRECT_URL")?,
	)?;
	let client = Client::new(config)?;

	match client.health_check().await {
		Ok(response) => println!("Duo is reachable; provider time {:?}.", response.timestamp()),
		Err(e) => println!("Health check failed ({}): {e}.", e.kind()),
	}

	Ok(())
}
