//! Walks through the redirect flow end to end from a terminal.
//!
//! 1. Check that Duo is reachable.
//! 2. Build a signed authorization request and print its URL.
//! 3. Paste the full callback URL back in; its `state` is checked and the code extracted.
//! 4. Exchange the code and print the verified 2FA result.
//!
//! Reads `DUO_CLIENT_ID`, `DUO_CLIENT_SECRET`, `DUO_API_HOST`, `DUO_REDIRECT_URL`, and
//! `DUO_USERNAME` from the environment.

// std
use std::{env, io};
// crates.io
use color_eyre::Result;
// self
use duo_universal::{Client, ClientConfig, url::Url};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let config = ClientConfig::new(
		env::var("DUO_CLIENT_ID")?,
		env::var("DUO_CLIENT_SECRET")?,
		env::var("DUO_API_HOST")?,
		env::var("DUO_REDIRECT_URL")?,
	)?;
	let username = env::var("DUO_USERNAME")?;
	let client = Client::new(config)?;

	client.health_check().await?;

	let state = client.generate_state();
	// A web app would keep this in the user's session, keyed by `state`.
	let request = client.build_authorization_request(&username, &state)?;

	println!("Send your user to {}.", request.authorize_url());
	println!("Paste the full callback URL:");

	let mut line = String::new();

	io::stdin().read_line(&mut line)?;

	let callback = Url::parse(line.trim())?;
	let code = request.verify_callback(&callback)?;
	let claims =
		client.exchange_authorization_code(&code, &username, Some(&request.nonce)).await?;

	println!(
		"2FA result for {}: {}.",
		claims.preferred_username.as_deref().unwrap_or(&username),
		if claims.is_allowed() { "allowed" } else { "denied" }
	);

	Ok(())
}
