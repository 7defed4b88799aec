//! Obtains a mytoken through the authorization-code flow.
//!
//! Usage: `cargo run --example authorization_flow -- <mytoken-server-url> <oidc-issuer>`

// std
use std::env;
// crates.io
use color_eyre::{Result, eyre::eyre};
// self
use mytoken_client::{
	api::{Capabilities, MytokenRequest},
	error::Result as ClientResult,
	flows::PollingCallbacks,
	polling::PollOptions,
	server::ReqwestServer,
	url::Url,
};

struct Terminal;
impl PollingCallbacks for Terminal {
	fn on_started(&mut self, url: &Url) -> ClientResult<()> {
		println!("Open {url} in a browser to authorize the request.");

		Ok(())
	}

	fn on_progress(&mut self, interval_seconds: u64, attempt_index: usize) {
		println!("Still waiting (attempt {}, every {interval_seconds}s).", attempt_index + 1);
	}

	fn on_completed(&mut self) {
		println!("Authorization granted.");
	}
}

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let mut args = env::args().skip(1);
	let url = args.next().ok_or_else(|| eyre!("missing mytoken server URL"))?;
	let issuer = args.next().ok_or_else(|| eyre!("missing OpenID issuer"))?;
	let server = ReqwestServer::discover(&url).await?;
	let request = MytokenRequest::new(issuer)
		.with_name("authorization_flow demo")
		.with_capabilities(Capabilities::new([Capabilities::ACCESS_TOKEN, Capabilities::TOKENINFO])?);
	let response =
		server.mytoken().from_authorization_flow(request, &PollOptions::default(), &mut Terminal).await?;

	match response.token() {
		Some(token) => println!("Mytoken: {}", token.expose()),
		None => println!("Server returned no token."),
	}

	Ok(())
}
