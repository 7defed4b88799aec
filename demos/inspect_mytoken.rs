//! Introspects a mytoken and prints its event history, following token rotation.
//!
//! Usage: `MYTOKEN=... cargo run --example inspect_mytoken -- <mytoken-server-url>`

// std
use std::env;
// crates.io
use color_eyre::{Result, eyre::eyre};
// self
use mytoken_client::{config::ClientConfig, server::ReqwestServer};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let url = env::args().nth(1).ok_or_else(|| eyre!("missing mytoken server URL"))?;
	let mut mytoken = env::var("MYTOKEN")?;
	let server = ReqwestServer::discover_with(
		ClientConfig::default().with_user_agent("inspect_mytoken-demo"),
		&url,
	)
	.await?;
	let introspection = server.tokeninfo().introspect(&mytoken).await?;

	println!("Valid: {}.", introspection.valid);

	if !introspection.valid {
		return Ok(());
	}

	let before = mytoken.clone();

	for event in server.tokeninfo().history(&mut mytoken).await? {
		println!("{} {}", event.time, event.event);
	}

	if mytoken != before {
		println!("The server rotated the token; store the new value: {mytoken}");
	}

	Ok(())
}
