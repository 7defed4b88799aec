//! Shared fixtures for the reqwest-backed integration tests.

#![allow(dead_code)]

// crates.io
use httpmock::{Mock, prelude::*};
use serde_json::{Value, json};
// self
use mytoken_client::{
	error::Result,
	flows::PollingCallbacks,
	server::ReqwestServer,
	url::Url,
};

pub const ISSUER: &str = "https://op.example.com";

/// Discovery document whose endpoints all live on the mock server.
pub fn configuration(server: &MockServer, with_settings: bool) -> Value {
	let mut document = json!({
		"issuer": server.url(""),
		"access_token_endpoint": server.url("/api/v0/token/access"),
		"mytoken_endpoint": server.url("/api/v0/token/my"),
		"tokeninfo_endpoint": server.url("/api/v0/tokeninfo"),
		"revocation_endpoint": server.url("/api/v0/token/revoke"),
		"token_transfer_endpoint": server.url("/api/v0/token/transfer"),
		"providers_supported": [{ "issuer": ISSUER, "name": "Example OP" }],
		"service_documentation": "https://docs.example.com",
	});

	if with_settings {
		document["usersettings_endpoint"] = json!(server.url("/api/v0/settings"));
	}

	document
}

/// Mocks the well-known discovery document.
pub async fn mock_configuration(server: &MockServer, with_settings: bool) -> Mock<'_> {
	let body = configuration(server, with_settings);

	server
		.mock_async(|when, then| {
			when.method(GET).path("/.well-known/mytoken-configuration");
			then.status(200).header("content-type", "application/json").json_body(body);
		})
		.await
}

/// Mocks the user settings metadata without an explicit SSH endpoint.
pub async fn mock_settings(server: &MockServer) -> Mock<'_> {
	let body = json!({ "grant_type_endpoint": server.url("/api/v0/settings/grants") });

	server
		.mock_async(|when, then| {
			when.method(GET).path("/api/v0/settings");
			then.status(200).header("content-type", "application/json").json_body(body);
		})
		.await
}

/// Discovers a server backed by `server`, with user settings enabled.
pub async fn discover(server: &MockServer) -> ReqwestServer {
	mock_configuration(server, true).await;
	mock_settings(server).await;

	ReqwestServer::discover(&server.base_url()).await.expect("Discovery against the mock should succeed.")
}

pub fn pending_body() -> Value {
	json!({ "error": "authorization_pending", "error_description": "waiting for the user" })
}

pub fn polling_info(code: &str, interval: u64, expires_in: u64) -> Value {
	json!({
		"polling_code": code,
		"polling_interval": interval,
		"polling_code_expires_in": expires_in,
	})
}

/// Callbacks that record every notification.
#[derive(Debug, Default)]
pub struct Recorder {
	pub started: Vec<Url>,
	pub progress: Vec<(u64, usize)>,
	pub completed: usize,
	pub reject_start: bool,
}
impl PollingCallbacks for Recorder {
	fn on_started(&mut self, url: &Url) -> Result<()> {
		self.started.push(url.clone());

		if self.reject_start {
			return Err(mytoken_client::error::Error::aborted("browser unavailable"));
		}

		Ok(())
	}

	fn on_progress(&mut self, interval_seconds: u64, attempt_index: usize) {
		self.progress.push((interval_seconds, attempt_index));
	}

	fn on_completed(&mut self) {
		self.completed += 1;
	}
}
