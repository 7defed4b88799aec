#![cfg(feature = "reqwest")]

mod common;

// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use common::*;
use mytoken_client::{
	config::ClientConfig,
	error::{ConfigError, Error},
	server::ReqwestServer,
};

#[tokio::test]
async fn discovery_builds_every_endpoint_handle() {
	let server = MockServer::start_async().await;
	let configuration = mock_configuration(&server, true).await;
	let settings = mock_settings(&server).await;
	let discovered = ReqwestServer::discover(&server.base_url())
		.await
		.expect("Discovery should succeed.");

	configuration.assert_async().await;
	settings.assert_async().await;

	assert_eq!(discovered.mytoken().url().as_str(), server.url("/api/v0/token/my"));
	assert_eq!(discovered.access_token().url().as_str(), server.url("/api/v0/token/access"));
	assert_eq!(discovered.tokeninfo().url().as_str(), server.url("/api/v0/tokeninfo"));
	assert_eq!(discovered.revocation().url().as_str(), server.url("/api/v0/token/revoke"));
	assert_eq!(discovered.transfer().url().as_str(), server.url("/api/v0/token/transfer"));

	let user_settings = discovered.require_user_settings().expect("Settings should be discovered.");

	assert_eq!(user_settings.grants().url().as_str(), server.url("/api/v0/settings/grants"));
	assert_eq!(user_settings.ssh().url().as_str(), server.url("/api/v0/settings/grants/ssh"));
	assert!(discovered.configuration().provider(&format!("{ISSUER}/")).is_some());
	assert!(discovered.configuration().extra.contains_key("service_documentation"));
}

#[tokio::test]
async fn discovery_sends_configured_user_agent() {
	let server = MockServer::start_async().await;
	let body = configuration(&server, false);
	let configuration = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/.well-known/mytoken-configuration")
				.header("user-agent", "mytoken-tests/0.1");
			then.status(200).json_body(body);
		})
		.await;
	let discovered = ReqwestServer::discover_with(
		ClientConfig::default().with_user_agent("mytoken-tests/0.1"),
		&server.url(""),
	)
	.await
	.expect("Discovery should succeed.");

	configuration.assert_async().await;

	assert!(discovered.user_settings().is_none());
	assert!(matches!(
		discovered.require_user_settings(),
		Err(Error::Config(ConfigError::MissingEndpoint { endpoint: "usersettings" }))
	));
}

#[tokio::test]
async fn unsupported_user_settings_are_tolerated() {
	let server = MockServer::start_async().await;

	mock_configuration(&server, true).await;

	let settings = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/v0/settings");
			then.status(404).json_body(json!({ "error": "not_found" }));
		})
		.await;
	let discovered = ReqwestServer::discover(&server.base_url())
		.await
		.expect("Discovery should tolerate missing settings.");

	settings.assert_async().await;

	assert!(discovered.user_settings().is_none());
}

#[tokio::test]
async fn other_user_settings_failures_abort_discovery() {
	let server = MockServer::start_async().await;

	mock_configuration(&server, true).await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/api/v0/settings");
			then.status(500).json_body(json!({ "error": "internal_server_error" }));
		})
		.await;

	let err = ReqwestServer::discover(&server.base_url())
		.await
		.expect_err("Settings failure should abort discovery.");

	assert_eq!(err.as_server().map(|e| e.error.as_str()), Some("internal_server_error"));
	assert_eq!(err.as_server().and_then(|e| e.status), Some(500));
}

#[tokio::test]
async fn incomplete_configuration_reports_missing_field() {
	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(GET).path("/.well-known/mytoken-configuration");
			then.status(200).json_body(json!({ "issuer": "https://mytoken.example.com" }));
		})
		.await;

	let err = ReqwestServer::discover(&server.base_url())
		.await
		.expect_err("Incomplete document should fail.");

	assert!(matches!(err, Error::Decode(_)), "unexpected error: {err:?}");
}

#[tokio::test]
async fn invalid_server_url_is_a_config_error() {
	let err = ReqwestServer::discover("not a url").await.expect_err("URL should be rejected.");

	assert!(matches!(err, Error::Config(ConfigError::InvalidUrl { .. })));
}
