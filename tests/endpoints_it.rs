#![cfg(feature = "reqwest")]

mod common;

// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use common::*;
use mytoken_client::{
	api::{AccessTokenOptions, MytokenRequest},
	error::Error,
};

#[tokio::test]
async fn access_token_rotation_updates_held_token() {
	let server = MockServer::start_async().await;
	let discovered = discover(&server).await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/v0/token/access").json_body(json!({
				"grant_type": "mytoken",
				"mytoken": "T1",
				"oidc_issuer": ISSUER,
				"scope": "openid profile",
				"audience": "https://storage.example.com",
			}));
			then.status(200).json_body(json!({
				"access_token": "AT-1",
				"token_type": "Bearer",
				"expires_in": 300,
				"scope": "openid profile",
				"token_update": { "mytoken": "T2" },
			}));
		})
		.await;
	let mut held = String::from("T1");
	let response = discovered
		.access_token()
		.get_access_token(
			&mut held,
			AccessTokenOptions::new(ISSUER)
				.with_scopes(["openid", "profile"])
				.with_audiences(["https://storage.example.com"]),
		)
		.await
		.expect("Access token request should succeed.");

	mock.assert_async().await;

	assert_eq!(held, "T2");
	assert_eq!(response.access_token.expose(), "AT-1");
	assert!(response.token_update.is_none(), "Rotation should be consumed.");
}

#[tokio::test]
async fn rotation_carried_by_error_updates_held_token() {
	let server = MockServer::start_async().await;
	let discovered = discover(&server).await;

	server
		.mock_async(|when, then| {
			when.method(POST).path("/api/v0/token/access");
			then.status(403).json_body(json!({
				"error": "insufficient_capabilities",
				"error_description": "token lacks the AT capability",
				"token_update": { "mytoken": "T2" },
			}));
		})
		.await;

	let mut held = String::from("T1");
	let err = discovered
		.access_token()
		.get_access_token(&mut held, AccessTokenOptions::new(ISSUER))
		.await
		.expect_err("Request should fail.");

	assert_eq!(held, "T2");
	assert_eq!(err.as_server().map(|e| e.error.as_str()), Some("insufficient_capabilities"));

	// Value form keeps the rotation on the error.
	let err = discovered
		.access_token()
		.api_get_access_token("T1", AccessTokenOptions::new(ISSUER))
		.await
		.expect_err("Request should fail.");

	assert_eq!(err.token_update().map(|u| u.mytoken.expose()), Some("T2"));
}

#[tokio::test]
async fn value_form_reports_rotation_without_touching_input() {
	let server = MockServer::start_async().await;
	let discovered = discover(&server).await;

	server
		.mock_async(|when, then| {
			when.method(POST).path("/api/v0/token/my").json_body(json!({
				"grant_type": "mytoken",
				"mytoken": "T1",
				"oidc_issuer": ISSUER,
				"name": "ci",
			}));
			then.status(200).json_body(json!({
				"mytoken": "SUB-1",
				"mom_id": "m-42",
				"capabilities": ["AT", "tokeninfo"],
				"token_update": { "mytoken": "T2", "expires_in": 86400 },
			}));
		})
		.await;

	let rotated = discovered
		.mytoken()
		.api_from_mytoken("T1", MytokenRequest::new(ISSUER).with_name("ci"))
		.await
		.expect("Sub-token request should succeed.");

	assert_eq!(rotated.new_token(), Some("T2"));
	assert_eq!(rotated.value.token().map(|t| t.expose()), Some("SUB-1"));
	assert!(rotated.value.capabilities.as_ref().is_some_and(|c| c.contains("tokeninfo")));
	assert!(rotated.value.token_update.is_none());
}

#[tokio::test]
async fn tokeninfo_actions_post_action_and_token() {
	let server = MockServer::start_async().await;
	let discovered = discover(&server).await;

	server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/v0/tokeninfo")
				.json_body(json!({ "action": "introspect", "mytoken": "T1" }));
			then.status(200).json_body(json!({ "valid": true, "token": { "jti": "abc" } }));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/v0/tokeninfo")
				.json_body(json!({ "action": "event_history", "mytoken": "T1" }));
			then.status(200).json_body(json!({
				"events": [
					{ "event": "created", "time": 1_700_000_000, "ip": "192.0.2.1" },
					{ "event": "AT_created", "time": 1_700_000_060, "comment": "ci" },
				],
				"token_update": { "mytoken": "T2" },
			}));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/v0/tokeninfo")
				.json_body(json!({ "action": "subtoken_tree", "mytoken": "T2" }));
			then.status(200).json_body(json!({
				"mytokens": {
					"token": { "name": "root", "created": 1_700_000_000 },
					"children": [{ "token": { "name": "child", "created": 1_700_000_100 } }],
				},
			}));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/v0/tokeninfo")
				.json_body(json!({ "action": "list_mytokens", "mytoken": "T2" }));
			then.status(200).json_body(json!({
				"mytokens": [{ "token": { "name": "root", "created": 1_700_000_000 } }],
				"token_update": { "mytoken": "T3" },
			}));
		})
		.await;

	let tokeninfo = discovered.tokeninfo();
	let introspection = tokeninfo.introspect("T1").await.expect("Introspection should succeed.");

	assert!(introspection.valid);

	let mut held = String::from("T1");
	let history = tokeninfo.history(&mut held).await.expect("History should succeed.");

	assert_eq!(held, "T2");
	assert_eq!(history.len(), 2);
	assert_eq!(history[1].comment.as_deref(), Some("ci"));

	let tree = tokeninfo.subtokens(&mut held).await.expect("Subtoken tree should succeed.");

	assert_eq!(held, "T2");
	assert_eq!(tree.len(), 2);

	let listing = tokeninfo.list_mytokens(&mut held).await.expect("Listing should succeed.");

	assert_eq!(held, "T3");
	assert_eq!(listing.len(), 1);
}

#[tokio::test]
async fn transfer_code_creation_rotates_token() {
	let server = MockServer::start_async().await;
	let discovered = discover(&server).await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/v0/token/transfer").json_body(json!({ "mytoken": "T1" }));
			then.status(200).json_body(json!({
				"transfer_code": "TC-9",
				"expires_in": 300,
				"token_update": { "mytoken": "T2" },
			}));
		})
		.await;
	let mut held = String::from("T1");
	let code = discovered.transfer().create(&mut held).await.expect("Transfer code should be created.");

	mock.assert_async().await;

	assert_eq!(code.expose(), "TC-9");
	assert_eq!(held, "T2");
}

#[tokio::test]
async fn revocation_accepts_empty_response() {
	let server = MockServer::start_async().await;
	let discovered = discover(&server).await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/v0/token/revoke").json_body(json!({
				"token": "T1",
				"recursive": true,
				"oidc_issuer": ISSUER,
			}));
			then.status(204);
		})
		.await;

	discovered
		.revocation()
		.revoke("T1", Some(ISSUER), true)
		.await
		.expect("Revocation should succeed.");

	mock.assert_async().await;
}

#[tokio::test]
async fn undecodable_error_body_is_a_decode_error() {
	let server = MockServer::start_async().await;
	let discovered = discover(&server).await;

	server
		.mock_async(|when, then| {
			when.method(POST).path("/api/v0/token/revoke");
			then.status(502).body("<html>bad gateway</html>");
		})
		.await;

	let err = discovered
		.revocation()
		.revoke("T1", None, false)
		.await
		.expect_err("Gateway failure should surface.");

	assert!(matches!(err, Error::Decode(_)), "unexpected error: {err:?}");
}
