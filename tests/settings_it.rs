#![cfg(feature = "reqwest")]

mod common;

// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use common::*;
use mytoken_client::{
	api::{GrantType, SshKeyOptions, SshKeySelector},
	polling::PollOptions,
};

const PUBLIC_KEY: &str = "ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAIFixture laptop";

#[tokio::test]
async fn grants_listing_uses_bearer_token() {
	let server = MockServer::start_async().await;
	let discovered = discover(&server).await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/v0/settings/grants").header("authorization", "Bearer T1");
			then.status(200).json_body(json!({
				"grant_types": [{ "grant_type": "ssh", "enabled": true }],
				"token_update": { "mytoken": "T2" },
			}));
		})
		.await;
	let mut held = String::from("T1");
	let grants = discovered
		.require_user_settings()
		.expect("Settings should be discovered.")
		.grants()
		.get(&mut held)
		.await
		.expect("Grant listing should succeed.");

	mock.assert_async().await;

	assert_eq!(held, "T2");
	assert_eq!(grants.len(), 1);
	assert_eq!(grants[0].grant_type, GrantType::Ssh);
	assert!(grants[0].enabled);
}

#[tokio::test]
async fn grant_changes_use_post_and_delete() {
	let server = MockServer::start_async().await;
	let discovered = discover(&server).await;
	let enable = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/v0/settings/grants")
				.json_body(json!({ "grant_type": "ssh", "mytoken": "T1" }));
			then.status(204);
		})
		.await;
	let disable = server
		.mock_async(|when, then| {
			when.method(DELETE)
				.path("/api/v0/settings/grants")
				.json_body(json!({ "grant_type": "ssh", "mytoken": "T1" }));
			then.status(200).json_body(json!({ "token_update": { "mytoken": "T2" } }));
		})
		.await;
	let grants = discovered.require_user_settings().expect("Settings should be discovered.").grants();
	let mut held = String::from("T1");

	grants.enable_grant(&mut held, GrantType::Ssh).await.expect("Enabling should succeed.");

	assert_eq!(held, "T1");

	grants.disable_grant(&mut held, GrantType::Ssh).await.expect("Disabling should succeed.");

	assert_eq!(held, "T2");

	enable.assert_async().await;
	disable.assert_async().await;
}

#[tokio::test]
async fn ssh_keys_can_be_listed_and_removed() {
	let server = MockServer::start_async().await;
	let discovered = discover(&server).await;

	server
		.mock_async(|when, then| {
			when.method(GET).path("/api/v0/settings/grants/ssh").header("authorization", "Bearer T1");
			then.status(200).json_body(json!({
				"ssh_keys": [{
					"name": "laptop",
					"ssh_key_fingerprint": "SHA256:abc",
					"created": 1_700_000_000,
				}],
				"grant_enabled": true,
			}));
		})
		.await;

	let remove = server
		.mock_async(|when, then| {
			when.method(DELETE)
				.path("/api/v0/settings/grants/ssh")
				.json_body(json!({ "mytoken": "T1", "ssh_key_fingerprint": "SHA256:abc" }));
			then.status(200).json_body(json!({ "token_update": { "mytoken": "T2" } }));
		})
		.await;
	let ssh = discovered.require_user_settings().expect("Settings should be discovered.").ssh();
	let mut held = String::from("T1");
	let info = ssh.get(&mut held).await.expect("Key listing should succeed.");

	assert!(info.grant_enabled);
	assert_eq!(info.ssh_keys[0].ssh_key_fingerprint, "SHA256:abc");
	assert!(info.ssh_keys[0].last_used.is_none());

	ssh.remove(&mut held, SshKeySelector::Fingerprint("SHA256:abc".into()))
		.await
		.expect("Key removal should succeed.");

	assert_eq!(held, "T2");

	remove.assert_async().await;
}

#[tokio::test]
async fn ssh_key_addition_runs_consent_flow() {
	let server = MockServer::start_async().await;
	let discovered = discover(&server).await;
	let consent_uri = server.url("/c/ssh");
	let init = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/v0/settings/grants/ssh").json_body(json!({
				"grant_type": "mytoken",
				"mytoken": "T1",
				"ssh_key": PUBLIC_KEY,
				"name": "laptop",
			}));
			then.status(200).json_body(json!({
				"consent_uri": consent_uri,
				"polling_info": polling_info("ssh-code", 1, 10),
				"token_update": { "mytoken": "T2" },
			}));
		})
		.await;
	let poll = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/v0/settings/grants/ssh")
				.json_body(json!({ "grant_type": "polling_code", "polling_code": "ssh-code" }));
			then.status(200).json_body(json!({
				"ssh_user": "mt-user-1",
				"ssh_host_config": "Host mytoken\n  User mt-user-1",
				"token_update": { "mytoken": "T3" },
			}));
		})
		.await;
	let mut held = String::from("T1");
	let mut recorder = Recorder::default();
	let result = discovered
		.require_user_settings()
		.expect("Settings should be discovered.")
		.ssh()
		.add(
			&mut held,
			SshKeyOptions::new(PUBLIC_KEY).with_name("laptop"),
			&PollOptions::default(),
			&mut recorder,
		)
		.await
		.expect("Key addition should complete.");

	init.assert_async().await;
	poll.assert_calls_async(1).await;

	assert_eq!(held, "T3");
	assert!(result.token_update.is_none(), "Rotation should be consumed.");
	assert_eq!(result.ssh_user, "mt-user-1");
	assert_eq!(recorder.started[0].as_str(), consent_uri);
	assert!(recorder.progress.is_empty());
	assert_eq!(recorder.completed, 1);
}

#[tokio::test]
async fn ssh_key_addition_applies_rotation_from_failed_poll() {
	let server = MockServer::start_async().await;
	let discovered = discover(&server).await;
	let consent_uri = server.url("/c/ssh");

	server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/v0/settings/grants/ssh")
				.json_body(json!({ "grant_type": "mytoken", "mytoken": "T1", "ssh_key": PUBLIC_KEY }));
			then.status(200).json_body(json!({
				"consent_uri": consent_uri,
				"polling_info": polling_info("ssh-code", 1, 10),
				"token_update": { "mytoken": "T2" },
			}));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/v0/settings/grants/ssh")
				.json_body(json!({ "grant_type": "polling_code", "polling_code": "ssh-code" }));
			then.status(400).json_body(json!({
				"error": "access_denied",
				"error_description": "user declined the key",
				"token_update": { "mytoken": "T3" },
			}));
		})
		.await;

	let mut held = String::from("T1");
	let mut recorder = Recorder::default();
	let err = discovered
		.require_user_settings()
		.expect("Settings should be discovered.")
		.ssh()
		.add(&mut held, SshKeyOptions::new(PUBLIC_KEY), &PollOptions::default(), &mut recorder)
		.await
		.expect_err("Declined key should fail.");

	assert_eq!(err.as_server().map(|e| e.error.as_str()), Some("access_denied"));
	assert_eq!(held, "T3");
	assert_eq!(recorder.completed, 0);
}
