//! User settings, grant type, and SSH grant payloads.

// self
use crate::{
	_prelude::*,
	api::{Capabilities, GrantType, PollingInfo, Restrictions, TokenUpdate},
};

/// Metadata document served by the user settings endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsMetadata {
	/// Endpoint for enabling and disabling grant types.
	pub grant_type_endpoint: Url,
	/// Endpoint for SSH key management, when advertised separately.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub ssh_endpoint: Option<Url>,
}

/// Enablement state of one grant type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantTypeInfo {
	/// Grant type.
	pub grant_type: GrantType,
	/// Whether the user enabled it.
	pub enabled: bool,
}

/// Response listing the user's grant types.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantTypeInfoResponse {
	/// Grant types and their state.
	#[serde(default)]
	pub grant_types: Vec<GrantTypeInfo>,
	/// Rotation envelope for the presented mytoken.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub token_update: Option<TokenUpdate>,
}

/// Request enabling or disabling a grant type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantTypeRequest {
	/// Grant type to change.
	pub grant_type: GrantType,
	/// Mytoken authorizing the change.
	pub mytoken: String,
}

/// Metadata about one registered SSH key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SshKeyInfo {
	/// Key name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// SHA-256 fingerprint of the public key.
	pub ssh_key_fingerprint: String,
	/// Registration time.
	#[serde(with = "time::serde::timestamp")]
	pub created: OffsetDateTime,
	/// Last time the key was used.
	#[serde(default, skip_serializing_if = "Option::is_none", with = "time::serde::timestamp::option")]
	pub last_used: Option<OffsetDateTime>,
}

/// Response listing the user's SSH keys.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SshInfoResponse {
	/// Registered keys.
	#[serde(default)]
	pub ssh_keys: Vec<SshKeyInfo>,
	/// Whether the SSH grant is enabled.
	#[serde(default)]
	pub grant_enabled: bool,
	/// Rotation envelope for the presented mytoken.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub token_update: Option<TokenUpdate>,
}

/// Request removing an SSH key by fingerprint or by public key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SshKeyDeleteRequest {
	/// Mytoken authorizing the removal.
	pub mytoken: String,
	/// Full public key.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub ssh_key: Option<String>,
	/// SHA-256 fingerprint of the public key.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub ssh_key_fingerprint: Option<String>,
}

/// Selects the SSH key to remove.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SshKeySelector {
	/// Match by SHA-256 fingerprint.
	Fingerprint(String),
	/// Match by full public key.
	PublicKey(String),
}

/// Request registering a new SSH key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SshKeyAddRequest {
	/// Always [`GrantType::Mytoken`].
	pub grant_type: GrantType,
	/// Mytoken authorizing the addition.
	pub mytoken: String,
	/// Public key to register.
	pub ssh_key: String,
	/// Key name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// Restrictions of mytokens obtained with this key.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub restrictions: Restrictions,
	/// Capabilities of mytokens obtained with this key.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub capabilities: Option<Capabilities>,
}

/// Caller-side description of an SSH key to register.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SshKeyOptions {
	/// Public key to register.
	pub ssh_key: String,
	/// Key name.
	pub name: Option<String>,
	/// Restrictions of mytokens obtained with this key.
	pub restrictions: Restrictions,
	/// Capabilities of mytokens obtained with this key.
	pub capabilities: Option<Capabilities>,
}
impl SshKeyOptions {
	/// Options registering the provided public key.
	pub fn new(ssh_key: impl Into<String>) -> Self {
		Self { ssh_key: ssh_key.into(), ..Default::default() }
	}

	/// Sets the key name.
	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());

		self
	}

	/// Sets the capabilities.
	pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
		self.capabilities = Some(capabilities);

		self
	}

	/// Builds the wire request for the provided mytoken.
	pub fn into_request(self, mytoken: impl Into<String>) -> SshKeyAddRequest {
		SshKeyAddRequest {
			grant_type: GrantType::Mytoken,
			mytoken: mytoken.into(),
			ssh_key: self.ssh_key,
			name: self.name,
			restrictions: self.restrictions,
			capabilities: self.capabilities,
		}
	}
}

/// Response to [`SshKeyAddRequest`]; the user must confirm the key out of band.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SshKeyAddResponse {
	/// URL the user must open to confirm the key.
	#[serde(alias = "authorization_url")]
	pub consent_uri: Url,
	/// Descriptor for polling the final result.
	pub polling_info: PollingInfo,
	/// Rotation envelope for the presented mytoken.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub token_update: Option<TokenUpdate>,
}

/// Final result of an SSH key addition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SshKeyAddFinalResponse {
	/// Username to use when connecting to the server over SSH.
	pub ssh_user: String,
	/// Ready-made `ssh_config` host block.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub ssh_host_config: Option<String>,
	/// Rotation envelope for the mytoken that started the flow.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub token_update: Option<TokenUpdate>,
}
