//! Discovery document served at the well-known configuration path.

// self
use crate::_prelude::*;

/// Path of the discovery document relative to the server's base URL.
pub const WELL_KNOWN_CONFIGURATION_PATH: &str = ".well-known/mytoken-configuration";

/// OpenID provider a mytoken server can issue tokens for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportedProvider {
	/// Issuer URL.
	pub issuer: String,
	/// Display name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// Scopes the server may request at this provider.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub scopes_supported: Vec<String>,
}

/// Discovery document served at [`WELL_KNOWN_CONFIGURATION_PATH`].
///
/// Only the fields this client consumes are typed; everything else is kept in
/// [`extra`](Self::extra).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MytokenConfiguration {
	/// Server issuer identifier.
	pub issuer: String,
	/// Endpoint for obtaining access tokens.
	pub access_token_endpoint: Url,
	/// Endpoint for obtaining mytokens.
	pub mytoken_endpoint: Url,
	/// Endpoint for inspecting mytokens.
	pub tokeninfo_endpoint: Url,
	/// Endpoint for revoking mytokens.
	pub revocation_endpoint: Url,
	/// Endpoint for creating transfer codes.
	pub token_transfer_endpoint: Url,
	/// Endpoint for user settings, when the server supports them.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub usersettings_endpoint: Option<Url>,
	/// OpenID providers the server federates with.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub providers_supported: Vec<SupportedProvider>,
	/// Every other field of the document.
	#[serde(flatten)]
	pub extra: serde_json::Map<String, serde_json::Value>,
}
impl MytokenConfiguration {
	/// Returns the provider entry for the given issuer, ignoring a trailing slash.
	pub fn provider(&self, issuer: &str) -> Option<&SupportedProvider> {
		let wanted = issuer.trim_end_matches('/');

		self.providers_supported.iter().find(|p| p.issuer.trim_end_matches('/') == wanted)
	}
}
