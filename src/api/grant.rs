//! Grant types and the protocol's enumerated wire values.

// self
use crate::_prelude::*;

/// Grant types understood by the mytoken endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantType {
	/// Present an existing mytoken (sub-token creation, access tokens, SSH key addition).
	Mytoken,
	/// Start an OpenID Connect flow at the upstream provider.
	OidcFlow,
	/// Redeem a polling code after an out-of-band authorization.
	PollingCode,
	/// Redeem a one-time transfer code.
	TransferCode,
	/// Authenticate with an SSH key (enabled per user through the grants endpoint).
	Ssh,
	/// Authenticate with an upstream access token.
	AccessToken,
	/// Authenticate with a private key JWT.
	PrivateKeyJwt,
}
impl GrantType {
	/// Returns the wire identifier for the grant type.
	pub const fn as_str(self) -> &'static str {
		match self {
			GrantType::Mytoken => "mytoken",
			GrantType::OidcFlow => "oidc_flow",
			GrantType::PollingCode => "polling_code",
			GrantType::TransferCode => "transfer_code",
			GrantType::Ssh => "ssh",
			GrantType::AccessToken => "access_token",
			GrantType::PrivateKeyJwt => "private_key_jwt",
		}
	}
}
impl Display for GrantType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// OpenID Connect flows a mytoken server can drive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OidcFlow {
	/// Authorization code flow completed in the user's browser.
	#[default]
	AuthorizationCode,
}

/// Where the server redirects the browser once the authorization completes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedirectType {
	/// Web clients receive the token through a redirect.
	Web,
	/// Native clients poll for the token; the browser lands on a static page.
	#[default]
	Native,
}

/// Representation requested for a newly issued mytoken.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MytokenType {
	/// Full JWT mytoken.
	#[default]
	Token,
	/// Opaque short token referencing the JWT on the server.
	ShortToken,
	/// One-time transfer code redeemable for the mytoken.
	TransferCode,
}
impl MytokenType {
	/// Returns the wire identifier for the response type.
	pub const fn as_str(self) -> &'static str {
		match self {
			MytokenType::Token => "token",
			MytokenType::ShortToken => "short_token",
			MytokenType::TransferCode => "transfer_code",
		}
	}
}
