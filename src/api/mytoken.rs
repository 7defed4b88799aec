//! Mytoken endpoint and transfer endpoint payloads.

// self
use crate::{
	_prelude::*,
	api::{
		Capabilities, GrantType, MytokenType, OidcFlow, PollingInfo, RedirectType, Restrictions,
		TokenUpdate,
	},
	secret::TokenSecret,
};

/// Properties of a mytoken to be issued, shared by every issuance grant.
///
/// Unset fields are left to server defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MytokenRequest {
	/// Issuer URL of the upstream OpenID provider.
	#[serde(rename = "oidc_issuer", default, skip_serializing_if = "Option::is_none")]
	pub issuer: Option<String>,
	/// Usage restrictions of the new mytoken.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub restrictions: Restrictions,
	/// Capabilities of the new mytoken.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub capabilities: Option<Capabilities>,
	/// Capabilities that sub-tokens of the new mytoken may have.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub subtoken_capabilities: Option<Capabilities>,
	/// Human-readable name shown in token listings.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// Representation of the issued token.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub response_type: Option<MytokenType>,
	/// Upper bound for the length of the issued token.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub max_token_len: Option<u32>,
}
impl MytokenRequest {
	/// Creates a request for a mytoken issued by the provided OpenID provider.
	pub fn new(issuer: impl Into<String>) -> Self {
		Self { issuer: Some(issuer.into()), ..Default::default() }
	}

	/// Sets the token name.
	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());

		self
	}

	/// Sets the restriction clauses.
	pub fn with_restrictions(mut self, restrictions: Restrictions) -> Self {
		self.restrictions = restrictions;

		self
	}

	/// Sets the capabilities.
	pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
		self.capabilities = Some(capabilities);

		self
	}

	/// Sets the capabilities granted to sub-tokens.
	pub fn with_subtoken_capabilities(mut self, capabilities: Capabilities) -> Self {
		self.subtoken_capabilities = Some(capabilities);

		self
	}

	/// Sets the response type.
	pub fn with_response_type(mut self, response_type: MytokenType) -> Self {
		self.response_type = Some(response_type);

		self
	}
}

/// Sub-token issuance by presenting an existing mytoken.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MytokenFromMytokenRequest {
	/// Always [`GrantType::Mytoken`].
	pub grant_type: GrantType,
	/// Parent mytoken.
	pub mytoken: String,
	/// Properties of the sub-token.
	#[serde(flatten)]
	pub request: MytokenRequest,
}
impl MytokenFromMytokenRequest {
	/// Builds the request for the provided parent token.
	pub fn new(mytoken: impl Into<String>, request: MytokenRequest) -> Self {
		Self { grant_type: GrantType::Mytoken, mytoken: mytoken.into(), request }
	}
}

/// Initiation of the authorization code flow.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthCodeFlowRequest {
	/// Always [`GrantType::OidcFlow`].
	pub grant_type: GrantType,
	/// Always [`OidcFlow::AuthorizationCode`].
	pub oidc_flow: OidcFlow,
	/// Native clients poll instead of receiving a redirect.
	pub redirect_type: RedirectType,
	/// Properties of the token to issue.
	#[serde(flatten)]
	pub request: MytokenRequest,
}
impl AuthCodeFlowRequest {
	/// Builds a native-client initiation request.
	pub fn new(request: MytokenRequest) -> Self {
		Self {
			grant_type: GrantType::OidcFlow,
			oidc_flow: OidcFlow::AuthorizationCode,
			redirect_type: RedirectType::Native,
			request,
		}
	}
}

/// Response to [`AuthCodeFlowRequest`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthCodeFlowResponse {
	/// URL the user must open to authorize the request.
	#[serde(alias = "consent_uri")]
	pub authorization_url: Url,
	/// Descriptor for polling the final token.
	pub polling_info: PollingInfo,
}

/// Redemption of a one-time transfer code.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeTransferCodeRequest {
	/// Always [`GrantType::TransferCode`].
	pub grant_type: GrantType,
	/// The transfer code.
	pub transfer_code: String,
}
impl ExchangeTransferCodeRequest {
	/// Builds the request for the provided code.
	pub fn new(transfer_code: impl Into<String>) -> Self {
		Self { grant_type: GrantType::TransferCode, transfer_code: transfer_code.into() }
	}
}

/// A newly issued mytoken.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MytokenResponse {
	/// The mytoken, unless a transfer code was requested.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub mytoken: Option<TokenSecret>,
	/// Representation of the issued token.
	#[serde(default)]
	pub mytoken_type: MytokenType,
	/// Transfer code, when requested as response type.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub transfer_code: Option<TokenSecret>,
	/// Lifetime of the token or transfer code in seconds.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub expires_in: Option<u64>,
	/// Management identifier of the issued token.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub mom_id: Option<String>,
	/// Restrictions the server applied.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub restrictions: Restrictions,
	/// Capabilities the server granted.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub capabilities: Option<Capabilities>,
	/// Capabilities granted to sub-tokens.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub subtoken_capabilities: Option<Capabilities>,
	/// Rotation envelope for the presented mytoken.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub token_update: Option<TokenUpdate>,
}
impl MytokenResponse {
	/// Returns the issued token or transfer code, whichever the server sent.
	pub fn token(&self) -> Option<&TokenSecret> {
		self.mytoken.as_ref().or(self.transfer_code.as_ref())
	}
}

/// Request for a transfer code that later yields the presented mytoken.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTransferCodeRequest {
	/// Mytoken to transfer.
	pub mytoken: String,
}

/// Response to [`CreateTransferCodeRequest`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferCodeResponse {
	/// The one-time transfer code.
	pub transfer_code: TokenSecret,
	/// Representation of the token behind the code.
	#[serde(default)]
	pub mytoken_type: MytokenType,
	/// Lifetime of the transfer code in seconds.
	#[serde(default)]
	pub expires_in: u64,
	/// Rotation envelope for the presented mytoken.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub token_update: Option<TokenUpdate>,
}
