//! Access token endpoint payloads.

// self
use crate::{
	_prelude::*,
	api::{GrantType, TokenUpdate},
	secret::TokenSecret,
};

/// Redemption of a mytoken for an upstream access token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTokenRequest {
	/// Issuer URL of the upstream OpenID provider.
	#[serde(rename = "oidc_issuer", default, skip_serializing_if = "Option::is_none")]
	pub issuer: Option<String>,
	/// Always [`GrantType::Mytoken`].
	pub grant_type: GrantType,
	/// Mytoken to redeem.
	pub mytoken: String,
	/// Space-delimited scopes requested for the access token.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub scope: Option<String>,
	/// Space-delimited audiences requested for the access token.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub audience: Option<String>,
	/// Free-form note stored in the token's event history.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub comment: Option<String>,
}

/// Caller-side options for an access token request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AccessTokenOptions {
	/// Issuer URL of the upstream OpenID provider.
	pub issuer: Option<String>,
	/// Requested scopes.
	pub scopes: Vec<String>,
	/// Requested audiences.
	pub audiences: Vec<String>,
	/// Note stored in the token's event history.
	pub comment: Option<String>,
}
impl AccessTokenOptions {
	/// Options targeting the provided issuer.
	pub fn new(issuer: impl Into<String>) -> Self {
		Self { issuer: Some(issuer.into()), ..Default::default() }
	}

	/// Adds requested scopes.
	pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.scopes.extend(scopes.into_iter().map(Into::into));

		self
	}

	/// Adds requested audiences.
	pub fn with_audiences<I, S>(mut self, audiences: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.audiences.extend(audiences.into_iter().map(Into::into));

		self
	}

	/// Sets the event history comment.
	pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
		self.comment = Some(comment.into());

		self
	}

	/// Builds the wire request for the provided mytoken.
	pub fn into_request(self, mytoken: impl Into<String>) -> AccessTokenRequest {
		AccessTokenRequest {
			issuer: self.issuer,
			grant_type: GrantType::Mytoken,
			mytoken: mytoken.into(),
			scope: join(&self.scopes),
			audience: join(&self.audiences),
			comment: self.comment,
		}
	}
}

/// An upstream access token obtained with a mytoken.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTokenResponse {
	/// The access token.
	pub access_token: TokenSecret,
	/// Token type, normally `Bearer`.
	#[serde(default)]
	pub token_type: String,
	/// Lifetime in seconds.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub expires_in: Option<u64>,
	/// Granted scopes.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub scope: Option<String>,
	/// Granted audiences.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub audience: Option<String>,
	/// Rotation envelope for the presented mytoken.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub token_update: Option<TokenUpdate>,
}

fn join(values: &[String]) -> Option<String> {
	if values.is_empty() { None } else { Some(values.join(" ")) }
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn options_join_scopes_and_audiences() {
		let request = AccessTokenOptions::new("https://op.example.com")
			.with_scopes(["openid", "storage.read"])
			.with_audiences(["https://storage.example.com"])
			.with_comment("nightly sync")
			.into_request("MT");
		let value = serde_json::to_value(&request).expect("Request should serialize.");

		assert_eq!(
			value,
			serde_json::json!({
				"oidc_issuer": "https://op.example.com",
				"grant_type": "mytoken",
				"mytoken": "MT",
				"scope": "openid storage.read",
				"audience": "https://storage.example.com",
				"comment": "nightly sync",
			})
		);
	}

	#[test]
	fn empty_options_omit_optional_fields() {
		let value = serde_json::to_value(AccessTokenOptions::default().into_request("MT"))
			.expect("Request should serialize.");

		assert_eq!(value, serde_json::json!({ "grant_type": "mytoken", "mytoken": "MT" }));
	}
}
