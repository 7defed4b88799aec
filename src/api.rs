//! Wire types exchanged with a mytoken server.
//!
//! Field names follow the server's JSON exactly. Unknown response fields are ignored so
//! newer servers keep working, and optional request fields are omitted when unset.

pub mod access_token;
pub mod capabilities;
pub mod configuration;
pub mod grant;
pub mod mytoken;
pub mod polling;
pub mod settings;
pub mod tokeninfo;

pub use access_token::*;
pub use capabilities::*;
pub use configuration::*;
pub use grant::*;
pub use mytoken::*;
pub use polling::*;
pub use settings::*;
pub use tokeninfo::*;

// self
use crate::{_prelude::*, secret::TokenSecret};

/// Error identifier signalling that the user has not completed the authorization yet.
pub const ERROR_AUTHORIZATION_PENDING: &str = "authorization_pending";
/// Error identifier returned for unknown or unsupported resources.
pub const ERROR_NOT_FOUND: &str = "not_found";

/// OAuth-style error body returned with 4xx/5xx responses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
	/// Machine-readable error identifier.
	pub error: String,
	/// Human-readable detail.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error_description: Option<String>,
	/// Replacement mytoken, when the server rotated it while rejecting the request.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub token_update: Option<TokenUpdate>,
}

/// Token rotation envelope: the server replaced the presented mytoken with a new one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUpdate {
	/// The replacement mytoken. The presented one must not be used again.
	pub mytoken: TokenSecret,
	/// Representation of the new mytoken.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub mytoken_type: Option<MytokenType>,
	/// Lifetime of the new mytoken in seconds.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub expires_in: Option<u64>,
}
impl TokenUpdate {
	/// Creates an envelope carrying only the replacement token.
	pub fn new(mytoken: TokenSecret) -> Self {
		Self { mytoken, mytoken_type: None, expires_in: None }
	}
}

/// Response of mutating endpoints whose only payload is a possible rotation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnlyTokenUpdateResponse {
	/// Rotation envelope.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub token_update: Option<TokenUpdate>,
}
