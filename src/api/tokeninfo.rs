//! Tokeninfo and revocation endpoint payloads.

// self
use crate::{_prelude::*, api::TokenUpdate};

/// Actions supported by the tokeninfo endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokeninfoAction {
	/// Validate the token and return its content.
	Introspect,
	/// Return the token's event history.
	EventHistory,
	/// Return the tree of sub-tokens below the token.
	SubtokenTree,
	/// Return every mytoken of the user.
	ListMytokens,
}

/// Request sent to the tokeninfo endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfoRequest {
	/// Requested action.
	pub action: TokeninfoAction,
	/// Mytoken to inspect.
	pub mytoken: String,
}

/// Response to [`TokeninfoAction::Introspect`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TokeninfoIntrospectResponse {
	/// Whether the token is currently usable.
	pub valid: bool,
	/// Decoded token content; the shape is owned by the server.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub token: Option<serde_json::Value>,
}

/// One entry of a token's event history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEntry {
	/// Event identifier, e.g. `created` or `AT_created`.
	pub event: String,
	/// When the event happened.
	#[serde(with = "time::serde::timestamp")]
	pub time: OffsetDateTime,
	/// Free-form comment recorded with the event.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub comment: Option<String>,
	/// Client IP the event originated from.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub ip: Option<String>,
	/// Client user agent the event originated from.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub user_agent: Option<String>,
}

/// Response to [`TokeninfoAction::EventHistory`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokeninfoHistoryResponse {
	/// Events, oldest first.
	#[serde(default)]
	pub events: Vec<EventEntry>,
	/// Rotation envelope for the presented mytoken.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub token_update: Option<TokenUpdate>,
}

/// Metadata about one mytoken in a listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MytokenEntry {
	/// Management identifier.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub mom_id: Option<String>,
	/// Token name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// Creation time.
	#[serde(with = "time::serde::timestamp")]
	pub created: OffsetDateTime,
	/// Client IP the token was created from.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub ip: Option<String>,
}

/// A mytoken with its sub-tokens.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MytokenEntryTree {
	/// The token itself.
	pub token: MytokenEntry,
	/// Direct children.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub children: Vec<MytokenEntryTree>,
}
impl MytokenEntryTree {
	/// Number of tokens in the tree, including the root.
	pub fn len(&self) -> usize {
		1 + self.children.iter().map(MytokenEntryTree::len).sum::<usize>()
	}

	/// Always false; a tree holds at least its root.
	pub fn is_empty(&self) -> bool {
		false
	}
}

/// Response to [`TokeninfoAction::SubtokenTree`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokeninfoTreeResponse {
	/// The inspected token and its descendants.
	pub mytokens: MytokenEntryTree,
	/// Rotation envelope for the presented mytoken.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub token_update: Option<TokenUpdate>,
}

/// Response to [`TokeninfoAction::ListMytokens`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokeninfoListResponse {
	/// Every token tree of the user.
	#[serde(default)]
	pub mytokens: Vec<MytokenEntryTree>,
	/// Rotation envelope for the presented mytoken.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub token_update: Option<TokenUpdate>,
}

/// Request sent to the revocation endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevocationRequest {
	/// Token to revoke.
	pub token: String,
	/// Also revoke every sub-token.
	#[serde(default)]
	pub recursive: bool,
	/// Issuer URL of the upstream OpenID provider.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub oidc_issuer: Option<String>,
}
