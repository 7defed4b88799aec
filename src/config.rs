//! Explicit client configuration threaded from the server handle into every request.

// self
use crate::_prelude::*;

/// User agent sent when the caller does not configure one.
pub const DEFAULT_USER_AGENT: &str = concat!("mytoken-client/", env!("CARGO_PKG_VERSION"));

/// Settings shared by every endpoint handle of a [`MytokenServer`](crate::server::MytokenServer).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
	/// Value of the `User-Agent` header.
	pub user_agent: String,
	/// Extra headers attached to every request.
	pub extra_headers: Vec<(String, String)>,
}
impl ClientConfig {
	/// Overrides the user agent.
	pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
		self.user_agent = user_agent.into();

		self
	}

	/// Adds a header sent with every request.
	pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.extra_headers.push((name.into(), value.into()));

		self
	}
}
impl Default for ClientConfig {
	fn default() -> Self {
		Self { user_agent: DEFAULT_USER_AGENT.into(), extra_headers: Vec::new() }
	}
}
