//! Redacting wrapper for mytokens, access tokens, and transfer codes.

// self
use crate::_prelude::*;

/// Token material that never shows up in `Debug` or `Display` output.
///
/// The wrapper serializes transparently, so wire structs can hold it directly.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenSecret(String);
impl TokenSecret {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner token value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Consumes the wrapper and returns the inner token value.
	pub fn into_inner(self) -> String {
		self.0
	}

	/// Returns true if the secret holds no characters.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}
impl From<String> for TokenSecret {
	fn from(value: String) -> Self {
		Self(value)
	}
}
impl From<&str> for TokenSecret {
	fn from(value: &str) -> Self {
		Self(value.to_owned())
	}
}
impl AsRef<str> for TokenSecret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl PartialEq<str> for TokenSecret {
	fn eq(&self, other: &str) -> bool {
		self.0 == other
	}
}
impl PartialEq<&str> for TokenSecret {
	fn eq(&self, other: &&str) -> bool {
		self.0 == *other
	}
}
impl Debug for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("TokenSecret").field(&"<redacted>").finish()
	}
}
impl Display for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}
