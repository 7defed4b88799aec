//! Capability lists and usage restrictions attached to mytokens.

// std
use std::{cmp::Ordering, slice::Iter};
// crates.io
use serde::{Deserializer, Serializer, de::Error as DeError, ser::SerializeSeq};
// self
use crate::_prelude::*;

/// Errors emitted when validating capabilities.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum CapabilityError {
	/// Empty capability entries are not allowed.
	#[error("Capability entries cannot be empty.")]
	Empty,
	/// Capabilities cannot contain embedded whitespace characters.
	#[error("Capability contains whitespace: {capability}.")]
	ContainsWhitespace {
		/// The offending capability string.
		capability: String,
	},
}

/// Normalized set of mytoken capabilities.
///
/// Entries are deduplicated and sorted so two lists granting the same rights compare equal.
/// Capabilities are plain strings on the wire (`AT`, `tokeninfo`, `read@settings`, ...); the
/// constants on this type cover the ones most clients request.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Capabilities(Arc<[String]>);
impl Capabilities {
	/// Obtain access tokens.
	pub const ACCESS_TOKEN: &'static str = "AT";
	/// Create sub-mytokens.
	pub const CREATE_MYTOKEN: &'static str = "create_mytoken";
	/// Use every tokeninfo action.
	pub const TOKENINFO: &'static str = "tokeninfo";
	/// Revoke any mytoken of the user.
	pub const REVOKE_ANY_TOKEN: &'static str = "revoke_any_token";
	/// Read and write user settings.
	pub const SETTINGS: &'static str = "settings";
	/// Read user settings.
	pub const READ_SETTINGS: &'static str = "read@settings";

	/// Creates a normalized capability set from any iterator.
	pub fn new<I, S>(capabilities: I) -> Result<Self, CapabilityError>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		normalize(capabilities).map(Self)
	}

	/// Number of distinct capabilities.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true if no capabilities are defined.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Returns true if the set contains the provided capability.
	pub fn contains(&self, capability: &str) -> bool {
		self.0.binary_search_by(|candidate| candidate.as_str().cmp(capability)).is_ok()
	}

	/// Iterator over normalized capabilities.
	pub fn iter(&self) -> CapabilityIter<'_> {
		CapabilityIter { inner: self.0.iter() }
	}
}
impl PartialOrd for Capabilities {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}
impl Ord for Capabilities {
	fn cmp(&self, other: &Self) -> Ordering {
		self.0.cmp(&other.0)
	}
}
impl Debug for Capabilities {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("Capabilities").field(&self.0).finish()
	}
}
impl Display for Capabilities {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0.join(" "))
	}
}
impl FromStr for Capabilities {
	type Err = CapabilityError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		if s.is_empty() {
			return Ok(Self::default());
		}
		if s.chars().all(char::is_whitespace) {
			return Err(CapabilityError::Empty);
		}

		Self::new(s.split_whitespace())
	}
}
impl<'a> IntoIterator for &'a Capabilities {
	type IntoIter = CapabilityIter<'a>;
	type Item = &'a str;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}
impl Serialize for Capabilities {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		let mut seq = serializer.serialize_seq(Some(self.0.len()))?;

		for capability in self.0.iter() {
			seq.serialize_element(capability)?;
		}

		seq.end()
	}
}
impl<'de> Deserialize<'de> for Capabilities {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let values = <Vec<String>>::deserialize(deserializer)?;

		Capabilities::new(values).map_err(DeError::custom)
	}
}

/// Iterator over capability strings.
#[derive(Debug)]
pub struct CapabilityIter<'a> {
	inner: Iter<'a, String>,
}
impl<'a> Iterator for CapabilityIter<'a> {
	type Item = &'a str;

	fn next(&mut self) -> Option<Self::Item> {
		self.inner.next().map(|s| s.as_str())
	}
}

/// One restriction clause. A mytoken may be used when any clause of its restrictions matches.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restriction {
	/// Not valid before this instant.
	#[serde(
		default,
		skip_serializing_if = "Option::is_none",
		with = "time::serde::timestamp::option"
	)]
	pub nbf: Option<OffsetDateTime>,
	/// Not valid after this instant.
	#[serde(
		default,
		skip_serializing_if = "Option::is_none",
		with = "time::serde::timestamp::option"
	)]
	pub exp: Option<OffsetDateTime>,
	/// Space-delimited scopes that access tokens may carry.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub scope: Option<String>,
	/// Audiences that access tokens may target.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub audience: Vec<String>,
	/// IP addresses or subnets the token may be used from.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub hosts: Vec<String>,
	/// Country codes the token may be used from.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub geoip_allow: Vec<String>,
	/// Country codes the token must not be used from.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub geoip_disallow: Vec<String>,
	/// Number of access tokens obtainable under this clause.
	#[serde(default, rename = "usages_AT", skip_serializing_if = "Option::is_none")]
	pub usages_access_token: Option<u64>,
	/// Number of other uses under this clause.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub usages_other: Option<u64>,
}
impl Restriction {
	/// Restricts the clause to the provided validity window.
	pub fn valid_between(mut self, nbf: OffsetDateTime, exp: OffsetDateTime) -> Self {
		self.nbf = Some(nbf);
		self.exp = Some(exp);

		self
	}

	/// Restricts the scopes obtainable under this clause.
	pub fn with_scope<I, S>(mut self, scopes: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let joined = scopes.into_iter().map(|s| s.as_ref().to_owned()).collect::<Vec<_>>();

		self.scope = if joined.is_empty() { None } else { Some(joined.join(" ")) };

		self
	}

	/// Limits how many access tokens may be obtained under this clause.
	pub fn with_access_token_usages(mut self, usages: u64) -> Self {
		self.usages_access_token = Some(usages);

		self
	}
}

/// Ordered list of restriction clauses.
pub type Restrictions = Vec<Restriction>;

fn normalize<I, S>(capabilities: I) -> Result<Arc<[String]>, CapabilityError>
where
	I: IntoIterator<Item = S>,
	S: Into<String>,
{
	let mut set = BTreeSet::new();

	for capability in capabilities {
		let owned: String = capability.into();

		if owned.is_empty() {
			return Err(CapabilityError::Empty);
		}
		if owned.chars().any(char::is_whitespace) {
			return Err(CapabilityError::ContainsWhitespace { capability: owned });
		}

		set.insert(owned);
	}

	Ok(Arc::from(set.into_iter().collect::<Vec<_>>()))
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn capabilities_normalize_and_dedupe() {
		let lhs = Capabilities::new(["tokeninfo", "AT", "AT"])
			.expect("Left-hand capabilities should be valid.");
		let rhs = Capabilities::from_str("AT tokeninfo")
			.expect("Right-hand capabilities should parse.");

		assert_eq!(lhs, rhs);
		assert_eq!(lhs.len(), 2);
		assert!(lhs.contains(Capabilities::ACCESS_TOKEN));
		assert!(!lhs.contains(Capabilities::SETTINGS));
		assert_eq!(lhs.iter().collect::<Vec<_>>(), vec!["AT", "tokeninfo"]);
	}

	#[test]
	fn capabilities_reject_invalid_entries() {
		assert_eq!(Capabilities::new([""]), Err(CapabilityError::Empty));
		assert!(matches!(
			Capabilities::new(["read settings"]),
			Err(CapabilityError::ContainsWhitespace { .. })
		));
		assert!(Capabilities::from_str("").is_ok());
		assert!(Capabilities::from_str("  ").is_err());
		assert!(serde_json::from_str::<Capabilities>(r#"["AT", ""]"#).is_err());
	}

	#[test]
	fn restriction_omits_unset_fields() {
		let restriction = Restriction::default()
			.valid_between(
				OffsetDateTime::from_unix_timestamp(1_700_000_000)
					.expect("Fixture timestamp should be valid."),
				OffsetDateTime::from_unix_timestamp(1_700_003_600)
					.expect("Fixture timestamp should be valid."),
			)
			.with_scope(["openid", "profile"])
			.with_access_token_usages(3);
		let value = serde_json::to_value(&restriction).expect("Restriction should serialize.");

		assert_eq!(
			value,
			serde_json::json!({
				"nbf": 1_700_000_000,
				"exp": 1_700_003_600,
				"scope": "openid profile",
				"usages_AT": 3,
			})
		);
	}
}
