//! Polling descriptors and polling code redemption requests.

// std
use std::time::Duration as StdDuration;
// self
use crate::{_prelude::*, api::GrantType};

/// Interval applied when the server does not announce one.
pub const DEFAULT_POLLING_INTERVAL: StdDuration = StdDuration::from_secs(5);

/// Polling descriptor returned when a flow is initiated.
///
/// Immutable once received; the polling engine takes it by value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollingInfo {
	/// Opaque code identifying the pending authorization.
	pub polling_code: String,
	/// Seconds between two polling attempts; zero means "use the default".
	#[serde(default)]
	pub polling_interval: u64,
	/// Seconds until the polling code expires.
	pub polling_code_expires_in: u64,
}
impl PollingInfo {
	/// Creates a descriptor from its parts.
	pub fn new(polling_code: impl Into<String>, polling_interval: u64, expires_in: u64) -> Self {
		Self { polling_code: polling_code.into(), polling_interval, polling_code_expires_in: expires_in }
	}

	/// Interval the engine waits between attempts, substituting `default` for zero.
	pub fn effective_interval(&self, default: StdDuration) -> StdDuration {
		match self.polling_interval {
			0 => default,
			secs => StdDuration::from_secs(secs),
		}
	}

	/// Lifetime of the polling code.
	pub fn expires_in(&self) -> StdDuration {
		StdDuration::from_secs(self.polling_code_expires_in)
	}
}

/// Single redemption attempt for a polling code.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollingCodeRequest {
	/// Always [`GrantType::PollingCode`].
	pub grant_type: GrantType,
	/// Code taken from [`PollingInfo::polling_code`].
	pub polling_code: String,
}
impl PollingCodeRequest {
	/// Builds the request for the provided code.
	pub fn new(polling_code: impl Into<String>) -> Self {
		Self { grant_type: GrantType::PollingCode, polling_code: polling_code.into() }
	}
}
