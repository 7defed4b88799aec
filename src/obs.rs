//! Optional observability helpers for mytoken flows.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `mytoken_client.flow` with the `flow` and
//!   `stage` (call site) fields, plus a debug event per polling attempt.
//! - Enable `metrics` to increment the `mytoken_client_flow_total` counter for every
//!   attempt/success/failure, labeled by `flow` + `outcome`, and the
//!   `mytoken_client_poll_attempt_total` counter labeled by `flow` + `result`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Out-of-band flows observed by the client.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FlowKind {
	/// Authorization-code flow yielding a mytoken.
	AuthorizationCode,
	/// SSH key addition confirmed out of band.
	SshKeyAddition,
	/// Transfer-code exchange.
	TransferCode,
	/// Polling driven directly by the caller.
	#[default]
	Polling,
}
impl FlowKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowKind::AuthorizationCode => "authorization_code",
			FlowKind::SshKeyAddition => "ssh_key_addition",
			FlowKind::TransferCode => "transfer_code",
			FlowKind::Polling => "polling",
		}
	}
}
impl Display for FlowKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each flow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowOutcome {
	/// Entry to a flow helper.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl FlowOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowOutcome::Attempt => "attempt",
			FlowOutcome::Success => "success",
			FlowOutcome::Failure => "failure",
		}
	}
}
impl Display for FlowOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Result labels recorded for each polling attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttemptResult {
	/// The server produced the payload.
	Obtained,
	/// The authorization is still pending.
	Pending,
	/// The attempt failed terminally.
	Failed,
}
impl AttemptResult {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			AttemptResult::Obtained => "obtained",
			AttemptResult::Pending => "pending",
			AttemptResult::Failed => "failed",
		}
	}
}
impl Display for AttemptResult {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
