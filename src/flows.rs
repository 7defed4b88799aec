//! Orchestration shared by every out-of-band authorization flow.
//!
//! A flow is initiated by an endpoint (authorization code, SSH key addition), which yields a
//! URL for the user and a [`PollingInfo`]. [`run_polling_flow`] then announces the URL, drives
//! the polling engine with the endpoint's attempt closure, and reports completion through the
//! caller's [`PollingCallbacks`].

// self
use crate::{
	_prelude::*,
	api::PollingInfo,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	polling::{self, AttemptOutcome, PollOptions},
};

/// Hooks invoked while a flow runs. Every method defaults to a no-op.
pub trait PollingCallbacks
where
	Self: Send,
{
	/// Called once with the URL the user must visit, before the first polling attempt.
	///
	/// Returning an error aborts the flow; no polling request is made and the error is returned
	/// to the caller unchanged.
	fn on_started(&mut self, _url: &Url) -> Result<()> {
		Ok(())
	}

	/// Called after every attempt that found the authorization still pending.
	///
	/// `interval_seconds` is the interval announced by the server, which may be zero.
	fn on_progress(&mut self, _interval_seconds: u64, _attempt_index: usize) {}

	/// Called once when the flow succeeded, before the payload is returned.
	fn on_completed(&mut self) {}
}
impl<T> PollingCallbacks for &mut T
where
	T: ?Sized + PollingCallbacks,
{
	fn on_started(&mut self, url: &Url) -> Result<()> {
		(**self).on_started(url)
	}

	fn on_progress(&mut self, interval_seconds: u64, attempt_index: usize) {
		(**self).on_progress(interval_seconds, attempt_index)
	}

	fn on_completed(&mut self) {
		(**self).on_completed()
	}
}

/// Callbacks that ignore every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentCallbacks;
impl PollingCallbacks for SilentCallbacks {}

/// Announces `url`, polls with `attempt`, and reports completion.
///
/// The `flow` label overrides [`PollOptions::flow`].
pub async fn run_polling_flow<T, A, Fut, CB>(
	flow: FlowKind,
	url: &Url,
	info: PollingInfo,
	options: &PollOptions,
	callbacks: &mut CB,
	attempt: A,
) -> Result<T>
where
	A: FnMut(String) -> Fut,
	Fut: Future<Output = AttemptOutcome<T>>,
	CB: ?Sized + PollingCallbacks,
{
	let span = FlowSpan::new(flow, "run_polling_flow");

	obs::record_flow_outcome(flow, FlowOutcome::Attempt);

	let result = span
		.instrument(async move {
			callbacks.on_started(url)?;

			let options = options.clone().with_flow(flow);
			let value = polling::poll(info, &options, attempt, |interval, index| {
				callbacks.on_progress(interval, index)
			})
			.await?;

			callbacks.on_completed();

			Ok(value)
		})
		.await;

	match &result {
		Ok(_) => obs::record_flow_outcome(flow, FlowOutcome::Success),
		Err(_) => obs::record_flow_outcome(flow, FlowOutcome::Failure),
	}

	result
}
