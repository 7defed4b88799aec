//! The polling engine shared by every out-of-band authorization flow.
//!
//! A flow hands [`poll`] the [`PollingInfo`] it received from the server plus an attempt
//! closure. The engine waits one interval, asks the closure to redeem the polling code, and
//! repeats until the closure produces a terminal [`AttemptOutcome`], the polling code expires,
//! or the caller cancels.
//!
//! Attempts are scheduled on a fixed cadence anchored at entry: the k-th attempt happens at
//! `start + k * interval`. An attempt scheduled exactly at the expiry instant is still made;
//! one scheduled after it is not. With an expiry of `E` seconds and an effective interval of
//! `I` seconds the engine therefore makes at most `⌈E / I⌉` attempts.
//!
//! Slots missed while an attempt is in flight are skipped rather than replayed, and no attempt
//! starts once the clock has passed the expiry instant.

// std
use std::time::Duration as StdDuration;
// crates.io
use serde::de::DeserializeOwned;
use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;
// self
use crate::{
	_prelude::*,
	api::{DEFAULT_POLLING_INTERVAL, PollingCodeRequest, PollingInfo},
	http::MytokenHttpClient,
	obs::{self, AttemptResult, FlowKind},
	transport::{Method, Transport, TransportErrorMapper},
};

/// Result of a single polling attempt.
#[derive(Debug)]
pub enum AttemptOutcome<T> {
	/// The server released the payload.
	Obtained(T),
	/// The user has not finished the authorization yet.
	Pending,
	/// The attempt failed and polling must stop.
	Failed(Error),
}
impl<T> AttemptOutcome<T> {
	/// Classifies a request result: `authorization_pending` becomes [`Self::Pending`].
	pub fn from_result(result: Result<T>) -> Self {
		match result {
			Ok(value) => Self::Obtained(value),
			Err(e) if e.is_authorization_pending() => Self::Pending,
			Err(e) => Self::Failed(e),
		}
	}

	/// Returns true for [`Self::Pending`].
	pub fn is_pending(&self) -> bool {
		matches!(self, Self::Pending)
	}

	fn label(&self) -> AttemptResult {
		match self {
			Self::Obtained(_) => AttemptResult::Obtained,
			Self::Pending => AttemptResult::Pending,
			Self::Failed(_) => AttemptResult::Failed,
		}
	}
}

/// Caller-side knobs for a polling run.
#[derive(Clone, Debug)]
pub struct PollOptions {
	/// Token that stops the run at the next wait boundary or before the next attempt.
	pub cancellation: Option<CancellationToken>,
	/// Interval used when the server announces none.
	pub default_interval: StdDuration,
	/// Flow label attached to spans and metrics.
	pub flow: FlowKind,
}
impl PollOptions {
	/// Attaches a cancellation token.
	pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
		self.cancellation = Some(token);

		self
	}

	/// Overrides the fallback interval (defaults to 5 seconds).
	pub fn with_default_interval(mut self, interval: StdDuration) -> Self {
		self.default_interval = interval;

		self
	}

	/// Overrides the flow label.
	pub fn with_flow(mut self, flow: FlowKind) -> Self {
		self.flow = flow;

		self
	}

	fn is_cancelled(&self) -> bool {
		self.cancellation.as_ref().is_some_and(CancellationToken::is_cancelled)
	}
}
impl Default for PollOptions {
	fn default() -> Self {
		Self {
			cancellation: None,
			default_interval: DEFAULT_POLLING_INTERVAL,
			flow: FlowKind::default(),
		}
	}
}

/// Polls until a terminal outcome, expiry, or cancellation.
///
/// `attempt` receives the polling code and performs one redemption. `on_progress` is invoked
/// after every [`AttemptOutcome::Pending`] with the interval announced by the server (raw,
/// in seconds) and the zero-based index of the pending attempt.
///
/// # Errors
///
/// - the [`Error`] carried by [`AttemptOutcome::Failed`], unchanged;
/// - [`Error::PollingExpired`] when the next attempt would be scheduled after expiry;
/// - [`Error::Cancelled`] when the options' token fires.
pub async fn poll<T, A, Fut, P>(
	info: PollingInfo,
	options: &PollOptions,
	mut attempt: A,
	mut on_progress: P,
) -> Result<T>
where
	A: FnMut(String) -> Fut,
	Fut: Future<Output = AttemptOutcome<T>>,
	P: FnMut(u64, usize),
{
	let interval = match info.effective_interval(options.default_interval) {
		interval if interval.is_zero() => DEFAULT_POLLING_INTERVAL,
		interval => interval,
	};
	let start = Instant::now();
	let deadline = start + info.expires_in();
	let mut next_attempt = start + interval;
	let mut attempt_index = 0;

	loop {
		if next_attempt > deadline {
			obs::trace_poll_expired(options.flow, attempt_index);

			return Err(Error::PollingExpired);
		}

		match &options.cancellation {
			Some(token) => tokio::select! {
				biased;
				_ = token.cancelled() => return Err(Error::Cancelled),
				_ = time::sleep_until(next_attempt) => (),
			},
			None => time::sleep_until(next_attempt).await,
		}

		// A late wake-up may land past the expiry.
		if Instant::now() > deadline {
			obs::trace_poll_expired(options.flow, attempt_index);

			return Err(Error::PollingExpired);
		}
		if options.is_cancelled() {
			return Err(Error::Cancelled);
		}

		let outcome = attempt(info.polling_code.clone()).await;
		let label = outcome.label();

		obs::trace_poll_attempt(options.flow, attempt_index, label);
		obs::record_poll_attempt(options.flow, label);

		match outcome {
			AttemptOutcome::Obtained(value) => return Ok(value),
			AttemptOutcome::Failed(e) => return Err(e),
			AttemptOutcome::Pending => {
				on_progress(info.polling_interval, attempt_index);

				attempt_index += 1;
				next_attempt = next_slot(next_attempt, interval, Instant::now());
			},
		}
	}
}

/// First slot of the `last + k * interval` schedule that lies after `now`.
///
/// Slots missed while an attempt was in flight are skipped, never replayed.
fn next_slot(last: Instant, interval: StdDuration, now: Instant) -> Instant {
	let mut next = last + interval;

	while next <= now {
		next += interval;
	}

	next
}

/// Redeems a polling code once against `endpoint`.
///
/// The request is unauthenticated: the polling code is the only credential.
pub async fn attempt_once<C, M, T>(
	transport: &Transport<C, M>,
	endpoint: &Url,
	polling_code: &str,
) -> AttemptOutcome<T>
where
	C: MytokenHttpClient,
	M: TransportErrorMapper<C::TransportError>,
	T: DeserializeOwned,
{
	let request = PollingCodeRequest::new(polling_code);

	AttemptOutcome::from_result(
		transport.request(Method::POST, endpoint, Some(&request), None).await,
	)
}
