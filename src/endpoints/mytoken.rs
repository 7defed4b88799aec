//! Mytoken issuance: sub-tokens, transfer codes, and the authorization-code flow.

// self
use crate::{
	_prelude::*,
	api::{
		AuthCodeFlowRequest, AuthCodeFlowResponse, ExchangeTransferCodeRequest,
		MytokenFromMytokenRequest, MytokenRequest, MytokenResponse, PollingInfo,
	},
	endpoints::endpoint_handle,
	flows::{self, PollingCallbacks},
	http::MytokenHttpClient,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	polling::{self, AttemptOutcome, PollOptions},
	rotation::{self, Rotated},
	transport::{Method, TransportErrorMapper},
};

endpoint_handle! {
	/// Issues mytokens.
	MytokenEndpoint
}
impl<C, M> MytokenEndpoint<C, M>
where
	C: MytokenHttpClient,
	M: TransportErrorMapper<C::TransportError>,
{
	/// Issues a sub-token of `mytoken`, returning any rotation of the parent next to the response.
	pub async fn api_from_mytoken(
		&self,
		mytoken: &str,
		request: MytokenRequest,
	) -> Result<Rotated<MytokenResponse>> {
		let request = MytokenFromMytokenRequest::new(mytoken, request);
		let response: MytokenResponse =
			self.transport.request(Method::POST, &self.url, Some(&request), None).await?;

		Ok(Rotated::split(response))
	}

	/// Issues a sub-token of `mytoken`, replacing the parent when the server rotates it.
	pub async fn from_mytoken(
		&self,
		mytoken: &mut String,
		request: MytokenRequest,
	) -> Result<MytokenResponse> {
		let result = self.api_from_mytoken(mytoken, request).await;

		rotation::propagate(mytoken, result)
	}

	/// Exchanges a transfer code for the mytoken behind it.
	///
	/// Codes are single use; invalid, expired, or consumed codes fail with a server error.
	pub async fn from_transfer_code(&self, transfer_code: &str) -> Result<MytokenResponse> {
		const KIND: FlowKind = FlowKind::TransferCode;

		let span = FlowSpan::new(KIND, "from_transfer_code");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let request = ExchangeTransferCodeRequest::new(transfer_code);
		let result: Result<MytokenResponse> = span
			.instrument(self.transport.request(Method::POST, &self.url, Some(&request), None))
			.await;

		match &result {
			Ok(_) => obs::record_flow_outcome(KIND, FlowOutcome::Success),
			Err(_) => obs::record_flow_outcome(KIND, FlowOutcome::Failure),
		}

		result
	}

	/// Starts an authorization-code flow for a native client.
	///
	/// The response carries the URL the user must open and the polling descriptor.
	pub async fn init_authorization_flow(
		&self,
		request: MytokenRequest,
	) -> Result<AuthCodeFlowResponse> {
		let request = AuthCodeFlowRequest::new(request);

		self.transport.request(Method::POST, &self.url, Some(&request), None).await
	}

	/// Redeems `polling_code` once.
	pub async fn poll_once(&self, polling_code: &str) -> AttemptOutcome<MytokenResponse> {
		polling::attempt_once(&self.transport, &self.url, polling_code).await
	}

	/// Polls until the authorization started by [`Self::init_authorization_flow`] completes.
	pub async fn poll<P>(
		&self,
		info: PollingInfo,
		options: &PollOptions,
		on_progress: P,
	) -> Result<MytokenResponse>
	where
		P: FnMut(u64, usize),
	{
		polling::poll(info, options, |code| async move { self.poll_once(&code).await }, on_progress)
			.await
	}

	/// Runs the whole authorization-code flow: initiate, announce the URL, poll, complete.
	///
	/// The initiation itself is not retried and failures short-circuit without
	/// [`PollingCallbacks::on_completed`].
	pub async fn from_authorization_flow<CB>(
		&self,
		request: MytokenRequest,
		options: &PollOptions,
		callbacks: &mut CB,
	) -> Result<MytokenResponse>
	where
		CB: ?Sized + PollingCallbacks,
	{
		let AuthCodeFlowResponse { authorization_url, polling_info } =
			self.init_authorization_flow(request).await?;

		flows::run_polling_flow(
			FlowKind::AuthorizationCode,
			&authorization_url,
			polling_info,
			options,
			callbacks,
			|code| async move { self.poll_once(&code).await },
		)
		.await
	}
}
