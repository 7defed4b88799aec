//! SSH grant management, including the out-of-band key addition flow.

// self
use crate::{
	_prelude::*,
	api::{
		OnlyTokenUpdateResponse, SshInfoResponse, SshKeyAddFinalResponse, SshKeyAddResponse,
		SshKeyDeleteRequest, SshKeyOptions, SshKeySelector,
	},
	endpoints::endpoint_handle,
	flows::{self, PollingCallbacks},
	http::MytokenHttpClient,
	obs::FlowKind,
	polling::{self, AttemptOutcome, PollOptions},
	rotation::{self, Rotated},
	transport::{Method, TransportErrorMapper},
};

endpoint_handle! {
	/// Manages the SSH keys that can be used to obtain mytokens.
	SshGrantEndpoint
}
impl<C, M> SshGrantEndpoint<C, M>
where
	C: MytokenHttpClient,
	M: TransportErrorMapper<C::TransportError>,
{
	/// Lists registered keys and whether the SSH grant is enabled, returning any rotation.
	pub async fn api_get(&self, mytoken: &str) -> Result<Rotated<SshInfoResponse>> {
		let response: SshInfoResponse =
			self.transport.request::<(), _>(Method::GET, &self.url, None, Some(mytoken)).await?;

		Ok(Rotated::split(response))
	}

	/// Lists registered keys, replacing `mytoken` when the server rotates it.
	pub async fn get(&self, mytoken: &mut String) -> Result<SshInfoResponse> {
		let result = self.api_get(mytoken).await;

		rotation::propagate(mytoken, result)
	}

	/// Removes a key, returning any rotation.
	pub async fn api_remove(&self, mytoken: &str, key: SshKeySelector) -> Result<Rotated<()>> {
		let (ssh_key, ssh_key_fingerprint) = match key {
			SshKeySelector::Fingerprint(fingerprint) => (None, Some(fingerprint)),
			SshKeySelector::PublicKey(public_key) => (Some(public_key), None),
		};
		let request = SshKeyDeleteRequest { mytoken: mytoken.into(), ssh_key, ssh_key_fingerprint };
		let response: OnlyTokenUpdateResponse = self
			.transport
			.request_or_default(Method::DELETE, &self.url, Some(&request), None)
			.await?;

		Ok(Rotated::split(response).map(|_| ()))
	}

	/// Removes a key, replacing `mytoken` when the server rotates it.
	pub async fn remove(&self, mytoken: &mut String, key: SshKeySelector) -> Result<()> {
		let result = self.api_remove(mytoken, key).await;

		rotation::propagate(mytoken, result)
	}

	/// Submits a key for addition, returning any rotation next to the consent descriptor.
	pub async fn api_init_add(
		&self,
		mytoken: &str,
		options: SshKeyOptions,
	) -> Result<Rotated<SshKeyAddResponse>> {
		let request = options.into_request(mytoken);
		let response: SshKeyAddResponse =
			self.transport.request(Method::POST, &self.url, Some(&request), None).await?;

		Ok(Rotated::split(response))
	}

	/// Submits a key for addition, replacing `mytoken` when the server rotates it.
	pub async fn init_add(
		&self,
		mytoken: &mut String,
		options: SshKeyOptions,
	) -> Result<SshKeyAddResponse> {
		let result = self.api_init_add(mytoken, options).await;

		rotation::propagate(mytoken, result)
	}

	/// Redeems `polling_code` once.
	pub async fn poll_once(&self, polling_code: &str) -> AttemptOutcome<SshKeyAddFinalResponse> {
		polling::attempt_once(&self.transport, &self.url, polling_code).await
	}

	/// Adds a key: submit it, announce the consent URL, and poll until the user confirmed.
	///
	/// Any rotation of `mytoken` carried by the submission is applied before polling starts, and
	/// one carried by the final answer (successful or not) is applied before returning.
	pub async fn add<CB>(
		&self,
		mytoken: &mut String,
		options: SshKeyOptions,
		poll_options: &PollOptions,
		callbacks: &mut CB,
	) -> Result<SshKeyAddFinalResponse>
	where
		CB: ?Sized + PollingCallbacks,
	{
		let SshKeyAddResponse { consent_uri, polling_info, .. } =
			self.init_add(mytoken, options).await?;

		let result = flows::run_polling_flow(
			FlowKind::SshKeyAddition,
			&consent_uri,
			polling_info,
			poll_options,
			callbacks,
			|code| async move { self.poll_once(&code).await },
		)
		.await
		.map(Rotated::split);

		rotation::propagate(mytoken, result)
	}
}
