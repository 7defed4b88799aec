//! Transfer code creation.

// self
use crate::{
	_prelude::*,
	api::{CreateTransferCodeRequest, TransferCodeResponse},
	endpoints::endpoint_handle,
	http::MytokenHttpClient,
	rotation::{self, Rotated},
	secret::TokenSecret,
	transport::{Method, TransportErrorMapper},
};

endpoint_handle! {
	/// Creates transfer codes for existing mytokens.
	TransferEndpoint
}
impl<C, M> TransferEndpoint<C, M>
where
	C: MytokenHttpClient,
	M: TransportErrorMapper<C::TransportError>,
{
	/// Creates a transfer code for `mytoken`, returning any rotation next to the response.
	pub async fn api_create(&self, mytoken: &str) -> Result<Rotated<TransferCodeResponse>> {
		let request = CreateTransferCodeRequest { mytoken: mytoken.into() };
		let response: TransferCodeResponse =
			self.transport.request(Method::POST, &self.url, Some(&request), None).await?;

		Ok(Rotated::split(response))
	}

	/// Creates a transfer code for `mytoken` and returns the code itself.
	pub async fn create(&self, mytoken: &mut String) -> Result<TokenSecret> {
		let result = self.api_create(mytoken).await.map(|r| r.map(|response| response.transfer_code));

		rotation::propagate(mytoken, result)
	}
}
