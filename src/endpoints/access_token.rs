//! Access token issuance.

// self
use crate::{
	_prelude::*,
	api::{AccessTokenOptions, AccessTokenResponse},
	endpoints::endpoint_handle,
	http::MytokenHttpClient,
	rotation::{self, Rotated},
	transport::{Method, TransportErrorMapper},
};

endpoint_handle! {
	/// Exchanges mytokens for OpenID Connect access tokens.
	AccessTokenEndpoint
}
impl<C, M> AccessTokenEndpoint<C, M>
where
	C: MytokenHttpClient,
	M: TransportErrorMapper<C::TransportError>,
{
	/// Requests an access token, returning any rotation next to the response.
	pub async fn api_get_access_token(
		&self,
		mytoken: &str,
		options: AccessTokenOptions,
	) -> Result<Rotated<AccessTokenResponse>> {
		let request = options.into_request(mytoken);
		let response: AccessTokenResponse =
			self.transport.request(Method::POST, &self.url, Some(&request), None).await?;

		Ok(Rotated::split(response))
	}

	/// Requests an access token, replacing `mytoken` when the server rotates it.
	pub async fn get_access_token(
		&self,
		mytoken: &mut String,
		options: AccessTokenOptions,
	) -> Result<AccessTokenResponse> {
		let result = self.api_get_access_token(mytoken, options).await;

		rotation::propagate(mytoken, result)
	}
}
