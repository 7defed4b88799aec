//! Grant type management.

// self
use crate::{
	_prelude::*,
	api::{GrantType, GrantTypeInfo, GrantTypeInfoResponse, GrantTypeRequest, OnlyTokenUpdateResponse},
	endpoints::endpoint_handle,
	http::MytokenHttpClient,
	rotation::{self, Rotated},
	transport::{Method, TransportErrorMapper},
};

endpoint_handle! {
	/// Enables and disables grant types for the user owning a mytoken.
	GrantsEndpoint
}
impl<C, M> GrantsEndpoint<C, M>
where
	C: MytokenHttpClient,
	M: TransportErrorMapper<C::TransportError>,
{
	/// Lists the grant types and whether each is enabled, returning any rotation next to them.
	pub async fn api_get(&self, mytoken: &str) -> Result<Rotated<Vec<GrantTypeInfo>>> {
		let response: GrantTypeInfoResponse =
			self.transport.request::<(), _>(Method::GET, &self.url, None, Some(mytoken)).await?;

		Ok(Rotated::split(response).map(|response| response.grant_types))
	}

	/// Lists the grant types, replacing `mytoken` when the server rotates it.
	pub async fn get(&self, mytoken: &mut String) -> Result<Vec<GrantTypeInfo>> {
		let result = self.api_get(mytoken).await;

		rotation::propagate(mytoken, result)
	}

	/// Enables `grant`, returning any rotation.
	pub async fn api_enable_grant(&self, mytoken: &str, grant: GrantType) -> Result<Rotated<()>> {
		self.change_grant(Method::POST, mytoken, grant).await
	}

	/// Enables `grant`, replacing `mytoken` when the server rotates it.
	pub async fn enable_grant(&self, mytoken: &mut String, grant: GrantType) -> Result<()> {
		let result = self.api_enable_grant(mytoken, grant).await;

		rotation::propagate(mytoken, result)
	}

	/// Disables `grant`, returning any rotation.
	pub async fn api_disable_grant(&self, mytoken: &str, grant: GrantType) -> Result<Rotated<()>> {
		self.change_grant(Method::DELETE, mytoken, grant).await
	}

	/// Disables `grant`, replacing `mytoken` when the server rotates it.
	pub async fn disable_grant(&self, mytoken: &mut String, grant: GrantType) -> Result<()> {
		let result = self.api_disable_grant(mytoken, grant).await;

		rotation::propagate(mytoken, result)
	}

	async fn change_grant(
		&self,
		method: Method,
		mytoken: &str,
		grant_type: GrantType,
	) -> Result<Rotated<()>> {
		let request = GrantTypeRequest { grant_type, mytoken: mytoken.into() };
		let response: OnlyTokenUpdateResponse =
			self.transport.request_or_default(method, &self.url, Some(&request), None).await?;

		Ok(Rotated::split(response).map(|_| ()))
	}
}
