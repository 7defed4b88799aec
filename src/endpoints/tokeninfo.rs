//! Mytoken introspection, event history, and sub-token listings.

// self
use crate::{
	_prelude::*,
	api::{
		EventEntry, MytokenEntryTree, TokenInfoRequest, TokeninfoAction,
		TokeninfoHistoryResponse, TokeninfoIntrospectResponse, TokeninfoListResponse,
		TokeninfoTreeResponse,
	},
	endpoints::endpoint_handle,
	http::MytokenHttpClient,
	rotation::{self, Rotated, TokenRotation},
	transport::{Method, TransportErrorMapper},
};

endpoint_handle! {
	/// Inspects mytokens.
	TokeninfoEndpoint
}
impl<C, M> TokeninfoEndpoint<C, M>
where
	C: MytokenHttpClient,
	M: TransportErrorMapper<C::TransportError>,
{
	/// Validates `mytoken` and returns its decoded content.
	///
	/// Introspection never rotates the token.
	pub async fn introspect(&self, mytoken: &str) -> Result<TokeninfoIntrospectResponse> {
		self.send(TokeninfoAction::Introspect, mytoken).await
	}

	/// Event history of `mytoken`, returning any rotation next to the response.
	pub async fn api_history(&self, mytoken: &str) -> Result<Rotated<TokeninfoHistoryResponse>> {
		self.send_rotated(TokeninfoAction::EventHistory, mytoken).await
	}

	/// Event history of `mytoken`, replacing it when the server rotates it.
	pub async fn history(&self, mytoken: &mut String) -> Result<Vec<EventEntry>> {
		let result = self.api_history(mytoken).await.map(|r| r.map(|response| response.events));

		rotation::propagate(mytoken, result)
	}

	/// Tree of sub-tokens below `mytoken`, returning any rotation next to the response.
	pub async fn api_subtokens(&self, mytoken: &str) -> Result<Rotated<TokeninfoTreeResponse>> {
		self.send_rotated(TokeninfoAction::SubtokenTree, mytoken).await
	}

	/// Tree of sub-tokens below `mytoken`, replacing it when the server rotates it.
	pub async fn subtokens(&self, mytoken: &mut String) -> Result<MytokenEntryTree> {
		let result = self.api_subtokens(mytoken).await.map(|r| r.map(|response| response.mytokens));

		rotation::propagate(mytoken, result)
	}

	/// Every mytoken of the user, returning any rotation next to the response.
	pub async fn api_list_mytokens(&self, mytoken: &str) -> Result<Rotated<TokeninfoListResponse>> {
		self.send_rotated(TokeninfoAction::ListMytokens, mytoken).await
	}

	/// Every mytoken of the user, replacing `mytoken` when the server rotates it.
	pub async fn list_mytokens(&self, mytoken: &mut String) -> Result<Vec<MytokenEntryTree>> {
		let result =
			self.api_list_mytokens(mytoken).await.map(|r| r.map(|response| response.mytokens));

		rotation::propagate(mytoken, result)
	}

	async fn send<T>(&self, action: TokeninfoAction, mytoken: &str) -> Result<T>
	where
		T: serde::de::DeserializeOwned,
	{
		let request = TokenInfoRequest { action, mytoken: mytoken.into() };

		self.transport.request(Method::POST, &self.url, Some(&request), None).await
	}

	async fn send_rotated<T>(&self, action: TokeninfoAction, mytoken: &str) -> Result<Rotated<T>>
	where
		T: serde::de::DeserializeOwned + TokenRotation,
	{
		self.send(action, mytoken).await.map(Rotated::split)
	}
}
