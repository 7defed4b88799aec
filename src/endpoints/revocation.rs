//! Token revocation.

// self
use crate::{
	_prelude::*,
	api::RevocationRequest,
	endpoints::endpoint_handle,
	http::MytokenHttpClient,
	transport::{Method, TransportErrorMapper},
};

endpoint_handle! {
	/// Revokes mytokens.
	RevocationEndpoint
}
impl<C, M> RevocationEndpoint<C, M>
where
	C: MytokenHttpClient,
	M: TransportErrorMapper<C::TransportError>,
{
	/// Revokes `token`; with `recursive` every sub-token below it is revoked as well.
	pub async fn revoke(&self, token: &str, oidc_issuer: Option<&str>, recursive: bool) -> Result<()> {
		let request = RevocationRequest {
			token: token.into(),
			recursive,
			oidc_issuer: oidc_issuer.map(Into::into),
		};

		self.transport.request_no_content(Method::POST, &self.url, Some(&request), None).await
	}
}
