//! Per-endpoint handles of a mytoken server.
//!
//! Each handle pairs the shared [`Transport`] with one discovered endpoint URL. Operations that
//! present a mytoken come in two forms (see [`crate::rotation`]): `api_*` methods returning
//! [`Rotated`](crate::rotation::Rotated) values, and plain-named methods that update a
//! caller-held `&mut String` in place.

pub mod access_token;
pub mod grants;
pub mod mytoken;
pub mod revocation;
pub mod settings;
pub mod ssh;
pub mod tokeninfo;
pub mod transfer;

pub use access_token::*;
pub use grants::*;
pub use mytoken::*;
pub use revocation::*;
pub use settings::*;
pub use ssh::*;
pub use tokeninfo::*;
pub use transfer::*;

// self
use crate::{_prelude::*, error::ConfigError};

/// Resolves `segment` below `base`, inserting the separating slash when `base` lacks one.
pub(crate) fn join_url(base: &Url, segment: &str) -> Result<Url> {
	let mut base = base.clone();

	if !base.path().ends_with('/') {
		let path = format!("{}/", base.path());

		base.set_path(&path);
	}

	base.join(segment)
		.map_err(|source| ConfigError::InvalidUrl { url: format!("{base}{segment}"), source }.into())
}

macro_rules! endpoint_handle {
	($(#[$meta:meta])* $name:ident) => {
		$(#[$meta])*
		pub struct $name<C, M>
		where
			C: $crate::http::MytokenHttpClient,
			M: $crate::transport::TransportErrorMapper<C::TransportError>,
		{
			transport: $crate::transport::Transport<C, M>,
			url: $crate::url::Url,
		}
		impl<C, M> $name<C, M>
		where
			C: $crate::http::MytokenHttpClient,
			M: $crate::transport::TransportErrorMapper<C::TransportError>,
		{
			/// Creates a handle for the endpoint at `url`.
			pub fn new(transport: $crate::transport::Transport<C, M>, url: $crate::url::Url) -> Self {
				Self { transport, url }
			}

			/// URL of the endpoint.
			pub fn url(&self) -> &$crate::url::Url {
				&self.url
			}
		}
		impl<C, M> Clone for $name<C, M>
		where
			C: $crate::http::MytokenHttpClient,
			M: $crate::transport::TransportErrorMapper<C::TransportError>,
		{
			fn clone(&self) -> Self {
				Self { transport: self.transport.clone(), url: self.url.clone() }
			}
		}
		impl<C, M> std::fmt::Debug for $name<C, M>
		where
			C: $crate::http::MytokenHttpClient,
			M: $crate::transport::TransportErrorMapper<C::TransportError>,
		{
			fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
				f.debug_struct(stringify!($name)).field("url", &self.url.as_str()).finish()
			}
		}
	};
}
pub(crate) use endpoint_handle;
