//! Token rotation propagation.
//!
//! A mytoken server may replace the presented mytoken on every token-bearing response,
//! successful or not. Every endpoint therefore comes in two forms:
//!
//! - `api_*` methods take the token by value (`&str`) and return [`Rotated`], which keeps the
//!   replacement next to the response. On failure the replacement stays attached to the error
//!   and is reachable through [`Error::token_update`].
//! - the plain-named methods take `&mut String` and overwrite it with the replacement before
//!   returning, on success and on failure alike. See [`propagate`].

// self
use crate::{
	_prelude::*,
	api::{
		AccessTokenResponse, GrantTypeInfoResponse, MytokenResponse, OnlyTokenUpdateResponse,
		SshInfoResponse, SshKeyAddFinalResponse, SshKeyAddResponse, TokenUpdate,
		TokeninfoHistoryResponse, TokeninfoListResponse, TokeninfoTreeResponse,
		TransferCodeResponse,
	},
};

/// Responses that may carry a rotation envelope.
pub trait TokenRotation {
	/// Borrows the envelope, if any.
	fn token_update(&self) -> Option<&TokenUpdate>;

	/// Removes the envelope from the response.
	fn take_token_update(&mut self) -> Option<TokenUpdate>;
}

macro_rules! impl_token_rotation {
	($($ty:ty),+ $(,)?) => {
		$(
			impl TokenRotation for $ty {
				fn token_update(&self) -> Option<&TokenUpdate> {
					self.token_update.as_ref()
				}

				fn take_token_update(&mut self) -> Option<TokenUpdate> {
					self.token_update.take()
				}
			}
		)+
	};
}

impl_token_rotation! {
	AccessTokenResponse,
	GrantTypeInfoResponse,
	MytokenResponse,
	OnlyTokenUpdateResponse,
	SshInfoResponse,
	SshKeyAddFinalResponse,
	SshKeyAddResponse,
	TokeninfoHistoryResponse,
	TokeninfoListResponse,
	TokeninfoTreeResponse,
	TransferCodeResponse,
}

/// A response value paired with the rotation it carried.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rotated<T> {
	/// The primary result.
	pub value: T,
	/// Replacement for the presented mytoken, if the server rotated it.
	pub token_update: Option<TokenUpdate>,
}
impl<T> Rotated<T> {
	/// Pairs a value with an optional rotation.
	pub fn new(value: T, token_update: Option<TokenUpdate>) -> Self {
		Self { value, token_update }
	}

	/// The replacement token, if any.
	pub fn new_token(&self) -> Option<&str> {
		self.token_update.as_ref().map(|u| u.mytoken.expose())
	}

	/// Transforms the primary value while keeping the rotation.
	pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Rotated<U> {
		Rotated { value: f(self.value), token_update: self.token_update }
	}

	/// Writes the rotation, if any, into `holder` and returns the primary value.
	pub fn apply(self, holder: &mut String) -> T {
		if let Some(update) = self.token_update {
			*holder = update.mytoken.into_inner();
		}

		self.value
	}
}
impl<T> Rotated<T>
where
	T: TokenRotation,
{
	/// Moves the envelope out of a response so it is reported exactly once.
	pub fn split(mut response: T) -> Self {
		let token_update = response.take_token_update();

		Self { value: response, token_update }
	}
}

/// Applies the rotation carried by `result` to `holder`, whether it succeeded or failed.
pub fn propagate<T>(holder: &mut String, result: Result<Rotated<T>>) -> Result<T> {
	match result {
		Ok(rotated) => Ok(rotated.apply(holder)),
		Err(mut err) => {
			if let Some(update) = err.take_token_update() {
				*holder = update.mytoken.into_inner();
			}

			Err(err)
		},
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{error::ServerError, secret::TokenSecret};

	fn update(token: &str) -> Option<TokenUpdate> {
		Some(TokenUpdate::new(TokenSecret::new(token)))
	}

	#[test]
	fn split_moves_envelope_out_of_response() {
		let response = GrantTypeInfoResponse { grant_types: Vec::new(), token_update: update("T2") };
		let rotated = Rotated::split(response);

		assert_eq!(rotated.new_token(), Some("T2"));
		assert!(rotated.value.token_update.is_none());
	}

	#[test]
	fn propagate_replaces_token_on_success() {
		let mut held = String::from("T1");
		let value = propagate(&mut held, Ok(Rotated::new(7, update("T2"))))
			.expect("Successful result should pass through.");

		assert_eq!(value, 7);
		assert_eq!(held, "T2");
	}

	#[test]
	fn propagate_keeps_token_without_rotation() {
		let mut held = String::from("T1");

		propagate(&mut held, Ok(Rotated::new((), None))).expect("Result should pass through.");

		assert_eq!(held, "T1");
	}

	#[test]
	fn propagate_replaces_token_on_rotation_bearing_error() {
		let mut held = String::from("T1");
		let err = ServerError {
			error: "insufficient_capabilities".into(),
			description: None,
			status: Some(403),
			token_update: update("T2"),
		};
		let err = propagate::<()>(&mut held, Err(err.into()))
			.expect_err("Failure should pass through.");

		assert_eq!(held, "T2");
		assert!(err.token_update().is_none(), "Rotation must be consumed by propagation.");
		assert!(matches!(err, Error::Server(ServerError { status: Some(403), .. })));
	}

	#[test]
	fn propagate_leaves_token_on_plain_error() {
		let mut held = String::from("T1");
		let _ = propagate::<()>(&mut held, Err(Error::PollingExpired));

		assert_eq!(held, "T1");
	}
}
