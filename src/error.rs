//! Client-level error types shared across endpoints, flows, and the polling engine.

// self
use crate::{
	_prelude::*,
	api::{ERROR_AUTHORIZATION_PENDING, ERROR_NOT_FOUND, ErrorResponse, TokenUpdate},
};

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, IO).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Response body could not be decoded into the expected shape.
	#[error(transparent)]
	Decode(#[from] DecodeError),
	/// Server answered with a structured OAuth-style error.
	#[error(transparent)]
	Server(#[from] ServerError),

	/// Request body could not be serialized.
	#[error("Request body could not be encoded.")]
	Encoding {
		/// Serializer failure.
		#[source]
		source: serde_json::Error,
	},
	/// The polling code expired before the authorization was granted.
	#[error("Polling code expired before the authorization completed.")]
	PollingExpired,
	/// The caller cancelled the flow.
	#[error("Flow was cancelled by the caller.")]
	Cancelled,
	/// A caller-supplied hook aborted the flow.
	#[error("Flow was aborted by a callback: {reason}.")]
	Aborted {
		/// Caller-supplied reason string.
		reason: String,
	},
}
impl Error {
	/// Convenience constructor for hooks that want to abort a flow.
	pub fn aborted(reason: impl Into<String>) -> Self {
		Self::Aborted { reason: reason.into() }
	}

	/// Returns the structured server error, if this is one.
	pub fn as_server(&self) -> Option<&ServerError> {
		match self {
			Self::Server(e) => Some(e),
			_ => None,
		}
	}

	/// Returns true when the server signalled that the authorization is still pending.
	pub fn is_authorization_pending(&self) -> bool {
		self.as_server().is_some_and(ServerError::is_authorization_pending)
	}

	/// Rotation envelope carried by an error response, if any.
	pub fn token_update(&self) -> Option<&TokenUpdate> {
		self.as_server().and_then(|e| e.token_update.as_ref())
	}

	/// Removes and returns the rotation envelope carried by an error response.
	pub fn take_token_update(&mut self) -> Option<TokenUpdate> {
		match self {
			Self::Server(e) => e.token_update.take(),
			_ => None,
		}
	}
}

/// Structured error returned by the server for 4xx/5xx responses.
#[derive(Debug, ThisError)]
#[error("Server returned `{error}`{}.", describe(.description.as_deref()))]
pub struct ServerError {
	/// Machine-readable error identifier.
	pub error: String,
	/// Human-readable detail, when supplied.
	pub description: Option<String>,
	/// HTTP status code of the response.
	pub status: Option<u16>,
	/// Replacement mytoken attached to the error response.
	pub token_update: Option<TokenUpdate>,
}
impl ServerError {
	/// Builds a server error from a decoded wire error and the response status.
	pub fn from_response(response: ErrorResponse, status: Option<u16>) -> Self {
		Self {
			error: response.error,
			description: response.error_description.filter(|d| !d.is_empty()),
			status,
			token_update: response.token_update,
		}
	}

	/// Returns true for the `authorization_pending` sentinel.
	pub fn is_authorization_pending(&self) -> bool {
		self.error == ERROR_AUTHORIZATION_PENDING
	}

	/// Returns true when the server reports the resource as unavailable.
	pub fn is_not_found(&self) -> bool {
		self.error == ERROR_NOT_FOUND || self.status == Some(404)
	}
}

fn describe(description: Option<&str>) -> String {
	description.map(|d| format!(": {d}")).unwrap_or_default()
}

/// Configuration and validation failures raised by the client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// A server or endpoint URL cannot be parsed.
	#[error("URL `{url}` is invalid.")]
	InvalidUrl {
		/// Offending URL string.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// The server does not advertise an endpoint the operation needs.
	#[error("Server does not advertise the {endpoint} endpoint.")]
	MissingEndpoint {
		/// Endpoint label.
		endpoint: &'static str,
	},
	/// Capability list contains an invalid entry.
	#[error("Capabilities are invalid.")]
	InvalidCapabilities(#[from] crate::api::CapabilityError),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the mytoken server.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the mytoken server.")]
	Io(#[from] std::io::Error),
	/// Transport reported a failure without a typed source.
	#[error("HTTP client error occurred while calling the mytoken server: {message}.")]
	Other {
		/// Transport-supplied message.
		message: String,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Response decoding failures.
#[derive(Debug, ThisError)]
pub enum DecodeError {
	/// A successful response body did not match the expected type.
	#[error("Server returned malformed JSON.")]
	Response {
		/// Structured parsing failure including the JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code of the response.
		status: u16,
	},
	/// An error response body could not be decoded into the error shape.
	#[error("Server returned an undecodable error response with status {status}.")]
	ErrorResponse {
		/// Structured parsing failure including the JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code of the response.
		status: u16,
	},
}
