//! Typed request execution against named mytoken endpoints.
//!
//! [`Transport`] is the one capability every endpoint handle builds on: serialize an optional
//! JSON body, attach an optional bearer token, submit the request through the configured
//! [`MytokenHttpClient`], and turn the answer into either the expected type or a structured
//! [`Error`]. 4xx/5xx bodies are decoded as [`ErrorResponse`] so the server's error identifier,
//! description, and any rotation envelope survive.

pub use oauth2::http::Method;

// crates.io
use oauth2::{
	AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse,
	http::{
		HeaderName, HeaderValue, Request,
		header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT},
	},
};
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	api::ErrorResponse,
	config::ClientConfig,
	error::{ConfigError, DecodeError, ServerError, TransportError},
	http::MytokenHttpClient,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

const MIME_JSON: &str = "application/json";

/// Maps HTTP transport failures into client [`Error`] values.
pub trait TransportErrorMapper<E>
where
	Self: 'static + Send + Sync,
	E: 'static + Send + Sync + StdError,
{
	/// Converts an [`HttpClientError`] emitted by the transport into a client error.
	fn map_transport_error(&self, error: HttpClientError<E>) -> Error;
}

/// Default mapper for reqwest-backed transports.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransportErrorMapper;
#[cfg(feature = "reqwest")]
impl TransportErrorMapper<ReqwestError> for ReqwestTransportErrorMapper {
	fn map_transport_error(&self, error: HttpClientError<ReqwestError>) -> Error {
		match error {
			HttpClientError::Reqwest(inner) if inner.is_builder() => ConfigError::from(*inner).into(),
			HttpClientError::Reqwest(inner) => TransportError::from(*inner).into(),
			HttpClientError::Http(inner) => ConfigError::from(inner).into(),
			HttpClientError::Io(inner) => TransportError::Io(inner).into(),
			HttpClientError::Other(message) => TransportError::Other { message }.into(),
			_ => TransportError::Other { message: "unknown HTTP client failure".into() }.into(),
		}
	}
}

/// Transport specialized for the crate's default reqwest stack.
#[cfg(feature = "reqwest")]
pub type ReqwestTransport = Transport<ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// Shared request executor: HTTP client, error mapper, and client configuration.
///
/// Cloning is cheap; every endpoint handle owns a clone.
pub struct Transport<C, M>
where
	C: MytokenHttpClient,
	M: TransportErrorMapper<C::TransportError>,
{
	http_client: Arc<C>,
	mapper: Arc<M>,
	config: Arc<ClientConfig>,
}
impl<C, M> Transport<C, M>
where
	C: MytokenHttpClient,
	M: TransportErrorMapper<C::TransportError>,
{
	/// Creates a transport from a client, a mapper, and the client configuration.
	pub fn new(
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
		config: ClientConfig,
	) -> Self {
		Self { http_client: http_client.into(), mapper: mapper.into(), config: Arc::new(config) }
	}

	/// Configuration applied to every request.
	pub fn config(&self) -> &ClientConfig {
		&self.config
	}

	/// Sends a request and decodes the JSON response into `T`.
	pub async fn request<B, T>(
		&self,
		method: Method,
		url: &Url,
		body: Option<&B>,
		bearer: Option<&str>,
	) -> Result<T>
	where
		B: ?Sized + Serialize,
		T: DeserializeOwned,
	{
		let request = self.build_request(method, url, body, bearer, true)?;
		let response = self.execute(request).await?;

		decode(response.body())
			.map_err(|source| DecodeError::Response { source, status: response.status().as_u16() }.into())
	}

	/// Like [`Self::request`], but an empty success body yields `T::default()`.
	///
	/// Mutating endpoints answer with a bare rotation envelope or with nothing at all.
	pub async fn request_or_default<B, T>(
		&self,
		method: Method,
		url: &Url,
		body: Option<&B>,
		bearer: Option<&str>,
	) -> Result<T>
	where
		B: ?Sized + Serialize,
		T: DeserializeOwned + Default,
	{
		let request = self.build_request(method, url, body, bearer, true)?;
		let response = self.execute(request).await?;

		if response.body().iter().all(u8::is_ascii_whitespace) {
			return Ok(T::default());
		}

		decode(response.body())
			.map_err(|source| DecodeError::Response { source, status: response.status().as_u16() }.into())
	}

	/// Sends a request whose successful response carries no payload of interest.
	pub async fn request_no_content<B>(
		&self,
		method: Method,
		url: &Url,
		body: Option<&B>,
		bearer: Option<&str>,
	) -> Result<()>
	where
		B: ?Sized + Serialize,
	{
		let request = self.build_request(method, url, body, bearer, false)?;

		self.execute(request).await.map(|_| ())
	}

	fn build_request<B>(
		&self,
		method: Method,
		url: &Url,
		body: Option<&B>,
		bearer: Option<&str>,
		expects_body: bool,
	) -> Result<HttpRequest>
	where
		B: ?Sized + Serialize,
	{
		let payload = match body {
			Some(body) => serde_json::to_vec(body).map_err(|source| Error::Encoding { source })?,
			None => Vec::new(),
		};
		let mut builder =
			Request::builder().method(method).uri(url.as_str()).header(USER_AGENT, &self.config.user_agent);

		if body.is_some() {
			builder = builder.header(CONTENT_TYPE, MIME_JSON);
		}
		if expects_body {
			builder = builder.header(ACCEPT, MIME_JSON);
		}
		if let Some(token) = bearer {
			builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
		}

		for (name, value) in &self.config.extra_headers {
			let name = HeaderName::try_from(name.as_str())
				.map_err(|e| ConfigError::HttpRequest(e.into()))?;
			let value = HeaderValue::try_from(value.as_str())
				.map_err(|e| ConfigError::HttpRequest(e.into()))?;

			builder = builder.header(name, value);
		}

		Ok(builder.body(payload).map_err(ConfigError::from)?)
	}

	async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
		let handle = self.http_client.handle();
		let response =
			handle.call(request).await.map_err(|e| self.mapper.map_transport_error(e))?;
		let status = response.status();

		if status.is_client_error() || status.is_server_error() {
			let status = status.as_u16();
			let error = decode::<ErrorResponse>(response.body())
				.map_err(|source| DecodeError::ErrorResponse { source, status })?;

			return Err(ServerError::from_response(error, Some(status)).into());
		}

		Ok(response)
	}
}
impl<C, M> Clone for Transport<C, M>
where
	C: MytokenHttpClient,
	M: TransportErrorMapper<C::TransportError>,
{
	fn clone(&self) -> Self {
		Self {
			http_client: self.http_client.clone(),
			mapper: self.mapper.clone(),
			config: self.config.clone(),
		}
	}
}
impl<C, M> Debug for Transport<C, M>
where
	C: MytokenHttpClient,
	M: TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Transport").field("config", &self.config).finish()
	}
}

fn decode<T>(body: &[u8]) -> Result<T, serde_path_to_error::Error<serde_json::Error>>
where
	T: DeserializeOwned,
{
	let mut deserializer = serde_json::Deserializer::from_slice(body);

	serde_path_to_error::deserialize(&mut deserializer)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::api::MytokenResponse;

	#[test]
	fn decode_reports_json_path_of_mismatch() {
		let err = decode::<MytokenResponse>(br#"{"mytoken": 42}"#)
			.expect_err("Numeric mytoken must be rejected.");

		assert_eq!(err.path().to_string(), "mytoken");
	}

	#[cfg(feature = "reqwest")]
	#[test]
	fn builds_json_request_with_bearer_and_user_agent() {
		let transport = ReqwestTransport::new(
			ReqwestHttpClient::default(),
			ReqwestTransportErrorMapper,
			ClientConfig::default().with_user_agent("tests/1.0").with_header("x-trace", "abc"),
		);
		let url = Url::parse("https://mytoken.example.com/api/v0/grants")
			.expect("Fixture URL should parse.");
		let request = transport
			.build_request(Method::POST, &url, Some(&serde_json::json!({ "a": 1 })), Some("MT"), true)
			.expect("Request should build.");
		let headers = request.headers();

		assert_eq!(request.method(), Method::POST);
		assert_eq!(request.uri().to_string(), url.as_str());
		assert_eq!(headers.get(AUTHORIZATION).map(|v| v.as_bytes()), Some(&b"Bearer MT"[..]));
		assert_eq!(headers.get(USER_AGENT).map(|v| v.as_bytes()), Some(&b"tests/1.0"[..]));
		assert_eq!(headers.get(CONTENT_TYPE).map(|v| v.as_bytes()), Some(MIME_JSON.as_bytes()));
		assert_eq!(headers.get("x-trace").map(|v| v.as_bytes()), Some(&b"abc"[..]));
		assert_eq!(request.body().as_slice(), br#"{"a":1}"#);
	}

	#[cfg(feature = "reqwest")]
	#[test]
	fn get_without_body_omits_content_type() {
		let transport = ReqwestTransport::new(
			ReqwestHttpClient::default(),
			ReqwestTransportErrorMapper,
			ClientConfig::default(),
		);
		let url = Url::parse("https://mytoken.example.com/.well-known/mytoken-configuration")
			.expect("Fixture URL should parse.");
		let request = transport
			.build_request::<()>(Method::GET, &url, None, None, true)
			.expect("Request should build.");

		assert!(request.headers().get(CONTENT_TYPE).is_none());
		assert!(request.headers().get(AUTHORIZATION).is_none());
		assert!(request.body().is_empty());
	}
}
