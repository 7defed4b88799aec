//! Discovery entry point.
//!
//! [`MytokenServer`] fetches the server's discovery document once and builds one handle per
//! advertised endpoint. Every handle shares the same [`Transport`], so concurrent flows reuse a
//! single HTTP connection pool.

// self
use crate::{
	_prelude::*,
	api::{MytokenConfiguration, WELL_KNOWN_CONFIGURATION_PATH},
	config::ClientConfig,
	endpoints::{
		AccessTokenEndpoint, MytokenEndpoint, RevocationEndpoint, TokeninfoEndpoint,
		TransferEndpoint, UserSettingsEndpoint, join_url,
	},
	error::ConfigError,
	http::MytokenHttpClient,
	transport::{Method, Transport, TransportErrorMapper},
};
#[cfg(feature = "reqwest")]
use crate::{http::ReqwestHttpClient, transport::ReqwestTransportErrorMapper};

/// Server handle specialized for the crate's default reqwest transport stack.
#[cfg(feature = "reqwest")]
pub type ReqwestServer = MytokenServer<ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// A discovered mytoken server.
pub struct MytokenServer<C, M>
where
	C: MytokenHttpClient,
	M: TransportErrorMapper<C::TransportError>,
{
	configuration: MytokenConfiguration,
	transport: Transport<C, M>,
	access_token: AccessTokenEndpoint<C, M>,
	mytoken: MytokenEndpoint<C, M>,
	revocation: RevocationEndpoint<C, M>,
	tokeninfo: TokeninfoEndpoint<C, M>,
	transfer: TransferEndpoint<C, M>,
	user_settings: Option<UserSettingsEndpoint<C, M>>,
}
impl<C, M> MytokenServer<C, M>
where
	C: MytokenHttpClient,
	M: TransportErrorMapper<C::TransportError>,
{
	/// Discovers the server at `url` using the caller-provided transport + mapper pair.
	pub async fn with_http_client(
		config: ClientConfig,
		url: &str,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
	) -> Result<Self> {
		Self::from_transport(Transport::new(http_client, mapper, config), url).await
	}

	/// Discovers the server at `url` over an existing transport.
	///
	/// A `not_found` answer from the user settings endpoint leaves
	/// [`user_settings`](Self::user_settings) empty; any other failure aborts discovery.
	pub async fn from_transport(transport: Transport<C, M>, url: &str) -> Result<Self> {
		let base = Url::parse(url)
			.map_err(|source| ConfigError::InvalidUrl { url: url.into(), source })?;
		let well_known = join_url(&base, WELL_KNOWN_CONFIGURATION_PATH)?;
		let configuration: MytokenConfiguration =
			transport.request::<(), _>(Method::GET, &well_known, None, None).await?;
		let user_settings = match &configuration.usersettings_endpoint {
			Some(endpoint) =>
				UserSettingsEndpoint::discover(transport.clone(), endpoint.clone()).await?,
			None => None,
		};

		Ok(Self::from_configuration(transport, configuration).with_user_settings(user_settings))
	}

	/// Builds the endpoint handles from an already fetched discovery document.
	///
	/// No request is made, so user settings stay unset; see [`Self::with_user_settings`].
	pub fn from_configuration(transport: Transport<C, M>, configuration: MytokenConfiguration) -> Self {
		Self {
			access_token: AccessTokenEndpoint::new(
				transport.clone(),
				configuration.access_token_endpoint.clone(),
			),
			mytoken: MytokenEndpoint::new(transport.clone(), configuration.mytoken_endpoint.clone()),
			revocation: RevocationEndpoint::new(
				transport.clone(),
				configuration.revocation_endpoint.clone(),
			),
			tokeninfo: TokeninfoEndpoint::new(
				transport.clone(),
				configuration.tokeninfo_endpoint.clone(),
			),
			transfer: TransferEndpoint::new(
				transport.clone(),
				configuration.token_transfer_endpoint.clone(),
			),
			user_settings: None,
			configuration,
			transport,
		}
	}

	/// Replaces the user settings handle.
	pub fn with_user_settings(mut self, user_settings: Option<UserSettingsEndpoint<C, M>>) -> Self {
		self.user_settings = user_settings;

		self
	}

	/// The discovery document.
	pub fn configuration(&self) -> &MytokenConfiguration {
		&self.configuration
	}

	/// Transport shared by every handle.
	pub fn transport(&self) -> &Transport<C, M> {
		&self.transport
	}

	/// Access token endpoint.
	pub fn access_token(&self) -> &AccessTokenEndpoint<C, M> {
		&self.access_token
	}

	/// Mytoken endpoint.
	pub fn mytoken(&self) -> &MytokenEndpoint<C, M> {
		&self.mytoken
	}

	/// Revocation endpoint.
	pub fn revocation(&self) -> &RevocationEndpoint<C, M> {
		&self.revocation
	}

	/// Tokeninfo endpoint.
	pub fn tokeninfo(&self) -> &TokeninfoEndpoint<C, M> {
		&self.tokeninfo
	}

	/// Transfer endpoint.
	pub fn transfer(&self) -> &TransferEndpoint<C, M> {
		&self.transfer
	}

	/// User settings endpoint, when the server supports it.
	pub fn user_settings(&self) -> Option<&UserSettingsEndpoint<C, M>> {
		self.user_settings.as_ref()
	}

	/// User settings endpoint, failing with [`ConfigError::MissingEndpoint`] when unsupported.
	pub fn require_user_settings(&self) -> Result<&UserSettingsEndpoint<C, M>> {
		self.user_settings
			.as_ref()
			.ok_or_else(|| ConfigError::MissingEndpoint { endpoint: "usersettings" }.into())
	}
}
#[cfg(feature = "reqwest")]
impl MytokenServer<ReqwestHttpClient, ReqwestTransportErrorMapper> {
	/// Discovers the server at `url` with a default reqwest client and configuration.
	pub async fn discover(url: &str) -> Result<Self> {
		Self::discover_with(ClientConfig::default(), url).await
	}

	/// Discovers the server at `url` with a default reqwest client.
	pub async fn discover_with(config: ClientConfig, url: &str) -> Result<Self> {
		Self::with_http_client(config, url, ReqwestHttpClient::default(), ReqwestTransportErrorMapper)
			.await
	}
}
impl<C, M> Clone for MytokenServer<C, M>
where
	C: MytokenHttpClient,
	M: TransportErrorMapper<C::TransportError>,
{
	fn clone(&self) -> Self {
		Self {
			configuration: self.configuration.clone(),
			transport: self.transport.clone(),
			access_token: self.access_token.clone(),
			mytoken: self.mytoken.clone(),
			revocation: self.revocation.clone(),
			tokeninfo: self.tokeninfo.clone(),
			transfer: self.transfer.clone(),
			user_settings: self.user_settings.clone(),
		}
	}
}
impl<C, M> Debug for MytokenServer<C, M>
where
	C: MytokenHttpClient,
	M: TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("MytokenServer")
			.field("issuer", &self.configuration.issuer)
			.field("user_settings", &self.user_settings.is_some())
			.finish()
	}
}
