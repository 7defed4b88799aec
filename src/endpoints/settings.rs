//! User settings: discovery metadata plus the grant and SSH sub-endpoints.

// self
use crate::{
	_prelude::*,
	api::SettingsMetadata,
	endpoints::{GrantsEndpoint, SshGrantEndpoint, join_url},
	http::MytokenHttpClient,
	transport::{Method, Transport, TransportErrorMapper},
};

const SSH_SEGMENT: &str = "ssh";

/// Handle for the user settings endpoint.
///
/// The settings metadata is fetched once at discovery and cached; [`Self::refresh_metadata`]
/// replaces the cached copy. Sub-endpoint handles keep the URLs discovered at construction.
pub struct UserSettingsEndpoint<C, M>
where
	C: MytokenHttpClient,
	M: TransportErrorMapper<C::TransportError>,
{
	transport: Transport<C, M>,
	url: Url,
	metadata: Arc<RwLock<SettingsMetadata>>,
	grants: GrantsEndpoint<C, M>,
	ssh: SshGrantEndpoint<C, M>,
}
impl<C, M> UserSettingsEndpoint<C, M>
where
	C: MytokenHttpClient,
	M: TransportErrorMapper<C::TransportError>,
{
	/// Fetches the settings metadata at `url` and builds the sub-endpoint handles.
	///
	/// Returns `Ok(None)` when the server answers `not_found`, meaning it has no user settings.
	pub async fn discover(transport: Transport<C, M>, url: Url) -> Result<Option<Self>> {
		let metadata = match fetch_metadata(&transport, &url).await {
			Ok(metadata) => metadata,
			Err(Error::Server(e)) if e.is_not_found() => return Ok(None),
			Err(e) => return Err(e),
		};

		Self::from_metadata(transport, url, metadata).map(Some)
	}

	/// Builds the handle from already known metadata.
	pub fn from_metadata(
		transport: Transport<C, M>,
		url: Url,
		metadata: SettingsMetadata,
	) -> Result<Self> {
		let ssh_url = match &metadata.ssh_endpoint {
			Some(ssh) => ssh.clone(),
			None => join_url(&metadata.grant_type_endpoint, SSH_SEGMENT)?,
		};
		let grants = GrantsEndpoint::new(transport.clone(), metadata.grant_type_endpoint.clone());
		let ssh = SshGrantEndpoint::new(transport.clone(), ssh_url);

		Ok(Self { transport, url, metadata: Arc::new(RwLock::new(metadata)), grants, ssh })
	}

	/// URL of the endpoint.
	pub fn url(&self) -> &Url {
		&self.url
	}

	/// Cached settings metadata.
	pub fn metadata(&self) -> SettingsMetadata {
		self.metadata.read().clone()
	}

	/// Re-fetches the settings metadata and replaces the cached copy.
	pub async fn refresh_metadata(&self) -> Result<SettingsMetadata> {
		let metadata = fetch_metadata(&self.transport, &self.url).await?;

		*self.metadata.write() = metadata.clone();

		Ok(metadata)
	}

	/// Grant type management.
	pub fn grants(&self) -> &GrantsEndpoint<C, M> {
		&self.grants
	}

	/// SSH grant management.
	pub fn ssh(&self) -> &SshGrantEndpoint<C, M> {
		&self.ssh
	}
}
impl<C, M> Clone for UserSettingsEndpoint<C, M>
where
	C: MytokenHttpClient,
	M: TransportErrorMapper<C::TransportError>,
{
	fn clone(&self) -> Self {
		Self {
			transport: self.transport.clone(),
			url: self.url.clone(),
			metadata: self.metadata.clone(),
			grants: self.grants.clone(),
			ssh: self.ssh.clone(),
		}
	}
}
impl<C, M> Debug for UserSettingsEndpoint<C, M>
where
	C: MytokenHttpClient,
	M: TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("UserSettingsEndpoint")
			.field("url", &self.url.as_str())
			.field("grants", &self.grants)
			.field("ssh", &self.ssh)
			.finish()
	}
}

async fn fetch_metadata<C, M>(transport: &Transport<C, M>, url: &Url) -> Result<SettingsMetadata>
where
	C: MytokenHttpClient,
	M: TransportErrorMapper<C::TransportError>,
{
	transport.request::<(), _>(Method::GET, url, None, None).await
}
