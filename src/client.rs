//! Per-tenant Looker API client and the capability interface consumed by the tool layer.
//!
//! [`ApiClient`] owns one [`TenantCredentials`] value and exactly one token slot. It is built
//! for one inbound request and dropped with it, so a client never serves two tenants and a
//! token never crosses client instances. Tool adapters depend only on [`LookerApi`].

mod metrics;

mod request;
mod token;

pub use metrics::*;

// crates.io
use reqwest::header::HeaderMap;
// self
use crate::{
	_prelude::*,
	auth::{CachedToken, TenantCredentials, TokenSecret},
	error::ConfigError,
	http::{API_PREFIX, ApiPayload, ApiRequest, ReqwestHttpClient},
};

/// Boxed future returned by [`LookerApi`] implementations.
pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + 'a + Send>>;

/// Capability interface for issuing authenticated calls against one tenant.
///
/// Typed entity operations live on `dyn LookerApi` in [`crate::api`], so any implementation
/// of [`LookerApi::request`] gets them for free.
pub trait LookerApi
where
	Self: Send + Sync,
{
	/// Executes one request and returns the classified payload.
	fn request(&self, request: ApiRequest) -> ApiFuture<'_, ApiPayload>;
}

/// Tenant-scoped client that authenticates and executes API calls.
pub struct ApiClient {
	credentials: TenantCredentials,
	base_url: String,
	http: ReqwestHttpClient,
	token: Mutex<Option<CachedToken>>,
	login_guard: AsyncMutex<()>,
	metrics: Arc<AuthMetrics>,
}
impl ApiClient {
	/// Builds a client with a default reqwest transport.
	pub fn new(credentials: TenantCredentials) -> Result<Self> {
		Self::with_http_client(credentials, ReqwestHttpClient::default())
	}

	/// Builds a client that reuses the caller-provided transport.
	///
	/// Credentials are validated before anything else happens; the base URL must be an
	/// absolute `http` or `https` URL.
	pub fn with_http_client(credentials: TenantCredentials, http: ReqwestHttpClient) -> Result<Self> {
		credentials.validate()?;

		let base_url = normalize_base_url(credentials.base_url.as_deref().unwrap_or_default())?;
		let token = credentials
			.access_token
			.as_deref()
			.map(|raw| CachedToken::supplied(TokenSecret::new(raw), OffsetDateTime::now_utc()));

		Ok(Self {
			credentials,
			base_url,
			http,
			token: Mutex::new(token),
			login_guard: AsyncMutex::new(()),
			metrics: Default::default(),
		})
	}

	/// Resolves credentials from inbound headers and builds a client for them.
	pub fn from_headers(headers: &HeaderMap) -> Result<Self> {
		Self::new(TenantCredentials::from_headers(headers))
	}

	/// Returns the credentials this client was built with.
	pub fn credentials(&self) -> &TenantCredentials {
		&self.credentials
	}

	/// Returns the normalized tenant base URL (no trailing slash).
	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	/// Returns the authentication counters for this client.
	pub fn metrics(&self) -> &AuthMetrics {
		&self.metrics
	}

	/// Snapshot of the cached token, if any.
	pub fn cached_token(&self) -> Option<CachedToken> {
		self.token.lock().clone()
	}

	fn api_url(&self, endpoint: &str) -> Result<Url> {
		let raw = format!("{}{API_PREFIX}{endpoint}", self.base_url);

		Url::parse(&raw).map_err(|source| ConfigError::InvalidBaseUrl { source }.into())
	}
}
impl Debug for ApiClient {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ApiClient")
			.field("credentials", &self.credentials)
			.field("base_url", &self.base_url)
			.field("token", &*self.token.lock())
			.finish()
	}
}
impl LookerApi for ApiClient {
	fn request(&self, request: ApiRequest) -> ApiFuture<'_, ApiPayload> {
		Box::pin(self.execute(request))
	}
}

fn normalize_base_url(raw: &str) -> Result<String> {
	let trimmed = raw.trim().trim_end_matches('/');
	let parsed = Url::parse(trimmed).map_err(|source| ConfigError::InvalidBaseUrl { source })?;

	match parsed.scheme() {
		"http" | "https" => Ok(trimmed.to_owned()),
		scheme => Err(ConfigError::UnsupportedScheme { scheme: scheme.to_owned() }.into()),
	}
}
