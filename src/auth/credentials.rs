//! Per-request tenant credentials resolved from inbound header metadata.

// crates.io
use reqwest::header::HeaderMap;
// self
use crate::_prelude::*;

/// Header carrying the tenant instance URL (e.g. `https://acme.looker.com`).
pub const BASE_URL_HEADER: &str = "x-looker-base-url";
/// Header carrying the API3 client id.
pub const CLIENT_ID_HEADER: &str = "x-looker-client-id";
/// Header carrying the API3 client secret.
pub const CLIENT_SECRET_HEADER: &str = "x-looker-client-secret";
/// Header carrying a pre-issued access token.
pub const ACCESS_TOKEN_HEADER: &str = "x-looker-access-token";

/// Credential set for one tenant, created fresh for every inbound request.
///
/// Values are taken literally from the request; nothing is defaulted or inferred. The struct
/// is never persisted and is owned by exactly one [`ApiClient`](crate::client::ApiClient).
#[derive(Clone, Default, PartialEq, Eq)]
pub struct TenantCredentials {
	/// Instance URL of the tenant.
	pub base_url: Option<String>,
	/// OAuth client id used for the login exchange.
	pub client_id: Option<String>,
	/// OAuth client secret used for the login exchange.
	pub client_secret: Option<String>,
	/// Pre-issued bearer token that bypasses the login exchange.
	pub access_token: Option<String>,
}
impl TenantCredentials {
	/// Resolves credentials from request headers by literal name lookup.
	///
	/// Absent, empty, or non-UTF-8 header values leave the matching field unset.
	pub fn from_headers(headers: &HeaderMap) -> Self {
		Self {
			base_url: header_value(headers, BASE_URL_HEADER),
			client_id: header_value(headers, CLIENT_ID_HEADER),
			client_secret: header_value(headers, CLIENT_SECRET_HEADER),
			access_token: header_value(headers, ACCESS_TOKEN_HEADER),
		}
	}

	/// Checks that the credential set can authenticate at all.
	///
	/// A base URL is always required, plus either an access token or the full client id and
	/// secret pair.
	pub fn validate(&self) -> Result<()> {
		if self.base_url.is_none() {
			return Err(Error::MissingCredentials { reason: "base URL is not set" });
		}
		if self.access_token.is_some() {
			return Ok(());
		}

		match (&self.client_id, &self.client_secret) {
			(Some(_), Some(_)) => Ok(()),
			(Some(_), None) => Err(Error::MissingCredentials { reason: "client secret is not set" }),
			(None, Some(_)) => Err(Error::MissingCredentials { reason: "client id is not set" }),
			(None, None) => Err(Error::MissingCredentials {
				reason: "neither an access token nor client credentials are set",
			}),
		}
	}

	/// Returns `true` when a pre-issued token was supplied.
	pub fn has_supplied_token(&self) -> bool {
		self.access_token.is_some()
	}
}
impl Debug for TenantCredentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TenantCredentials")
			.field("base_url", &self.base_url)
			.field("client_id", &self.client_id)
			.field("client_secret", &self.client_secret.as_ref().map(|_| "<redacted>"))
			.field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
			.finish()
	}
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
	let raw = headers.get(name)?.to_str().ok()?.trim();

	if raw.is_empty() { None } else { Some(raw.to_owned()) }
}

#[cfg(test)]
mod tests {
	// crates.io
	use reqwest::header::{HeaderName, HeaderValue};
	// self
	use super::*;

	fn credentials(
		base_url: Option<&str>,
		client_id: Option<&str>,
		client_secret: Option<&str>,
		access_token: Option<&str>,
	) -> TenantCredentials {
		TenantCredentials {
			base_url: base_url.map(Into::into),
			client_id: client_id.map(Into::into),
			client_secret: client_secret.map(Into::into),
			access_token: access_token.map(Into::into),
		}
	}

	#[test]
	fn headers_resolve_by_literal_name() {
		let mut headers = HeaderMap::new();
		let name = |raw: &str| {
			HeaderName::from_bytes(raw.as_bytes()).expect("Header fixture name should be valid.")
		};

		headers.insert(name("X-Looker-Base-URL"), HeaderValue::from_static("https://x.looker.com"));
		headers.insert(name("X-Looker-Client-ID"), HeaderValue::from_static("a"));
		headers.insert(name("X-Looker-Client-Secret"), HeaderValue::from_static("b"));

		let resolved = TenantCredentials::from_headers(&headers);

		assert_eq!(resolved, credentials(Some("https://x.looker.com"), Some("a"), Some("b"), None));
		assert!(resolved.validate().is_ok());
	}

	#[test]
	fn blank_headers_stay_unset() {
		let mut headers = HeaderMap::new();

		headers.insert(BASE_URL_HEADER, HeaderValue::from_static("https://x.looker.com"));
		headers.insert(ACCESS_TOKEN_HEADER, HeaderValue::from_static("   "));

		let resolved = TenantCredentials::from_headers(&headers);

		assert!(resolved.access_token.is_none());
		assert!(matches!(resolved.validate(), Err(Error::MissingCredentials { .. })));
	}

	#[test]
	fn validation_requires_base_url_and_a_complete_auth_path() {
		let base = Some("https://x.looker.com");

		assert!(matches!(
			credentials(None, None, None, None).validate(),
			Err(Error::MissingCredentials { .. })
		));
		assert!(matches!(
			credentials(base, None, None, None).validate(),
			Err(Error::MissingCredentials { .. })
		));
		assert!(credentials(base, None, None, Some("token")).validate().is_ok());
		assert!(matches!(
			credentials(base, Some("a"), None, None).validate(),
			Err(Error::MissingCredentials { reason: "client secret is not set" })
		));
		assert!(matches!(
			credentials(None, Some("a"), Some("b"), Some("token")).validate(),
			Err(Error::MissingCredentials { reason: "base URL is not set" })
		));
	}

	#[test]
	fn debug_output_redacts_secrets() {
		let creds = credentials(Some("https://x.looker.com"), Some("a"), Some("b"), Some("t"));
		let rendered = format!("{creds:?}");

		assert!(rendered.contains("<redacted>"));
		assert!(!rendered.contains("\"b\""));
		assert!(!rendered.contains("\"t\""));
	}
}
