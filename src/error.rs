//! Client-level error types shared across credential resolution, token issuance, and requests.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// Inbound request did not carry a usable credential set.
	#[error("Tenant credentials are incomplete: {reason}.")]
	MissingCredentials {
		/// Which part of the credential set is missing.
		reason: &'static str,
	},
	/// Login was rejected or the platform answered 401/403.
	#[error("Authentication failed: {message}.")]
	AuthenticationFailed {
		/// Response body or extracted message.
		message: String,
		/// HTTP status code, when a response was received.
		status: Option<u16>,
	},
	/// The platform answered 429.
	#[error("Rate limit exceeded; retry after {retry_after_seconds} seconds.")]
	RateLimited {
		/// Seconds the caller should wait before retrying.
		retry_after_seconds: u64,
	},
	/// The platform answered 404.
	#[error("Resource not found: {body}.")]
	NotFound {
		/// Response body, verbatim.
		body: String,
	},
	/// Any other non-success response.
	#[error("{message}")]
	Api {
		/// Best-effort message extracted from the response.
		message: String,
		/// HTTP status code.
		status: u16,
	},
	/// A JSON body did not match the expected shape.
	#[error("Response body does not match the expected shape at `{}`.", .source.path())]
	Decode {
		/// Structured parsing failure carrying the offending path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
}
impl Error {
	/// Returns the stable classification of this error.
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::Config(_) => ErrorKind::Config,
			Self::Transport(_) => ErrorKind::Transport,
			Self::MissingCredentials { .. } => ErrorKind::MissingCredentials,
			Self::AuthenticationFailed { .. } => ErrorKind::AuthenticationFailed,
			Self::RateLimited { .. } => ErrorKind::RateLimited,
			Self::NotFound { .. } => ErrorKind::NotFound,
			Self::Api { .. } => ErrorKind::Api,
			Self::Decode { .. } => ErrorKind::Decode,
		}
	}

	/// Returns `true` when the same call may succeed if the caller tries again.
	///
	/// Authentication failures count as retryable because the failed call already cleared the
	/// cached token, so the next attempt re-authenticates.
	pub fn is_retryable(&self) -> bool {
		match self {
			Self::AuthenticationFailed { .. } | Self::RateLimited { .. } | Self::Transport(_) =>
				true,
			Self::Api { status, .. } => *status >= 500,
			_ => false,
		}
	}

	/// Returns the HTTP status that best describes this error to an inbound caller.
	pub fn http_status(&self) -> Option<u16> {
		match self {
			Self::MissingCredentials { .. } => Some(401),
			Self::AuthenticationFailed { status, .. } => Some(status.unwrap_or(401)),
			Self::RateLimited { .. } => Some(429),
			Self::NotFound { .. } => Some(404),
			Self::Api { status, .. } => Some(*status),
			Self::Decode { status, .. } => *status,
			Self::Config(_) | Self::Transport(_) => None,
		}
	}

	/// Returns the retry hint carried by [`Error::RateLimited`].
	pub fn retry_after_seconds(&self) -> Option<u64> {
		match self {
			Self::RateLimited { retry_after_seconds } => Some(*retry_after_seconds),
			_ => None,
		}
	}
}

/// Stable error labels used in tool payloads, spans, and metrics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
	/// See [`Error::Config`].
	Config,
	/// See [`Error::Transport`].
	Transport,
	/// See [`Error::MissingCredentials`].
	MissingCredentials,
	/// See [`Error::AuthenticationFailed`].
	AuthenticationFailed,
	/// See [`Error::RateLimited`].
	RateLimited,
	/// See [`Error::NotFound`].
	NotFound,
	/// See [`Error::Api`].
	#[serde(rename = "api_error")]
	Api,
	/// See [`Error::Decode`].
	Decode,
}
impl ErrorKind {
	/// Returns a stable label suitable for payloads and metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Config => "config",
			Self::Transport => "transport",
			Self::MissingCredentials => "missing_credentials",
			Self::AuthenticationFailed => "authentication_failed",
			Self::RateLimited => "rate_limited",
			Self::NotFound => "not_found",
			Self::Api => "api_error",
			Self::Decode => "decode",
		}
	}
}
impl Display for ErrorKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
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
	/// Tenant base URL cannot be parsed.
	#[error("Tenant base URL is invalid.")]
	InvalidBaseUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Tenant base URL uses a scheme other than http or https.
	#[error("Tenant base URL uses the unsupported `{scheme}` scheme.")]
	UnsupportedScheme {
		/// Scheme found in the URL.
		scheme: String,
	},
	/// Caller-supplied header override is not a valid HTTP header.
	#[error("Header override `{name}` is invalid.")]
	InvalidHeader {
		/// Header name as supplied.
		name: String,
	},
	/// Request body could not be serialized.
	#[error("Request body could not be serialized.")]
	RequestBody(#[source] serde_json::Error),
	/// Login response returned an excessively large `expires_in`.
	#[error("The expires_in value exceeds the supported range.")]
	ExpiresInOutOfRange,
	/// Login response returned a non-positive duration.
	#[error("The expires_in value must be positive.")]
	NonPositiveExpiresIn,
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the Looker API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// The request timed out before a response arrived.
	#[error("Request timed out while calling the Looker API.")]
	Timeout {
		/// Transport-specific timeout error.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		if e.is_timeout() { Self::Timeout { source: Box::new(e) } } else { Self::network(e) }
	}
}
impl From<ReqwestError> for Error {
	fn from(e: ReqwestError) -> Self {
		if e.is_builder() {
			ConfigError::http_client_build(e).into()
		} else {
			TransportError::from(e).into()
		}
	}
}
