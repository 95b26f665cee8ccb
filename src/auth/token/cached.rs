//! The single token slot a tenant client keeps between calls.

// self
use crate::{_prelude::*, auth::token::secret::TokenSecret};

/// Where a cached token came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenOrigin {
	/// Minted by the login endpoint from client credentials.
	Issued,
	/// Handed to the client as a pre-issued header token.
	Supplied,
}

/// Freshness of a cached token relative to the safety margin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenStatus {
	/// More than the safety margin remains before expiry.
	Valid,
	/// The token is inside the safety margin and should be re-issued.
	Expiring,
	/// The recorded expiry has passed.
	Expired,
}

/// Bearer token plus the expiry the client recorded when it was cached.
#[derive(Clone)]
pub struct CachedToken {
	/// Bearer secret; callers must avoid logging it.
	pub secret: TokenSecret,
	/// Instant the token entered the cache.
	pub issued_at: OffsetDateTime,
	/// Recorded expiry instant.
	pub expires_at: OffsetDateTime,
	/// Whether the token was issued by login or supplied by the caller.
	pub origin: TokenOrigin,
}
impl CachedToken {
	/// Lifetime assumed when the login response omits `expires_in`.
	pub const DEFAULT_EXPIRES_IN: Duration = Duration::seconds(3600);
	/// Remaining lifetime below which a cached token is treated as expiring.
	pub const SAFETY_MARGIN: Duration = Duration::seconds(60);
	/// Validity window assumed for a supplied token; its real expiry is unknown.
	pub const SUPPLIED_VALIDITY: Duration = Duration::hours(1);

	/// Records a token minted by the login endpoint.
	pub fn issued(secret: TokenSecret, issued_at: OffsetDateTime, expires_in: Duration) -> Self {
		Self { secret, issued_at, expires_at: issued_at + expires_in, origin: TokenOrigin::Issued }
	}

	/// Records a pre-issued token under the assumed validity window.
	pub fn supplied(secret: TokenSecret, now: OffsetDateTime) -> Self {
		Self {
			secret,
			issued_at: now,
			expires_at: now + Self::SUPPLIED_VALIDITY,
			origin: TokenOrigin::Supplied,
		}
	}

	/// Computes the freshness at a given instant.
	pub fn status_at(&self, instant: OffsetDateTime) -> TokenStatus {
		if instant >= self.expires_at {
			return TokenStatus::Expired;
		}
		if self.expires_at - instant <= Self::SAFETY_MARGIN {
			return TokenStatus::Expiring;
		}

		TokenStatus::Valid
	}

	/// Returns `true` when the token can be reused without a login call.
	pub fn is_valid_at(&self, instant: OffsetDateTime) -> bool {
		matches!(self.status_at(instant), TokenStatus::Valid)
	}

	/// Returns `true` for tokens supplied by the caller.
	pub fn is_supplied(&self) -> bool {
		matches!(self.origin, TokenOrigin::Supplied)
	}
}
impl Debug for CachedToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("CachedToken")
			.field("secret", &"<redacted>")
			.field("issued_at", &self.issued_at)
			.field("expires_at", &self.expires_at)
			.field("origin", &self.origin)
			.finish()
	}
}
