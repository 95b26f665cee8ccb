//! Token acquisition: supplied-token shortcut, cache reuse, and singleflight login.

// self
use crate::{
	_prelude::*,
	auth::{CachedToken, TokenSecret},
	client::ApiClient,
	error::ConfigError,
	http,
	obs::{self, CallKind, CallOutcome, CallSpan},
};

// `token_type` is always `Bearer` and is not read.
#[derive(Deserialize)]
struct LoginResponse {
	access_token: String,
	#[serde(default)]
	expires_in: Option<i64>,
}

impl ApiClient {
	/// Returns a bearer token for this tenant, logging in only when required.
	///
	/// A supplied token is always returned as-is. An issued token is reused while more than
	/// [`CachedToken::SAFETY_MARGIN`] remains; otherwise concurrent callers share one login.
	pub async fn get_token(&self) -> Result<TokenSecret> {
		if let Some(secret) = self.reusable_token() {
			return Ok(secret);
		}

		let _singleflight = self.login_guard.lock().await;

		if let Some(secret) = self.reusable_token() {
			return Ok(secret);
		}

		let cached = self.login().await?;
		let secret = cached.secret.clone();

		*self.token.lock() = Some(cached);

		Ok(secret)
	}

	/// Clears an issued token so the next call re-authenticates; supplied tokens stay.
	pub fn invalidate_token(&self) {
		let mut slot = self.token.lock();

		if slot.as_ref().is_some_and(|token| !token.is_supplied()) {
			*slot = None;

			self.metrics.record_invalidation();
		}
	}

	fn reusable_token(&self) -> Option<TokenSecret> {
		let now = OffsetDateTime::now_utc();
		let secret = self
			.token
			.lock()
			.as_ref()
			.filter(|token| token.is_supplied() || token.is_valid_at(now))
			.map(|token| token.secret.clone())?;

		self.metrics.record_cache_hit();

		Some(secret)
	}

	async fn login(&self) -> Result<CachedToken> {
		const KIND: CallKind = CallKind::Login;

		let span = CallSpan::new(KIND, "login");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);
		self.metrics.record_login_attempt();

		let result = span.instrument(self.exchange_client_credentials()).await;

		obs::record_call_result(KIND, &result);

		if result.is_ok() {
			self.metrics.record_login_success();
		} else {
			self.metrics.record_login_failure();
		}

		result
	}

	async fn exchange_client_credentials(&self) -> Result<CachedToken> {
		let (Some(client_id), Some(client_secret)) =
			(self.credentials.client_id.as_deref(), self.credentials.client_secret.as_deref())
		else {
			return Err(Error::MissingCredentials { reason: "client credentials are not set" });
		};
		let url = self.api_url("/login")?;
		let response = self
			.http
			.post(url)
			.form(&[("client_id", client_id), ("client_secret", client_secret)])
			.send()
			.await?;
		let status = response.status().as_u16();
		let body = response.text().await?;

		if !(200..300).contains(&status) {
			let message =
				if body.trim().is_empty() { http::extract_message(&body, status) } else { body };

			return Err(Error::AuthenticationFailed { message, status: Some(status) });
		}

		let mut de = serde_json::Deserializer::from_str(&body);
		let parsed: LoginResponse = serde_path_to_error::deserialize(&mut de)
			.map_err(|source| Error::Decode { source, status: Some(status) })?;
		let issued_at = OffsetDateTime::now_utc();
		let expires_in = match parsed.expires_in {
			Some(seconds) if seconds <= 0 => return Err(ConfigError::NonPositiveExpiresIn.into()),
			Some(seconds) => Duration::seconds(seconds),
			None => CachedToken::DEFAULT_EXPIRES_IN,
		};

		issued_at.checked_add(expires_in).ok_or(ConfigError::ExpiresInOutOfRange)?;

		Ok(CachedToken::issued(TokenSecret::new(parsed.access_token), issued_at, expires_in))
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::_preludet::*;

	#[tokio::test]
	async fn supplied_tokens_outlive_the_assumed_window() {
		let client = build_test_client(supplied_token("http://127.0.0.1:9", "pre-issued"));
		let stale = OffsetDateTime::now_utc() - CachedToken::SUPPLIED_VALIDITY - Duration::hours(2);
		let token = CachedToken::supplied(TokenSecret::new("pre-issued"), stale);

		assert!(!token.is_valid_at(OffsetDateTime::now_utc()));

		*client.token.lock() = Some(token);

		let secret =
			client.get_token().await.expect("Stale supplied token should still be returned.");

		assert_eq!(secret.expose(), "pre-issued");
		assert_eq!(client.metrics().login_attempts(), 0);
		assert_eq!(client.metrics().cache_hits(), 1);

		client.invalidate_token();

		assert!(client.cached_token().is_some_and(|token| token.is_supplied()));
		assert_eq!(client.metrics().invalidations(), 0);
	}
}
