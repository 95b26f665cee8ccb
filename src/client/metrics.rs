// std
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters for token acquisition on one client.
#[derive(Debug, Default)]
pub struct AuthMetrics {
	login_attempts: AtomicU64,
	login_successes: AtomicU64,
	login_failures: AtomicU64,
	cache_hits: AtomicU64,
	invalidations: AtomicU64,
}
impl AuthMetrics {
	/// Returns the number of login calls issued.
	pub fn login_attempts(&self) -> u64 {
		self.login_attempts.load(Ordering::Relaxed)
	}

	/// Returns the number of login calls that produced a token.
	pub fn login_successes(&self) -> u64 {
		self.login_successes.load(Ordering::Relaxed)
	}

	/// Returns the number of failed login calls.
	pub fn login_failures(&self) -> u64 {
		self.login_failures.load(Ordering::Relaxed)
	}

	/// Returns how often a cached or supplied token was reused without a login.
	pub fn cache_hits(&self) -> u64 {
		self.cache_hits.load(Ordering::Relaxed)
	}

	/// Returns how often an issued token was discarded after a 401/403.
	pub fn invalidations(&self) -> u64 {
		self.invalidations.load(Ordering::Relaxed)
	}

	pub(crate) fn record_login_attempt(&self) {
		self.login_attempts.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_login_success(&self) {
		self.login_successes.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_login_failure(&self) {
		self.login_failures.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_cache_hit(&self) {
		self.cache_hits.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_invalidation(&self) {
		self.invalidations.fetch_add(1, Ordering::Relaxed);
	}
}
