//! Optional observability helpers for tenant calls.
//!
//! # Feature Flags
//!
//! - Enable `tracing` (on by default) to emit structured spans named `looker_mcp.call` with the
//!   `call` (login/api) and `stage` (call site) fields, plus a `warn` event for every failure
//!   rendered at the tool boundary.
//! - Enable `metrics` to increment the `looker_mcp_call_total` counter for every
//!   attempt/success/failure, labeled by `call` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Which layer a recorded call belongs to.
///
/// `Login` and `Api` are outbound calls made by an [`ApiClient`](crate::client::ApiClient);
/// `Tool` is the inbound MCP invocation that wraps them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallKind {
	/// `POST /login` with the tenant's client id and secret.
	Login,
	/// One bearer-authenticated request against the tenant's API.
	Api,
	/// One tool call rendered back to the MCP caller.
	Tool,
}
impl CallKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallKind::Login => "login",
			CallKind::Api => "api",
			CallKind::Tool => "tool",
		}
	}
}
impl Display for CallKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Lifecycle point of a call as seen by the counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallOutcome {
	/// The request is about to leave the client.
	Attempt,
	/// The tenant answered and the body was classified as a payload or token.
	Success,
	/// The call ended in any [`Error`] variant, including rate limits.
	Failure,
}
impl CallOutcome {
	/// Maps a finished call onto [`CallOutcome::Success`] or [`CallOutcome::Failure`].
	pub fn of<T>(result: &Result<T>) -> Self {
		if result.is_ok() { Self::Success } else { Self::Failure }
	}

	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallOutcome::Attempt => "attempt",
			CallOutcome::Success => "success",
			CallOutcome::Failure => "failure",
		}
	}
}
impl Display for CallOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
