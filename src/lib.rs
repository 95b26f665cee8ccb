//! Tenant-scoped Looker API client and Model Context Protocol tool server.
//!
//! Credentials arrive with every inbound request, each request builds its own
//! [`client::ApiClient`], and [`tools::LookerServer`] exposes the platform's entities as MCP
//! tools whose failures render as structured JSON envelopes.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod obs;
pub mod tools;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// std
	use std::collections::VecDeque;
	// self
	use crate::{
		auth::TenantCredentials,
		client::{ApiClient, ApiFuture, LookerApi},
		http::{ApiPayload, ApiRequest, ReqwestHttpClient},
	};

	/// Client id used by fixtures that exercise the login flow.
	pub const TEST_CLIENT_ID: &str = "test-client-id";
	/// Client secret paired with [`TEST_CLIENT_ID`].
	pub const TEST_CLIENT_SECRET: &str = "test-client-secret";

	/// Credentials that authenticate through the client-credentials login against `base_url`.
	pub fn client_credentials(base_url: &str) -> TenantCredentials {
		TenantCredentials {
			base_url: Some(base_url.to_owned()),
			client_id: Some(TEST_CLIENT_ID.to_owned()),
			client_secret: Some(TEST_CLIENT_SECRET.to_owned()),
			access_token: None,
		}
	}

	/// Credentials that carry a pre-issued access token for `base_url`.
	pub fn supplied_token(base_url: &str, token: &str) -> TenantCredentials {
		TenantCredentials {
			base_url: Some(base_url.to_owned()),
			client_id: None,
			client_secret: None,
			access_token: Some(token.to_owned()),
		}
	}

	/// Builds an [`ApiClient`] with a plain reqwest transport for `httpmock` servers.
	pub fn build_test_client(credentials: TenantCredentials) -> ApiClient {
		let client = ReqwestClient::builder()
			.build()
			.expect("Failed to build Reqwest client for tests.");

		ApiClient::with_http_client(credentials, ReqwestHttpClient::with_client(client))
			.expect("Test credentials should produce a valid client.")
	}

	/// In-memory [`LookerApi`] that records requests and replays queued responses.
	///
	/// Calls made after the queue drains answer [`ApiPayload::Empty`].
	#[derive(Default)]
	pub struct RecordingApi {
		requests: Mutex<Vec<ApiRequest>>,
		responses: Mutex<VecDeque<Result<ApiPayload>>>,
	}
	impl RecordingApi {
		/// Creates an empty recorder.
		pub fn new() -> Self {
			Self::default()
		}

		/// Queues the outcome of the next call.
		pub fn respond(&self, outcome: Result<ApiPayload>) {
			self.responses.lock().push_back(outcome);
		}

		/// Returns every request seen so far, oldest first.
		pub fn requests(&self) -> Vec<ApiRequest> {
			self.requests.lock().clone()
		}

		/// Returns the most recent request.
		pub fn last_request(&self) -> ApiRequest {
			self.requests.lock().last().cloned().expect("At least one request should be recorded.")
		}
	}
	impl LookerApi for RecordingApi {
		fn request(&self, request: ApiRequest) -> ApiFuture<'_, ApiPayload> {
			self.requests.lock().push(request);

			let outcome = self.responses.lock().pop_front().unwrap_or(Ok(ApiPayload::Empty));

			Box::pin(async move { outcome })
		}
	}
}

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::Mutex;
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use reqwest;
pub use rmcp;
#[cfg(test)] use {color_eyre as _, httpmock as _, tokio as _};
