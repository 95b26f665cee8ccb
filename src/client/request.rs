//! Authenticated request execution on top of [`classify_response`](crate::http::classify_response).

// crates.io
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	client::ApiClient,
	error::ConfigError,
	http::{self, ApiPayload, ApiRequest},
	obs::{self, CallKind, CallOutcome, CallSpan},
};

impl ApiClient {
	pub(crate) async fn execute(&self, request: ApiRequest) -> Result<ApiPayload> {
		const KIND: CallKind = CallKind::Api;

		let span = CallSpan::new(KIND, "request");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span.instrument(self.send(request)).await;

		obs::record_call_result(KIND, &result);

		result
	}

	async fn send(&self, request: ApiRequest) -> Result<ApiPayload> {
		let url = self.api_url(&request.endpoint)?;
		let overrides = header_overrides(&request.headers)?;
		let body = request
			.body
			.as_ref()
			.map(serde_json::to_vec)
			.transpose()
			.map_err(ConfigError::RequestBody)?;
		let token = self.get_token().await?;
		let mut builder = self
			.http
			.request(request.method, url)
			.headers(default_headers(&token)?)
			.headers(overrides);

		if !request.query.is_empty() {
			builder = builder.query(&request.query);
		}
		if let Some(body) = body {
			builder = builder.body(body);
		}

		let response = builder.send().await?;
		let status = response.status().as_u16();
		let headers = response.headers().clone();
		let body = response.text().await?;
		let result = http::classify_response(status, &headers, body);

		if matches!(result, Err(Error::AuthenticationFailed { .. })) {
			self.invalidate_token();
		}

		result
	}
}

fn default_headers(token: &TokenSecret) -> Result<HeaderMap> {
	let mut headers = HeaderMap::new();
	let bearer = HeaderValue::from_str(&token.bearer())
		.map_err(|_| ConfigError::InvalidHeader { name: AUTHORIZATION.to_string() })?;

	headers.insert(AUTHORIZATION, bearer);
	headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

	Ok(headers)
}

fn header_overrides(overrides: &BTreeMap<String, String>) -> Result<HeaderMap> {
	let mut headers = HeaderMap::new();

	for (name, value) in overrides {
		let invalid = || ConfigError::InvalidHeader { name: name.clone() };
		let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
		let header_value = HeaderValue::from_str(value).map_err(|_| invalid())?;

		headers.insert(header_name, header_value);
	}

	Ok(headers)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn defaults_carry_bearer_and_json_content_type() {
		let headers =
			default_headers(&TokenSecret::new("T1")).expect("Default headers should build.");

		assert_eq!(headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()), Some("Bearer T1"));
		assert_eq!(
			headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()),
			Some("application/json")
		);
	}

	#[test]
	fn invalid_overrides_are_config_errors() {
		let overrides = BTreeMap::from_iter([("bad header".to_owned(), "x".to_owned())]);
		let err = header_overrides(&overrides).expect_err("Spaces are not valid in header names.");

		assert!(matches!(
			err,
			Error::Config(ConfigError::InvalidHeader { ref name }) if name == "bad header"
		));

		let overrides = BTreeMap::from_iter([("Accept".to_owned(), "text/csv".to_owned())]);
		let headers = header_overrides(&overrides).expect("Valid overrides should parse.");

		assert_eq!(headers.get("accept").and_then(|v| v.to_str().ok()), Some("text/csv"));
	}
}
