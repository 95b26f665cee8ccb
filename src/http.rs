//! Request/response primitives for Looker API calls.
//!
//! The module exposes [`ApiRequest`] and [`ApiPayload`], the transport wrapper
//! [`ReqwestHttpClient`], and [`classify_response`], which turns an HTTP status, headers, and
//! body into either a decoded payload or a typed [`Error`]. Classification is pure so
//! alternative [`LookerApi`](crate::client::LookerApi) implementations can reuse it.

// std
use std::ops::Deref;
// crates.io
use reqwest::{
	Method,
	header::{CONTENT_TYPE, HeaderMap, RETRY_AFTER},
};
use serde_json::Value;
use time::format_description::well_known::Rfc2822;
use url::form_urlencoded;
// self
use crate::_prelude::*;

/// Version prefix placed between the tenant base URL and every endpoint.
pub const API_PREFIX: &str = "/api/4.0";
/// Retry hint used when a 429 response carries no usable `Retry-After` header.
pub const DEFAULT_RETRY_AFTER_SECONDS: u64 = 60;

/// One call against the tenant API, relative to [`API_PREFIX`].
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
	/// HTTP method.
	pub method: Method,
	/// Endpoint path beginning with `/`, already percent-encoded.
	pub endpoint: String,
	/// Query parameters in insertion order.
	pub query: Vec<(String, String)>,
	/// JSON body, if any.
	pub body: Option<Value>,
	/// Header overrides merged over the defaults.
	pub headers: BTreeMap<String, String>,
}
impl ApiRequest {
	/// Creates a request with no query, body, or header overrides.
	pub fn new(method: Method, endpoint: impl Into<String>) -> Self {
		Self {
			method,
			endpoint: endpoint.into(),
			query: Vec::new(),
			body: None,
			headers: BTreeMap::new(),
		}
	}

	/// Shorthand for a `GET` request.
	pub fn get(endpoint: impl Into<String>) -> Self {
		Self::new(Method::GET, endpoint)
	}

	/// Shorthand for a `POST` request.
	pub fn post(endpoint: impl Into<String>) -> Self {
		Self::new(Method::POST, endpoint)
	}

	/// Shorthand for a `PATCH` request.
	pub fn patch(endpoint: impl Into<String>) -> Self {
		Self::new(Method::PATCH, endpoint)
	}

	/// Shorthand for a `DELETE` request.
	pub fn delete(endpoint: impl Into<String>) -> Self {
		Self::new(Method::DELETE, endpoint)
	}

	/// Appends a query parameter.
	pub fn query(mut self, key: impl Into<String>, value: impl Display) -> Self {
		self.query.push((key.into(), value.to_string()));

		self
	}

	/// Appends a query parameter only when `value` is present.
	pub fn query_opt(self, key: impl Into<String>, value: Option<impl Display>) -> Self {
		match value {
			Some(value) => self.query(key, value),
			None => self,
		}
	}

	/// Serializes `body` as the JSON request body.
	pub fn json(mut self, body: &impl Serialize) -> Result<Self> {
		let value =
			serde_json::to_value(body).map_err(crate::error::ConfigError::RequestBody)?;

		self.body = Some(value);

		Ok(self)
	}

	/// Adds or replaces a header override.
	pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.insert(name.into(), value.into());

		self
	}
}

/// Decoded response body.
#[derive(Clone, Debug, PartialEq)]
pub enum ApiPayload {
	/// The platform answered 204.
	Empty,
	/// A non-JSON body returned verbatim (CSV, SQL, images, plain text).
	Text(String),
	/// A parsed JSON document.
	Json(Value),
}
impl ApiPayload {
	/// Converts the payload into a JSON value: `null`, a string, or the document.
	pub fn into_value(self) -> Value {
		match self {
			Self::Empty => Value::Null,
			Self::Text(text) => Value::String(text),
			Self::Json(value) => value,
		}
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Timeouts and proxies belong to the wrapped client; the core adds no timeout of its own.
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

/// Maps an HTTP response onto a payload or a typed error; the first matching rule wins.
///
/// 1. 429 becomes [`Error::RateLimited`].
/// 2. 401 and 403 become [`Error::AuthenticationFailed`].
/// 3. 404 becomes [`Error::NotFound`] with the body verbatim.
/// 4. Any other non-2xx becomes [`Error::Api`].
/// 5. 204 yields [`ApiPayload::Empty`].
/// 6. A non-JSON content type yields [`ApiPayload::Text`].
/// 7. Everything else is parsed as JSON.
pub fn classify_response(status: u16, headers: &HeaderMap, body: String) -> Result<ApiPayload> {
	match status {
		429 => Err(Error::RateLimited { retry_after_seconds: retry_after_seconds(headers) }),
		401 | 403 => Err(Error::AuthenticationFailed {
			message: extract_message(&body, status),
			status: Some(status),
		}),
		404 => Err(Error::NotFound { body }),
		code if !(200..300).contains(&code) =>
			Err(Error::Api { message: extract_message(&body, status), status }),
		204 => Ok(ApiPayload::Empty),
		_ if !is_json(headers) => Ok(ApiPayload::Text(body)),
		_ => {
			let mut de = serde_json::Deserializer::from_str(&body);
			let value: Value = serde_path_to_error::deserialize(&mut de)
				.map_err(|source| Error::Decode { source, status: Some(status) })?;

			Ok(ApiPayload::Json(value))
		},
	}
}

/// Extracts a human-readable message from an error body.
///
/// Prefers a JSON `message` string, then a JSON `error` string, then the raw text, and finally
/// a generic `API error: <status>` label.
pub fn extract_message(body: &str, status: u16) -> String {
	if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
		let structured = ["message", "error"]
			.into_iter()
			.filter_map(|field| map.get(field).and_then(Value::as_str))
			.find(|message| !message.trim().is_empty());

		if let Some(message) = structured {
			return message.to_owned();
		}
	}

	let trimmed = body.trim();

	if trimmed.is_empty() { format!("API error: {status}") } else { trimmed.to_owned() }
}

/// Reads the `Retry-After` hint in whole seconds, falling back to
/// [`DEFAULT_RETRY_AFTER_SECONDS`].
pub fn retry_after_seconds(headers: &HeaderMap) -> u64 {
	parse_retry_after(headers)
		.and_then(|delta| u64::try_from(delta.whole_seconds()).ok())
		.unwrap_or(DEFAULT_RETRY_AFTER_SECONDS)
}

/// Percent-encodes `segments` into an endpoint path such as `/dashboards/abc%20123`.
pub fn endpoint<'a>(segments: impl IntoIterator<Item = &'a str>) -> String {
	let mut path = String::new();

	for segment in segments {
		path.push('/');
		path.extend(form_urlencoded::byte_serialize(segment.as_bytes()).map(|chunk| {
			if chunk == "+" { "%20" } else { chunk }
		}));
	}

	path
}

fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
	let value = headers.get(RETRY_AFTER)?;
	let raw = value.to_str().ok()?.trim();

	if let Ok(secs) = raw.parse::<u64>() {
		return Some(Duration::seconds(i64::try_from(secs).ok()?));
	}
	if let Ok(moment) = OffsetDateTime::parse(raw, &Rfc2822) {
		let delta = moment - OffsetDateTime::now_utc();

		if delta.is_positive() {
			return Some(delta);
		}
	}

	None
}

fn is_json(headers: &HeaderMap) -> bool {
	let Some(raw) = headers.get(CONTENT_TYPE).and_then(|value| value.to_str().ok()) else {
		return false;
	};
	let essence = raw.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();

	essence == "application/json" || essence.ends_with("+json")
}

#[cfg(test)]
mod tests {
	// crates.io
	use reqwest::header::HeaderValue;
	use serde_json::json;
	use time::macros;
	// self
	use super::*;

	fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
		let mut map = HeaderMap::new();

		for (name, value) in pairs {
			map.insert(*name, HeaderValue::from_static(*value));
		}

		map
	}

	#[test]
	fn rate_limits_read_retry_after_with_fallback() {
		let err = classify_response(429, &headers(&[("retry-after", "30")]), String::new())
			.expect_err("429 should be classified as an error.");

		assert!(matches!(err, Error::RateLimited { retry_after_seconds: 30 }));

		let err = classify_response(429, &HeaderMap::new(), String::new())
			.expect_err("429 should be classified as an error.");

		assert!(matches!(err, Error::RateLimited { retry_after_seconds: 60 }));

		let err = classify_response(429, &headers(&[("retry-after", "soon")]), String::new())
			.expect_err("429 should be classified as an error.");

		assert!(matches!(err, Error::RateLimited { retry_after_seconds: 60 }));
	}

	#[test]
	fn retry_after_accepts_http_dates() {
		let future = headers(&[("retry-after", "Fri, 01 Jan 2100 00:00:00 GMT")]);
		let remaining = (macros::datetime!(2100-01-01 00:00 UTC) - OffsetDateTime::now_utc())
			.whole_seconds()
			.unsigned_abs();
		let seconds = retry_after_seconds(&future);

		assert!(seconds > DEFAULT_RETRY_AFTER_SECONDS);
		assert!(seconds.abs_diff(remaining) <= 5);

		let past = headers(&[("retry-after", "Sun, 06 Nov 1994 08:49:37 GMT")]);

		assert_eq!(retry_after_seconds(&past), DEFAULT_RETRY_AFTER_SECONDS);
	}

	#[test]
	fn auth_and_missing_resources_are_distinct() {
		let err = classify_response(403, &HeaderMap::new(), "{\"message\":\"Forbidden\"}".into())
			.expect_err("403 should be classified as an error.");

		assert!(matches!(
			err,
			Error::AuthenticationFailed { ref message, status: Some(403) } if message == "Forbidden"
		));

		let body = "{\"message\":\"Not found\",\"documentation_url\":\"https://docs\"}";
		let err = classify_response(404, &HeaderMap::new(), body.into())
			.expect_err("404 should be classified as an error.");

		assert!(matches!(err, Error::NotFound { body: ref verbatim } if verbatim == body));
	}

	#[test]
	fn api_error_messages_prefer_structured_fields() {
		assert_eq!(extract_message("{\"message\":\"Validation Failed\"}", 422), "Validation Failed");
		assert_eq!(extract_message("{\"error\":\"bad filter\"}", 400), "bad filter");
		assert_eq!(extract_message("upstream exploded", 502), "upstream exploded");
		assert_eq!(extract_message("{\"detail\":1}", 500), "{\"detail\":1}");
		assert_eq!(extract_message("", 500), "API error: 500");

		let err = classify_response(500, &HeaderMap::new(), String::new())
			.expect_err("500 should be classified as an error.");

		assert!(matches!(
			err,
			Error::Api { ref message, status: 500 } if message == "API error: 500"
		));
	}

	#[test]
	fn success_bodies_decode_by_content_type() {
		let empty =
			classify_response(204, &headers(&[("content-type", "application/json")]), String::new())
				.expect("204 should decode to an empty payload.");

		assert_eq!(empty, ApiPayload::Empty);

		let csv = "id,title\n1,Sales\n";
		let text = classify_response(200, &headers(&[("content-type", "text/csv")]), csv.into())
			.expect("CSV bodies should be returned verbatim.");

		assert_eq!(text, ApiPayload::Text(csv.into()));

		let json = classify_response(
			200,
			&headers(&[("content-type", "application/json; charset=utf-8")]),
			"[{\"id\":\"1\"}]".into(),
		)
		.expect("JSON bodies should parse.");

		assert_eq!(json, ApiPayload::Json(json!([{ "id": "1" }])));
	}

	#[test]
	fn malformed_json_reports_decode_errors() {
		let err =
			classify_response(200, &headers(&[("content-type", "application/json")]), "{".into())
				.expect_err("Truncated JSON should fail to decode.");

		assert!(matches!(err, Error::Decode { status: Some(200), .. }));
	}

	#[test]
	fn endpoints_percent_encode_segments() {
		assert_eq!(endpoint(["dashboards", "abc 1/2"]), "/dashboards/abc%201%2F2");
		assert_eq!(endpoint(["looks", "42", "run", "csv"]), "/looks/42/run/csv");
		assert_eq!(endpoint(["users", "a+b"]), "/users/a%2Bb");
	}

	#[test]
	fn request_builder_collects_parts() {
		let request = ApiRequest::get(endpoint(["dashboards", "search"]))
			.query("title", "Sales")
			.query_opt("folder_id", None::<&str>)
			.query_opt("limit", Some(5))
			.header("Accept", "text/csv");

		assert_eq!(request.endpoint, "/dashboards/search");
		assert_eq!(
			request.query,
			vec![("title".to_owned(), "Sales".to_owned()), ("limit".to_owned(), "5".to_owned())]
		);
		assert_eq!(request.headers.get("Accept").map(String::as_str), Some("text/csv"));
	}
}
