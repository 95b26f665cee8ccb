//! Success and failure rendering for tool results.

// crates.io
use rmcp::{
	ErrorData as McpError,
	model::{CallToolResult, Content},
};
// self
use crate::{
	_prelude::*,
	error::ErrorKind,
	http::ApiPayload,
	obs::{self, CallKind, CallOutcome},
};

/// Appended to any response cut at the character limit; `{shown}` and `{total}` are filled in.
pub const TRUNCATION_NOTICE: &str = "[Response truncated: showing {shown} of {total} characters. \
                                     Narrow the request with filters, `limit`, or `offset`.]";

/// JSON body of a failed tool call: `{ "error": { .. } }`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ErrorPayload {
	/// Error details.
	pub error: ErrorDetail,
}
impl ErrorPayload {
	/// Builds the payload for `err`.
	pub fn from_error(err: &Error) -> Self {
		Self {
			error: ErrorDetail {
				kind: err.kind(),
				message: err.to_string(),
				status: err.http_status(),
				retry_after_seconds: err.retry_after_seconds(),
				retryable: err.is_retryable(),
			},
		}
	}
}

/// Fields of an [`ErrorPayload`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ErrorDetail {
	/// Stable classification.
	pub kind: ErrorKind,
	/// Human-readable message.
	pub message: String,
	/// HTTP status, when one applies.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub status: Option<u16>,
	/// Back-off hint for rate-limited calls.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub retry_after_seconds: Option<u64>,
	/// Whether trying the same call again can succeed.
	pub retryable: bool,
}

pub(crate) fn outcome<T, F>(
	tool: &'static str,
	result: Result<T>,
	on_success: F,
) -> Result<CallToolResult, McpError>
where
	F: FnOnce(T) -> Result<CallToolResult, McpError>,
{
	match result {
		Ok(value) => {
			obs::record_call_outcome(CallKind::Tool, CallOutcome::Success);

			on_success(value)
		},
		Err(err) => {
			obs::record_call_outcome(CallKind::Tool, CallOutcome::Failure);

			Ok(failure(tool, &err))
		},
	}
}

pub(crate) fn json(value: &impl Serialize, limit: usize) -> Result<CallToolResult, McpError> {
	let text = serde_json::to_string_pretty(value).map_err(|e| {
		McpError::internal_error(format!("Result could not be rendered: {e}."), None)
	})?;

	Ok(CallToolResult::success(vec![Content::text(truncate(text, limit))]))
}

pub(crate) fn payload(payload: ApiPayload, limit: usize) -> Result<CallToolResult, McpError> {
	match payload {
		ApiPayload::Text(text) =>
			Ok(CallToolResult::success(vec![Content::text(truncate(text, limit))])),
		other => json(&other.into_value(), limit),
	}
}

pub(crate) fn failure(tool: &'static str, err: &Error) -> CallToolResult {
	let payload = ErrorPayload::from_error(err);
	let text = serde_json::to_string_pretty(&payload).unwrap_or_else(|_| err.to_string());

	obs::record_tool_failure(tool, payload.error.kind, &payload.error.message);

	CallToolResult::error(vec![Content::text(text)])
}

pub(crate) fn truncate(text: String, limit: usize) -> String {
	let total = text.chars().count();

	if total <= limit {
		return text;
	}

	let mut shown: String = text.chars().take(limit).collect();
	let notice = TRUNCATION_NOTICE
		.replace("{shown}", &limit.to_string())
		.replace("{total}", &total.to_string());

	shown.push_str("\n\n");
	shown.push_str(&notice);

	shown
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::{Value, json};
	// self
	use super::*;
	use crate::tools::tests::text;

	#[test]
	fn long_text_is_cut_with_a_notice() {
		let rendered = truncate("é".repeat(12), 5);

		assert!(rendered.starts_with("ééééé\n\n[Response truncated: showing 5 of 12 characters."));
		assert_eq!(truncate("short".into(), 5), "short");
	}

	#[test]
	fn failures_render_structured_payloads() {
		let result = failure("get_look", &Error::RateLimited { retry_after_seconds: 30 });

		assert_eq!(result.is_error, Some(true));

		let body: Value = serde_json::from_str(text(&result)).expect("Payload should be JSON.");

		assert_eq!(
			body,
			json!({
				"error": {
					"kind": "rate_limited",
					"message": "Rate limit exceeded; retry after 30 seconds.",
					"status": 429,
					"retry_after_seconds": 30,
					"retryable": true,
				}
			})
		);
	}

	#[test]
	fn text_payloads_pass_through_unquoted() {
		let result = payload(ApiPayload::Text("a,b\n1,2\n".into()), 100)
			.expect("Text payloads should render.");

		assert_eq!(text(&result), "a,b\n1,2\n");

		let result = payload(ApiPayload::Empty, 100).expect("Empty payloads should render.");

		assert_eq!(text(&result), "null");
	}
}
