//! Model discovery and ad-hoc query tools.

// crates.io
use rmcp::{
	ErrorData as McpError,
	handler::server::wrapper::Parameters,
	model::CallToolResult,
	schemars::{self, JsonSchema},
	tool, tool_router,
};
// self
use crate::{
	_prelude::*,
	api::{InlineQuery, ResultFormat},
	tools::LookerServer,
};

/// Arguments for `get_explore`.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetExploreArgs {
	/// LookML model name.
	pub model: String,
	/// Explore name.
	pub explore: String,
}

/// Arguments for `run_inline_query`.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct RunInlineQueryArgs {
	/// LookML model name.
	pub model: String,
	/// Explore to query.
	pub view: String,
	/// Fully qualified fields to select, such as `orders.count`.
	pub fields: Vec<String>,
	/// Filter expressions keyed by field, such as `{"orders.created_date": "7 days"}`.
	#[serde(default)]
	pub filters: BTreeMap<String, String>,
	/// Sort expressions such as `orders.count desc`.
	#[serde(default)]
	pub sorts: Vec<String>,
	/// Maximum number of rows.
	#[serde(default)]
	pub limit: Option<u32>,
	/// Output format; defaults to `json`.
	#[serde(default)]
	pub result_format: ResultFormat,
}

#[tool_router(router = query_tools, vis = "pub(crate)")]
impl LookerServer {
	#[tool(description = "List LookML models and the explores each one exposes.")]
	async fn list_lookml_models(&self) -> Result<CallToolResult, McpError> {
		self.respond("list_lookml_models", self.api.lookml_models().await)
	}

	#[tool(description = "Get an explore with its dimensions and measures.")]
	async fn get_explore(
		&self,
		Parameters(args): Parameters<GetExploreArgs>,
	) -> Result<CallToolResult, McpError> {
		self.respond("get_explore", self.api.get_explore(&args.model, &args.explore).await)
	}

	#[tool(description = "Run an ad-hoc query against an explore without saving it.")]
	async fn run_inline_query(
		&self,
		Parameters(args): Parameters<RunInlineQueryArgs>,
	) -> Result<CallToolResult, McpError> {
		let query = InlineQuery {
			model: args.model,
			view: args.view,
			fields: args.fields,
			filters: args.filters,
			sorts: args.sorts,
			limit: self.config.row_limit(args.limit),
		};
		let result = self.api.run_inline_query(&query, args.result_format).await;

		self.respond_payload("run_inline_query", result)
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::{Value, json};
	// self
	use super::*;
	use crate::{
		_preludet::RecordingApi,
		config::ServerConfig,
		http::ApiPayload,
		tools::tests::text,
	};

	#[tokio::test]
	async fn large_results_are_truncated() {
		let api = Arc::new(RecordingApi::new());
		let rows: Vec<Value> = (0..200).map(|n| json!({ "orders.id": n })).collect();

		api.respond(Ok(ApiPayload::Json(Value::Array(rows))));

		let config = ServerConfig { character_limit: 300, ..ServerConfig::default() };
		let args: RunInlineQueryArgs = serde_json::from_value(json!({
			"model": "ecommerce",
			"view": "orders",
			"fields": ["orders.id"],
		}))
		.expect("Arguments should deserialize.");
		let result = LookerServer::new(api.clone(), config)
			.run_inline_query(Parameters(args))
			.await
			.expect("Tool calls should not raise protocol errors.");
		let rendered = text(&result);

		assert!(rendered.contains("[Response truncated: showing 300 of "));
		assert_eq!(
			api.last_request().body.and_then(|body| body.get("limit").cloned()),
			None
		);
	}
}
