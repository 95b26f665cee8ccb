//! Look tools.

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
	api::{LookSearch, ResultFormat, WriteLook},
	tools::{CopyTarget, EntityId, LookerServer, MoveTarget},
};

/// Arguments for `search_looks`.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SearchLooksArgs {
	/// Title filter; `%` matches any run of characters.
	#[serde(default)]
	pub title: Option<String>,
	/// Only return looks in this folder.
	#[serde(default)]
	pub folder_id: Option<String>,
	/// Maximum number of results.
	#[serde(default)]
	pub limit: Option<u32>,
	/// Number of results to skip.
	#[serde(default)]
	pub offset: Option<u32>,
}

/// Arguments for `create_look`.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateLookArgs {
	/// Look title.
	pub title: String,
	/// Folder to save the look in.
	pub folder_id: String,
	/// Id of the saved query the look renders.
	pub query_id: String,
	/// Optional description.
	#[serde(default)]
	pub description: Option<String>,
}

/// Arguments for `update_look`; omitted fields stay unchanged.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateLookArgs {
	/// Look id.
	pub id: String,
	/// New title.
	#[serde(default)]
	pub title: Option<String>,
	/// New description.
	#[serde(default)]
	pub description: Option<String>,
	/// Replace the underlying query.
	#[serde(default)]
	pub query_id: Option<String>,
	/// Enable or disable public sharing.
	#[serde(default)]
	pub public: Option<bool>,
}

/// Arguments for `run_look`.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct RunLookArgs {
	/// Look id.
	pub id: String,
	/// Output format; defaults to `json`.
	#[serde(default)]
	pub result_format: ResultFormat,
	/// Maximum number of rows.
	#[serde(default)]
	pub limit: Option<u32>,
}

#[tool_router(router = look_tools, vis = "pub(crate)")]
impl LookerServer {
	#[tool(description = "Search looks (saved query views) by title or folder.")]
	async fn search_looks(
		&self,
		Parameters(args): Parameters<SearchLooksArgs>,
	) -> Result<CallToolResult, McpError> {
		let search = LookSearch {
			title: args.title,
			folder_id: args.folder_id,
			page: self.page(args.limit, args.offset),
		};

		self.respond("search_looks", self.api.search_looks(&search).await)
	}

	#[tool(description = "Get a look by id.")]
	async fn get_look(
		&self,
		Parameters(args): Parameters<EntityId>,
	) -> Result<CallToolResult, McpError> {
		self.respond("get_look", self.api.get_look(&args.id).await)
	}

	#[tool(description = "Save a query as a new look in a folder.")]
	async fn create_look(
		&self,
		Parameters(args): Parameters<CreateLookArgs>,
	) -> Result<CallToolResult, McpError> {
		let body = WriteLook {
			title: Some(args.title),
			description: args.description,
			folder_id: Some(args.folder_id),
			query_id: Some(args.query_id),
			public: None,
		};

		self.respond("create_look", self.api.create_look(&body).await)
	}

	#[tool(description = "Update a look's title, description, query, or sharing.")]
	async fn update_look(
		&self,
		Parameters(args): Parameters<UpdateLookArgs>,
	) -> Result<CallToolResult, McpError> {
		let body = WriteLook {
			title: args.title,
			description: args.description,
			folder_id: None,
			query_id: args.query_id,
			public: args.public,
		};

		self.respond("update_look", self.api.update_look(&args.id, &body).await)
	}

	#[tool(description = "Delete a look. This cannot be undone.")]
	async fn delete_look(
		&self,
		Parameters(args): Parameters<EntityId>,
	) -> Result<CallToolResult, McpError> {
		let result = self.api.delete_look(&args.id).await;

		self.respond_deleted("delete_look", args.id, result)
	}

	#[tool(description = "Copy a look, optionally into another folder.")]
	async fn copy_look(
		&self,
		Parameters(args): Parameters<CopyTarget>,
	) -> Result<CallToolResult, McpError> {
		self.respond("copy_look", self.api.copy_look(&args.id, args.folder_id.as_deref()).await)
	}

	#[tool(description = "Move a look into another folder.")]
	async fn move_look(
		&self,
		Parameters(args): Parameters<MoveTarget>,
	) -> Result<CallToolResult, McpError> {
		self.respond("move_look", self.api.move_look(&args.id, &args.folder_id).await)
	}

	#[tool(description = "Run a look. JSON formats return rows as JSON; csv, txt, sql, html, md, \
	                      png, and jpg return the raw export.")]
	async fn run_look(
		&self,
		Parameters(args): Parameters<RunLookArgs>,
	) -> Result<CallToolResult, McpError> {
		let limit = self.config.row_limit(args.limit);
		let result = self.api.run_look(&args.id, args.result_format, limit).await;

		self.respond_payload("run_look", result)
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;
	use crate::{
		_preludet::RecordingApi,
		http::ApiPayload,
		tools::tests::{server, text},
	};

	#[tokio::test]
	async fn csv_runs_return_the_export_verbatim() {
		let api = Arc::new(RecordingApi::new());

		api.respond(Ok(ApiPayload::Text("orders.count\n42\n".into())));

		let args =
			RunLookArgs { id: "12".into(), result_format: ResultFormat::Csv, limit: Some(500) };
		let result = server(&api)
			.run_look(Parameters(args))
			.await
			.expect("Tool calls should not raise protocol errors.");

		assert_eq!(text(&result), "orders.count\n42\n");

		let request = api.last_request();

		assert_eq!(request.endpoint, "/looks/12/run/csv");
		assert_eq!(request.query, vec![("limit".to_owned(), "500".to_owned())]);
	}

	#[test]
	fn run_arguments_default_to_json() {
		let args: RunLookArgs =
			serde_json::from_value(json!({ "id": "12" })).expect("Arguments should deserialize.");

		assert_eq!(args.result_format, ResultFormat::Json);
		assert!(args.limit.is_none());
	}
}
