//! Dashboard tools.

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
	api::{DashboardSearch, WriteDashboard},
	tools::{CopyTarget, EntityId, LookerServer, MoveTarget},
};

/// Arguments for `search_dashboards`.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SearchDashboardsArgs {
	/// Title filter; `%` matches any run of characters.
	#[serde(default)]
	pub title: Option<String>,
	/// Only return dashboards in this folder.
	#[serde(default)]
	pub folder_id: Option<String>,
	/// Maximum number of results.
	#[serde(default)]
	pub limit: Option<u32>,
	/// Number of results to skip.
	#[serde(default)]
	pub offset: Option<u32>,
}

/// Arguments for `create_dashboard`.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateDashboardArgs {
	/// Dashboard title.
	pub title: String,
	/// Folder to create the dashboard in.
	pub folder_id: String,
	/// Optional description.
	#[serde(default)]
	pub description: Option<String>,
}

/// Arguments for `update_dashboard`; omitted fields stay unchanged.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateDashboardArgs {
	/// Dashboard id.
	pub id: String,
	/// New title.
	#[serde(default)]
	pub title: Option<String>,
	/// New description.
	#[serde(default)]
	pub description: Option<String>,
	/// Hide or unhide the dashboard.
	#[serde(default)]
	pub hidden: Option<bool>,
}

#[tool_router(router = dashboard_tools, vis = "pub(crate)")]
impl LookerServer {
	#[tool(description = "Search dashboards by title or folder.")]
	async fn search_dashboards(
		&self,
		Parameters(args): Parameters<SearchDashboardsArgs>,
	) -> Result<CallToolResult, McpError> {
		let search = DashboardSearch {
			title: args.title,
			folder_id: args.folder_id,
			page: self.page(args.limit, args.offset),
		};

		self.respond("search_dashboards", self.api.search_dashboards(&search).await)
	}

	#[tool(description = "Get a dashboard by id, including its elements and filters.")]
	async fn get_dashboard(
		&self,
		Parameters(args): Parameters<EntityId>,
	) -> Result<CallToolResult, McpError> {
		self.respond("get_dashboard", self.api.get_dashboard(&args.id).await)
	}

	#[tool(description = "Create an empty dashboard in a folder.")]
	async fn create_dashboard(
		&self,
		Parameters(args): Parameters<CreateDashboardArgs>,
	) -> Result<CallToolResult, McpError> {
		let body = WriteDashboard {
			title: Some(args.title),
			description: args.description,
			folder_id: Some(args.folder_id),
			hidden: None,
		};

		self.respond("create_dashboard", self.api.create_dashboard(&body).await)
	}

	#[tool(description = "Update a dashboard's title, description, or visibility.")]
	async fn update_dashboard(
		&self,
		Parameters(args): Parameters<UpdateDashboardArgs>,
	) -> Result<CallToolResult, McpError> {
		let body = WriteDashboard {
			title: args.title,
			description: args.description,
			folder_id: None,
			hidden: args.hidden,
		};

		self.respond("update_dashboard", self.api.update_dashboard(&args.id, &body).await)
	}

	#[tool(description = "Delete a dashboard. This cannot be undone.")]
	async fn delete_dashboard(
		&self,
		Parameters(args): Parameters<EntityId>,
	) -> Result<CallToolResult, McpError> {
		let result = self.api.delete_dashboard(&args.id).await;

		self.respond_deleted("delete_dashboard", args.id, result)
	}

	#[tool(description = "Copy a dashboard, optionally into another folder.")]
	async fn copy_dashboard(
		&self,
		Parameters(args): Parameters<CopyTarget>,
	) -> Result<CallToolResult, McpError> {
		let result = self.api.copy_dashboard(&args.id, args.folder_id.as_deref()).await;

		self.respond("copy_dashboard", result)
	}

	#[tool(description = "Move a dashboard into another folder.")]
	async fn move_dashboard(
		&self,
		Parameters(args): Parameters<MoveTarget>,
	) -> Result<CallToolResult, McpError> {
		let result = self.api.move_dashboard(&args.id, &args.folder_id).await;

		self.respond("move_dashboard", result)
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
		http::ApiPayload,
		tools::tests::{server, text},
	};

	#[tokio::test]
	async fn search_applies_the_default_page_size() {
		let api = Arc::new(RecordingApi::new());

		api.respond(Ok(ApiPayload::Json(json!([{ "id": "1", "title": "Sales" }]))));

		let args = SearchDashboardsArgs {
			title: Some("Sales".into()),
			folder_id: None,
			limit: None,
			offset: None,
		};
		let result = server(&api)
			.search_dashboards(Parameters(args))
			.await
			.expect("Tool calls should not raise protocol errors.");
		let body: Value = serde_json::from_str(text(&result)).expect("Output should be JSON.");

		assert_ne!(result.is_error, Some(true));
		assert_eq!(body, json!([{ "id": "1", "title": "Sales" }]));
		assert!(api.last_request().query.contains(&("limit".to_owned(), "20".to_owned())));
	}

	#[tokio::test]
	async fn api_failures_become_error_payloads() {
		let api = Arc::new(RecordingApi::new());

		api.respond(Err(Error::NotFound { body: "{\"message\":\"Not found\"}".into() }));

		let result = server(&api)
			.get_dashboard(Parameters(EntityId { id: "404".into() }))
			.await
			.expect("Tool calls should not raise protocol errors.");
		let body: Value = serde_json::from_str(text(&result)).expect("Output should be JSON.");

		assert_eq!(result.is_error, Some(true));
		assert_eq!(body["error"]["kind"], "not_found");
		assert_eq!(body["error"]["status"], 404);
		assert_eq!(body["error"]["retryable"], false);
	}

	#[tokio::test]
	async fn move_targets_the_destination_folder() {
		let api = Arc::new(RecordingApi::new());

		api.respond(Ok(ApiPayload::Json(json!({ "id": "7", "folder_id": "3" }))));

		let result = server(&api)
			.move_dashboard(Parameters(MoveTarget { id: "7".into(), folder_id: "3".into() }))
			.await
			.expect("Tool calls should not raise protocol errors.");

		assert_ne!(result.is_error, Some(true));
		assert_eq!(api.last_request().endpoint, "/dashboards/7/move");
	}

	#[tokio::test]
	async fn delete_confirms_the_id() {
		let api = Arc::new(RecordingApi::new());
		let result = server(&api)
			.delete_dashboard(Parameters(EntityId { id: "7".into() }))
			.await
			.expect("Tool calls should not raise protocol errors.");
		let body: Value = serde_json::from_str(text(&result)).expect("Output should be JSON.");

		assert_eq!(body, json!({ "deleted": true, "id": "7" }));
	}
}
