//! Folder tools.

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
	api::{FolderSearch, WriteFolder},
	tools::{EntityId, LookerServer},
};

/// Arguments for `search_folders`.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SearchFoldersArgs {
	/// Name filter; `%` matches any run of characters.
	#[serde(default)]
	pub name: Option<String>,
	/// Only return direct children of this folder.
	#[serde(default)]
	pub parent_id: Option<String>,
	/// Maximum number of results.
	#[serde(default)]
	pub limit: Option<u32>,
	/// Number of results to skip.
	#[serde(default)]
	pub offset: Option<u32>,
}

/// Arguments for `create_folder`.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateFolderArgs {
	/// Folder name.
	pub name: String,
	/// Parent folder id.
	pub parent_id: String,
}

/// Arguments for `update_folder`; omitted fields stay unchanged.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateFolderArgs {
	/// Folder id.
	pub id: String,
	/// New name.
	#[serde(default)]
	pub name: Option<String>,
	/// New parent folder id.
	#[serde(default)]
	pub parent_id: Option<String>,
}

#[tool_router(router = folder_tools, vis = "pub(crate)")]
impl LookerServer {
	#[tool(description = "Search folders by name or parent.")]
	async fn search_folders(
		&self,
		Parameters(args): Parameters<SearchFoldersArgs>,
	) -> Result<CallToolResult, McpError> {
		let search = FolderSearch {
			name: args.name,
			parent_id: args.parent_id,
			page: self.page(args.limit, args.offset),
		};

		self.respond("search_folders", self.api.search_folders(&search).await)
	}

	#[tool(description = "Get a folder by id.")]
	async fn get_folder(
		&self,
		Parameters(args): Parameters<EntityId>,
	) -> Result<CallToolResult, McpError> {
		self.respond("get_folder", self.api.get_folder(&args.id).await)
	}

	#[tool(description = "Create a folder under a parent folder.")]
	async fn create_folder(
		&self,
		Parameters(args): Parameters<CreateFolderArgs>,
	) -> Result<CallToolResult, McpError> {
		let body = WriteFolder { name: Some(args.name), parent_id: Some(args.parent_id) };

		self.respond("create_folder", self.api.create_folder(&body).await)
	}

	#[tool(description = "Rename a folder or move it under another parent.")]
	async fn update_folder(
		&self,
		Parameters(args): Parameters<UpdateFolderArgs>,
	) -> Result<CallToolResult, McpError> {
		let body = WriteFolder { name: args.name, parent_id: args.parent_id };

		self.respond("update_folder", self.api.update_folder(&args.id, &body).await)
	}

	#[tool(description = "Delete a folder together with its contents. This cannot be undone.")]
	async fn delete_folder(
		&self,
		Parameters(args): Parameters<EntityId>,
	) -> Result<CallToolResult, McpError> {
		let result = self.api.delete_folder(&args.id).await;

		self.respond_deleted("delete_folder", args.id, result)
	}

	#[tool(description = "List the direct child folders of a folder.")]
	async fn list_folder_children(
		&self,
		Parameters(args): Parameters<EntityId>,
	) -> Result<CallToolResult, McpError> {
		self.respond("list_folder_children", self.api.folder_children(&args.id).await)
	}

	#[tool(description = "List the dashboards stored in a folder.")]
	async fn list_folder_dashboards(
		&self,
		Parameters(args): Parameters<EntityId>,
	) -> Result<CallToolResult, McpError> {
		self.respond("list_folder_dashboards", self.api.folder_dashboards(&args.id).await)
	}

	#[tool(description = "List the looks stored in a folder.")]
	async fn list_folder_looks(
		&self,
		Parameters(args): Parameters<EntityId>,
	) -> Result<CallToolResult, McpError> {
		self.respond("list_folder_looks", self.api.folder_looks(&args.id).await)
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
	async fn create_requires_name_and_parent() {
		let api = Arc::new(RecordingApi::new());

		api.respond(Ok(ApiPayload::Json(json!({ "id": "11", "name": "Q3", "parent_id": "1" }))));

		let args = CreateFolderArgs { name: "Q3".into(), parent_id: "1".into() };
		let result = server(&api)
			.create_folder(Parameters(args))
			.await
			.expect("Tool calls should not raise protocol errors.");
		let body: Value = serde_json::from_str(text(&result)).expect("Output should be JSON.");

		assert_eq!(body["id"], "11");
		assert_eq!(api.last_request().body, Some(json!({ "name": "Q3", "parent_id": "1" })));
	}

	#[test]
	fn create_arguments_reject_missing_parents() {
		let parsed = serde_json::from_value::<CreateFolderArgs>(json!({ "name": "Q3" }));

		assert!(parsed.is_err());
	}
}
