//! Model Context Protocol tool server over the [`LookerApi`] capability.
//!
//! Each entity family registers its tools in its own router; [`LookerServer::new`] combines
//! them. Every tool maps its arguments onto one entity operation and renders the outcome as
//! text, so API failures reach the caller as structured error payloads instead of protocol
//! errors.

pub mod dashboard;
pub mod folder;
pub mod look;
pub mod query;
pub mod scheduled_plan;
pub mod user;

mod render;

pub use render::{ErrorDetail, ErrorPayload, TRUNCATION_NOTICE};

// crates.io
use reqwest::header::HeaderMap;
use rmcp::{
	ErrorData as McpError, ServerHandler,
	handler::server::router::tool::ToolRouter,
	model::{CallToolResult, Implementation, ServerCapabilities, ServerInfo, Tool},
	schemars::{self, JsonSchema},
	tool_handler,
};
// self
use crate::{
	_prelude::*,
	api::Page,
	client::{ApiClient, LookerApi},
	config::ServerConfig,
	http::ApiPayload,
};

const INSTRUCTIONS: &str = "Looker API tools. Search before fetching by id; list tools accept \
                            `limit` and `offset`. Failures come back as a JSON `error` object \
                            whose `retryable` flag says whether trying again can help.";

/// Arguments for tools that address one entity by id.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct EntityId {
	/// Entity id.
	pub id: String,
}

/// Arguments for tools that copy an entity.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CopyTarget {
	/// Entity id.
	pub id: String,
	/// Destination folder id; defaults to the source folder.
	#[serde(default)]
	pub folder_id: Option<String>,
}

/// Arguments for tools that move an entity into another folder.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct MoveTarget {
	/// Entity id.
	pub id: String,
	/// Destination folder id.
	pub folder_id: String,
}

/// Tool server bound to one tenant.
#[derive(Clone)]
pub struct LookerServer {
	api: Arc<dyn LookerApi>,
	config: ServerConfig,
	tool_router: ToolRouter<Self>,
}
impl LookerServer {
	/// Wraps `api` and registers every tool family.
	pub fn new(api: Arc<dyn LookerApi>, config: ServerConfig) -> Self {
		let tool_router = Self::dashboard_tools()
			+ Self::look_tools()
			+ Self::folder_tools()
			+ Self::user_tools()
			+ Self::scheduled_plan_tools()
			+ Self::query_tools();

		Self { api, config, tool_router }
	}

	/// Builds a per-request server from inbound header credentials.
	///
	/// Fails with [`Error::MissingCredentials`] before any network call when the headers do not
	/// carry a usable credential set.
	pub fn from_headers(headers: &HeaderMap, config: ServerConfig) -> Result<Self> {
		let client = ApiClient::from_headers(headers)?;

		Ok(Self::new(Arc::new(client), config))
	}

	/// Returns the capability the tools call into.
	pub fn api(&self) -> &Arc<dyn LookerApi> {
		&self.api
	}

	/// Returns the tool-layer settings.
	pub fn config(&self) -> &ServerConfig {
		&self.config
	}

	/// Lists every registered tool definition.
	pub fn tools(&self) -> Vec<Tool> {
		self.tool_router.list_all()
	}

	fn page(&self, limit: Option<u32>, offset: Option<u32>) -> Page {
		Page { limit: Some(self.config.page_size(limit)), offset }
	}

	fn respond<T>(&self, tool: &'static str, result: Result<T>) -> Result<CallToolResult, McpError>
	where
		T: Serialize,
	{
		render::outcome(tool, result, |value| render::json(&value, self.config.character_limit))
	}

	fn respond_payload(
		&self,
		tool: &'static str,
		result: Result<ApiPayload>,
	) -> Result<CallToolResult, McpError> {
		render::outcome(tool, result, |payload| render::payload(payload, self.config.character_limit))
	}

	fn respond_deleted(
		&self,
		tool: &'static str,
		id: String,
		result: Result<()>,
	) -> Result<CallToolResult, McpError> {
		self.respond(tool, result.map(|()| serde_json::json!({ "deleted": true, "id": id })))
	}
}

#[tool_handler]
impl ServerHandler for LookerServer {
	fn get_info(&self) -> ServerInfo {
		ServerInfo {
			capabilities: ServerCapabilities::builder().enable_tools().build(),
			server_info: Implementation {
				name: env!("CARGO_PKG_NAME").into(),
				version: env!("CARGO_PKG_VERSION").into(),
				..Default::default()
			},
			instructions: Some(INSTRUCTIONS.into()),
			..Default::default()
		}
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use rmcp::model::RawContent;
	// self
	use super::*;
	use crate::_preludet::RecordingApi;

	pub(crate) fn server(api: &Arc<RecordingApi>) -> LookerServer {
		LookerServer::new(api.clone(), ServerConfig::default())
	}

	pub(crate) fn text(result: &CallToolResult) -> &str {
		result
			.content
			.first()
			.and_then(|content| match &content.raw {
				RawContent::Text(text) => Some(text.text.as_str()),
				_ => None,
			})
			.expect("Tool results should carry one text item.")
	}

	#[test]
	fn every_entity_family_is_registered() {
		let server = server(&Arc::new(RecordingApi::new()));
		let names: Vec<String> = server.tools().into_iter().map(|tool| tool.name.into()).collect();

		for expected in [
			"search_dashboards",
			"run_look",
			"list_folder_children",
			"get_current_user",
			"run_scheduled_plan_once",
			"run_inline_query",
		] {
			assert!(names.iter().any(|name| name == expected), "Missing tool `{expected}`.");
		}
	}

	#[test]
	fn server_info_enables_tools() {
		let info = ServerHandler::get_info(&server(&Arc::new(RecordingApi::new())));

		assert!(info.capabilities.tools.is_some());
		assert_eq!(info.server_info.name, env!("CARGO_PKG_NAME"));
	}

	#[test]
	fn missing_header_credentials_fail_before_any_call() {
		let err = LookerServer::from_headers(&HeaderMap::new(), ServerConfig::default())
			.err()
			.expect("Empty headers should be rejected.");

		assert!(matches!(err, Error::MissingCredentials { .. }));
		assert_eq!(err.http_status(), Some(401));
	}

	#[test]
	fn pages_apply_config_bounds() {
		let server = server(&Arc::new(RecordingApi::new()));

		assert_eq!(server.page(None, None), Page { limit: Some(20), offset: None });
		assert_eq!(server.page(Some(1_000), Some(40)), Page { limit: Some(100), offset: Some(40) });
	}
}
