//! User tools.

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
	api::{UserSearch, WriteUser},
	tools::{EntityId, LookerServer},
};

/// Arguments for `search_users`.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SearchUsersArgs {
	/// Email filter; `%` matches any run of characters.
	#[serde(default)]
	pub email: Option<String>,
	/// Given-name filter.
	#[serde(default)]
	pub first_name: Option<String>,
	/// Family-name filter.
	#[serde(default)]
	pub last_name: Option<String>,
	/// Maximum number of results.
	#[serde(default)]
	pub limit: Option<u32>,
	/// Number of results to skip.
	#[serde(default)]
	pub offset: Option<u32>,
}

/// Fields accepted by `create_user` and `update_user`; omitted fields stay unchanged.
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct UserFieldsArgs {
	/// Given name.
	#[serde(default)]
	pub first_name: Option<String>,
	/// Family name.
	#[serde(default)]
	pub last_name: Option<String>,
	/// Disable or re-enable the account.
	#[serde(default)]
	pub is_disabled: Option<bool>,
	/// Preferred locale such as `en`.
	#[serde(default)]
	pub locale: Option<String>,
}
impl From<UserFieldsArgs> for WriteUser {
	fn from(args: UserFieldsArgs) -> Self {
		Self {
			first_name: args.first_name,
			last_name: args.last_name,
			is_disabled: args.is_disabled,
			locale: args.locale,
		}
	}
}

/// Arguments for `update_user`.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateUserArgs {
	/// User id.
	pub id: String,
	/// Fields to change.
	#[serde(flatten)]
	pub fields: UserFieldsArgs,
}

#[tool_router(router = user_tools, vis = "pub(crate)")]
impl LookerServer {
	#[tool(description = "Get the user the current credentials authenticate as.")]
	async fn get_current_user(&self) -> Result<CallToolResult, McpError> {
		self.respond("get_current_user", self.api.me().await)
	}

	#[tool(description = "Search users by email or name.")]
	async fn search_users(
		&self,
		Parameters(args): Parameters<SearchUsersArgs>,
	) -> Result<CallToolResult, McpError> {
		let search = UserSearch {
			email: args.email,
			first_name: args.first_name,
			last_name: args.last_name,
			page: self.page(args.limit, args.offset),
		};

		self.respond("search_users", self.api.search_users(&search).await)
	}

	#[tool(description = "Get a user by id.")]
	async fn get_user(
		&self,
		Parameters(args): Parameters<EntityId>,
	) -> Result<CallToolResult, McpError> {
		self.respond("get_user", self.api.get_user(&args.id).await)
	}

	#[tool(description = "Create a user account. Login credentials are attached separately.")]
	async fn create_user(
		&self,
		Parameters(args): Parameters<UserFieldsArgs>,
	) -> Result<CallToolResult, McpError> {
		self.respond("create_user", self.api.create_user(&args.into()).await)
	}

	#[tool(description = "Update a user's name, locale, or disabled flag.")]
	async fn update_user(
		&self,
		Parameters(args): Parameters<UpdateUserArgs>,
	) -> Result<CallToolResult, McpError> {
		let body = WriteUser::from(args.fields);

		self.respond("update_user", self.api.update_user(&args.id, &body).await)
	}

	#[tool(description = "Delete a user. This cannot be undone.")]
	async fn delete_user(
		&self,
		Parameters(args): Parameters<EntityId>,
	) -> Result<CallToolResult, McpError> {
		let result = self.api.delete_user(&args.id).await;

		self.respond_deleted("delete_user", args.id, result)
	}
}
