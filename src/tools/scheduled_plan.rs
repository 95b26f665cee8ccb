//! Scheduled delivery tools.

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
	api::{ScheduledPlanDestination, WriteScheduledPlan},
	tools::{EntityId, LookerServer},
};

/// Arguments for `list_scheduled_plans`.
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct ListScheduledPlansArgs {
	/// Only return plans owned by this user.
	#[serde(default)]
	pub user_id: Option<String>,
	/// Return plans of every user instead of only the caller's.
	#[serde(default)]
	pub all_users: bool,
}

/// Plan definition shared by create, update, and run-once tools.
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct ScheduledPlanArgs {
	/// Plan name.
	#[serde(default)]
	pub name: Option<String>,
	/// Dashboard to deliver.
	#[serde(default)]
	pub dashboard_id: Option<String>,
	/// Look to deliver.
	#[serde(default)]
	pub look_id: Option<String>,
	/// Cron expression such as `0 6 * * 1`.
	#[serde(default)]
	pub crontab: Option<String>,
	/// Activate or pause the schedule.
	#[serde(default)]
	pub enabled: Option<bool>,
	/// Skip delivery when the result is empty.
	#[serde(default)]
	pub require_results: Option<bool>,
	/// Delivery targets.
	#[serde(default)]
	pub destinations: Option<Vec<ScheduledPlanDestination>>,
}
impl From<ScheduledPlanArgs> for WriteScheduledPlan {
	fn from(args: ScheduledPlanArgs) -> Self {
		Self {
			name: args.name,
			dashboard_id: args.dashboard_id,
			look_id: args.look_id,
			crontab: args.crontab,
			enabled: args.enabled,
			require_results: args.require_results,
			scheduled_plan_destination: args.destinations,
		}
	}
}

/// Arguments for `update_scheduled_plan`.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateScheduledPlanArgs {
	/// Plan id.
	pub id: String,
	/// Fields to change; `destinations` replaces the whole list.
	#[serde(flatten)]
	pub plan: ScheduledPlanArgs,
}

#[tool_router(router = scheduled_plan_tools, vis = "pub(crate)")]
impl LookerServer {
	#[tool(description = "List scheduled plans of the caller, one user, or every user.")]
	async fn list_scheduled_plans(
		&self,
		Parameters(args): Parameters<ListScheduledPlansArgs>,
	) -> Result<CallToolResult, McpError> {
		let result = self.api.scheduled_plans(args.user_id.as_deref(), args.all_users).await;

		self.respond("list_scheduled_plans", result)
	}

	#[tool(description = "Get a scheduled plan by id.")]
	async fn get_scheduled_plan(
		&self,
		Parameters(args): Parameters<EntityId>,
	) -> Result<CallToolResult, McpError> {
		self.respond("get_scheduled_plan", self.api.get_scheduled_plan(&args.id).await)
	}

	#[tool(description = "List the scheduled plans that deliver a dashboard.")]
	async fn list_dashboard_scheduled_plans(
		&self,
		Parameters(args): Parameters<EntityId>,
	) -> Result<CallToolResult, McpError> {
		let result = self.api.scheduled_plans_for_dashboard(&args.id).await;

		self.respond("list_dashboard_scheduled_plans", result)
	}

	#[tool(description = "List the scheduled plans that deliver a look.")]
	async fn list_look_scheduled_plans(
		&self,
		Parameters(args): Parameters<EntityId>,
	) -> Result<CallToolResult, McpError> {
		self.respond("list_look_scheduled_plans", self.api.scheduled_plans_for_look(&args.id).await)
	}

	#[tool(description = "Create a recurring delivery of a dashboard or look.")]
	async fn create_scheduled_plan(
		&self,
		Parameters(args): Parameters<ScheduledPlanArgs>,
	) -> Result<CallToolResult, McpError> {
		let body = WriteScheduledPlan::from(args);

		self.respond("create_scheduled_plan", self.api.create_scheduled_plan(&body).await)
	}

	#[tool(description = "Update a scheduled plan's name, schedule, or destinations.")]
	async fn update_scheduled_plan(
		&self,
		Parameters(args): Parameters<UpdateScheduledPlanArgs>,
	) -> Result<CallToolResult, McpError> {
		let body = WriteScheduledPlan::from(args.plan);
		let result = self.api.update_scheduled_plan(&args.id, &body).await;

		self.respond("update_scheduled_plan", result)
	}

	#[tool(description = "Delete a scheduled plan.")]
	async fn delete_scheduled_plan(
		&self,
		Parameters(args): Parameters<EntityId>,
	) -> Result<CallToolResult, McpError> {
		let result = self.api.delete_scheduled_plan(&args.id).await;

		self.respond_deleted("delete_scheduled_plan", args.id, result)
	}

	#[tool(description = "Deliver a dashboard or look once, immediately, without saving a plan.")]
	async fn run_scheduled_plan_once(
		&self,
		Parameters(args): Parameters<ScheduledPlanArgs>,
	) -> Result<CallToolResult, McpError> {
		let body = WriteScheduledPlan::from(args);

		self.respond("run_scheduled_plan_once", self.api.run_scheduled_plan_once(&body).await)
	}

	#[tool(description = "Deliver an existing scheduled plan once, outside its schedule.")]
	async fn run_scheduled_plan_once_by_id(
		&self,
		Parameters(args): Parameters<EntityId>,
	) -> Result<CallToolResult, McpError> {
		let result = self.api.run_scheduled_plan_once_by_id(&args.id).await;

		self.respond("run_scheduled_plan_once_by_id", result)
	}
}
