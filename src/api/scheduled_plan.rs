//! Scheduled delivery operations.

// crates.io
use rmcp::schemars::{self, JsonSchema};
// self
use crate::{
	_prelude::*,
	api::Extra,
	client::LookerApi,
	http::{self, ApiRequest},
};

/// Where and how a scheduled plan delivers its result.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScheduledPlanDestination {
	/// Destination kind such as `email`, `webhook`, or `s3`.
	#[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
	pub kind: Option<String>,
	/// Delivery format such as `csv`, `wysiwyg_pdf`, or `inline_json`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub format: Option<String>,
	/// Recipient address or URL.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub address: Option<String>,
	/// Whether to apply model formatting to values.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub apply_formatting: Option<bool>,
	/// Remaining fields, verbatim.
	#[serde(flatten)]
	pub extra: Extra,
}

/// Scheduled plan as returned by the platform.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScheduledPlan {
	/// Plan id.
	#[serde(deserialize_with = "crate::api::id")]
	pub id: String,
	/// Display name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// Dashboard delivered by the plan.
	#[serde(
		default,
		deserialize_with = "crate::api::opt_id",
		skip_serializing_if = "Option::is_none"
	)]
	pub dashboard_id: Option<String>,
	/// Look delivered by the plan.
	#[serde(
		default,
		deserialize_with = "crate::api::opt_id",
		skip_serializing_if = "Option::is_none"
	)]
	pub look_id: Option<String>,
	/// Owner id.
	#[serde(
		default,
		deserialize_with = "crate::api::opt_id",
		skip_serializing_if = "Option::is_none"
	)]
	pub user_id: Option<String>,
	/// Cron expression driving the schedule.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub crontab: Option<String>,
	/// Whether the schedule is active.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub enabled: Option<bool>,
	/// Delivery targets.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub scheduled_plan_destination: Vec<ScheduledPlanDestination>,
	/// Remaining fields, verbatim.
	#[serde(flatten)]
	pub extra: Extra,
}

/// Mutable plan fields for create, update, and run-once calls; unset fields are omitted.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct WriteScheduledPlan {
	/// Display name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// Dashboard to deliver.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub dashboard_id: Option<String>,
	/// Look to deliver.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub look_id: Option<String>,
	/// Cron expression.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub crontab: Option<String>,
	/// Active flag.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub enabled: Option<bool>,
	/// Skip delivery when the result is empty.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub require_results: Option<bool>,
	/// Delivery targets; replaces the whole list on update.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub scheduled_plan_destination: Option<Vec<ScheduledPlanDestination>>,
}

impl dyn LookerApi {
	/// Lists scheduled plans, across every owner when `all_users` is set.
	pub async fn scheduled_plans(
		&self,
		user_id: Option<&str>,
		all_users: bool,
	) -> Result<Vec<ScheduledPlan>> {
		let request = ApiRequest::get(http::endpoint(["scheduled_plans"]))
			.query_opt("user_id", user_id)
			.query_opt("all_users", all_users.then_some(true));

		self.request_json(request).await
	}

	/// Fetches one scheduled plan.
	pub async fn get_scheduled_plan(&self, id: &str) -> Result<ScheduledPlan> {
		self.request_json(ApiRequest::get(http::endpoint(["scheduled_plans", id]))).await
	}

	/// Lists the plans delivering a dashboard.
	pub async fn scheduled_plans_for_dashboard(&self, id: &str) -> Result<Vec<ScheduledPlan>> {
		self.request_json(ApiRequest::get(http::endpoint(["scheduled_plans", "dashboard", id])))
			.await
	}

	/// Lists the plans delivering a look.
	pub async fn scheduled_plans_for_look(&self, id: &str) -> Result<Vec<ScheduledPlan>> {
		self.request_json(ApiRequest::get(http::endpoint(["scheduled_plans", "look", id]))).await
	}

	/// Creates a scheduled plan.
	pub async fn create_scheduled_plan(&self, body: &WriteScheduledPlan) -> Result<ScheduledPlan> {
		self.request_json(ApiRequest::post(http::endpoint(["scheduled_plans"])).json(body)?).await
	}

	/// Applies a partial update.
	pub async fn update_scheduled_plan(
		&self,
		id: &str,
		body: &WriteScheduledPlan,
	) -> Result<ScheduledPlan> {
		self.request_json(ApiRequest::patch(http::endpoint(["scheduled_plans", id])).json(body)?)
			.await
	}

	/// Deletes a scheduled plan.
	pub async fn delete_scheduled_plan(&self, id: &str) -> Result<()> {
		self.request_empty(ApiRequest::delete(http::endpoint(["scheduled_plans", id]))).await
	}

	/// Delivers an ad-hoc plan once without saving it.
	pub async fn run_scheduled_plan_once(
		&self,
		body: &WriteScheduledPlan,
	) -> Result<ScheduledPlan> {
		let request = ApiRequest::post(http::endpoint(["scheduled_plans", "run_once"])).json(body)?;

		self.request_json(request).await
	}

	/// Delivers an existing plan once, outside its schedule.
	pub async fn run_scheduled_plan_once_by_id(&self, id: &str) -> Result<ScheduledPlan> {
		self.request_json(ApiRequest::post(http::endpoint(["scheduled_plans", id, "run_once"])))
			.await
	}
}
