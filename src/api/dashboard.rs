//! Dashboard operations.

// self
use crate::{
	_prelude::*,
	api::{Extra, Page},
	client::LookerApi,
	http::{self, ApiRequest},
};

/// Dashboard as returned by the platform.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
	/// Dashboard id.
	#[serde(deserialize_with = "crate::api::id")]
	pub id: String,
	/// Display title.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
	/// Free-form description.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Folder holding the dashboard.
	#[serde(
		default,
		deserialize_with = "crate::api::opt_id",
		skip_serializing_if = "Option::is_none"
	)]
	pub folder_id: Option<String>,
	/// Owner id.
	#[serde(
		default,
		deserialize_with = "crate::api::opt_id",
		skip_serializing_if = "Option::is_none"
	)]
	pub user_id: Option<String>,
	/// Whether the dashboard is hidden from listings.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub hidden: Option<bool>,
	/// Remaining fields, verbatim.
	#[serde(flatten)]
	pub extra: Extra,
}

/// Mutable dashboard fields for create and update calls; unset fields are omitted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct WriteDashboard {
	/// Display title.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
	/// Free-form description.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Target folder.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub folder_id: Option<String>,
	/// Hidden flag.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub hidden: Option<bool>,
}

/// Filters for `search_dashboards`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DashboardSearch {
	/// Title match; `%` acts as a wildcard.
	pub title: Option<String>,
	/// Restrict to one folder.
	pub folder_id: Option<String>,
	/// Pagination window.
	pub page: Page,
}

impl dyn LookerApi {
	/// Searches dashboards by title and folder.
	pub async fn search_dashboards(&self, search: &DashboardSearch) -> Result<Vec<Dashboard>> {
		let request = ApiRequest::get(http::endpoint(["dashboards", "search"]))
			.query_opt("title", search.title.as_deref())
			.query_opt("folder_id", search.folder_id.as_deref());

		self.request_json(search.page.apply(request)).await
	}

	/// Fetches one dashboard.
	pub async fn get_dashboard(&self, id: &str) -> Result<Dashboard> {
		self.request_json(ApiRequest::get(http::endpoint(["dashboards", id]))).await
	}

	/// Creates a dashboard.
	pub async fn create_dashboard(&self, body: &WriteDashboard) -> Result<Dashboard> {
		self.request_json(ApiRequest::post(http::endpoint(["dashboards"])).json(body)?).await
	}

	/// Applies a partial update.
	pub async fn update_dashboard(&self, id: &str, body: &WriteDashboard) -> Result<Dashboard> {
		self.request_json(ApiRequest::patch(http::endpoint(["dashboards", id])).json(body)?).await
	}

	/// Deletes a dashboard.
	pub async fn delete_dashboard(&self, id: &str) -> Result<()> {
		self.request_empty(ApiRequest::delete(http::endpoint(["dashboards", id]))).await
	}

	/// Copies a dashboard, into `folder_id` when given or next to the original otherwise.
	pub async fn copy_dashboard(&self, id: &str, folder_id: Option<&str>) -> Result<Dashboard> {
		let request = ApiRequest::post(http::endpoint(["dashboards", id, "copy"]))
			.query_opt("folder_id", folder_id);

		self.request_json(request).await
	}

	/// Moves a dashboard into another folder.
	pub async fn move_dashboard(&self, id: &str, folder_id: &str) -> Result<Dashboard> {
		let request = ApiRequest::patch(http::endpoint(["dashboards", id, "move"]))
			.query("folder_id", folder_id);

		self.request_json(request).await
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use reqwest::Method;
	use serde_json::json;
	// self
	use super::*;
	use crate::{_preludet::RecordingApi, http::ApiPayload};

	#[tokio::test]
	async fn search_passes_filters_and_window() {
		let api = RecordingApi::new();

		api.respond(Ok(ApiPayload::Json(json!([{ "id": "1", "title": "Sales", "slug": "abc" }]))));

		let search = DashboardSearch {
			title: Some("Sales%".into()),
			folder_id: None,
			page: Page { limit: Some(5), offset: Some(10) },
		};
		let found = <dyn LookerApi>::search_dashboards(&api, &search)
			.await
			.expect("Search should decode.");

		assert_eq!(found.len(), 1);
		assert_eq!(found[0].title.as_deref(), Some("Sales"));
		assert_eq!(found[0].extra.get("slug"), Some(&json!("abc")));

		let request = api.last_request();

		assert_eq!(request.method, Method::GET);
		assert_eq!(request.endpoint, "/dashboards/search");
		assert_eq!(
			request.query,
			vec![
				("title".to_owned(), "Sales%".to_owned()),
				("limit".to_owned(), "5".to_owned()),
				("offset".to_owned(), "10".to_owned()),
			]
		);
	}

	#[tokio::test]
	async fn writes_omit_unset_fields() {
		let api = RecordingApi::new();

		api.respond(Ok(ApiPayload::Json(json!({ "id": "7", "title": "Renamed" }))));

		let body = WriteDashboard { title: Some("Renamed".into()), ..Default::default() };
		let updated = <dyn LookerApi>::update_dashboard(&api, "7", &body)
			.await
			.expect("Update should decode.");

		assert_eq!(updated.id, "7");

		let request = api.last_request();

		assert_eq!(request.method, Method::PATCH);
		assert_eq!(request.endpoint, "/dashboards/7");
		assert_eq!(request.body, Some(json!({ "title": "Renamed" })));
	}

	#[tokio::test]
	async fn move_and_copy_target_folders() {
		let api = RecordingApi::new();

		api.respond(Ok(ApiPayload::Json(json!({ "id": "8" }))));
		api.respond(Ok(ApiPayload::Json(json!({ "id": "7", "folder_id": "3" }))));

		<dyn LookerApi>::copy_dashboard(&api, "7", None).await.expect("Copy should decode.");
		<dyn LookerApi>::move_dashboard(&api, "7", "3").await.expect("Move should decode.");

		let requests = api.requests();

		assert_eq!(requests[0].method, Method::POST);
		assert_eq!(requests[0].endpoint, "/dashboards/7/copy");
		assert!(requests[0].query.is_empty());
		assert_eq!(requests[1].endpoint, "/dashboards/7/move");
		assert_eq!(requests[1].query, vec![("folder_id".to_owned(), "3".to_owned())]);
	}
}
