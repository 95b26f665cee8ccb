//! Look (saved query view) operations.

// self
use crate::{
	_prelude::*,
	api::{Extra, Page, ResultFormat},
	client::LookerApi,
	http::{self, ApiPayload, ApiRequest},
};

/// Look as returned by the platform.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Look {
	/// Look id.
	#[serde(deserialize_with = "crate::api::id")]
	pub id: String,
	/// Display title.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
	/// Free-form description.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Folder holding the look.
	#[serde(
		default,
		deserialize_with = "crate::api::opt_id",
		skip_serializing_if = "Option::is_none"
	)]
	pub folder_id: Option<String>,
	/// Query the look renders.
	#[serde(
		default,
		deserialize_with = "crate::api::opt_id",
		skip_serializing_if = "Option::is_none"
	)]
	pub query_id: Option<String>,
	/// Owner id.
	#[serde(
		default,
		deserialize_with = "crate::api::opt_id",
		skip_serializing_if = "Option::is_none"
	)]
	pub user_id: Option<String>,
	/// Whether the look is publicly shared.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub public: Option<bool>,
	/// Remaining fields, verbatim.
	#[serde(flatten)]
	pub extra: Extra,
}

/// Mutable look fields for create and update calls; unset fields are omitted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct WriteLook {
	/// Display title.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
	/// Free-form description.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Target folder.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub folder_id: Option<String>,
	/// Query to save; required when creating.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub query_id: Option<String>,
	/// Public sharing flag.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub public: Option<bool>,
}

/// Filters for `search_looks`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LookSearch {
	/// Title match; `%` acts as a wildcard.
	pub title: Option<String>,
	/// Restrict to one folder.
	pub folder_id: Option<String>,
	/// Pagination window.
	pub page: Page,
}

impl dyn LookerApi {
	/// Searches looks by title and folder.
	pub async fn search_looks(&self, search: &LookSearch) -> Result<Vec<Look>> {
		let request = ApiRequest::get(http::endpoint(["looks", "search"]))
			.query_opt("title", search.title.as_deref())
			.query_opt("folder_id", search.folder_id.as_deref());

		self.request_json(search.page.apply(request)).await
	}

	/// Fetches one look.
	pub async fn get_look(&self, id: &str) -> Result<Look> {
		self.request_json(ApiRequest::get(http::endpoint(["looks", id]))).await
	}

	/// Creates a look from a saved query.
	pub async fn create_look(&self, body: &WriteLook) -> Result<Look> {
		self.request_json(ApiRequest::post(http::endpoint(["looks"])).json(body)?).await
	}

	/// Applies a partial update.
	pub async fn update_look(&self, id: &str, body: &WriteLook) -> Result<Look> {
		self.request_json(ApiRequest::patch(http::endpoint(["looks", id])).json(body)?).await
	}

	/// Deletes a look.
	pub async fn delete_look(&self, id: &str) -> Result<()> {
		self.request_empty(ApiRequest::delete(http::endpoint(["looks", id]))).await
	}

	/// Copies a look, into `folder_id` when given or next to the original otherwise.
	pub async fn copy_look(&self, id: &str, folder_id: Option<&str>) -> Result<Look> {
		let request =
			ApiRequest::post(http::endpoint(["looks", id, "copy"])).query_opt("folder_id", folder_id);

		self.request_json(request).await
	}

	/// Moves a look into another folder.
	pub async fn move_look(&self, id: &str, folder_id: &str) -> Result<Look> {
		let request =
			ApiRequest::patch(http::endpoint(["looks", id, "move"])).query("folder_id", folder_id);

		self.request_json(request).await
	}

	/// Runs a look and returns its result in `format`.
	///
	/// JSON formats come back as [`ApiPayload::Json`]; every other format is raw text.
	pub async fn run_look(
		&self,
		id: &str,
		format: ResultFormat,
		limit: Option<u32>,
	) -> Result<ApiPayload> {
		let request = ApiRequest::get(http::endpoint(["looks", id, "run", format.as_str()]))
			.query_opt("limit", limit);

		self.request(request).await
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use reqwest::Method;
	use serde_json::json;
	// self
	use super::*;
	use crate::_preludet::RecordingApi;

	#[tokio::test]
	async fn run_returns_raw_text_for_csv() {
		let api = RecordingApi::new();

		api.respond(Ok(ApiPayload::Text("orders.count\n42\n".into())));

		let payload = <dyn LookerApi>::run_look(&api, "12", ResultFormat::Csv, Some(500))
			.await
			.expect("Run should succeed.");

		assert_eq!(payload, ApiPayload::Text("orders.count\n42\n".into()));

		let request = api.last_request();

		assert_eq!(request.method, Method::GET);
		assert_eq!(request.endpoint, "/looks/12/run/csv");
		assert_eq!(request.query, vec![("limit".to_owned(), "500".to_owned())]);
	}

	#[tokio::test]
	async fn create_posts_the_write_body() {
		let api = RecordingApi::new();

		api.respond(Ok(ApiPayload::Json(json!({ "id": "30", "query_id": 99 }))));

		let body = WriteLook {
			title: Some("Weekly".into()),
			folder_id: Some("4".into()),
			query_id: Some("99".into()),
			..Default::default()
		};
		let look = <dyn LookerApi>::create_look(&api, &body).await.expect("Create should decode.");

		assert_eq!(look.query_id.as_deref(), Some("99"));
		assert_eq!(
			api.last_request().body,
			Some(json!({ "title": "Weekly", "folder_id": "4", "query_id": "99" }))
		);
	}

	#[tokio::test]
	async fn delete_ignores_the_body() {
		let api = RecordingApi::new();

		<dyn LookerApi>::delete_look(&api, "30").await.expect("Delete should succeed.");

		let request = api.last_request();

		assert_eq!(request.method, Method::DELETE);
		assert_eq!(request.endpoint, "/looks/30");
	}
}
