//! Folder operations.

// self
use crate::{
	_prelude::*,
	api::{Dashboard, Extra, Look, Page},
	client::LookerApi,
	http::{self, ApiRequest},
};

/// Folder as returned by the platform.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Folder {
	/// Folder id.
	#[serde(deserialize_with = "crate::api::id")]
	pub id: String,
	/// Display name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// Parent folder id; unset for root folders.
	#[serde(
		default,
		deserialize_with = "crate::api::opt_id",
		skip_serializing_if = "Option::is_none"
	)]
	pub parent_id: Option<String>,
	/// Number of direct child folders.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub child_count: Option<u64>,
	/// Creator id.
	#[serde(
		default,
		deserialize_with = "crate::api::opt_id",
		skip_serializing_if = "Option::is_none"
	)]
	pub creator_id: Option<String>,
	/// Remaining fields, verbatim.
	#[serde(flatten)]
	pub extra: Extra,
}

/// Mutable folder fields for create and update calls; unset fields are omitted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct WriteFolder {
	/// Display name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// Parent folder; required when creating.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub parent_id: Option<String>,
}

/// Filters for `search_folders`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FolderSearch {
	/// Name match; `%` acts as a wildcard.
	pub name: Option<String>,
	/// Restrict to children of one folder.
	pub parent_id: Option<String>,
	/// Pagination window.
	pub page: Page,
}

impl dyn LookerApi {
	/// Searches folders by name and parent.
	pub async fn search_folders(&self, search: &FolderSearch) -> Result<Vec<Folder>> {
		let request = ApiRequest::get(http::endpoint(["folders", "search"]))
			.query_opt("name", search.name.as_deref())
			.query_opt("parent_id", search.parent_id.as_deref());

		self.request_json(search.page.apply(request)).await
	}

	/// Fetches one folder.
	pub async fn get_folder(&self, id: &str) -> Result<Folder> {
		self.request_json(ApiRequest::get(http::endpoint(["folders", id]))).await
	}

	/// Creates a folder.
	pub async fn create_folder(&self, body: &WriteFolder) -> Result<Folder> {
		self.request_json(ApiRequest::post(http::endpoint(["folders"])).json(body)?).await
	}

	/// Renames or re-parents a folder.
	pub async fn update_folder(&self, id: &str, body: &WriteFolder) -> Result<Folder> {
		self.request_json(ApiRequest::patch(http::endpoint(["folders", id])).json(body)?).await
	}

	/// Deletes a folder and everything in it.
	pub async fn delete_folder(&self, id: &str) -> Result<()> {
		self.request_empty(ApiRequest::delete(http::endpoint(["folders", id]))).await
	}

	/// Lists the direct child folders.
	pub async fn folder_children(&self, id: &str) -> Result<Vec<Folder>> {
		self.request_json(ApiRequest::get(http::endpoint(["folders", id, "children"]))).await
	}

	/// Lists the dashboards stored directly in a folder.
	pub async fn folder_dashboards(&self, id: &str) -> Result<Vec<Dashboard>> {
		self.request_json(ApiRequest::get(http::endpoint(["folders", id, "dashboards"]))).await
	}

	/// Lists the looks stored directly in a folder.
	pub async fn folder_looks(&self, id: &str) -> Result<Vec<Look>> {
		self.request_json(ApiRequest::get(http::endpoint(["folders", id, "looks"]))).await
	}
}
