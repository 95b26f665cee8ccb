//! User operations.

// self
use crate::{
	_prelude::*,
	api::{Extra, Page},
	client::LookerApi,
	http::{self, ApiRequest},
};

/// User as returned by the platform.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
	/// User id.
	#[serde(deserialize_with = "crate::api::id")]
	pub id: String,
	/// Primary email address.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub email: Option<String>,
	/// Given name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub first_name: Option<String>,
	/// Family name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub last_name: Option<String>,
	/// Name shown in the UI.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub display_name: Option<String>,
	/// Whether the account is disabled.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub is_disabled: Option<bool>,
	/// Remaining fields, verbatim.
	#[serde(flatten)]
	pub extra: Extra,
}

/// Mutable user fields for create and update calls; unset fields are omitted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct WriteUser {
	/// Given name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub first_name: Option<String>,
	/// Family name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub last_name: Option<String>,
	/// Disabled flag.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub is_disabled: Option<bool>,
	/// Preferred locale such as `en`.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub locale: Option<String>,
}

/// Filters for `search_users`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserSearch {
	/// Email match; `%` acts as a wildcard.
	pub email: Option<String>,
	/// Given-name match.
	pub first_name: Option<String>,
	/// Family-name match.
	pub last_name: Option<String>,
	/// Pagination window.
	pub page: Page,
}

impl dyn LookerApi {
	/// Fetches the user the credentials authenticate as.
	pub async fn me(&self) -> Result<User> {
		self.request_json(ApiRequest::get(http::endpoint(["user"]))).await
	}

	/// Searches users by email and name.
	pub async fn search_users(&self, search: &UserSearch) -> Result<Vec<User>> {
		let request = ApiRequest::get(http::endpoint(["users", "search"]))
			.query_opt("email", search.email.as_deref())
			.query_opt("first_name", search.first_name.as_deref())
			.query_opt("last_name", search.last_name.as_deref());

		self.request_json(search.page.apply(request)).await
	}

	/// Fetches one user.
	pub async fn get_user(&self, id: &str) -> Result<User> {
		self.request_json(ApiRequest::get(http::endpoint(["users", id]))).await
	}

	/// Creates a user.
	pub async fn create_user(&self, body: &WriteUser) -> Result<User> {
		self.request_json(ApiRequest::post(http::endpoint(["users"])).json(body)?).await
	}

	/// Applies a partial update.
	pub async fn update_user(&self, id: &str, body: &WriteUser) -> Result<User> {
		self.request_json(ApiRequest::patch(http::endpoint(["users", id])).json(body)?).await
	}

	/// Deletes a user.
	pub async fn delete_user(&self, id: &str) -> Result<()> {
		self.request_empty(ApiRequest::delete(http::endpoint(["users", id]))).await
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;
	use crate::{_preludet::RecordingApi, http::ApiPayload};

	#[tokio::test]
	async fn me_reads_the_current_user() {
		let api = RecordingApi::new();

		api.respond(Ok(ApiPayload::Json(json!({
			"id": "42",
			"email": "ana@example.com",
			"role_ids": ["1", "2"],
		}))));

		let user = <dyn LookerApi>::me(&api).await.expect("Current user should decode.");

		assert_eq!(user.email.as_deref(), Some("ana@example.com"));
		assert_eq!(user.extra.get("role_ids"), Some(&json!(["1", "2"])));
		assert_eq!(api.last_request().endpoint, "/user");
	}

	#[tokio::test]
	async fn search_skips_unset_filters() {
		let api = RecordingApi::new();

		api.respond(Ok(ApiPayload::Json(json!([]))));

		let search = UserSearch {
			last_name: Some("Ng".into()),
			page: Page { limit: Some(20), offset: None },
			..Default::default()
		};

		<dyn LookerApi>::search_users(&api, &search).await.expect("Search should decode.");

		assert_eq!(
			api.last_request().query,
			vec![("last_name".to_owned(), "Ng".to_owned()), ("limit".to_owned(), "20".to_owned())]
		);
	}
}
