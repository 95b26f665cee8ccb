//! Typed entity operations layered on [`LookerApi::request`].
//!
//! Every operation is an inherent method on `dyn LookerApi`, so the tool layer and any
//! alternative transport share one implementation. Models keep the commonly used fields and
//! collect everything else in a flattened `extra` map, so no field the platform returns is
//! lost on the way back to the caller.

pub mod dashboard;
pub mod folder;
pub mod look;
pub mod query;
pub mod scheduled_plan;
pub mod user;

pub use dashboard::*;
pub use folder::*;
pub use look::*;
pub use query::*;
pub use scheduled_plan::*;
pub use user::*;

// crates.io
use rmcp::schemars::{self, JsonSchema};
use serde::{Deserializer, de::DeserializeOwned};
// self
use crate::{
	_prelude::*,
	client::LookerApi,
	http::{ApiPayload, ApiRequest},
};

/// Fields the platform returns that the typed model does not name.
pub type Extra = BTreeMap<String, serde_json::Value>;

/// Pagination window passed straight through as `limit`/`offset`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Page {
	/// Maximum number of rows to return.
	pub limit: Option<u32>,
	/// Number of rows to skip.
	pub offset: Option<u32>,
}
impl Page {
	/// Appends the window to `request` as query parameters.
	pub fn apply(self, request: ApiRequest) -> ApiRequest {
		request.query_opt("limit", self.limit).query_opt("offset", self.offset)
	}
}

/// Output formats accepted by the run endpoints.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ResultFormat {
	/// Rows as a JSON array.
	#[default]
	Json,
	/// Rows plus field metadata as JSON.
	JsonDetail,
	/// Comma-separated values.
	Csv,
	/// Tab-separated text.
	Txt,
	/// HTML table.
	Html,
	/// Markdown table.
	Md,
	/// Generated SQL.
	Sql,
	/// PNG visualization.
	Png,
	/// JPEG visualization.
	Jpg,
}
impl ResultFormat {
	/// Returns the path segment used by the run endpoints.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Json => "json",
			Self::JsonDetail => "json_detail",
			Self::Csv => "csv",
			Self::Txt => "txt",
			Self::Html => "html",
			Self::Md => "md",
			Self::Sql => "sql",
			Self::Png => "png",
			Self::Jpg => "jpg",
		}
	}

	/// Returns `true` for formats the platform answers with a JSON document.
	pub const fn is_json(self) -> bool {
		matches!(self, Self::Json | Self::JsonDetail)
	}
}
impl Display for ResultFormat {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

impl dyn LookerApi {
	/// Executes `request` and decodes the JSON payload into `T`.
	pub async fn request_json<T>(&self, request: ApiRequest) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let value = self.request(request).await?.into_value();

		serde_path_to_error::deserialize(value)
			.map_err(|source| Error::Decode { source, status: None })
	}

	/// Executes `request` and discards whatever body comes back.
	pub async fn request_empty(&self, request: ApiRequest) -> Result<()> {
		self.request(request).await.map(|_: ApiPayload| ())
	}
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
	Text(String),
	Number(i64),
}
impl From<RawId> for String {
	fn from(raw: RawId) -> Self {
		match raw {
			RawId::Text(text) => text,
			RawId::Number(number) => number.to_string(),
		}
	}
}

// Identifiers are strings on API 4.0, but older instances still emit integers.
fn id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
	D: Deserializer<'de>,
{
	RawId::deserialize(deserializer).map(String::from)
}

fn opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
	D: Deserializer<'de>,
{
	Option::<RawId>::deserialize(deserializer).map(|raw| raw.map(String::from))
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;
	use crate::_preludet::RecordingApi;

	#[test]
	fn result_formats_map_to_path_segments() {
		assert_eq!(ResultFormat::JsonDetail.as_str(), "json_detail");
		assert!(ResultFormat::Json.is_json());
		assert!(!ResultFormat::Csv.is_json());
		assert_eq!(
			serde_json::from_value::<ResultFormat>(json!("png"))
				.expect("Result format should deserialize."),
			ResultFormat::Png
		);
	}

	#[tokio::test]
	async fn decode_failures_carry_the_failing_path() {
		let api = RecordingApi::new();

		api.respond(Ok(ApiPayload::Json(json!([{ "id": "1", "title": 7 }]))));

		let err = <dyn LookerApi>::search_dashboards(&api, &DashboardSearch::default())
			.await
			.expect_err("A numeric title should fail to decode.");

		match err {
			Error::Decode { source, .. } => assert_eq!(source.path().to_string(), "[0].title"),
			other => panic!("Unexpected error: {other:?}."),
		}
	}

	#[test]
	fn numeric_ids_are_accepted() {
		let dashboard: Dashboard = serde_json::from_value(json!({ "id": 12, "folder_id": 3 }))
			.expect("Numeric ids should deserialize.");

		assert_eq!(dashboard.id, "12");
		assert_eq!(dashboard.folder_id.as_deref(), Some("3"));
	}
}
