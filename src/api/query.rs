//! LookML model discovery and inline query execution.

// self
use crate::{
	_prelude::*,
	api::{Extra, ResultFormat},
	client::LookerApi,
	http::{self, ApiPayload, ApiRequest},
};

/// Explore listed under a LookML model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExploreSummary {
	/// Explore name used in queries.
	pub name: String,
	/// Display label.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub label: Option<String>,
	/// Whether the explore is hidden in the UI.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub hidden: Option<bool>,
	/// Remaining fields, verbatim.
	#[serde(flatten)]
	pub extra: Extra,
}

/// LookML model as returned by the platform.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LookmlModel {
	/// Model name used in queries.
	pub name: String,
	/// Display label.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub label: Option<String>,
	/// Project defining the model.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub project_name: Option<String>,
	/// Explores exposed by the model.
	#[serde(default)]
	pub explores: Vec<ExploreSummary>,
	/// Remaining fields, verbatim.
	#[serde(flatten)]
	pub extra: Extra,
}

/// One dimension or measure in an explore.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExploreField {
	/// Fully qualified name such as `orders.count`.
	pub name: String,
	/// Display label.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub label: Option<String>,
	/// Field type such as `number` or `date_date`.
	#[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
	pub kind: Option<String>,
	/// Field description.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Remaining fields, verbatim.
	#[serde(flatten)]
	pub extra: Extra,
}

/// Fields available in an explore.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExploreFields {
	/// Dimensions.
	#[serde(default)]
	pub dimensions: Vec<ExploreField>,
	/// Measures.
	#[serde(default)]
	pub measures: Vec<ExploreField>,
	/// Remaining fields, verbatim.
	#[serde(flatten)]
	pub extra: Extra,
}

/// Explore definition as returned by the platform.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Explore {
	/// Explore name.
	pub name: String,
	/// Display label.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub label: Option<String>,
	/// Model the explore belongs to.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub model_name: Option<String>,
	/// Queryable fields.
	#[serde(default)]
	pub fields: ExploreFields,
	/// Remaining fields, verbatim.
	#[serde(flatten)]
	pub extra: Extra,
}

/// Query definition executed without saving it first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct InlineQuery {
	/// LookML model name.
	pub model: String,
	/// Explore name.
	pub view: String,
	/// Fields to select.
	pub fields: Vec<String>,
	/// Filter expressions keyed by field name.
	#[serde(skip_serializing_if = "BTreeMap::is_empty")]
	pub filters: BTreeMap<String, String>,
	/// Sort expressions such as `orders.count desc`.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub sorts: Vec<String>,
	/// Row limit; the platform expects it as a string.
	#[serde(skip_serializing_if = "Option::is_none", serialize_with = "limit_as_string")]
	pub limit: Option<u32>,
}

impl dyn LookerApi {
	/// Lists the LookML models and their explores.
	pub async fn lookml_models(&self) -> Result<Vec<LookmlModel>> {
		self.request_json(ApiRequest::get(http::endpoint(["lookml_models"]))).await
	}

	/// Fetches an explore with its dimensions and measures.
	pub async fn get_explore(&self, model: &str, explore: &str) -> Result<Explore> {
		self.request_json(ApiRequest::get(http::endpoint([
			"lookml_models",
			model,
			"explores",
			explore,
		])))
		.await
	}

	/// Runs `query` and returns the result in `format`.
	///
	/// JSON formats come back as [`ApiPayload::Json`]; every other format is raw text.
	pub async fn run_inline_query(
		&self,
		query: &InlineQuery,
		format: ResultFormat,
	) -> Result<ApiPayload> {
		let request =
			ApiRequest::post(http::endpoint(["queries", "run", format.as_str()])).json(query)?;

		self.request(request).await
	}
}

fn limit_as_string<S>(limit: &Option<u32>, serializer: S) -> Result<S::Ok, S::Error>
where
	S: serde::Serializer,
{
	match limit {
		Some(limit) => serializer.serialize_str(&limit.to_string()),
		None => serializer.serialize_none(),
	}
}
