//! Demonstrates building a per-request tool server from tenant headers and listing dashboards
//! through the cached client-credentials token.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use looker_mcp::{
	api::{DashboardSearch, Page},
	config::ServerConfig,
	reqwest::header::{HeaderMap, HeaderValue},
	tools::LookerServer,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let login_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/4.0/login");
			then.status(200)
				.header("content-type", "application/json")
				.body(
					"{\"access_token\":\"demo-access\",\"token_type\":\"Bearer\",\"expires_in\":3600}",
				);
		})
		.await;
	let search_mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/api/4.0/dashboards/search")
				.header("authorization", "Bearer demo-access");
			then.status(200)
				.header("content-type", "application/json")
				.body("[{\"id\":\"1\",\"title\":\"Sales Overview\",\"folder_id\":\"3\"}]");
		})
		.await;
	let mut headers = HeaderMap::new();

	headers.insert("x-looker-base-url", HeaderValue::from_str(&server.base_url())?);
	headers.insert("x-looker-client-id", HeaderValue::from_static("demo-client"));
	headers.insert("x-looker-client-secret", HeaderValue::from_static("super-secret"));

	let tools = LookerServer::from_headers(&headers, ServerConfig::from_env())?;
	let search = DashboardSearch {
		page: Page { limit: Some(tools.config().page_size(None)), offset: None },
		..Default::default()
	};

	for _ in 0..2 {
		let dashboards = tools.api().search_dashboards(&search).await?;

		let first = dashboards.first().and_then(|dashboard| dashboard.title.as_deref());

		println!("Found {} dashboard(s); first: {first:?}.", dashboards.len());
	}

	println!("Registered {} tools.", tools.tools().len());

	login_mock.assert_async().await;
	search_mock.assert_calls_async(2).await;

	Ok(())
}
