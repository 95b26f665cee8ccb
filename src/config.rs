//! Tool-layer tunables: response size, page-size bounds, and the row cap for query runs.

// self
use crate::_prelude::*;

/// Environment variable overriding [`ServerConfig::character_limit`].
pub const CHARACTER_LIMIT_ENV: &str = "LOOKER_MCP_CHARACTER_LIMIT";
/// Environment variable overriding [`ServerConfig::default_page_size`].
pub const DEFAULT_PAGE_SIZE_ENV: &str = "LOOKER_MCP_DEFAULT_PAGE_SIZE";
/// Environment variable overriding [`ServerConfig::max_page_size`].
pub const MAX_PAGE_SIZE_ENV: &str = "LOOKER_MCP_MAX_PAGE_SIZE";
/// Environment variable overriding [`ServerConfig::max_row_limit`].
pub const MAX_ROW_LIMIT_ENV: &str = "LOOKER_MCP_MAX_ROW_LIMIT";

/// Pass-through settings consumed by tool adapters.
///
/// Values are parsed leniently: anything that is not a number falls back to the default.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
	/// Maximum number of characters in a rendered tool response.
	pub character_limit: usize,
	/// Page size used when a tool call does not pass `limit`.
	pub default_page_size: u32,
	/// Upper bound applied to any `limit` argument.
	pub max_page_size: u32,
	/// Upper bound applied to the row `limit` of look and inline-query runs.
	pub max_row_limit: u32,
}
impl ServerConfig {
	const DEFAULT_CHARACTER_LIMIT: usize = 50_000;
	const DEFAULT_PAGE_SIZE: u32 = 20;
	const DEFAULT_MAX_PAGE_SIZE: u32 = 100;
	const DEFAULT_MAX_ROW_LIMIT: u32 = 5_000;

	/// Reads overrides from the process environment.
	pub fn from_env() -> Self {
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	/// Reads overrides through `lookup`, which maps a variable name to its raw value.
	pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
		let defaults = Self::default();

		Self {
			character_limit: parse_or(lookup(CHARACTER_LIMIT_ENV), defaults.character_limit),
			default_page_size: parse_or(lookup(DEFAULT_PAGE_SIZE_ENV), defaults.default_page_size),
			max_page_size: parse_or(lookup(MAX_PAGE_SIZE_ENV), defaults.max_page_size),
			max_row_limit: parse_or(lookup(MAX_ROW_LIMIT_ENV), defaults.max_row_limit),
		}
	}

	/// Resolves the page size for a call: the requested value or the default, capped at the max.
	pub fn page_size(&self, requested: Option<u32>) -> u32 {
		requested.unwrap_or(self.default_page_size).min(self.max_page_size)
	}

	/// Resolves the row limit for a run; an absent value leaves the platform default in place.
	pub fn row_limit(&self, requested: Option<u32>) -> Option<u32> {
		requested.map(|rows| rows.min(self.max_row_limit))
	}
}
impl Default for ServerConfig {
	fn default() -> Self {
		Self {
			character_limit: Self::DEFAULT_CHARACTER_LIMIT,
			default_page_size: Self::DEFAULT_PAGE_SIZE,
			max_page_size: Self::DEFAULT_MAX_PAGE_SIZE,
			max_row_limit: Self::DEFAULT_MAX_ROW_LIMIT,
		}
	}
}

fn parse_or<T>(raw: Option<String>, fallback: T) -> T
where
	T: std::str::FromStr,
{
	raw.and_then(|value| value.trim().parse().ok()).unwrap_or(fallback)
}
