use std::collections::{BTreeMap, HashMap};

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use fedsearch_api::{Category, DISPLAY_LIMIT, MatchResult};

use super::CategoryMatches;
use crate::error::Result;
pub use crate::http::RemoteConfig;
use crate::http::{build_client, send_json};

/// Path of the fuzzy search endpoint relative to the API address.
pub const FUZZY_SEARCH_PATH: &str = "/v1/search/fuzzy";

/// Context selector asking the endpoint for every category.
pub const CONTEXT_ALL: &str = "all";

/// Body of a fuzzy search request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct FuzzySearchRequest {
	pub text: String,
	pub context: String,
}

impl FuzzySearchRequest {
	#[must_use]
	pub fn all(text: impl Into<String>) -> Self {
		Self {
			text: text.into(),
			context: CONTEXT_ALL.to_string(),
		}
	}
}

/// One candidate returned by the endpoint.
///
/// `scope` is a positional array whose layout depends on the category; see
/// [`normalize_match`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FuzzyMatch {
	#[serde(rename = "ID")]
	pub id: String,
	#[serde(rename = "Scope", default)]
	pub scope: Option<Vec<String>>,
}

impl FuzzyMatch {
	fn scope(&self, slot: usize) -> Option<&str> {
		self.scope.as_ref()?.get(slot).map(String::as_str)
	}
}

/// Decoded fuzzy search response. Unknown categories are kept but ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FuzzySearchResponse {
	#[serde(default)]
	pub matches: Option<HashMap<String, Option<Vec<FuzzyMatch>>>>,
	#[serde(default)]
	pub truncations: Option<HashMap<String, Option<bool>>>,
}

impl FuzzySearchResponse {
	/// Matches reported for `category`; absent keys read as empty.
	#[must_use]
	pub fn matches_for(&self, category: Category) -> &[FuzzyMatch] {
		self.matches
			.as_ref()
			.and_then(|matches| matches.get(category.response_key()))
			.and_then(Option::as_deref)
			.unwrap_or_default()
	}

	/// Whether the server stopped collecting `category` early.
	#[must_use]
	pub fn truncated(&self, category: Category) -> bool {
		self.truncations
			.as_ref()
			.and_then(|truncations| truncations.get(category.response_key()))
			.copied()
			.flatten()
			.unwrap_or(false)
	}
}

/// Carries fuzzy search requests to the remote service.
pub trait SearchTransport: Send + Sync {
	/// Perform one fuzzy search round trip.
	///
	/// # Errors
	///
	/// Returns [`SearchError::RequestFailed`](crate::SearchError::RequestFailed)
	/// on transport, status or decode failures.
	fn fuzzy_search(&self, request: &FuzzySearchRequest) -> Result<FuzzySearchResponse>;
}

/// Blocking HTTP transport for the scheduler API.
#[derive(Clone)]
pub struct HttpTransport {
	config: RemoteConfig,
	http: Client,
}

impl std::fmt::Debug for HttpTransport {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("HttpTransport")
			.field("address", &self.config.address)
			.finish_non_exhaustive()
	}
}

impl HttpTransport {
	/// # Errors
	///
	/// Fails when the token header cannot be encoded or the client cannot be
	/// constructed.
	pub fn new(config: RemoteConfig) -> Result<Self> {
		let http = build_client(&config)?;
		Ok(Self { config, http })
	}
}

impl SearchTransport for HttpTransport {
	fn fuzzy_search(&self, request: &FuzzySearchRequest) -> Result<FuzzySearchResponse> {
		let url = self.config.url(FUZZY_SEARCH_PATH);
		tracing::debug!(%url, text = %request.text, "sending fuzzy search request");
		send_json(self.http.post(url).json(request))
	}
}

/// Map one remote candidate onto the uniform result shape.
///
/// | category   | id       | label | namespace | job id   |
/// |------------|----------|-------|-----------|----------|
/// | job        | Scope[1] | ID    | Scope[0]  |          |
/// | node       | Scope[0] | ID    |           |          |
/// | allocation | Scope[1] | ID    |           |          |
/// | task-group | ID       | ID    | Scope[0]  | Scope[1] |
/// | plugin     | ID       | ID    |           |          |
///
/// A missing id slot falls back to `ID`.
#[must_use]
pub fn normalize_match(category: Category, entry: &FuzzyMatch) -> MatchResult {
	let label = entry.id.clone();
	let slot_or_id = |slot: usize| entry.scope(slot).unwrap_or(&entry.id).to_string();
	let slot = |slot: usize| entry.scope(slot).map(str::to_string);

	match category {
		Category::Job => MatchResult::new(category, slot_or_id(1), label).with_namespace(slot(0)),
		Category::Node => MatchResult::new(category, slot_or_id(0), label),
		Category::Allocation => MatchResult::new(category, slot_or_id(1), label),
		Category::TaskGroup => MatchResult::new(category, entry.id.clone(), label)
			.with_namespace(slot(0))
			.with_job_id(slot(1)),
		Category::Plugin => MatchResult::new(category, entry.id.clone(), label),
	}
}

/// Normalize every category of `response`, capping each at `limit`.
#[must_use]
pub fn normalize_response(
	response: &FuzzySearchResponse,
	limit: usize,
) -> BTreeMap<Category, CategoryMatches> {
	Category::ALL
		.into_iter()
		.map(|category| {
			let all = response.matches_for(category);
			let shown = all
				.iter()
				.take(limit)
				.map(|entry| normalize_match(category, entry))
				.collect();
			let matches = CategoryMatches {
				matches: shown,
				total_available: all.len(),
				upstream_truncated: response.truncated(category),
			};
			(category, matches)
		})
		.collect()
}

/// Delegates a query to the remote fuzzy endpoint.
#[derive(Debug, Clone)]
pub struct RemoteAggregator<T> {
	transport: T,
	limit: usize,
}

impl<T: SearchTransport> RemoteAggregator<T> {
	#[must_use]
	pub fn new(transport: T) -> Self {
		Self {
			transport,
			limit: DISPLAY_LIMIT,
		}
	}

	#[must_use]
	pub fn with_limit(mut self, limit: usize) -> Self {
		self.limit = limit;
		self
	}

	/// Search every category for `query`.
	///
	/// # Errors
	///
	/// Propagates the transport's `RequestFailed`.
	pub fn search(&self, query: &str) -> Result<BTreeMap<Category, CategoryMatches>> {
		let response = self.transport.fuzzy_search(&FuzzySearchRequest::all(query))?;
		Ok(normalize_response(&response, self.limit))
	}
}
