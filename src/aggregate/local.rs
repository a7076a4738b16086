use std::collections::HashSet;

use fedsearch_api::{Category, DISPLAY_LIMIT, MatchResult, SearchableEntity};

use super::CategoryMatches;
use crate::matcher::Matcher;

/// Searches one entity list with several matchers and merges their output.
///
/// Matchers run in priority order. An entity matched by more than one of them
/// keeps the position of its first appearance.
#[derive(Clone, Debug)]
pub struct LocalAggregator {
	category: Category,
	matchers: Vec<Matcher>,
	limit: usize,
}

impl LocalAggregator {
	#[must_use]
	pub fn new(category: Category, matchers: Vec<Matcher>) -> Self {
		Self {
			category,
			matchers,
			limit: DISPLAY_LIMIT,
		}
	}

	/// Jobs matched by id or name.
	#[must_use]
	pub fn jobs() -> Self {
		Self::new(Category::Job, vec![Matcher::job_name()])
	}

	/// Clients matched by identifier prefix first, then by name.
	#[must_use]
	pub fn nodes() -> Self {
		Self::new(
			Category::Node,
			vec![Matcher::node_id_prefix(), Matcher::node_name()],
		)
	}

	#[must_use]
	pub fn with_limit(mut self, limit: usize) -> Self {
		self.limit = limit;
		self
	}

	#[must_use]
	pub fn category(&self) -> Category {
		self.category
	}

	/// Every distinct entity matched by any matcher, in priority order.
	pub fn merge<'a>(&self, candidates: &'a [SearchableEntity], query: &str) -> Vec<&'a SearchableEntity> {
		let mut seen = HashSet::new();
		self.matchers
			.iter()
			.flat_map(|matcher| matcher.search(candidates, query))
			.filter(|&entity| seen.insert(entity.id.as_str()))
			.collect()
	}

	/// Merge, normalize and cap the matches for `query`.
	///
	/// `None` stands for a list that has not been loaded yet and searches as
	/// empty.
	pub fn search(&self, candidates: Option<&[SearchableEntity]>, query: &str) -> CategoryMatches {
		let candidates = candidates.unwrap_or_default();
		let merged: Vec<MatchResult> = self
			.merge(candidates, query)
			.into_iter()
			.map(|entity| MatchResult::from_entity(self.category, entity))
			.collect();
		CategoryMatches::capped(merged, self.limit, false)
	}
}
