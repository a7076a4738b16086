//! Per-category aggregation for both search paths.
//!
//! The local path composes several [`Matcher`](crate::matcher::Matcher)s over
//! cached entity lists; the remote path normalizes one fuzzy-search response.
//! Both produce [`CategoryMatches`], which turn into display groups.

pub mod local;
pub mod remote;

use fedsearch_api::{Category, MatchResult, ResultGroup};

pub use local::LocalAggregator;
pub use remote::{
	FuzzySearchRequest, FuzzySearchResponse, HttpTransport, RemoteAggregator, RemoteConfig,
	SearchTransport,
};

/// Capped results for one category plus what is known about the full set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryMatches {
	/// Results kept after the display cap, best first.
	pub matches: Vec<MatchResult>,
	/// How many results existed before the display cap.
	pub total_available: usize,
	/// The producer itself stopped collecting before the full set.
	pub upstream_truncated: bool,
}

impl CategoryMatches {
	/// Cap `all` at `limit`, remembering the uncapped length.
	#[must_use]
	pub fn capped(mut all: Vec<MatchResult>, limit: usize, upstream_truncated: bool) -> Self {
		let total_available = all.len();
		all.truncate(limit);
		Self {
			matches: all,
			total_available,
			upstream_truncated,
		}
	}

	/// True when the producer truncated or the local cap discarded entries.
	#[must_use]
	pub fn truncated(&self) -> bool {
		self.upstream_truncated || self.matches.len() < self.total_available
	}

	/// Build the labeled display group for `category`.
	#[must_use]
	pub fn into_group(self, category: Category) -> ResultGroup {
		ResultGroup::from_capped(
			category,
			self.matches,
			self.total_available,
			self.upstream_truncated,
		)
	}
}
