use thiserror::Error;

use fedsearch_api::EntityKind;

/// Failures surfaced by the search core.
///
/// None of these are fatal: the controller logs them and keeps whatever
/// results were displayed before.
#[derive(Debug, Error)]
pub enum SearchError {
	/// The remote search call failed in transport, returned an error status, or
	/// produced a body that could not be decoded.
	#[error("search request failed: {reason}")]
	RequestFailed { reason: String },

	/// An entity list could not be loaded for a local search.
	#[error("failed to fetch {kind:?} entities: {reason}")]
	EntityFetch { kind: EntityKind, reason: String },

	/// An anchored pattern built from the query did not compile.
	#[error("query does not form a valid pattern '{pattern}': {source}")]
	MalformedPattern {
		pattern: String,
		#[source]
		source: regex::Error,
	},
}

impl SearchError {
	pub fn request_failed(reason: impl std::fmt::Display) -> Self {
		Self::RequestFailed {
			reason: reason.to_string(),
		}
	}

	pub fn entity_fetch(kind: EntityKind, reason: impl std::fmt::Display) -> Self {
		Self::EntityFetch {
			kind,
			reason: reason.to_string(),
		}
	}
}

impl From<reqwest::Error> for SearchError {
	fn from(err: reqwest::Error) -> Self {
		Self::request_failed(err)
	}
}

pub type Result<T> = std::result::Result<T, SearchError>;
