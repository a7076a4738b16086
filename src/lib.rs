//! Federated search over a cluster scheduler's objects.
//!
//! A [`SearchController`] sequences queries against one [`SearchBackend`]:
//! either [`LocalBackend`], which matches cached job and node lists with
//! several [`Matcher`]s, or [`RemoteBackend`], which normalizes the
//! scheduler's own fuzzy-search response. Both produce labeled
//! [`ResultGroup`]s in a fixed category order.

pub mod aggregate;
pub mod app_dirs;
pub mod backend;
pub mod controller;
pub mod error;
mod http;
pub mod logging;
pub mod matcher;
pub mod store;

pub use aggregate::{
	CategoryMatches, FuzzySearchRequest, FuzzySearchResponse, HttpTransport, LocalAggregator,
	RemoteAggregator, RemoteConfig, SearchTransport,
};
pub use backend::{LocalBackend, QueryContext, RemoteBackend, SearchBackend};
pub use controller::{
	ActivationDebouncer, ActivationSource, ControllerState, Delivery, SearchController, SearchView,
	Submission,
};
pub use error::{Result, SearchError};
pub use http::{DEFAULT_ADDRESS, DEFAULT_TOKEN_HEADER};
pub use matcher::{MatchMode, Matcher, MatcherConfig};
pub use store::{
	EntityCache, EntityLoader, EntitySnapshot, EntityStore, HttpEntityLoader, SnapshotLoader,
	StaticLoader,
};

pub use fedsearch_api::{
	Category, DISPLAY_LIMIT, EntityField, EntityKind, MatchResult, ResultGroup, SearchableEntity,
	TruncationInfo, group_label,
};
