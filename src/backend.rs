//! The two search paths the controller can drive.
//!
//! A backend runs one query to completion and returns the labeled groups in
//! its fixed category order. Which backend a controller uses is decided by
//! whoever builds it.

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use fedsearch_api::{Category, EntityKind, ResultGroup};

use crate::aggregate::{LocalAggregator, RemoteAggregator, SearchTransport};
use crate::error::Result;
use crate::store::EntityStore;

/// Categories produced by [`LocalBackend`], in display order.
pub const LOCAL_CATEGORIES: [Category; 2] = [Category::Job, Category::Node];

/// Categories produced by [`RemoteBackend`], in display order.
pub const REMOTE_CATEGORIES: [Category; 5] = Category::ALL;

/// Identifies the query a backend is serving and whether it was superseded.
pub struct QueryContext<'a> {
	id: u64,
	latest_query_id: &'a AtomicU64,
}

impl<'a> QueryContext<'a> {
	#[must_use]
	pub fn new(id: u64, latest_query_id: &'a AtomicU64) -> Self {
		Self { id, latest_query_id }
	}

	#[must_use]
	pub fn id(&self) -> u64 {
		self.id
	}

	/// Check if this query has been superseded by a newer one.
	#[must_use]
	pub fn is_stale(&self) -> bool {
		self.latest_query_id.load(AtomicOrdering::Acquire) != self.id
	}
}

/// One way of answering a query.
pub trait SearchBackend: Send + Sync {
	/// Short name used in logs and configuration.
	fn name(&self) -> &'static str;

	/// Categories this backend reports, in display order.
	fn categories(&self) -> &'static [Category];

	/// Run `query` to completion.
	///
	/// Returns `Ok(None)` when the query was superseded before its results
	/// were assembled.
	///
	/// # Errors
	///
	/// Returns `RequestFailed` or `EntityFetch` when the backing data could
	/// not be obtained.
	fn search(&self, query: &str, context: &QueryContext<'_>) -> Result<Option<Vec<ResultGroup>>>;
}

/// Multi-strategy search over cached job and node lists.
pub struct LocalBackend<S> {
	store: S,
	jobs: LocalAggregator,
	nodes: LocalAggregator,
}

impl<S: EntityStore> LocalBackend<S> {
	#[must_use]
	pub fn new(store: S) -> Self {
		Self {
			store,
			jobs: LocalAggregator::jobs(),
			nodes: LocalAggregator::nodes(),
		}
	}

	#[must_use]
	pub fn with_limit(mut self, limit: usize) -> Self {
		self.jobs = self.jobs.with_limit(limit);
		self.nodes = self.nodes.with_limit(limit);
		self
	}

	fn aggregator_for(&self, category: Category) -> Option<(EntityKind, &LocalAggregator)> {
		match category {
			Category::Job => Some((EntityKind::Job, &self.jobs)),
			Category::Node => Some((EntityKind::Node, &self.nodes)),
			_ => None,
		}
	}
}

impl<S: EntityStore> SearchBackend for LocalBackend<S> {
	fn name(&self) -> &'static str {
		"local"
	}

	fn categories(&self) -> &'static [Category] {
		&LOCAL_CATEGORIES
	}

	fn search(&self, query: &str, context: &QueryContext<'_>) -> Result<Option<Vec<ResultGroup>>> {
		let mut sources = Vec::with_capacity(self.categories().len());
		for &category in self.categories() {
			let source = match self.aggregator_for(category) {
				Some((kind, aggregator)) => Some((aggregator, self.store.fetch(kind)?)),
				None => None,
			};
			sources.push((category, source));
		}

		if context.is_stale() {
			tracing::trace!(id = context.id(), "local search superseded after fetch");
			return Ok(None);
		}

		let groups = sources
			.into_iter()
			.map(|(category, source)| match source {
				Some((aggregator, entities)) => aggregator
					.search(Some(entities.as_slice()), query)
					.into_group(aggregator.category()),
				None => ResultGroup::empty(category),
			})
			.collect();
		Ok(Some(groups))
	}
}

/// Federated fuzzy search delegated to the remote service.
pub struct RemoteBackend<T> {
	aggregator: RemoteAggregator<T>,
}

impl<T: SearchTransport> RemoteBackend<T> {
	#[must_use]
	pub fn new(transport: T) -> Self {
		Self {
			aggregator: RemoteAggregator::new(transport),
		}
	}

	#[must_use]
	pub fn with_limit(mut self, limit: usize) -> Self {
		self.aggregator = self.aggregator.with_limit(limit);
		self
	}
}

impl<T: SearchTransport> SearchBackend for RemoteBackend<T> {
	fn name(&self) -> &'static str {
		"remote"
	}

	fn categories(&self) -> &'static [Category] {
		&REMOTE_CATEGORIES
	}

	fn search(&self, query: &str, context: &QueryContext<'_>) -> Result<Option<Vec<ResultGroup>>> {
		let mut results = self.aggregator.search(query)?;
		if context.is_stale() {
			tracing::trace!(id = context.id(), "remote search superseded after response");
			return Ok(None);
		}

		let groups = self
			.categories()
			.iter()
			.map(|&category| {
				results
					.remove(&category)
					.unwrap_or_default()
					.into_group(category)
			})
			.collect();
		Ok(Some(groups))
	}
}
