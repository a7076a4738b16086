//! Query sequencing between the search surface and a [`SearchBackend`].
//!
//! The [`SearchController`] hands every accepted query to a background worker
//! and stamps it with a monotonically increasing id. Results come back over a
//! channel in whatever order the backend finishes them; only the result whose
//! id matches the most recently accepted query reaches the [`SearchView`].

mod debounce;
mod worker;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::time::{Duration, Instant};

use fedsearch_api::{MatchResult, ResultGroup};

use crate::backend::SearchBackend;
use worker::{QueryOutcome, SearchCommand, SearchResult};

pub use debounce::{ActivationDebouncer, ActivationSource, DEFAULT_ACTIVATION_DELAY};

/// Queries must be longer than this many characters to be dispatched.
pub const MIN_QUERY_CHARS: usize = 1;

/// Receives the groups of each delivered query.
pub trait SearchView {
	/// Replace everything currently shown with `groups`.
	fn replace_groups(&mut self, groups: Vec<ResultGroup>);
}

impl SearchView for Vec<ResultGroup> {
	fn replace_groups(&mut self, groups: Vec<ResultGroup>) {
		*self = groups;
	}
}

/// Outcome of [`SearchController::submit`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Submission {
	/// The query was too short; nothing was dispatched and the view keeps its groups.
	Skipped,
	/// The query was dispatched under this id.
	Issued(u64),
}

/// What happened to one result taken off the worker channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Delivery {
	/// Groups for the latest query were handed to the view.
	Delivered { id: u64 },
	/// A superseded query finished; its groups were dropped.
	Stale { id: u64 },
	/// The latest query failed; the view kept its previous groups.
	Failed { id: u64 },
}

/// Lifecycle of the most recently accepted query.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ControllerState {
	#[default]
	Idle,
	Pending { id: u64 },
	Resolved { id: u64 },
	Failed { id: u64 },
}

/// Sequences queries against one backend and filters out stale results.
pub struct SearchController {
	tx: Sender<SearchCommand>,
	rx: Receiver<SearchResult>,
	latest_query_id: Arc<AtomicU64>,
	next_query_id: u64,
	current_query_id: Option<u64>,
	state: ControllerState,
	groups: Vec<ResultGroup>,
	backend_name: &'static str,
}

impl SearchController {
	/// Start a worker for `backend`.
	#[must_use]
	pub fn new(backend: Arc<dyn SearchBackend>) -> Self {
		let backend_name = backend.name();
		let (tx, rx, latest_query_id) = worker::spawn(backend);
		Self {
			tx,
			rx,
			latest_query_id,
			next_query_id: 0,
			current_query_id: None,
			state: ControllerState::Idle,
			groups: Vec::new(),
			backend_name,
		}
	}

	/// Accept a new query.
	///
	/// Queries of one character or less are not dispatched. They still
	/// supersede whatever is in flight, so a late result for an older query
	/// cannot overwrite the view after the user has cleared the input.
	pub fn submit(&mut self, query: &str) -> Submission {
		self.next_query_id = self.next_query_id.saturating_add(1);
		let id = self.next_query_id;
		self.latest_query_id.store(id, AtomicOrdering::Release);

		if query.chars().count() <= MIN_QUERY_CHARS {
			tracing::trace!(id, "query too short; keeping previous groups");
			self.current_query_id = None;
			if matches!(self.state, ControllerState::Pending { .. }) {
				self.state = ControllerState::Idle;
			}
			return Submission::Skipped;
		}

		tracing::debug!(id, query, backend = self.backend_name, "issuing search");
		self.current_query_id = Some(id);
		self.state = ControllerState::Pending { id };
		let _ = self.tx.send(SearchCommand::Query {
			id,
			query: query.to_owned(),
		});
		Submission::Issued(id)
	}

	#[must_use]
	pub fn state(&self) -> ControllerState {
		self.state
	}

	#[must_use]
	pub fn matches_latest(&self, result_id: u64) -> bool {
		Some(result_id) == self.current_query_id
	}

	/// Groups most recently handed to the view.
	#[must_use]
	pub fn groups(&self) -> &[ResultGroup] {
		&self.groups
	}

	/// Resolve a click on `option` within `group` of the delivered groups.
	#[must_use]
	pub fn select(&self, group: usize, option: usize) -> Option<MatchResult> {
		let result = self.groups.get(group)?.results.get(option)?.clone();
		tracing::debug!(category = %result.category, id = %result.id, "result selected");
		Some(result)
	}

	/// Drain every result that is already waiting.
	pub fn pump(&mut self, view: &mut dyn SearchView) -> Vec<Delivery> {
		let mut deliveries = Vec::new();
		loop {
			match self.rx.try_recv() {
				Ok(result) => deliveries.push(self.handle_result(result, view)),
				Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
			}
		}
		deliveries
	}

	/// Block for at most `timeout` waiting for the next finished query.
	pub fn next_delivery(&mut self, view: &mut dyn SearchView, timeout: Duration) -> Option<Delivery> {
		match self.rx.recv_timeout(timeout) {
			Ok(result) => Some(self.handle_result(result, view)),
			Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
		}
	}

	/// Block until the latest query settles, dropping stale results on the way.
	///
	/// Returns `None` when nothing is pending or `timeout` elapses first.
	pub fn wait_for_latest(
		&mut self,
		view: &mut dyn SearchView,
		timeout: Duration,
	) -> Option<Delivery> {
		let deadline = Instant::now() + timeout;
		while matches!(self.state, ControllerState::Pending { .. }) {
			let remaining = deadline.saturating_duration_since(Instant::now());
			if remaining.is_zero() {
				tracing::warn!(?timeout, "search did not settle in time");
				return None;
			}
			match self.next_delivery(view, remaining)? {
				Delivery::Stale { .. } => {}
				settled => return Some(settled),
			}
		}
		None
	}

	/// Stop the worker. Queries still running finish but are never delivered.
	pub fn shutdown(&self) {
		let _ = self.tx.send(SearchCommand::Shutdown);
	}

	fn handle_result(&mut self, result: SearchResult, view: &mut dyn SearchView) -> Delivery {
		let id = result.id;
		if !self.matches_latest(id) {
			tracing::trace!(id, query = %result.query, "dropping stale search result");
			return Delivery::Stale { id };
		}

		match result.outcome {
			QueryOutcome::Resolved(groups) => {
				self.state = ControllerState::Resolved { id };
				self.groups = groups.clone();
				view.replace_groups(groups);
				Delivery::Delivered { id }
			}
			QueryOutcome::Failed(err) => {
				tracing::warn!(id, query = %result.query, error = %err, "search failed");
				self.state = ControllerState::Failed { id };
				Delivery::Failed { id }
			}
			QueryOutcome::Abandoned => {
				// Only reachable if the backend saw a newer id than the controller holds.
				tracing::trace!(id, "backend abandoned current query");
				Delivery::Stale { id }
			}
		}
	}
}

impl Drop for SearchController {
	fn drop(&mut self) {
		self.shutdown();
	}
}

#[cfg(test)]
mod tests;
