use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use fedsearch_api::ResultGroup;

use crate::backend::{QueryContext, SearchBackend};
use crate::error::SearchError;

/// Commands understood by the background search worker.
#[derive(Debug)]
pub(crate) enum SearchCommand {
	/// Run a search for the provided query.
	Query {
		/// Identifier that allows the controller to correlate responses with the originating query.
		id: u64,
		/// User supplied query string.
		query: String,
	},
	/// Stop the background worker thread.
	Shutdown,
}

/// How a single query ended on the worker side.
#[derive(Debug)]
pub(crate) enum QueryOutcome {
	Resolved(Vec<ResultGroup>),
	Failed(SearchError),
	/// The backend noticed it was superseded and assembled nothing.
	Abandoned,
}

/// Message sent back to the controller for every finished query.
#[derive(Debug)]
pub(crate) struct SearchResult {
	pub(crate) id: u64,
	pub(crate) query: String,
	pub(crate) outcome: QueryOutcome,
}

/// Launches the background search worker thread and returns communication channels.
///
/// Each query runs on its own thread so a slow request never delays the
/// queries issued after it; results may therefore arrive in any order.
pub(crate) fn spawn(
	backend: Arc<dyn SearchBackend>,
) -> (Sender<SearchCommand>, Receiver<SearchResult>, Arc<AtomicU64>) {
	let (command_tx, command_rx) = mpsc::channel();
	let (result_tx, result_rx) = mpsc::channel();
	let latest_query_id = Arc::new(AtomicU64::new(0));
	let thread_latest = Arc::clone(&latest_query_id);

	thread::spawn(move || worker_loop(&backend, command_rx, &result_tx, &thread_latest));

	(command_tx, result_rx, latest_query_id)
}

fn worker_loop(
	backend: &Arc<dyn SearchBackend>,
	command_rx: Receiver<SearchCommand>,
	result_tx: &Sender<SearchResult>,
	latest_query_id: &Arc<AtomicU64>,
) {
	while let Ok(command) = command_rx.recv() {
		match command {
			SearchCommand::Query { id, query } => {
				spawn_query(
					Arc::clone(backend),
					id,
					query,
					result_tx.clone(),
					Arc::clone(latest_query_id),
				);
			}
			SearchCommand::Shutdown => break,
		}
	}
}

fn spawn_query(
	backend: Arc<dyn SearchBackend>,
	id: u64,
	query: String,
	result_tx: Sender<SearchResult>,
	latest_query_id: Arc<AtomicU64>,
) {
	thread::spawn(move || {
		let context = QueryContext::new(id, latest_query_id.as_ref());
		let outcome = match backend.search(&query, &context) {
			Ok(Some(groups)) => QueryOutcome::Resolved(groups),
			Ok(None) => QueryOutcome::Abandoned,
			Err(err) => QueryOutcome::Failed(err),
		};
		// The controller may already be gone; nothing left to report to.
		let _ = result_tx.send(SearchResult { id, query, outcome });
	});
}
