use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::AtomicUsize;
use std::sync::mpsc::{self, Sender};

use fedsearch_api::{Category, SearchableEntity};

use super::*;
use crate::backend::{LocalBackend, QueryContext};
use crate::error::{Result, SearchError};
use crate::store::{EntityCache, StaticLoader};

const WAIT: Duration = Duration::from_secs(5);

fn echo_groups(query: &str) -> Vec<ResultGroup> {
	vec![ResultGroup::capped(
		Category::Job,
		vec![MatchResult::new(Category::Job, query, query)],
		10,
		false,
	)]
}

fn delivered_query(view: &[ResultGroup]) -> Option<&str> {
	Some(view.first()?.results.first()?.id.as_str())
}

#[derive(Default)]
struct CountingBackend {
	calls: AtomicUsize,
}

impl SearchBackend for CountingBackend {
	fn name(&self) -> &'static str {
		"counting"
	}

	fn categories(&self) -> &'static [Category] {
		&[Category::Job]
	}

	fn search(&self, query: &str, _context: &QueryContext<'_>) -> Result<Option<Vec<ResultGroup>>> {
		self.calls.fetch_add(1, AtomicOrdering::SeqCst);
		if query == "boom" {
			return Err(SearchError::request_failed("connection refused"));
		}
		Ok(Some(echo_groups(query)))
	}
}

/// Holds each query until the test releases it, so completion order is under test control.
#[derive(Default)]
struct GatedBackend {
	gates: Mutex<HashMap<String, mpsc::Receiver<()>>>,
}

impl GatedBackend {
	fn gate(&self, query: &str) -> Sender<()> {
		let (tx, rx) = mpsc::channel();
		self.gates.lock().unwrap().insert(query.to_owned(), rx);
		tx
	}
}

impl SearchBackend for GatedBackend {
	fn name(&self) -> &'static str {
		"gated"
	}

	fn categories(&self) -> &'static [Category] {
		&[Category::Job]
	}

	fn search(&self, query: &str, _context: &QueryContext<'_>) -> Result<Option<Vec<ResultGroup>>> {
		let gate = self.gates.lock().unwrap().remove(query);
		if let Some(gate) = gate {
			let _ = gate.recv();
		}
		Ok(Some(echo_groups(query)))
	}
}

#[test]
fn short_queries_never_reach_the_backend() {
	let backend = Arc::new(CountingBackend::default());
	let mut controller = SearchController::new(backend.clone());

	assert_eq!(controller.submit(""), Submission::Skipped);
	assert_eq!(controller.submit("a"), Submission::Skipped);
	assert_eq!(controller.submit("é"), Submission::Skipped);
	assert_eq!(controller.state(), ControllerState::Idle);

	let mut view: Vec<ResultGroup> = Vec::new();
	assert_eq!(controller.wait_for_latest(&mut view, WAIT), None);
	assert_eq!(backend.calls.load(AtomicOrdering::SeqCst), 0);
}

#[test]
fn typing_past_the_gate_issues_one_search() {
	let backend = Arc::new(CountingBackend::default());
	let mut controller = SearchController::new(backend.clone());
	let mut view: Vec<ResultGroup> = Vec::new();

	assert_eq!(controller.submit("a"), Submission::Skipped);
	let Submission::Issued(id) = controller.submit("ab") else {
		panic!("two characters should be dispatched");
	};

	assert_eq!(
		controller.wait_for_latest(&mut view, WAIT),
		Some(Delivery::Delivered { id })
	);
	assert_eq!(delivered_query(&view), Some("ab"));
	assert_eq!(controller.state(), ControllerState::Resolved { id });
	assert_eq!(backend.calls.load(AtomicOrdering::SeqCst), 1);
}

#[test]
fn newer_query_wins_when_it_finishes_first() {
	let backend = Arc::new(GatedBackend::default());
	let release_older = backend.gate("ab");
	let release_newer = backend.gate("abc");
	let mut controller = SearchController::new(backend.clone());
	let mut view: Vec<ResultGroup> = Vec::new();

	let Submission::Issued(older) = controller.submit("ab") else {
		panic!("expected dispatch");
	};
	let Submission::Issued(newer) = controller.submit("abc") else {
		panic!("expected dispatch");
	};

	release_newer.send(()).unwrap();
	assert_eq!(
		controller.wait_for_latest(&mut view, WAIT),
		Some(Delivery::Delivered { id: newer })
	);

	release_older.send(()).unwrap();
	assert_eq!(
		controller.next_delivery(&mut view, WAIT),
		Some(Delivery::Stale { id: older })
	);
	assert_eq!(delivered_query(&view), Some("abc"));
}

#[test]
fn newer_query_wins_when_it_finishes_last() {
	let backend = Arc::new(GatedBackend::default());
	let release_older = backend.gate("ab");
	let release_newer = backend.gate("abc");
	let mut controller = SearchController::new(backend.clone());
	let mut view: Vec<ResultGroup> = Vec::new();

	let Submission::Issued(older) = controller.submit("ab") else {
		panic!("expected dispatch");
	};
	let Submission::Issued(newer) = controller.submit("abc") else {
		panic!("expected dispatch");
	};

	release_older.send(()).unwrap();
	assert_eq!(
		controller.next_delivery(&mut view, WAIT),
		Some(Delivery::Stale { id: older })
	);
	assert!(view.is_empty());

	release_newer.send(()).unwrap();
	assert_eq!(
		controller.wait_for_latest(&mut view, WAIT),
		Some(Delivery::Delivered { id: newer })
	);
	assert_eq!(delivered_query(&view), Some("abc"));
}

#[test]
fn clearing_the_input_discards_in_flight_results() {
	let backend = Arc::new(GatedBackend::default());
	let release = backend.gate("ab");
	let mut controller = SearchController::new(backend.clone());
	let mut view: Vec<ResultGroup> = Vec::new();

	let Submission::Issued(id) = controller.submit("ab") else {
		panic!("expected dispatch");
	};
	assert_eq!(controller.submit("a"), Submission::Skipped);
	assert_eq!(controller.state(), ControllerState::Idle);

	release.send(()).unwrap();
	assert_eq!(
		controller.next_delivery(&mut view, WAIT),
		Some(Delivery::Stale { id })
	);
	assert!(view.is_empty());
}

#[test]
fn short_query_after_delivery_keeps_groups() {
	let backend = Arc::new(CountingBackend::default());
	let mut controller = SearchController::new(backend.clone());
	let mut view: Vec<ResultGroup> = Vec::new();

	let Submission::Issued(id) = controller.submit("web") else {
		panic!("expected dispatch");
	};
	assert_eq!(
		controller.wait_for_latest(&mut view, WAIT),
		Some(Delivery::Delivered { id })
	);
	let shown = view.clone();

	assert_eq!(controller.submit("w"), Submission::Skipped);
	assert_eq!(controller.submit(""), Submission::Skipped);
	assert!(controller.pump(&mut view).is_empty());

	assert_eq!(view, shown);
	assert_eq!(controller.groups(), shown.as_slice());
	assert_eq!(controller.state(), ControllerState::Resolved { id });
	assert_eq!(backend.calls.load(AtomicOrdering::SeqCst), 1);
}

#[test]
fn failure_keeps_previous_groups() {
	let mut controller = SearchController::new(Arc::new(CountingBackend::default()));
	let mut view: Vec<ResultGroup> = Vec::new();

	controller.submit("web");
	controller.wait_for_latest(&mut view, WAIT);
	assert_eq!(delivered_query(&view), Some("web"));

	let Submission::Issued(id) = controller.submit("boom") else {
		panic!("expected dispatch");
	};
	assert_eq!(
		controller.wait_for_latest(&mut view, WAIT),
		Some(Delivery::Failed { id })
	);
	assert_eq!(controller.state(), ControllerState::Failed { id });
	assert_eq!(delivered_query(&view), Some("web"));
	assert_eq!(delivered_query(controller.groups()), Some("web"));
}

#[test]
fn same_query_twice_delivers_equal_groups() {
	let mut controller = SearchController::new(Arc::new(CountingBackend::default()));
	let mut first: Vec<ResultGroup> = Vec::new();
	let mut second: Vec<ResultGroup> = Vec::new();

	controller.submit("redis");
	controller.wait_for_latest(&mut first, WAIT);
	controller.submit("redis");
	controller.wait_for_latest(&mut second, WAIT);

	assert!(!first.is_empty());
	assert_eq!(first, second);
}

#[test]
fn select_returns_the_clicked_result() {
	let jobs = vec![SearchableEntity::new("web", "web").with_namespace("default")];
	let nodes = vec![SearchableEntity::new("node-1a2b", "client-1")];
	let backend = LocalBackend::new(EntityCache::new(StaticLoader::new(jobs, nodes)));
	let mut controller = SearchController::new(Arc::new(backend));
	let mut view: Vec<ResultGroup> = Vec::new();

	controller.submit("web");
	controller.wait_for_latest(&mut view, WAIT);

	let labels: Vec<&str> = view.iter().map(|group| group.label.as_str()).collect();
	assert_eq!(labels, vec!["Jobs (1)", "Clients (0)"]);

	let selected = controller.select(0, 0).unwrap();
	assert_eq!(selected.category, Category::Job);
	assert_eq!(selected.id, "web");
	assert_eq!(selected.namespace.as_deref(), Some("default"));
	assert_eq!(controller.select(1, 0), None);
	assert_eq!(controller.select(7, 0), None);
}

#[test]
fn pump_drains_without_blocking() {
	let mut controller = SearchController::new(Arc::new(CountingBackend::default()));
	let mut view: Vec<ResultGroup> = Vec::new();
	assert!(controller.pump(&mut view).is_empty());

	let Submission::Issued(id) = controller.submit("api") else {
		panic!("expected dispatch");
	};
	let deadline = Instant::now() + WAIT;
	let mut deliveries = Vec::new();
	while deliveries.is_empty() && Instant::now() < deadline {
		deliveries = controller.pump(&mut view);
		std::thread::sleep(Duration::from_millis(5));
	}
	assert_eq!(deliveries, vec![Delivery::Delivered { id }]);
	assert_eq!(delivered_query(&view), Some("api"));
}
