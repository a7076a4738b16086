use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use fedsearch::{
	Delivery, EntityCache, HttpEntityLoader, HttpTransport, LocalBackend, RemoteBackend, ResultGroup,
	SearchBackend, SearchController, SnapshotLoader, Submission,
};

use crate::settings::{BackendKind, ResolvedConfig};

/// What the CLI prints once the queries have been run.
#[derive(Debug)]
pub(crate) struct SearchOutcome {
	/// Last query that passed the length gate.
	pub(crate) query: Option<String>,
	pub(crate) delivery: Option<Delivery>,
	pub(crate) groups: Vec<ResultGroup>,
}

impl SearchOutcome {
	pub(crate) fn delivered(&self) -> bool {
		matches!(self.delivery, Some(Delivery::Delivered { .. }))
	}
}

/// Feeds the command-line queries through a controller and collects the result.
pub(crate) struct SearchWorkflow {
	controller: SearchController,
	queries: Vec<String>,
	wait_timeout: Duration,
}

impl SearchWorkflow {
	pub(crate) fn from_config(config: ResolvedConfig, queries: Vec<String>) -> Result<Self> {
		let backend = build_backend(&config)?;
		tracing::info!(backend = backend.name(), limit = config.display_limit, "search backend ready");
		Ok(Self {
			controller: SearchController::new(backend),
			queries,
			wait_timeout: config.wait_timeout,
		})
	}

	pub(crate) fn run(mut self) -> Result<SearchOutcome> {
		let mut query = None;
		for text in &self.queries {
			if let Submission::Issued(_) = self.controller.submit(text) {
				query = Some(text.clone());
			}
		}

		let mut groups: Vec<ResultGroup> = Vec::new();
		let delivery = self.controller.wait_for_latest(&mut groups, self.wait_timeout);
		if let Some(Delivery::Failed { .. }) = delivery {
			bail!(
				"search for '{}' failed; rerun with -v for details",
				query.as_deref().unwrap_or_default()
			);
		}

		Ok(SearchOutcome {
			query,
			delivery,
			groups,
		})
	}
}

fn build_backend(config: &ResolvedConfig) -> Result<Arc<dyn SearchBackend>> {
	let limit = config.display_limit;
	let backend: Arc<dyn SearchBackend> = match (config.backend, &config.snapshot) {
		(BackendKind::Remote, _) => {
			let transport = HttpTransport::new(config.remote.clone())
				.context("failed to prepare the search client")?;
			Arc::new(RemoteBackend::new(transport).with_limit(limit))
		}
		(BackendKind::Local, Some(path)) => {
			let store = EntityCache::new(SnapshotLoader::new(path.clone()));
			Arc::new(LocalBackend::new(store).with_limit(limit))
		}
		(BackendKind::Local, None) => {
			let loader = HttpEntityLoader::new(config.remote.clone())
				.context("failed to prepare the entity list client")?;
			Arc::new(LocalBackend::new(EntityCache::new(loader)).with_limit(limit))
		}
	};
	Ok(backend)
}
