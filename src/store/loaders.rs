use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use reqwest::blocking::Client;
use serde::Deserialize;

use fedsearch_api::{EntityKind, SearchableEntity};

use super::EntityLoader;
use crate::error::{Result, SearchError};
use crate::http::{RemoteConfig, build_client, send_json};

/// Loads entity lists from the scheduler's list endpoints.
pub struct HttpEntityLoader {
	config: RemoteConfig,
	http: Client,
}

impl HttpEntityLoader {
	/// # Errors
	///
	/// Fails when the HTTP client cannot be constructed.
	pub fn new(config: RemoteConfig) -> Result<Self> {
		let http = build_client(&config)?;
		Ok(Self { config, http })
	}

	fn path(kind: EntityKind) -> &'static str {
		match kind {
			EntityKind::Job => "/v1/jobs",
			EntityKind::Node => "/v1/nodes",
		}
	}
}

impl EntityLoader for HttpEntityLoader {
	fn load(&self, kind: EntityKind) -> Result<Vec<SearchableEntity>> {
		let url = self.config.url(Self::path(kind));
		tracing::debug!(%url, "loading entity list");
		send_json(self.http.get(url)).map_err(|err| SearchError::entity_fetch(kind, err))
	}
}

/// On-disk snapshot layout: `{"jobs": [...], "nodes": [...]}`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SnapshotFile {
	jobs: Vec<SearchableEntity>,
	nodes: Vec<SearchableEntity>,
}

/// Loads entity lists from a JSON snapshot file, re-reading it on every load.
#[derive(Debug, Clone)]
pub struct SnapshotLoader {
	path: PathBuf,
}

impl SnapshotLoader {
	#[must_use]
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	#[must_use]
	pub fn path(&self) -> &Path {
		&self.path
	}
}

impl EntityLoader for SnapshotLoader {
	fn load(&self, kind: EntityKind) -> Result<Vec<SearchableEntity>> {
		let file = File::open(&self.path).map_err(|err| {
			SearchError::entity_fetch(kind, format!("{}: {err}", self.path.display()))
		})?;
		let snapshot: SnapshotFile = serde_json::from_reader(BufReader::new(file)).map_err(|err| {
			SearchError::entity_fetch(kind, format!("{}: {err}", self.path.display()))
		})?;
		Ok(match kind {
			EntityKind::Job => snapshot.jobs,
			EntityKind::Node => snapshot.nodes,
		})
	}
}

/// Serves fixed in-memory lists.
#[derive(Debug, Clone, Default)]
pub struct StaticLoader {
	jobs: Vec<SearchableEntity>,
	nodes: Vec<SearchableEntity>,
}

impl StaticLoader {
	#[must_use]
	pub fn new(jobs: Vec<SearchableEntity>, nodes: Vec<SearchableEntity>) -> Self {
		Self { jobs, nodes }
	}
}

impl EntityLoader for StaticLoader {
	fn load(&self, kind: EntityKind) -> Result<Vec<SearchableEntity>> {
		Ok(match kind {
			EntityKind::Job => self.jobs.clone(),
			EntityKind::Node => self.nodes.clone(),
		})
	}
}
