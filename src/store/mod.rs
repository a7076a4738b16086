//! Cached entity lists consumed by the local search path.
//!
//! [`EntityCache`] hands out `Arc` snapshots: a refresh swaps the snapshot
//! for later readers and never touches one that a search is still reading.

mod loaders;

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use fedsearch_api::{EntityKind, SearchableEntity};

use crate::error::Result;

pub use loaders::{HttpEntityLoader, SnapshotLoader, StaticLoader};

/// Shared, immutable view of one entity list.
pub type EntitySnapshot = Arc<Vec<SearchableEntity>>;

/// Produces a fresh entity list from its source.
pub trait EntityLoader: Send + Sync {
	/// # Errors
	///
	/// Returns [`SearchError::EntityFetch`](crate::SearchError::EntityFetch)
	/// when the source cannot be read or decoded.
	fn load(&self, kind: EntityKind) -> Result<Vec<SearchableEntity>>;
}

/// Read access to cached entity lists.
pub trait EntityStore: Send + Sync {
	/// Return the list for `kind`, loading it on first use.
	///
	/// # Errors
	///
	/// Propagates the loader's failure.
	fn fetch(&self, kind: EntityKind) -> Result<EntitySnapshot>;

	/// Return the list for `kind` only if it is already loaded.
	fn peek(&self, kind: EntityKind) -> Option<EntitySnapshot>;
}

/// Lazily populated, refreshable cache in front of an [`EntityLoader`].
pub struct EntityCache<L> {
	loader: L,
	entries: RwLock<HashMap<EntityKind, EntitySnapshot>>,
}

impl<L: EntityLoader> EntityCache<L> {
	#[must_use]
	pub fn new(loader: L) -> Self {
		Self {
			loader,
			entries: RwLock::new(HashMap::new()),
		}
	}

	/// Reload `kind` from the loader and replace the cached snapshot.
	///
	/// # Errors
	///
	/// Propagates the loader's failure; the previous snapshot stays cached.
	pub fn refresh(&self, kind: EntityKind) -> Result<EntitySnapshot> {
		let snapshot = Arc::new(self.loader.load(kind)?);
		tracing::debug!(kind = kind.plural(), count = snapshot.len(), "entity list refreshed");
		self.entries
			.write()
			.unwrap_or_else(PoisonError::into_inner)
			.insert(kind, Arc::clone(&snapshot));
		Ok(snapshot)
	}

	/// Drop the cached snapshot so the next fetch reloads it.
	pub fn invalidate(&self, kind: EntityKind) {
		self.entries
			.write()
			.unwrap_or_else(PoisonError::into_inner)
			.remove(&kind);
	}
}

impl<L: EntityLoader> EntityStore for EntityCache<L> {
	fn fetch(&self, kind: EntityKind) -> Result<EntitySnapshot> {
		if let Some(snapshot) = self.peek(kind) {
			return Ok(snapshot);
		}
		self.refresh(kind)
	}

	fn peek(&self, kind: EntityKind) -> Option<EntitySnapshot> {
		self.entries
			.read()
			.unwrap_or_else(PoisonError::into_inner)
			.get(&kind)
			.cloned()
	}
}

impl<S: EntityStore + ?Sized> EntityStore for Arc<S> {
	fn fetch(&self, kind: EntityKind) -> Result<EntitySnapshot> {
		(**self).fetch(kind)
	}

	fn peek(&self, kind: EntityKind) -> Option<EntitySnapshot> {
		(**self).peek(kind)
	}
}
