//! Deployed facets, addressed by [`FacetId`].
//!
//! The arena is append-only: a deployed facet is never dropped or replaced, so
//! an id handed out once stays valid for the lifetime of the proxy.

use std::sync::Arc;

use parking_lot::RwLock;
use switchyard_types::FacetId;

use crate::Facet;

#[derive(Default)]
pub struct FacetArena {
	slots: RwLock<Vec<Arc<dyn Facet>>>,
}

impl FacetArena {
	pub fn new() -> Self {
		Self::default()
	}

	/// Deploys a facet and returns its fresh, non-null id.
	pub fn deploy(&self, facet: Arc<dyn Facet>) -> FacetId {
		let mut slots = self.slots.write();
		let name = facet.name().to_owned();
		slots.push(facet);
		let id = FacetId::new(slots.len() as u64);
		tracing::debug!(facet = %id, name, "facet deployed");
		id
	}

	pub fn get(&self, id: FacetId) -> Option<Arc<dyn Facet>> {
		let idx = usize::try_from(id.get()).ok()?.checked_sub(1)?;
		self.slots.read().get(idx).cloned()
	}

	pub fn contains(&self, id: FacetId) -> bool {
		!id.is_null() && id.get() <= self.slots.read().len() as u64
	}

	pub fn len(&self) -> usize {
		self.slots.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.slots.read().is_empty()
	}
}

impl std::fmt::Debug for FacetArena {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let slots = self.slots.read();
		f.debug_list()
			.entries(slots.iter().map(|facet| facet.name()))
			.finish()
	}
}
