//! Read-only introspection over the live routing table.
//!
//! Every query loads the current snapshot, so a cut is visible to the very
//! next query. Multi-part answers come from a single snapshot.

use serde::{Deserialize, Serialize};
use switchyard_catalog::Interface;
use switchyard_types::{FacetId, Selector};

use crate::{FacetRegistry, RoutingEntry};

/// A facet and the selectors routed to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetSummary {
	pub facet: FacetId,
	pub selectors: Vec<Selector>,
}

#[derive(Debug, Clone, Copy)]
pub struct Loupe<'a> {
	registry: &'a FacetRegistry,
}

impl<'a> Loupe<'a> {
	pub fn new(registry: &'a FacetRegistry) -> Self {
		Self { registry }
	}

	/// Every facet in use with its selectors.
	pub fn facets(&self) -> Vec<FacetSummary> {
		let snap = self.registry.snapshot();
		snap.facets()
			.map(|facet| FacetSummary {
				facet,
				selectors: snap.selectors_of(facet),
			})
			.collect()
	}

	pub fn facet_ids(&self) -> Vec<FacetId> {
		self.registry.list_facets()
	}

	pub fn facet_selectors(&self, facet: FacetId) -> Vec<Selector> {
		self.registry.list_selectors(facet)
	}

	pub fn facet_of(&self, selector: Selector) -> Option<FacetId> {
		self.registry.resolve(selector).ok()
	}

	pub fn entries(&self) -> Vec<RoutingEntry> {
		self.registry.all_entries()
	}

	pub fn generation(&self) -> u64 {
		self.registry.generation()
	}

	/// True when every entry point of `interface` is routed.
	pub fn supports(&self, interface: &Interface) -> bool {
		let snap = self.registry.snapshot();
		interface
			.entries()
			.iter()
			.all(|entry| snap.resolve(entry.selector).is_some())
	}
}
