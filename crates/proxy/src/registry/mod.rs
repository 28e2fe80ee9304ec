//! Facet registry with atomic publication.
//!
//! # Purpose
//!
//! Owns the authoritative `selector → facet` mapping and serves lock-free
//! lookups while cuts replace it wholesale.
//!
//! # Mental model
//!
//! * Readers load an `Arc<RoutingTable>` and resolve against that immutable view.
//! * The cut processor validates on a private copy, then hands the finished
//!   table to [`FacetRegistry::apply`], which publishes it with one pointer swap.
//! * Old tables stay alive while a reader still holds them.
//!
//! # Invariants
//!
//! * No partial batch is ever visible: a table is published complete or not at all.
//! * `apply` trusts its input. All rule checks live in [`crate::cut::validate`].
//!   Debug builds still run [`RoutingTable::verify`] before publishing.
//! * Published generations strictly increase. A rollback republishes the old
//!   routes under a fresh generation rather than the old table itself.
//!
//! # Concurrency & ordering
//!
//! * Reads are wait-free (`ArcSwap` load).
//! * Writes are serialized by the cut processor's lock; the registry itself
//!   does not lock.

use std::sync::Arc;

use arc_swap::ArcSwap;
use switchyard_types::{FacetId, Selector};

mod table;

pub use table::{RoutingEntry, RoutingTable, TableViolation};

/// Lookup failure: nothing routes the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("no facet routes selector {selector}")]
pub struct Unrouted {
	pub selector: Selector,
	/// Facet that served the selector before it was removed, if any.
	pub retired_from: Option<FacetId>,
}

pub struct FacetRegistry {
	snap: ArcSwap<RoutingTable>,
}

impl Default for FacetRegistry {
	fn default() -> Self {
		Self::new()
	}
}

impl FacetRegistry {
	/// Creates an empty registry at generation 0.
	pub fn new() -> Self {
		Self {
			snap: ArcSwap::from_pointee(RoutingTable::default()),
		}
	}

	/// Resolves the facet currently routed for `selector`.
	#[inline]
	pub fn resolve(&self, selector: Selector) -> Result<FacetId, Unrouted> {
		let snap = self.snap.load();
		snap.resolve(selector).ok_or_else(|| Unrouted {
			selector,
			retired_from: snap.retired_from(selector),
		})
	}

	/// Pins the current table.
	pub fn snapshot(&self) -> Arc<RoutingTable> {
		self.snap.load_full()
	}

	pub fn generation(&self) -> u64 {
		self.snap.load().generation()
	}

	/// Distinct facets currently in use.
	pub fn list_facets(&self) -> Vec<FacetId> {
		self.snap.load().facets().collect()
	}

	/// Selectors currently routed to `facet`, in routing order.
	pub fn list_selectors(&self, facet: FacetId) -> Vec<Selector> {
		self.snap.load().selectors_of(facet)
	}

	/// Every routing entry, ordered by insertion or last modification.
	pub fn all_entries(&self) -> Vec<RoutingEntry> {
		self.snap.load().entries().collect()
	}

	/// Publishes a validated table in one atomic step.
	pub(crate) fn apply(&self, table: RoutingTable) -> Arc<RoutingTable> {
		debug_assert_eq!(table.verify(), Ok(()));
		debug_assert!(table.generation() > self.generation());
		let next = Arc::new(table);
		self.snap.store(Arc::clone(&next));
		next
	}
}

impl std::fmt::Debug for FacetRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let snap = self.snap.load();
		f.debug_struct("FacetRegistry")
			.field("generation", &snap.generation())
			.field("routes", &snap.len())
			.finish()
	}
}

#[cfg(test)]
mod tests;
