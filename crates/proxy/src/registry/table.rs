//! Immutable routing table published by the registry.
//!
//! # Role
//!
//! Pure data: lookups plus the crate-internal edit primitives the cut validator
//! uses on its working copy. A published table is never mutated again.

use indexmap::{IndexMap, IndexSet};
use rustc_hash::{FxBuildHasher, FxHashMap};
use serde::{Deserialize, Serialize};
use switchyard_types::{FacetId, Selector};

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;
type FxIndexSet<T> = IndexSet<T, FxBuildHasher>;

/// One `selector → facet` association.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoutingEntry {
	pub selector: Selector,
	pub facet: FacetId,
}

/// Broken table invariant, reported by [`RoutingTable::verify`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableViolation {
	#[error("selector {selector} routes to the null facet")]
	NullRoute { selector: Selector },
	#[error("selector {selector} routes to {facet} but is missing from its selector list")]
	MissingFromFacet { selector: Selector, facet: FacetId },
	#[error("{facet} lists selector {selector}, which routes elsewhere")]
	StaleFacetEntry { selector: Selector, facet: FacetId },
	#[error("{facet} is listed with no selectors")]
	EmptyFacet { facet: FacetId },
	#[error("selector {selector} is both routed and retired")]
	RetiredButRouted { selector: Selector },
}

/// Snapshot of every routing entry.
///
/// * `routes` is ordered by insertion or last modification; a replace moves the
///   entry to the end and a remove keeps the order of the rest.
/// * `by_facet` lists, per facet, the selectors routed to it. A facet appears
///   iff it serves at least one selector.
/// * `retired` remembers the last facet of selectors that were removed and not
///   routed again.
#[derive(Clone, Debug, Default)]
pub struct RoutingTable {
	routes: FxIndexMap<Selector, FacetId>,
	by_facet: FxIndexMap<FacetId, FxIndexSet<Selector>>,
	retired: FxHashMap<Selector, FacetId>,
	generation: u64,
}

impl RoutingTable {
	#[inline]
	pub fn resolve(&self, selector: Selector) -> Option<FacetId> {
		self.routes.get(&selector).copied()
	}

	/// Facet that served `selector` before it was removed, if it is currently unrouted.
	pub fn retired_from(&self, selector: Selector) -> Option<FacetId> {
		self.retired.get(&selector).copied()
	}

	/// Number of committed cuts this table is the result of.
	pub fn generation(&self) -> u64 {
		self.generation
	}

	pub fn len(&self) -> usize {
		self.routes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.routes.is_empty()
	}

	pub fn entries(&self) -> impl Iterator<Item = RoutingEntry> + '_ {
		self.routes
			.iter()
			.map(|(&selector, &facet)| RoutingEntry { selector, facet })
	}

	/// Facets in use, in the order they joined the table.
	pub fn facets(&self) -> impl Iterator<Item = FacetId> + '_ {
		self.by_facet.keys().copied()
	}

	pub fn selectors_of(&self, facet: FacetId) -> Vec<Selector> {
		self.by_facet
			.get(&facet)
			.map(|set| set.iter().copied().collect())
			.unwrap_or_default()
	}

	pub fn serves(&self, facet: FacetId) -> bool {
		self.by_facet.contains_key(&facet)
	}

	/// Checks the cross-index invariants.
	pub fn verify(&self) -> Result<(), TableViolation> {
		for (&selector, &facet) in &self.routes {
			if facet.is_null() {
				return Err(TableViolation::NullRoute { selector });
			}
			if !self.by_facet.get(&facet).is_some_and(|set| set.contains(&selector)) {
				return Err(TableViolation::MissingFromFacet { selector, facet });
			}
			if self.retired.contains_key(&selector) {
				return Err(TableViolation::RetiredButRouted { selector });
			}
		}
		for (&facet, selectors) in &self.by_facet {
			if selectors.is_empty() {
				return Err(TableViolation::EmptyFacet { facet });
			}
			if let Some(&selector) = selectors.iter().find(|sel| self.resolve(**sel) != Some(facet)) {
				return Err(TableViolation::StaleFacetEntry { selector, facet });
			}
		}
		Ok(())
	}

	/// Routes an unassigned selector.
	pub(crate) fn insert(&mut self, selector: Selector, facet: FacetId) {
		debug_assert!(!self.routes.contains_key(&selector));
		self.routes.insert(selector, facet);
		self.by_facet.entry(facet).or_default().insert(selector);
		self.retired.remove(&selector);
	}

	/// Repoints an assigned selector, moving it to the end of the order.
	pub(crate) fn repoint(&mut self, selector: Selector, facet: FacetId) {
		if let Some(previous) = self.routes.shift_remove(&selector) {
			self.detach(previous, selector);
		}
		self.insert(selector, facet);
	}

	/// Unroutes a selector, returning the facet that served it.
	pub(crate) fn remove(&mut self, selector: Selector) -> Option<FacetId> {
		let previous = self.routes.shift_remove(&selector)?;
		self.detach(previous, selector);
		self.retired.insert(selector, previous);
		Some(previous)
	}

	pub(crate) fn set_generation(&mut self, generation: u64) {
		self.generation = generation;
	}

	fn detach(&mut self, facet: FacetId, selector: Selector) {
		let Some(set) = self.by_facet.get_mut(&facet) else {
			return;
		};
		set.shift_remove(&selector);
		if set.is_empty() {
			self.by_facet.shift_remove(&facet);
		}
	}
}
