use std::sync::Arc;

use pretty_assertions::assert_eq;

use super::{FacetRegistry, RoutingEntry, RoutingTable, Unrouted};
use crate::{FacetId, Selector};

const A: FacetId = FacetId::new(1);
const B: FacetId = FacetId::new(2);

fn sel(raw: u32) -> Selector {
	Selector::from_u32(raw)
}

fn entry(selector: Selector, facet: FacetId) -> RoutingEntry {
	RoutingEntry { selector, facet }
}

fn publish(registry: &FacetRegistry, edit: impl FnOnce(&mut RoutingTable)) {
	let mut table = (*registry.snapshot()).clone();
	edit(&mut table);
	table.set_generation(table.generation() + 1);
	registry.apply(table);
}

#[test]
fn test_empty_registry_resolves_nothing() {
	let registry = FacetRegistry::new();
	assert_eq!(registry.generation(), 0);
	assert_eq!(
		registry.resolve(sel(1)),
		Err(Unrouted {
			selector: sel(1),
			retired_from: None
		})
	);
	assert!(registry.list_facets().is_empty());
	assert!(registry.all_entries().is_empty());
}

#[test]
fn test_apply_publishes_whole_table() {
	let registry = FacetRegistry::new();
	publish(&registry, |t| {
		t.insert(sel(1), A);
		t.insert(sel(2), A);
		t.insert(sel(3), B);
	});

	assert_eq!(registry.generation(), 1);
	assert_eq!(registry.resolve(sel(1)), Ok(A));
	assert_eq!(registry.resolve(sel(3)), Ok(B));
	assert_eq!(registry.list_facets(), vec![A, B]);
	assert_eq!(registry.list_selectors(A), vec![sel(1), sel(2)]);
	assert_eq!(
		registry.all_entries(),
		vec![entry(sel(1), A), entry(sel(2), A), entry(sel(3), B)]
	);
}

#[test]
fn test_repoint_moves_entry_to_end_and_drops_empty_facet() {
	let registry = FacetRegistry::new();
	publish(&registry, |t| {
		t.insert(sel(1), A);
		t.insert(sel(2), B);
		t.insert(sel(3), B);
	});
	publish(&registry, |t| t.repoint(sel(1), B));

	assert_eq!(registry.resolve(sel(1)), Ok(B));
	assert_eq!(registry.list_facets(), vec![B]);
	assert_eq!(registry.list_selectors(B), vec![sel(2), sel(3), sel(1)]);
	assert!(registry.list_selectors(A).is_empty());
	assert_eq!(
		registry.all_entries(),
		vec![entry(sel(2), B), entry(sel(3), B), entry(sel(1), B)]
	);
}

#[test]
fn test_remove_keeps_order_and_records_retired_facet() {
	let registry = FacetRegistry::new();
	publish(&registry, |t| {
		t.insert(sel(1), A);
		t.insert(sel(2), A);
		t.insert(sel(3), A);
	});
	publish(&registry, |t| {
		assert_eq!(t.remove(sel(2)), Some(A));
		assert_eq!(t.remove(sel(9)), None);
	});

	assert_eq!(registry.all_entries(), vec![entry(sel(1), A), entry(sel(3), A)]);
	assert_eq!(
		registry.resolve(sel(2)),
		Err(Unrouted {
			selector: sel(2),
			retired_from: Some(A)
		})
	);

	publish(&registry, |t| t.insert(sel(2), B));
	assert_eq!(registry.resolve(sel(2)), Ok(B));
	assert_eq!(registry.snapshot().retired_from(sel(2)), None);
	assert_eq!(registry.snapshot().verify(), Ok(()));
}

#[test]
fn test_pinned_snapshot_survives_publication() {
	let registry = FacetRegistry::new();
	publish(&registry, |t| t.insert(sel(1), A));

	let pinned = registry.snapshot();
	publish(&registry, |t| t.repoint(sel(1), B));

	assert_eq!(pinned.resolve(sel(1)), Some(A));
	assert_eq!(pinned.generation(), 1);
	assert_eq!(registry.resolve(sel(1)), Ok(B));
	assert!(!Arc::ptr_eq(&pinned, &registry.snapshot()));
}

#[test]
fn test_snapshot_is_stable_without_writes() {
	let registry = FacetRegistry::new();
	let first = registry.snapshot();
	let second = registry.snapshot();
	assert!(Arc::ptr_eq(&first, &second));
}
