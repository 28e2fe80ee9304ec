//! Cumulative batch validation.
//!
//! # Role
//!
//! Replays a batch against a private copy of the current table. Each operation
//! sees the effects of the ones before it, so removing and re-adding a selector
//! (or the reverse) within one batch is legal. The first failure aborts the
//! whole batch and the copy is dropped.

use switchyard_types::Selector;

use super::{CutAction, CutBatch, CutError, CutEvent, Rejection};
use crate::FacetArena;
use crate::registry::RoutingTable;

/// Table and events produced by a batch that passed every rule.
pub(crate) struct ValidatedCut {
	pub(crate) table: RoutingTable,
	pub(crate) events: Vec<CutEvent>,
}

/// Replays `batch` on a copy of `base`; the result is stamped `generation`.
pub(crate) fn validate(
	base: &RoutingTable,
	batch: &CutBatch,
	arena: &FacetArena,
	generation: u64,
) -> Result<ValidatedCut, CutError> {
	if batch.is_empty() {
		return Err(CutError::EmptyBatch);
	}

	let mut work = base.clone();
	let mut events = Vec::with_capacity(batch.selector_count());

	for (index, op) in batch.ops().iter().enumerate() {
		let reject = |selector: Option<Selector>, reason: Rejection| CutError::Rejected {
			index,
			action: op.action,
			selector,
			reason,
		};

		if op.selectors.is_empty() {
			return Err(reject(None, Rejection::NoSelectors));
		}
		match op.action {
			CutAction::Add | CutAction::Replace => {
				if op.facet.is_null() {
					return Err(reject(None, Rejection::ZeroFacet(op.action)));
				}
				if !arena.contains(op.facet) {
					return Err(reject(None, Rejection::FacetNotDeployed(op.facet)));
				}
			}
			CutAction::Remove => {
				if !op.facet.is_null() {
					return Err(reject(None, Rejection::NonZeroRemoveTarget(op.facet)));
				}
			}
		}

		for &selector in &op.selectors {
			let facet = match (op.action, work.resolve(selector)) {
				(CutAction::Add, None) => {
					work.insert(selector, op.facet);
					op.facet
				}
				(CutAction::Add, Some(existing)) => {
					return Err(reject(Some(selector), Rejection::AlreadyAssigned(existing)));
				}
				(CutAction::Replace, Some(existing)) if existing == op.facet => {
					return Err(reject(Some(selector), Rejection::SameFacet(existing)));
				}
				(CutAction::Replace, Some(_)) => {
					work.repoint(selector, op.facet);
					op.facet
				}
				(CutAction::Remove, Some(existing)) => {
					work.remove(selector);
					existing
				}
				(CutAction::Replace | CutAction::Remove, None) => {
					return Err(reject(Some(selector), Rejection::NotAssigned));
				}
			};
			events.push(CutEvent {
				generation,
				index,
				action: op.action,
				facet,
				selector,
			});
		}
	}

	work.set_generation(generation);
	Ok(ValidatedCut { table: work, events })
}
