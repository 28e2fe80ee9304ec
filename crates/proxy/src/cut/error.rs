use switchyard_types::{FacetId, Selector};

use super::CutAction;
use crate::{Denied, FacetError};

/// Why a single operation failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
	#[error("operation carries no selectors")]
	NoSelectors,
	#[error("the null facet cannot be the target of {0}")]
	ZeroFacet(CutAction),
	#[error("{0} is not deployed")]
	FacetNotDeployed(FacetId),
	#[error("selector is already routed to {0}")]
	AlreadyAssigned(FacetId),
	#[error("selector is not routed")]
	NotAssigned,
	#[error("selector is already routed to the replacement {0}")]
	SameFacet(FacetId),
	#[error("remove must target the null facet, got {0}")]
	NonZeroRemoveTarget(FacetId),
}

/// Cut failure.
///
/// Every variant except [`CutError::Initializer`] is raised before anything is
/// published.
#[derive(Debug, thiserror::Error)]
pub enum CutError {
	#[error(transparent)]
	Unauthorized(#[from] Denied),
	#[error("cut batch contains no operations")]
	EmptyBatch,
	#[error("operation {index} ({action}) rejected{at}: {reason}", at = at_selector(.selector))]
	Rejected {
		index: usize,
		action: CutAction,
		/// Offending selector, when the failure is selector specific.
		selector: Option<Selector>,
		reason: Rejection,
	},
	#[error("initializer target {0} is not deployed")]
	InitializerNotDeployed(FacetId),
	/// Routing change committed as `generation`; the initializer then failed.
	#[error("initializer on {target} failed after generation {generation} committed{note}", note = rollback_note(.rolled_back))]
	Initializer {
		target: FacetId,
		generation: u64,
		/// Whether the routing change was undone per the host's policy.
		rolled_back: bool,
		#[source]
		source: FacetError,
	},
}

impl CutError {
	/// True for failures that left the registry untouched before commit.
	pub fn is_validation(&self) -> bool {
		!matches!(self, Self::Initializer { .. })
	}

	/// True if the routing change is live despite the error.
	pub fn committed(&self) -> bool {
		matches!(self, Self::Initializer { rolled_back: false, .. })
	}

	pub fn rejection(&self) -> Option<Rejection> {
		match self {
			Self::Rejected { reason, .. } => Some(*reason),
			_ => None,
		}
	}
}

fn at_selector(selector: &Option<Selector>) -> String {
	selector.map(|sel| format!(" at selector {sel}")).unwrap_or_default()
}

fn rollback_note(rolled_back: &bool) -> &'static str {
	if *rolled_back { " and was rolled back" } else { "" }
}
