//! Call forwarding.
//!
//! Each call resolves against the latest published table; nothing is cached
//! between calls, so a cut is honored by the very next dispatch.

use std::sync::Arc;

use bytes::Bytes;
use switchyard_types::{Call, FacetId, Selector};

use crate::{CallCx, FacetArena, FacetError, FacetRegistry, Proxy};

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
	/// No facet implements the selector.
	#[error("no facet implements selector {selector}{note}", note = retired_note(.retired_from))]
	Unhandled {
		selector: Selector,
		/// Facet that served the selector before a cut removed it.
		retired_from: Option<FacetId>,
	},
	/// The facet handled the call and failed; `source` is its own error.
	#[error("{facet} failed on selector {selector}")]
	Reverted {
		facet: FacetId,
		selector: Selector,
		#[source]
		source: FacetError,
	},
	/// The table routes to a facet the arena does not hold.
	#[error("selector {selector} routes to {facet}, which is not deployed")]
	FacetMissing { selector: Selector, facet: FacetId },
}

impl DispatchError {
	pub fn is_unhandled(&self) -> bool {
		matches!(self, Self::Unhandled { .. })
	}

	/// The facet's own error, if the facet failed.
	pub fn facet_error(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
		match self {
			Self::Reverted { source, .. } => Some(source.as_ref()),
			_ => None,
		}
	}

	/// Downcasts the facet's own error.
	pub fn downcast_ref<E: std::error::Error + 'static>(&self) -> Option<&E> {
		self.facet_error()?.downcast_ref::<E>()
	}

	/// Unwraps the facet's own error, or gives the dispatch error back.
	pub fn into_facet_error(self) -> Result<FacetError, Self> {
		match self {
			Self::Reverted { source, .. } => Ok(source),
			other => Err(other),
		}
	}
}

fn retired_note(retired_from: &Option<FacetId>) -> String {
	retired_from
		.map(|facet| format!(" (removed from {facet})"))
		.unwrap_or_default()
}

pub struct Dispatcher {
	label: Arc<str>,
	registry: Arc<FacetRegistry>,
	arena: Arc<FacetArena>,
}

impl Dispatcher {
	pub fn new(label: impl Into<Arc<str>>, registry: Arc<FacetRegistry>, arena: Arc<FacetArena>) -> Self {
		Self {
			label: label.into(),
			registry,
			arena,
		}
	}

	/// Forwards `call` to the facet routed for its selector and returns its
	/// output verbatim.
	pub fn dispatch(&self, proxy: &Proxy, call: &Call) -> Result<Bytes, DispatchError> {
		let facet_id = self.registry.resolve(call.selector).map_err(|unrouted| {
			tracing::trace!(
				label = %self.label,
				selector = %call.selector,
				caller = %call.caller,
				"unhandled selector"
			);
			DispatchError::Unhandled {
				selector: unrouted.selector,
				retired_from: unrouted.retired_from,
			}
		})?;
		let facet = self.arena.get(facet_id).ok_or(DispatchError::FacetMissing {
			selector: call.selector,
			facet: facet_id,
		})?;

		tracing::trace!(
			label = %self.label,
			selector = %call.selector,
			facet = %facet_id,
			caller = %call.caller,
			value = call.value,
			"dispatch"
		);
		facet
			.call(&CallCx::new(proxy, facet_id), call)
			.map_err(|source| DispatchError::Reverted {
				facet: facet_id,
				selector: call.selector,
				source,
			})
	}
}

impl std::fmt::Debug for Dispatcher {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Dispatcher")
			.field("label", &self.label)
			.finish_non_exhaustive()
	}
}
