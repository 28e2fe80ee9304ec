//! Audit events emitted per routed selector.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use switchyard_types::{FacetId, Selector};

use super::CutAction;

/// One selector touched by a committed cut.
///
/// For removals `facet` is the facet the selector was taken from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CutEvent {
	pub generation: u64,
	/// Index of the operation within its batch.
	pub index: usize,
	pub action: CutAction,
	pub facet: FacetId,
	pub selector: Selector,
}

/// Receives events once a routing change is final.
pub trait CutObserver: Send + Sync {
	fn on_cut(&self, event: &CutEvent);
}

impl<F> CutObserver for F
where
	F: Fn(&CutEvent) + Send + Sync,
{
	fn on_cut(&self, event: &CutEvent) {
		self(event)
	}
}

/// Observer that keeps every event it sees.
#[derive(Debug, Default)]
pub struct EventLog {
	events: Mutex<Vec<CutEvent>>,
}

impl EventLog {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn events(&self) -> Vec<CutEvent> {
		self.events.lock().clone()
	}

	pub fn take(&self) -> Vec<CutEvent> {
		std::mem::take(&mut *self.events.lock())
	}
}

impl CutObserver for EventLog {
	fn on_cut(&self, event: &CutEvent) {
		self.events.lock().push(*event);
	}
}

#[derive(Default)]
pub(crate) struct Observers {
	list: RwLock<Vec<Arc<dyn CutObserver>>>,
}

impl Observers {
	pub(crate) fn subscribe(&self, observer: Arc<dyn CutObserver>) {
		self.list.write().push(observer);
	}

	pub(crate) fn notify(&self, label: &str, events: &[CutEvent]) {
		let list = self.list.read().clone();
		for event in events {
			tracing::debug!(
				label,
				generation = event.generation,
				index = event.index,
				action = %event.action,
				facet = %event.facet,
				selector = %event.selector,
				"cut event"
			);
			for observer in &list {
				observer.on_cut(event);
			}
		}
	}
}
