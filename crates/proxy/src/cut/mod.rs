//! Cut processor: atomic add/replace/remove batches.
//!
//! # Purpose
//!
//! Validate a [`CutBatch`] against registry rules and publish it as one unit,
//! then run the optional [`InitCall`] against the new state.
//!
//! # Data flow
//!
//! 1. Authorization: the [`crate::Authorizer`] vets the caller before anything else.
//! 2. Validation: [`validate::validate`] replays the batch on a working copy.
//! 3. Commit: the working copy is published through [`FacetRegistry::apply`].
//! 4. Initializer: the target facet is called with the cut caller's identity.
//! 5. Notification: observers see one [`CutEvent`] per selector once the
//!    outermost cut on the lock finishes, in generation order.
//!
//! # Failure modes & recovery
//!
//! * Validation failures publish nothing; the snapshot pointer is unchanged.
//! * Initializer failures happen after commit. [`InitFailurePolicy`] decides
//!   whether the committed table stays or the pre-cut routes are republished.
//!   Either way the caller receives [`CutError::Initializer`].
//! * A rollback also discards cuts the initializer made itself; their events
//!   are dropped unseen.
//!
//! # Concurrency & ordering
//!
//! * One cut at a time: a reentrant mutex covers validate, commit and the
//!   initializer, so the initializer sees exactly the table it was paired with
//!   and may itself cut on the same thread.
//! * A cut made from inside an initializer is provisional until the outermost
//!   cut finishes: its events are buffered and a rollback further out undoes it.
//! * Generations handed out never decrease, rollbacks included.
//! * Dispatch never takes this lock.

use std::cell::RefCell;
use std::sync::Arc;

use parking_lot::ReentrantMutex;
use serde::{Deserialize, Serialize};
use switchyard_types::{Call, Principal};

mod error;
mod events;
mod types;
pub(crate) mod validate;

pub use error::{CutError, Rejection};
pub use events::{CutEvent, CutObserver, EventLog};
pub use types::{CutAction, CutBatch, CutReceipt, FacetCut, InitCall};

use self::events::Observers;
use self::validate::{ValidatedCut, validate};
use crate::{Authorizer, CallCx, FacetArena, FacetRegistry, Proxy};

/// What happens to a committed routing change when its initializer fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InitFailurePolicy {
	/// The routing change stays live.
	#[default]
	KeepCut,
	/// The pre-cut routes are republished under a fresh generation.
	///
	/// The change is not hidden while the initializer runs: concurrent
	/// dispatchers may already be served by the post-cut table before the
	/// rollback lands.
	RollBack,
}

/// Lock-protected bookkeeping shared by nested cuts on one thread.
#[derive(Debug, Default)]
struct CutState {
	/// Cuts in progress on the thread holding the lock.
	depth: usize,
	/// Last generation handed out.
	generation: u64,
	/// Events of kept cuts, delivered when the outermost cut finishes.
	pending: Vec<CutEvent>,
}

/// Leaves one nesting level; clears stale events if an initializer unwound.
struct Nesting<'a>(&'a RefCell<CutState>);

impl<'a> Nesting<'a> {
	fn enter(state: &'a RefCell<CutState>) -> Self {
		state.borrow_mut().depth += 1;
		Self(state)
	}

	/// Takes the buffered events if this is the outermost cut.
	fn take_if_outermost(&self) -> Vec<CutEvent> {
		let mut state = self.0.borrow_mut();
		if state.depth == 1 {
			std::mem::take(&mut state.pending)
		} else {
			Vec::new()
		}
	}
}

impl Drop for Nesting<'_> {
	fn drop(&mut self) {
		let mut state = self.0.borrow_mut();
		state.depth -= 1;
		if state.depth == 0 {
			state.pending.clear();
		}
	}
}

pub struct CutProcessor {
	label: Arc<str>,
	registry: Arc<FacetRegistry>,
	arena: Arc<FacetArena>,
	authorizer: Arc<dyn Authorizer>,
	observers: Observers,
	policy: InitFailurePolicy,
	lock: ReentrantMutex<RefCell<CutState>>,
}

impl CutProcessor {
	pub fn new(
		label: impl Into<Arc<str>>,
		registry: Arc<FacetRegistry>,
		arena: Arc<FacetArena>,
		authorizer: Arc<dyn Authorizer>,
		policy: InitFailurePolicy,
	) -> Self {
		let state = CutState {
			generation: registry.generation(),
			..CutState::default()
		};
		Self {
			label: label.into(),
			registry,
			arena,
			authorizer,
			observers: Observers::default(),
			policy,
			lock: ReentrantMutex::new(RefCell::new(state)),
		}
	}

	pub fn policy(&self) -> InitFailurePolicy {
		self.policy
	}

	pub fn subscribe(&self, observer: Arc<dyn CutObserver>) {
		self.observers.subscribe(observer);
	}

	/// Authorizes `caller`, then validates and commits `batch` as one unit.
	///
	/// `proxy` is the proxy the initializer runs in.
	pub fn cut(
		&self,
		proxy: &Proxy,
		caller: &Principal,
		batch: &CutBatch,
		init: Option<&InitCall>,
	) -> Result<CutReceipt, CutError> {
		if let Err(denied) = self.authorizer.authorize_cut(caller) {
			tracing::debug!(label = %self.label, caller = %caller, "cut denied");
			return Err(denied.into());
		}
		self.commit(proxy, caller, batch, init)
	}

	/// Validates and commits without consulting the authorizer.
	pub(crate) fn commit(
		&self,
		proxy: &Proxy,
		caller: &Principal,
		batch: &CutBatch,
		init: Option<&InitCall>,
	) -> Result<CutReceipt, CutError> {
		let guard = self.lock.lock();
		let nesting = Nesting::enter(&guard);
		let result = self.commit_locked(&guard, proxy, caller, batch, init);

		let mut events = nesting.take_if_outermost();
		drop(nesting);
		if !events.is_empty() {
			events.sort_by_key(|event| event.generation);
			self.observers.notify(&self.label, &events);
		}
		result
	}

	/// Runs under the lock. Kept events go to `state.pending`; no `RefCell`
	/// borrow is held across the initializer, which may re-enter.
	fn commit_locked(
		&self,
		state: &RefCell<CutState>,
		proxy: &Proxy,
		caller: &Principal,
		batch: &CutBatch,
		init: Option<&InitCall>,
	) -> Result<CutReceipt, CutError> {
		let previous = self.registry.snapshot();
		let generation = state.borrow().generation + 1;

		let ValidatedCut { table, events } =
			validate(&previous, batch, &self.arena, generation).inspect_err(|error| {
				tracing::debug!(label = %self.label, caller = %caller, %error, "cut rejected");
			})?;
		let initializer = match init {
			Some(call) => {
				let facet = self
					.arena
					.get(call.target)
					.ok_or(CutError::InitializerNotDeployed(call.target))?;
				Some((call, facet))
			}
			None => None,
		};

		state.borrow_mut().generation = generation;
		self.registry.apply(table);
		tracing::info!(
			label = %self.label,
			caller = %caller,
			generation,
			operations = batch.len(),
			selectors = events.len(),
			"cut committed"
		);

		let mark = state.borrow().pending.len();
		let mut init_output = None;
		if let Some((call, facet)) = initializer {
			let request = Call::new(caller.clone(), call.calldata.clone());
			match facet.call(&CallCx::new(proxy, call.target), &request) {
				Ok(output) => init_output = Some(output),
				Err(source) => {
					let rolled_back = self.policy == InitFailurePolicy::RollBack;
					if rolled_back {
						let restored = self.roll_back(state, &previous, mark);
						tracing::warn!(
							label = %self.label,
							target = %call.target,
							generation,
							restored,
							error = %source,
							"initializer failed; routing change rolled back"
						);
					} else {
						tracing::warn!(
							label = %self.label,
							target = %call.target,
							generation,
							error = %source,
							"initializer failed; routing change kept"
						);
						state.borrow_mut().pending.extend(events);
					}
					return Err(CutError::Initializer {
						target: call.target,
						generation,
						rolled_back,
						source,
					});
				}
			}
		}

		state.borrow_mut().pending.extend_from_slice(&events);
		Ok(CutReceipt {
			generation,
			events,
			init_output,
		})
	}

	/// Republishes the routes of `previous` under the next generation and
	/// drops events buffered since `mark`. Returns the new generation.
	fn roll_back(&self, state: &RefCell<CutState>, previous: &crate::RoutingTable, mark: usize) -> u64 {
		let mut state = state.borrow_mut();
		state.pending.truncate(mark);
		state.generation += 1;
		let mut restored = previous.clone();
		restored.set_generation(state.generation);
		self.registry.apply(restored);
		state.generation
	}
}

impl std::fmt::Debug for CutProcessor {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("CutProcessor")
			.field("label", &self.label)
			.field("policy", &self.policy)
			.finish_non_exhaustive()
	}
}
