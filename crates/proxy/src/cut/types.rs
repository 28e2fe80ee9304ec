use std::fmt;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use switchyard_types::{Calldata, FacetId, Selector};

use super::CutEvent;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CutAction {
	Add,
	Replace,
	Remove,
}

impl fmt::Display for CutAction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Add => "add",
			Self::Replace => "replace",
			Self::Remove => "remove",
		})
	}
}

/// One operation of a cut batch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetCut {
	pub action: CutAction,
	/// Target facet; [`FacetId::NULL`] for removals.
	pub facet: FacetId,
	pub selectors: Vec<Selector>,
}

impl FacetCut {
	pub fn add(facet: FacetId, selectors: impl IntoIterator<Item = Selector>) -> Self {
		Self::new(CutAction::Add, facet, selectors)
	}

	pub fn replace(facet: FacetId, selectors: impl IntoIterator<Item = Selector>) -> Self {
		Self::new(CutAction::Replace, facet, selectors)
	}

	pub fn remove(selectors: impl IntoIterator<Item = Selector>) -> Self {
		Self::new(CutAction::Remove, FacetId::NULL, selectors)
	}

	pub fn new(action: CutAction, facet: FacetId, selectors: impl IntoIterator<Item = Selector>) -> Self {
		Self {
			action,
			facet,
			selectors: selectors.into_iter().collect(),
		}
	}
}

/// Ordered operations applied as one atomic unit.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CutBatch {
	ops: Vec<FacetCut>,
}

impl CutBatch {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with(mut self, op: FacetCut) -> Self {
		self.ops.push(op);
		self
	}

	pub fn push(&mut self, op: FacetCut) {
		self.ops.push(op);
	}

	pub fn ops(&self) -> &[FacetCut] {
		&self.ops
	}

	pub fn len(&self) -> usize {
		self.ops.len()
	}

	pub fn is_empty(&self) -> bool {
		self.ops.is_empty()
	}

	/// Total selectors across all operations.
	pub fn selector_count(&self) -> usize {
		self.ops.iter().map(|op| op.selectors.len()).sum()
	}
}

impl From<Vec<FacetCut>> for CutBatch {
	fn from(ops: Vec<FacetCut>) -> Self {
		Self { ops }
	}
}

impl FromIterator<FacetCut> for CutBatch {
	fn from_iter<I: IntoIterator<Item = FacetCut>>(iter: I) -> Self {
		Self {
			ops: iter.into_iter().collect(),
		}
	}
}

/// One-shot call run against the post-cut state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitCall {
	/// Deployed facet to call; it does not have to be routed.
	pub target: FacetId,
	pub calldata: Calldata,
}

impl InitCall {
	pub fn new(target: FacetId, calldata: Calldata) -> Self {
		Self { target, calldata }
	}
}

/// What a successful cut committed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CutReceipt {
	pub generation: u64,
	pub events: Vec<CutEvent>,
	/// Output of the initializer, when one ran.
	pub init_output: Option<Bytes>,
}
