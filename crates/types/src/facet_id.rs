use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque reference to a deployed facet.
///
/// [`FacetId::NULL`] is the sentinel used by remove operations; it never names a
/// deployed facet. Deployment hands out fresh non-null ids, so a new version of
/// a facet is always a different reference.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FacetId(u64);

impl FacetId {
	pub const NULL: Self = Self(0);

	pub const fn new(raw: u64) -> Self {
		Self(raw)
	}

	pub const fn get(self) -> u64 {
		self.0
	}

	pub const fn is_null(self) -> bool {
		self.0 == 0
	}
}

impl fmt::Display for FacetId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.is_null() {
			f.write_str("facet:null")
		} else {
			write!(f, "facet:{}", self.0)
		}
	}
}

impl fmt::Debug for FacetId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "FacetId({})", self.0)
	}
}
