use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of whoever issued a call or a cut.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Principal(String);

impl Principal {
	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for Principal {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl fmt::Debug for Principal {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Principal({:?})", self.0)
	}
}

impl From<&str> for Principal {
	fn from(id: &str) -> Self {
		Self::new(id)
	}
}

impl From<String> for Principal {
	fn from(id: String) -> Self {
		Self(id)
	}
}
