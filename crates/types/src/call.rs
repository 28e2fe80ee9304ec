use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::{Principal, Selector};

/// Opaque call payload: the entry point plus its encoded arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calldata {
	pub selector: Selector,
	pub args: Bytes,
}

impl Calldata {
	pub fn new(selector: Selector, args: impl Into<Bytes>) -> Self {
		Self {
			selector,
			args: args.into(),
		}
	}

	/// Calldata for an entry point that takes no arguments.
	pub fn bare(selector: Selector) -> Self {
		Self::new(selector, Bytes::new())
	}
}

/// Complete call context forwarded to a facet.
///
/// Facets see the original caller and any transferred value, never the proxy
/// as an intermediary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
	pub selector: Selector,
	pub args: Bytes,
	pub caller: Principal,
	pub value: u128,
}

impl Call {
	pub fn new(caller: impl Into<Principal>, calldata: Calldata) -> Self {
		Self {
			selector: calldata.selector,
			args: calldata.args,
			caller: caller.into(),
			value: 0,
		}
	}

	pub fn with_value(mut self, value: u128) -> Self {
		self.value = value;
		self
	}

	pub fn calldata(&self) -> Calldata {
		Calldata::new(self.selector, self.args.clone())
	}
}
