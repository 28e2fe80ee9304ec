//! Facets and helpers shared by unit tests.

use std::sync::atomic::{AtomicU64, Ordering};

use bytes::Bytes;
use switchyard_catalog::{Interface, selector_of};
use switchyard_types::{Call, Principal, Selector};

use crate::{CallCx, Facet, FacetError, Proxy, ProxyConfig, UnsupportedSelector};

pub(crate) fn sel(signature: &str) -> Selector {
	selector_of(signature).unwrap()
}

pub(crate) fn owner() -> Principal {
	Principal::new("owner")
}

/// Proxy with no builtins (empty table, generation 0) owned by [`owner`].
pub(crate) fn bare_proxy() -> Proxy {
	Proxy::from_config(ProxyConfig::default().with_builtins([]).with_owner("owner")).unwrap()
}

/// Answers every declared selector with its own name.
pub(crate) struct StubFacet {
	name: String,
	interface: Interface,
}

impl StubFacet {
	pub(crate) fn new(name: &str, signatures: &[&str]) -> Self {
		Self {
			name: name.to_owned(),
			interface: Interface::builder(name)
				.functions(signatures.iter().copied())
				.build()
				.unwrap(),
		}
	}
}

impl Facet for StubFacet {
	fn name(&self) -> &str {
		&self.name
	}

	fn interface(&self) -> &Interface {
		&self.interface
	}

	fn call(&self, _cx: &CallCx<'_>, call: &Call) -> Result<Bytes, FacetError> {
		if !self.interface.contains(call.selector) {
			return Err(UnsupportedSelector::new(self, call.selector).into());
		}
		Ok(Bytes::from(self.name.clone()))
	}
}

#[derive(Debug, thiserror::Error)]
#[error("boom")]
pub(crate) struct Boom;

/// `init()` bumps a counter, `count()` reads it, `explode()` always fails.
pub(crate) struct CounterFacet {
	interface: Interface,
	count: AtomicU64,
}

impl CounterFacet {
	pub(crate) fn new() -> Self {
		Self {
			interface: Interface::builder("counter")
				.functions(["init()", "count()", "explode()"])
				.build()
				.unwrap(),
			count: AtomicU64::new(0),
		}
	}
}

impl Facet for CounterFacet {
	fn name(&self) -> &str {
		"counter"
	}

	fn interface(&self) -> &Interface {
		&self.interface
	}

	fn call(&self, _cx: &CallCx<'_>, call: &Call) -> Result<Bytes, FacetError> {
		match self.interface.signature_of(call.selector).map(|sig| sig.name()) {
			Some("init") => {
				self.count.fetch_add(1, Ordering::SeqCst);
				Ok(Bytes::new())
			}
			Some("count") => Ok(Bytes::copy_from_slice(&self.count.load(Ordering::SeqCst).to_le_bytes())),
			Some("explode") => Err(Boom.into()),
			_ => Err(UnsupportedSelector::new(self, call.selector).into()),
		}
	}
}

pub(crate) fn read_count(output: &[u8]) -> u64 {
	u64::from_le_bytes(output.try_into().unwrap())
}
