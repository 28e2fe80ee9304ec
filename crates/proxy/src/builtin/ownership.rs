use std::sync::Arc;

use bytes::Bytes;
use switchyard_catalog::{CatalogError, Interface};
use switchyard_types::{Call, Principal};

use super::{decode, encode};
use crate::{CallCx, Facet, FacetError, Ownership, UnsupportedSelector};

pub const OWNERSHIP_SIGNATURES: [&str; 2] = ["owner()", "transferOwnership(string)"];

/// Owner query and transfer over the proxy's [`Ownership`].
///
/// `transferOwnership` takes an `Option<Principal>`; `None` renounces.
#[derive(Debug)]
pub struct OwnershipFacet {
	interface: Interface,
	ownership: Arc<Ownership>,
}

impl OwnershipFacet {
	pub fn new(ownership: Arc<Ownership>) -> Result<Self, CatalogError> {
		Ok(Self {
			interface: Interface::builder("ownership")
				.functions(OWNERSHIP_SIGNATURES)
				.build()?,
			ownership,
		})
	}
}

impl Facet for OwnershipFacet {
	fn name(&self) -> &str {
		"ownership"
	}

	fn interface(&self) -> &Interface {
		&self.interface
	}

	fn call(&self, _cx: &CallCx<'_>, call: &Call) -> Result<Bytes, FacetError> {
		let name = self
			.interface
			.signature_of(call.selector)
			.map(|signature| signature.name());
		match name {
			Some("owner") => Ok(encode(&self.ownership.owner())?),
			Some("transferOwnership") => {
				let next: Option<Principal> = decode(&call.args)?;
				self.ownership.transfer_ownership(&call.caller, next)?;
				Ok(Bytes::new())
			}
			_ => Err(UnsupportedSelector::new(self, call.selector).into()),
		}
	}
}
