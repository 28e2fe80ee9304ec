use bytes::Bytes;
use switchyard_catalog::{CatalogError, Interface};
use switchyard_types::{Call, FacetId, Selector};

use super::{decode, encode};
use crate::{CallCx, Facet, FacetError, UnsupportedSelector};

pub const LOUPE_SIGNATURES: [&str; 4] = [
	"facets()",
	"facetFunctionSelectors(uint64)",
	"facetAddresses()",
	"facetAddress(bytes4)",
];

/// Introspection entry points over the live routing table.
#[derive(Debug)]
pub struct LoupeFacet {
	interface: Interface,
}

impl LoupeFacet {
	pub fn new() -> Result<Self, CatalogError> {
		Ok(Self {
			interface: Interface::builder("loupe").functions(LOUPE_SIGNATURES).build()?,
		})
	}
}

impl Facet for LoupeFacet {
	fn name(&self) -> &str {
		"loupe"
	}

	fn interface(&self) -> &Interface {
		&self.interface
	}

	fn call(&self, cx: &CallCx<'_>, call: &Call) -> Result<Bytes, FacetError> {
		let loupe = cx.proxy().loupe();
		let name = self
			.interface
			.signature_of(call.selector)
			.map(|signature| signature.name());
		let output = match name {
			Some("facets") => encode(&loupe.facets())?,
			Some("facetFunctionSelectors") => {
				let facet: FacetId = decode(&call.args)?;
				encode(&loupe.facet_selectors(facet))?
			}
			Some("facetAddresses") => encode(&loupe.facet_ids())?,
			// Unrouted selectors answer the null facet.
			Some("facetAddress") => {
				let selector: Selector = decode(&call.args)?;
				encode(&loupe.facet_of(selector).unwrap_or(FacetId::NULL))?
			}
			_ => return Err(UnsupportedSelector::new(self, call.selector).into()),
		};
		Ok(output)
	}
}
