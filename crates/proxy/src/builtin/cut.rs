use bytes::Bytes;
use serde::{Deserialize, Serialize};
use switchyard_catalog::{CatalogError, Interface};
use switchyard_types::{Call, Selector};

use super::{decode, encode};
use crate::{CallCx, CutBatch, Facet, FacetError, InitCall, UnsupportedSelector};

pub const CUT_SIGNATURE: &str = "diamondCut((uint8,uint64,bytes4[])[],uint64,bytes)";

/// Arguments of the cut entry point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CutRequest {
	pub batch: CutBatch,
	pub init: Option<InitCall>,
}

/// Exposes the cut processor through dispatch.
///
/// Runs as the dispatched caller, so the proxy's authorizer applies. Returns
/// the committed generation.
#[derive(Debug)]
pub struct CutFacet {
	interface: Interface,
	selector: Selector,
}

impl CutFacet {
	pub fn new() -> Result<Self, CatalogError> {
		let interface = Interface::builder("cut").function(CUT_SIGNATURE).build()?;
		let selector = interface.entries()[0].selector;
		Ok(Self { interface, selector })
	}

	pub fn selector(&self) -> Selector {
		self.selector
	}
}

impl Facet for CutFacet {
	fn name(&self) -> &str {
		"cut"
	}

	fn interface(&self) -> &Interface {
		&self.interface
	}

	fn call(&self, cx: &CallCx<'_>, call: &Call) -> Result<Bytes, FacetError> {
		if call.selector != self.selector {
			return Err(UnsupportedSelector::new(self, call.selector).into());
		}
		let request: CutRequest = decode(&call.args)?;
		let receipt = cx.proxy().cut(&call.caller, &request.batch, request.init.as_ref())?;
		Ok(encode(&receipt.generation)?)
	}
}
