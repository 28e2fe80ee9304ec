//! The facet collaborator contract.

use bytes::Bytes;
use switchyard_catalog::{Interface, SelectorSet};
use switchyard_types::{Call, FacetId, Selector};

use crate::Proxy;

/// Error a facet returns from a call.
///
/// Boxed so facet-specific error types reach the caller unchanged; callers
/// branch on them with `downcast_ref`.
pub type FacetError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A pluggable implementation module exposing a fixed set of selectors.
///
/// A facet's code never changes after deployment. Shipping new behavior means
/// deploying a new facet and replacing routes to it.
pub trait Facet: Send + Sync + 'static {
	/// Human-readable name for logs.
	fn name(&self) -> &str;

	/// Declared entry points.
	fn interface(&self) -> &Interface;

	/// Handles one call. `cx` exposes the proxy the call arrived through.
	fn call(&self, cx: &CallCx<'_>, call: &Call) -> Result<Bytes, FacetError>;

	/// Selectors of [`Facet::interface`], for building cut operations.
	fn selectors(&self) -> SelectorSet {
		self.interface().selectors()
	}
}

/// Context handed to a facet for the duration of one call.
pub struct CallCx<'a> {
	proxy: &'a Proxy,
	facet: FacetId,
}

impl<'a> CallCx<'a> {
	pub(crate) fn new(proxy: &'a Proxy, facet: FacetId) -> Self {
		Self { proxy, facet }
	}

	/// The proxy this call runs in.
	pub fn proxy(&self) -> &'a Proxy {
		self.proxy
	}

	/// The id the called facet is deployed under.
	pub fn facet(&self) -> FacetId {
		self.facet
	}
}

/// Returned by facets asked to run a selector they do not declare.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("facet {facet} does not implement selector {selector}")]
pub struct UnsupportedSelector {
	pub facet: String,
	pub selector: Selector,
}

impl UnsupportedSelector {
	pub fn new(facet: &dyn Facet, selector: Selector) -> Self {
		Self {
			facet: facet.name().to_owned(),
			selector,
		}
	}
}
