//! Value types shared by every switchyard crate.
//!
//! A proxy routes [`Call`]s by their [`Selector`] to a deployed facet named by a
//! [`FacetId`]. None of these types know about routing; they are plain data.

mod call;
mod facet_id;
mod principal;
mod selector;

pub use call::{Call, Calldata};
pub use facet_id::FacetId;
pub use principal::Principal;
pub use selector::{ParseSelectorError, Selector};
