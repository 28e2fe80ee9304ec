//! Selector catalog.
//!
//! # Purpose
//!
//! Turns a facet's declared callable interface into the ordered set of
//! [`Selector`]s it exposes. Callers use it while preparing a cut; the proxy
//! registry never consults it and trusts the selector lists it is handed.
//!
//! # Mental model
//!
//! * A [`Signature`] is a canonical `name(type,type)` string. Whitespace,
//!   parameter names, data-location keywords and a leading `function` keyword
//!   are dropped during parsing.
//! * A selector is the first four bytes of the SHA-256 digest of the canonical
//!   signature text.
//! * An [`Interface`] is a named, ordered list of signatures in which no two
//!   entries share a selector.
//! * A [`SelectorSet`] is the ordered selector list a cut operation carries,
//!   with helpers to drop or keep specific entry points.
//!
//! Everything here is pure and deterministic.

mod interface;
mod selector_set;
mod signature;

pub use interface::{CatalogError, EntryPoint, Interface, InterfaceBuilder};
pub use selector_set::SelectorSet;
pub use signature::{Signature, SignatureError, selector_of};
pub use switchyard_types::Selector;
