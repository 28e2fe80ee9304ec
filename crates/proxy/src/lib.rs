#![cfg_attr(doc, allow(rustdoc::private_intra_doc_links))]
//! Stable proxy that routes calls by selector to independently deployed facets.
//!
//! # Purpose
//!
//! A [`Proxy`] is a single entry point whose routing table can be rewritten at
//! runtime by atomic cuts: a batch of add/replace/remove operations either
//! becomes visible as a whole or not at all.
//!
//! # Mental model
//!
//! * Facets are deployed into a [`FacetArena`] and addressed by [`FacetId`].
//! * The [`FacetRegistry`] holds an immutable [`RoutingTable`] snapshot behind an
//!   `ArcSwap`. Readers pin a snapshot; writers publish a replacement.
//! * The [`CutProcessor`] validates a [`CutBatch`] cumulatively against a working
//!   copy, publishes it in one swap, then runs the optional [`InitCall`].
//! * The [`Dispatcher`] resolves every call against the latest snapshot.
//! * The [`Loupe`] answers read-only questions about the current table.
//!
//! # Key types
//!
//! | Type | Role |
//! |------|------|
//! | [`Proxy`] | Owns registry, arena and processors; the public facade. |
//! | [`FacetRegistry`] | Atomic selector → facet table. |
//! | [`CutProcessor`] | Serialized validate + commit + initializer. |
//! | [`Dispatcher`] | Forwards calls to the resolved facet. |
//! | [`Loupe`] | Introspection over the live table. |
//! | [`Authorizer`] | Decides who may cut; [`Ownership`] is the stock policy. |
//!
//! # Concurrency
//!
//! * Reads: wait-free snapshot loads; never block on cuts.
//! * Cuts: serialized by a reentrant mutex, so an initializer may cut again on
//!   the same thread.
//!
//! # Invariants
//!
//! - A selector resolves to at most one facet.
//!   - Enforced in: [`cut::validate`] (add/replace/remove rules).
//!   - Tested by: `cut::tests::prop_random_batches_keep_table_consistent`.
//! - A rejected batch leaves the published snapshot untouched.
//!   - Enforced in: [`CutProcessor::cut`] (validation runs on a working copy).
//!   - Tested by: `cut::tests::test_rejected_batch_keeps_snapshot`.
//! - Readers never observe part of a batch.
//!   - Enforced in: [`FacetRegistry::apply`] (single pointer swap).
//!   - Tested by: `tests/concurrency.rs`.

pub mod arena;
pub mod auth;
pub mod builtin;
pub mod config;
pub mod cut;
pub mod dispatch;
pub mod facet;
pub mod loupe;
mod proxy;
pub mod registry;

pub use arena::FacetArena;
pub use auth::{AllowAll, Authorizer, Denied, Ownership, OwnershipError};
pub use config::{Builtin, ConfigError, ProxyConfig};
pub use cut::{
	CutAction, CutBatch, CutError, CutEvent, CutObserver, CutProcessor, CutReceipt, EventLog, FacetCut,
	InitCall, InitFailurePolicy, Rejection,
};
pub use dispatch::{DispatchError, Dispatcher};
pub use facet::{CallCx, Facet, FacetError, UnsupportedSelector};
pub use loupe::{FacetSummary, Loupe};
pub use proxy::{BootstrapError, Proxy};
pub use registry::{FacetRegistry, RoutingEntry, RoutingTable, TableViolation, Unrouted};
pub use switchyard_catalog::{Interface, SelectorSet, Signature};
pub use switchyard_types::{Call, Calldata, FacetId, Principal, Selector};

#[cfg(test)]
pub(crate) mod test_fixtures;
