//! Facets shipped with the proxy.
//!
//! Builtins are ordinary [`crate::Facet`]s reached through dispatch. Their
//! arguments and return values are `postcard` encoded; use [`encode`] and
//! [`decode`] to talk to them.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

mod cut;
mod loupe;
mod ownership;

pub use cut::{CUT_SIGNATURE, CutFacet, CutRequest};
pub use loupe::{LOUPE_SIGNATURES, LoupeFacet};
pub use ownership::{OWNERSHIP_SIGNATURES, OwnershipFacet};

/// A builtin payload could not be encoded or decoded.
#[derive(Debug, thiserror::Error)]
#[error("malformed builtin payload: {0}")]
pub struct CodecError(#[from] postcard::Error);

pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Bytes, CodecError> {
	Ok(Bytes::from(postcard::to_stdvec(value)?))
}

pub fn decode<'de, T: Deserialize<'de>>(bytes: &'de [u8]) -> Result<T, CodecError> {
	Ok(postcard::from_bytes(bytes)?)
}
