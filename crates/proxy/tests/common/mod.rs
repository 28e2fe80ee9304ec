//! Facets shared by the integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use bytes::Bytes;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use switchyard_proxy::builtin::{decode, encode};
use switchyard_proxy::{Call, CallCx, Facet, FacetError, Interface, Principal, UnsupportedSelector};

pub fn init_tracing() {
	let _ = tracing_subscriber::fmt()
		.with_test_writer()
		.with_max_level(tracing::Level::TRACE)
		.try_init();
}

/// Token storage shared by every token facet version, so upgrades keep balances.
#[derive(Debug, Default)]
pub struct TokenStore {
	pub name: Mutex<String>,
	pub symbol: Mutex<String>,
	pub total_supply: AtomicU64,
	pub balances: Mutex<Vec<(Principal, u64)>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InitArgs {
	pub supply: u64,
	pub name: String,
	pub symbol: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MintArgs {
	pub to: Principal,
	pub amount: u64,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
	#[error("supply overflow")]
	Overflow,
	#[error("token already initialized")]
	AlreadyInitialized,
}

pub const TOKEN_SIGNATURES: [&str; 4] = [
	"initialize(uint64,string,string)",
	"totalSupply()",
	"mint(string,uint64)",
	"name()",
];

pub struct TokenFacet {
	interface: Interface,
	store: Arc<TokenStore>,
	/// Added to every minted amount; distinguishes facet versions.
	bonus: u64,
}

impl TokenFacet {
	pub fn new(store: Arc<TokenStore>, bonus: u64) -> Self {
		Self {
			interface: Interface::builder("token").functions(TOKEN_SIGNATURES).build().unwrap(),
			store,
			bonus,
		}
	}
}

impl Facet for TokenFacet {
	fn name(&self) -> &str {
		"token"
	}

	fn interface(&self) -> &Interface {
		&self.interface
	}

	fn call(&self, _cx: &CallCx<'_>, call: &Call) -> Result<Bytes, FacetError> {
		let name = self.interface.signature_of(call.selector).map(|sig| sig.name());
		match name {
			Some("initialize") => {
				let args: InitArgs = decode(&call.args)?;
				let mut name = self.store.name.lock();
				if !name.is_empty() {
					return Err(TokenError::AlreadyInitialized.into());
				}
				*name = args.name;
				*self.store.symbol.lock() = args.symbol;
				self.store.total_supply.store(args.supply, Ordering::SeqCst);
				Ok(Bytes::new())
			}
			Some("totalSupply") => Ok(encode(&self.store.total_supply.load(Ordering::SeqCst))?),
			Some("mint") => {
				let args: MintArgs = decode(&call.args)?;
				let amount = args.amount.checked_add(self.bonus).ok_or(TokenError::Overflow)?;
				let supply = self.store.total_supply.load(Ordering::SeqCst);
				let next = supply.checked_add(amount).ok_or(TokenError::Overflow)?;
				self.store.total_supply.store(next, Ordering::SeqCst);
				self.store.balances.lock().push((args.to, amount));
				Ok(Bytes::new())
			}
			Some("name") => Ok(encode(&*self.store.name.lock())?),
			_ => Err(UnsupportedSelector::new(self, call.selector).into()),
		}
	}
}

/// One-shot initializer counting how often it ran.
pub struct InitFacet {
	interface: Interface,
	pub runs: AtomicU64,
}

impl InitFacet {
	pub fn new() -> Self {
		Self {
			interface: Interface::builder("init").function("init()").build().unwrap(),
			runs: AtomicU64::new(0),
		}
	}
}

impl Facet for InitFacet {
	fn name(&self) -> &str {
		"init"
	}

	fn interface(&self) -> &Interface {
		&self.interface
	}

	fn call(&self, _cx: &CallCx<'_>, _call: &Call) -> Result<Bytes, FacetError> {
		let runs = self.runs.fetch_add(1, Ordering::SeqCst) + 1;
		Ok(encode(&runs)?)
	}
}

/// Answers every declared selector with its own tag.
pub struct Tagged {
	interface: Interface,
	tag: &'static str,
}

impl Tagged {
	pub fn new(tag: &'static str, signatures: &[&str]) -> Self {
		Self {
			interface: Interface::builder(tag)
				.functions(signatures.iter().copied())
				.build()
				.unwrap(),
			tag,
		}
	}
}

impl Facet for Tagged {
	fn name(&self) -> &str {
		self.tag
	}

	fn interface(&self) -> &Interface {
		&self.interface
	}

	fn call(&self, _cx: &CallCx<'_>, _call: &Call) -> Result<Bytes, FacetError> {
		Ok(Bytes::from_static(self.tag.as_bytes()))
	}
}
