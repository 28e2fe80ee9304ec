use std::sync::Arc;

use bytes::Bytes;
use switchyard_catalog::CatalogError;
use switchyard_types::{Call, FacetId, Principal};

use crate::builtin::{CutFacet, LoupeFacet, OwnershipFacet};
use crate::{
	Authorizer, Builtin, CutBatch, CutError, CutObserver, CutProcessor, CutReceipt, DispatchError, Dispatcher, Facet,
	FacetArena, FacetCut, FacetRegistry, InitCall, InitFailurePolicy, Loupe, Ownership, ProxyConfig,
};

/// Principal recorded as the caller of the bootstrap cut.
const BOOTSTRAP_CALLER: &str = "bootstrap";

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
	#[error("bootstrap cut failed: {0}")]
	Cut(#[from] CutError),
	#[error("the ownership builtin needs the stock ownership authorizer")]
	OwnershipUnavailable,
	#[error(transparent)]
	Catalog(#[from] CatalogError),
}

/// Stable entry point routing calls to facets by selector.
///
/// Registry and arena are shared with the dispatcher and the cut processor;
/// the proxy owns all of them and is what facets see through [`crate::CallCx`].
pub struct Proxy {
	label: Arc<str>,
	registry: Arc<FacetRegistry>,
	arena: Arc<FacetArena>,
	cuts: CutProcessor,
	dispatcher: Dispatcher,
	ownership: Option<Arc<Ownership>>,
	builtins: Vec<(Builtin, FacetId)>,
}

impl Proxy {
	/// Builds a proxy whose cuts are vetted by `authorizer`.
	///
	/// The ownership builtin is unavailable here since there is no
	/// [`Ownership`] to expose.
	pub fn new(config: ProxyConfig, authorizer: Arc<dyn Authorizer>) -> Result<Self, BootstrapError> {
		Self::build(config, authorizer, None)
	}

	/// Builds a proxy authorized by [`Ownership`], seeded from `config.owner`.
	pub fn from_config(config: ProxyConfig) -> Result<Self, BootstrapError> {
		let ownership = Arc::new(Ownership::new(config.owner.clone()));
		let authorizer: Arc<dyn Authorizer> = ownership.clone();
		Self::build(config, authorizer, Some(ownership))
	}

	/// Default configuration with `owner` as the only principal allowed to cut.
	pub fn with_owner(owner: impl Into<Principal>) -> Result<Self, BootstrapError> {
		Self::from_config(ProxyConfig::default().with_owner(owner))
	}

	fn build(
		config: ProxyConfig,
		authorizer: Arc<dyn Authorizer>,
		ownership: Option<Arc<Ownership>>,
	) -> Result<Self, BootstrapError> {
		let label: Arc<str> = config.label.into();
		let registry = Arc::new(FacetRegistry::new());
		let arena = Arc::new(FacetArena::new());
		let mut proxy = Self {
			cuts: CutProcessor::new(
				label.clone(),
				registry.clone(),
				arena.clone(),
				authorizer,
				config.on_init_failure,
			),
			dispatcher: Dispatcher::new(label.clone(), registry.clone(), arena.clone()),
			label,
			registry,
			arena,
			ownership,
			builtins: Vec::new(),
		};
		proxy.bootstrap(&config.builtins)?;
		Ok(proxy)
	}

	/// Deploys `builtins` and routes them in one cut that skips authorization.
	fn bootstrap(&mut self, builtins: &[Builtin]) -> Result<(), BootstrapError> {
		if builtins.is_empty() {
			return Ok(());
		}

		let mut batch = CutBatch::new();
		for &builtin in builtins {
			let facet: Arc<dyn Facet> = match builtin {
				Builtin::Cut => Arc::new(CutFacet::new()?),
				Builtin::Loupe => Arc::new(LoupeFacet::new()?),
				Builtin::Ownership => {
					let ownership = self.ownership.clone().ok_or(BootstrapError::OwnershipUnavailable)?;
					Arc::new(OwnershipFacet::new(ownership)?)
				}
			};
			let selectors = facet.selectors().into_vec();
			let id = self.arena.deploy(facet);
			batch.push(FacetCut::add(id, selectors));
			self.builtins.push((builtin, id));
		}

		let this: &Self = self;
		this.cuts.commit(this, &Principal::new(BOOTSTRAP_CALLER), &batch, None)?;
		Ok(())
	}

	pub fn label(&self) -> &str {
		&self.label
	}

	/// Deploys a facet. It serves nothing until a cut routes selectors to it.
	pub fn deploy(&self, facet: impl Facet) -> FacetId {
		self.arena.deploy(Arc::new(facet))
	}

	pub fn deploy_arc(&self, facet: Arc<dyn Facet>) -> FacetId {
		self.arena.deploy(facet)
	}

	pub fn facet(&self, id: FacetId) -> Option<Arc<dyn Facet>> {
		self.arena.get(id)
	}

	/// Id of a builtin facet deployed at bootstrap.
	pub fn builtin(&self, kind: Builtin) -> Option<FacetId> {
		self.builtins
			.iter()
			.find_map(|&(builtin, id)| (builtin == kind).then_some(id))
	}

	/// Applies `batch` atomically on behalf of `caller`, then runs `init`.
	pub fn cut(&self, caller: &Principal, batch: &CutBatch, init: Option<&InitCall>) -> Result<CutReceipt, CutError> {
		self.cuts.cut(self, caller, batch, init)
	}

	pub fn dispatch(&self, call: &Call) -> Result<Bytes, DispatchError> {
		self.dispatcher.dispatch(self, call)
	}

	pub fn loupe(&self) -> Loupe<'_> {
		Loupe::new(&self.registry)
	}

	pub fn registry(&self) -> &FacetRegistry {
		&self.registry
	}

	pub fn arena(&self) -> &FacetArena {
		&self.arena
	}

	pub fn subscribe(&self, observer: Arc<dyn CutObserver>) {
		self.cuts.subscribe(observer);
	}

	/// The stock ownership authorizer, when the proxy was built with one.
	pub fn ownership(&self) -> Option<&Ownership> {
		self.ownership.as_deref()
	}

	pub fn init_failure_policy(&self) -> InitFailurePolicy {
		self.cuts.policy()
	}
}

impl std::fmt::Debug for Proxy {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Proxy")
			.field("label", &self.label)
			.field("registry", &self.registry)
			.field("arena", &self.arena)
			.field("builtins", &self.builtins)
			.finish_non_exhaustive()
	}
}
