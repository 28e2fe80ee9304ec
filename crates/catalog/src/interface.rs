use rustc_hash::FxHashMap;
use switchyard_types::Selector;

use crate::{SelectorSet, Signature, SignatureError};

/// Errors raised while declaring an interface.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
	#[error("interface {interface}: {source}")]
	Signature {
		interface: String,
		#[source]
		source: SignatureError,
	},
	/// Two entry points of one interface map to the same selector.
	#[error("interface {interface}: {second} collides with {first} on selector {selector}")]
	DuplicateSelector {
		interface: String,
		selector: Selector,
		first: String,
		second: String,
	},
}

/// One declared entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPoint {
	pub signature: Signature,
	pub selector: Selector,
}

/// Declared callable interface of a facet.
#[derive(Debug, Clone)]
pub struct Interface {
	name: String,
	entries: Vec<EntryPoint>,
	by_selector: FxHashMap<Selector, usize>,
}

impl Interface {
	pub fn builder(name: impl Into<String>) -> InterfaceBuilder {
		InterfaceBuilder {
			name: name.into(),
			signatures: Vec::new(),
		}
	}

	/// Interface with no entry points.
	pub fn empty(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			entries: Vec::new(),
			by_selector: FxHashMap::default(),
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn entries(&self) -> &[EntryPoint] {
		&self.entries
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Selectors in declaration order.
	pub fn selectors(&self) -> SelectorSet {
		self.entries
			.iter()
			.map(|entry| (entry.selector, Some(entry.signature.clone())))
			.collect()
	}

	pub fn contains(&self, selector: Selector) -> bool {
		self.by_selector.contains_key(&selector)
	}

	pub fn signature_of(&self, selector: Selector) -> Option<&Signature> {
		self.by_selector
			.get(&selector)
			.map(|&idx| &self.entries[idx].signature)
	}

	/// Looks up the selector of a declared entry point by signature or bare name.
	///
	/// A bare name matches the first entry point declared with that name.
	pub fn selector(&self, signature_or_name: &str) -> Option<Selector> {
		self.entries
			.iter()
			.find(|entry| SelectorSet::matches(&entry.signature, signature_or_name))
			.map(|entry| entry.selector)
	}

	/// XOR of all selectors; a fingerprint of the whole interface.
	pub fn interface_id(&self) -> Selector {
		let folded = self
			.entries
			.iter()
			.fold(0u32, |acc, entry| acc ^ entry.selector.as_u32());
		Selector::from_u32(folded)
	}
}

/// Accumulates signatures for [`Interface::builder`].
#[derive(Debug, Clone)]
pub struct InterfaceBuilder {
	name: String,
	signatures: Vec<String>,
}

impl InterfaceBuilder {
	pub fn function(mut self, signature: impl Into<String>) -> Self {
		self.signatures.push(signature.into());
		self
	}

	pub fn functions<I, S>(mut self, signatures: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.signatures.extend(signatures.into_iter().map(Into::into));
		self
	}

	/// Parses every signature and rejects selector collisions.
	pub fn build(self) -> Result<Interface, CatalogError> {
		let mut interface = Interface::empty(self.name);
		for text in &self.signatures {
			let signature = Signature::parse(text).map_err(|source| CatalogError::Signature {
				interface: interface.name.clone(),
				source,
			})?;
			let selector = signature.selector();
			if let Some(&idx) = interface.by_selector.get(&selector) {
				return Err(CatalogError::DuplicateSelector {
					interface: interface.name.clone(),
					selector,
					first: interface.entries[idx].signature.canonical().to_owned(),
					second: signature.canonical().to_owned(),
				});
			}
			interface.by_selector.insert(selector, interface.entries.len());
			interface.entries.push(EntryPoint { signature, selector });
		}
		Ok(interface)
	}
}
