use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use switchyard_types::Selector;

use crate::Signature;

/// Ordered, duplicate-free selector list, remembering the signature each
/// selector came from when known.
///
/// Patterns accepted by [`SelectorSet::without`] and [`SelectorSet::only`] are
/// a full signature (`mint(address,uint256)`), a bare name (`mint`, matching
/// every overload), or a hex selector (`0x1234abcd`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectorSet {
	entries: IndexMap<Selector, Option<Signature>, FxBuildHasher>,
}

impl SelectorSet {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn contains(&self, selector: Selector) -> bool {
		self.entries.contains_key(&selector)
	}

	/// Appends a selector; returns false if it was already present.
	pub fn insert(&mut self, selector: Selector) -> bool {
		if self.entries.contains_key(&selector) {
			return false;
		}
		self.entries.insert(selector, None);
		true
	}

	pub fn iter(&self) -> impl Iterator<Item = Selector> + '_ {
		self.entries.keys().copied()
	}

	/// Selectors paired with their originating signature, if known.
	pub fn signatures(&self) -> impl Iterator<Item = (Selector, Option<&Signature>)> + '_ {
		self.entries.iter().map(|(sel, sig)| (*sel, sig.as_ref()))
	}

	/// Copy of this set without the entry points matching any pattern.
	pub fn without(&self, patterns: &[&str]) -> Self {
		self.filtered(|sel, sig| !patterns.iter().any(|p| entry_matches(sel, sig, p)))
	}

	/// Copy of this set keeping only the entry points matching some pattern.
	pub fn only(&self, patterns: &[&str]) -> Self {
		self.filtered(|sel, sig| patterns.iter().any(|p| entry_matches(sel, sig, p)))
	}

	pub fn to_vec(&self) -> Vec<Selector> {
		self.iter().collect()
	}

	pub fn into_vec(self) -> Vec<Selector> {
		self.entries.into_keys().collect()
	}

	pub(crate) fn matches(signature: &Signature, pattern: &str) -> bool {
		let pattern = pattern.trim();
		if pattern.contains('(') {
			Signature::parse(pattern).is_ok_and(|p| p.canonical() == signature.canonical())
		} else {
			signature.name() == pattern
		}
	}

	fn filtered(&self, mut keep: impl FnMut(Selector, Option<&Signature>) -> bool) -> Self {
		self.entries
			.iter()
			.filter(|(sel, sig)| keep(**sel, sig.as_ref()))
			.map(|(sel, sig)| (*sel, sig.clone()))
			.collect()
	}
}

fn entry_matches(selector: Selector, signature: Option<&Signature>, pattern: &str) -> bool {
	if let Ok(raw) = pattern.trim().parse::<Selector>() {
		return raw == selector;
	}
	signature.is_some_and(|sig| SelectorSet::matches(sig, pattern))
}

impl FromIterator<(Selector, Option<Signature>)> for SelectorSet {
	fn from_iter<I: IntoIterator<Item = (Selector, Option<Signature>)>>(iter: I) -> Self {
		let mut entries = IndexMap::default();
		for (sel, sig) in iter {
			entries.entry(sel).or_insert(sig);
		}
		Self { entries }
	}
}

impl FromIterator<Selector> for SelectorSet {
	fn from_iter<I: IntoIterator<Item = Selector>>(iter: I) -> Self {
		iter.into_iter().map(|sel| (sel, None)).collect()
	}
}

impl IntoIterator for SelectorSet {
	type Item = Selector;
	type IntoIter = indexmap::map::IntoKeys<Selector, Option<Signature>>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.into_keys()
	}
}

impl<'a> IntoIterator for &'a SelectorSet {
	type Item = Selector;
	type IntoIter = std::iter::Copied<indexmap::map::Keys<'a, Selector, Option<Signature>>>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.keys().copied()
	}
}
