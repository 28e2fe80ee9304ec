use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Fixed-width identifier of one callable entry point.
///
/// Derived from a canonical function signature by the catalog crate. Renders as
/// `0x` followed by eight lowercase hex digits.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Selector([u8; Selector::WIDTH]);

impl Selector {
	/// Width of a selector in bytes.
	pub const WIDTH: usize = 4;

	pub const fn from_bytes(bytes: [u8; Self::WIDTH]) -> Self {
		Self(bytes)
	}

	pub const fn from_u32(raw: u32) -> Self {
		Self(raw.to_be_bytes())
	}

	pub const fn to_bytes(self) -> [u8; Self::WIDTH] {
		self.0
	}

	pub const fn as_u32(self) -> u32 {
		u32::from_be_bytes(self.0)
	}
}

impl fmt::Display for Selector {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "0x{:08x}", self.as_u32())
	}
}

impl fmt::Debug for Selector {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Selector({self})")
	}
}

/// Error returned when a selector string is not `0x` plus eight hex digits.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid selector {input:?}: expected 0x followed by 8 hex digits")]
pub struct ParseSelectorError {
	pub input: String,
}

impl FromStr for Selector {
	type Err = ParseSelectorError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let invalid = || ParseSelectorError { input: s.to_owned() };
		let digits = s
			.strip_prefix("0x")
			.or_else(|| s.strip_prefix("0X"))
			.unwrap_or(s);
		if digits.len() != 2 * Self::WIDTH || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
			return Err(invalid());
		}
		u32::from_str_radix(digits, 16)
			.map(Self::from_u32)
			.map_err(|_| invalid())
	}
}

impl Serialize for Selector {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		if serializer.is_human_readable() {
			serializer.collect_str(self)
		} else {
			self.0.serialize(serializer)
		}
	}
}

impl<'de> Deserialize<'de> for Selector {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		if deserializer.is_human_readable() {
			let text = String::deserialize(deserializer)?;
			text.parse().map_err(serde::de::Error::custom)
		} else {
			<[u8; Self::WIDTH]>::deserialize(deserializer).map(Self)
		}
	}
}
