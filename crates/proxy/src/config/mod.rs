//! Proxy configuration.
//!
//! Loaded from TOML; every field has a default, so an empty file is valid:
//!
//! ```toml
//! label = "token-proxy"
//! owner = "alice"
//! builtins = ["cut", "loupe", "ownership"]
//! on_init_failure = "keep-cut"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use switchyard_types::Principal;

use crate::InitFailurePolicy;

/// Facets shipped with the proxy that bootstrap can deploy and route.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Builtin {
	/// The cut entry point, callable through dispatch.
	Cut,
	/// Introspection entry points.
	Loupe,
	/// Owner query and transfer entry points.
	Ownership,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("failed to read {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	#[error("invalid proxy config: {0}")]
	Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProxyConfig {
	/// Name attached to every log line of this proxy.
	pub label: String,
	/// Initial owner for the stock ownership authorizer.
	pub owner: Option<Principal>,
	/// Builtin facets routed by the bootstrap cut, in this order.
	pub builtins: Vec<Builtin>,
	pub on_init_failure: InitFailurePolicy,
}

impl Default for ProxyConfig {
	fn default() -> Self {
		Self {
			label: "proxy".to_owned(),
			owner: None,
			builtins: vec![Builtin::Cut],
			on_init_failure: InitFailurePolicy::default(),
		}
	}
}

impl ProxyConfig {
	pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(text)?)
	}

	pub fn load(path: &Path) -> Result<Self, ConfigError> {
		let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		Self::from_toml_str(&text)
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = label.into();
		self
	}

	pub fn with_owner(mut self, owner: impl Into<Principal>) -> Self {
		self.owner = Some(owner.into());
		self
	}

	pub fn with_builtins(mut self, builtins: impl IntoIterator<Item = Builtin>) -> Self {
		self.builtins = builtins.into_iter().collect();
		self
	}

	pub fn with_init_failure(mut self, policy: InitFailurePolicy) -> Self {
		self.on_init_failure = policy;
		self
	}
}

#[cfg(test)]
mod tests;
