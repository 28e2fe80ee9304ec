use std::fmt;
use std::str::FromStr;

use sha2::{Digest, Sha256};
use switchyard_types::Selector;

/// Words allowed after the parameter list; everything from the first of them on
/// is ignored (`view returns (uint256)`).
const TRAILING_MODIFIERS: &[&str] = &["external", "public", "view", "pure", "payable", "returns"];

/// Signature parse failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
	#[error("signature {0:?} has no parameter list")]
	MissingParams(String),
	#[error("invalid function name {0:?}")]
	InvalidName(String),
	#[error("unbalanced parentheses in {0:?}")]
	Unbalanced(String),
	#[error("empty parameter in {0:?}")]
	EmptyParam(String),
	#[error("invalid parameter {0:?}")]
	InvalidParam(String),
	#[error("unexpected input after parameter list: {0:?}")]
	TrailingInput(String),
}

/// Canonical function signature, `name(type1,type2)`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Signature {
	name: String,
	params: Vec<String>,
	canonical: String,
	selector: Selector,
}

impl Signature {
	/// Parses and canonicalizes a human-written signature.
	///
	/// `function transfer(address to, uint256 amount) external` and
	/// `transfer(address,uint256)` produce the same signature.
	pub fn parse(text: &str) -> Result<Self, SignatureError> {
		let trimmed = text.trim();
		let body = strip_keyword(trimmed, "function").unwrap_or(trimmed);
		let open = body
			.find('(')
			.ok_or_else(|| SignatureError::MissingParams(text.to_owned()))?;
		let name = body[..open].trim();
		if !is_identifier(name) {
			return Err(SignatureError::InvalidName(name.to_owned()));
		}
		let close = matching_paren(body, open).ok_or_else(|| SignatureError::Unbalanced(text.to_owned()))?;
		let rest = body[close + 1..].trim();
		let ignorable = rest
			.split_whitespace()
			.next()
			.is_none_or(|word| TRAILING_MODIFIERS.contains(&word));
		if !ignorable {
			return Err(SignatureError::TrailingInput(rest.to_owned()));
		}

		let params = parse_params(&body[open + 1..close])?;
		let canonical = format!("{name}({})", params.join(","));
		let selector = digest_selector(&canonical);
		Ok(Self {
			name: name.to_owned(),
			params,
			canonical,
			selector,
		})
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Canonical parameter types in declaration order.
	pub fn params(&self) -> &[String] {
		&self.params
	}

	pub fn canonical(&self) -> &str {
		&self.canonical
	}

	pub fn selector(&self) -> Selector {
		self.selector
	}
}

impl FromStr for Signature {
	type Err = SignatureError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}

impl fmt::Display for Signature {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.canonical)
	}
}

impl fmt::Debug for Signature {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Signature({} = {})", self.canonical, self.selector)
	}
}

/// Derives the selector of a human-written signature.
///
/// Selectors are the first four bytes of the SHA-256 digest of the canonical
/// signature. They are not Ethereum ABI selectors, which use Keccak-256:
/// `transfer(address,uint256)` is `0x3b88ef57` here, not `0xa9059cbb`.
pub fn selector_of(text: &str) -> Result<Selector, SignatureError> {
	Signature::parse(text).map(|sig| sig.selector())
}

fn digest_selector(canonical: &str) -> Selector {
	let digest = Sha256::digest(canonical.as_bytes());
	Selector::from_bytes([digest[0], digest[1], digest[2], digest[3]])
}

fn strip_keyword<'a>(text: &'a str, keyword: &str) -> Option<&'a str> {
	text.strip_prefix(keyword)
		.filter(|rest| rest.starts_with(char::is_whitespace))
		.map(str::trim_start)
}

fn is_identifier(word: &str) -> bool {
	let mut chars = word.chars();
	chars
		.next()
		.is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
		&& chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Zero or more `[N]` / `[]` groups.
fn is_array_suffix(mut suffix: &str) -> bool {
	while !suffix.is_empty() {
		let Some(rest) = suffix.strip_prefix('[') else {
			return false;
		};
		let Some(close) = rest.find(']') else {
			return false;
		};
		if !rest[..close].bytes().all(|b| b.is_ascii_digit()) {
			return false;
		}
		suffix = &rest[close + 1..];
	}
	true
}

/// Byte index of the `)` closing the `(` at `open`.
fn matching_paren(text: &str, open: usize) -> Option<usize> {
	let mut depth = 0usize;
	for (idx, byte) in text.bytes().enumerate().skip(open) {
		match byte {
			b'(' => depth += 1,
			b')' => {
				depth -= 1;
				if depth == 0 {
					return Some(idx);
				}
			}
			_ => {}
		}
	}
	None
}

fn parse_params(list: &str) -> Result<Vec<String>, SignatureError> {
	if list.trim().is_empty() {
		return Ok(Vec::new());
	}
	split_top_level(list)?
		.into_iter()
		.map(canonical_param)
		.collect()
}

fn split_top_level(list: &str) -> Result<Vec<&str>, SignatureError> {
	let mut parts = Vec::new();
	let mut depth = 0i32;
	let mut start = 0;
	for (idx, byte) in list.bytes().enumerate() {
		match byte {
			b'(' => depth += 1,
			b')' => {
				depth -= 1;
				if depth < 0 {
					return Err(SignatureError::Unbalanced(list.to_owned()));
				}
			}
			b',' if depth == 0 => {
				parts.push(&list[start..idx]);
				start = idx + 1;
			}
			_ => {}
		}
	}
	if depth != 0 {
		return Err(SignatureError::Unbalanced(list.to_owned()));
	}
	parts.push(&list[start..]);
	Ok(parts)
}

fn canonical_param(param: &str) -> Result<String, SignatureError> {
	let param = param.trim();
	if param.is_empty() {
		return Err(SignatureError::EmptyParam(param.to_owned()));
	}
	let invalid = || SignatureError::InvalidParam(param.to_owned());

	let (ty, rest) = if param.starts_with('(') {
		let close = matching_paren(param, 0).ok_or_else(|| SignatureError::Unbalanced(param.to_owned()))?;
		let members = parse_params(&param[1..close])?;
		let after = &param[close + 1..];
		let suffix_end = after.find(char::is_whitespace).unwrap_or(after.len());
		let suffix = &after[..suffix_end];
		if !is_array_suffix(suffix) {
			return Err(invalid());
		}
		(format!("({}){suffix}", members.join(",")), &after[suffix_end..])
	} else {
		let end = param.find(char::is_whitespace).unwrap_or(param.len());
		let token = &param[..end];
		let base_end = token.find('[').unwrap_or(token.len());
		if !is_identifier(&token[..base_end]) || !is_array_suffix(&token[base_end..]) {
			return Err(invalid());
		}
		(token.to_owned(), &param[end..])
	};

	// Optional data location and parameter name.
	let mut words = 0;
	for word in rest.split_whitespace() {
		words += 1;
		if words > 2 || !is_identifier(word) {
			return Err(invalid());
		}
	}
	Ok(ty)
}
