//! Random identifiers embedded in every capability token.

// std
use std::{borrow::Borrow, ops::Deref};
// crates.io
use rand::Rng;
// self
use crate::_prelude::*;

/// Length of the random identifier portion of a token.
pub const ID_LEN: usize = 8;
/// Length of the truncated signature portion of a token.
pub const SIG_LEN: usize = 6;
/// Total length of a capability token (`rid || sig`).
pub const TOKEN_LEN: usize = ID_LEN + SIG_LEN;

/// URL-safe alphabet used for identifiers; base64url signatures share it.
pub const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Error returned when identifier validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum IdentifierError {
	/// The identifier does not have exactly [`ID_LEN`] characters.
	#[error("Identifier must be {expected} characters, got {actual}.")]
	WrongLength {
		/// Required character count.
		expected: usize,
		/// Observed byte count.
		actual: usize,
	},
	/// The identifier contains a character outside [`ALPHABET`].
	#[error("Identifier contains a character outside the URL-safe alphabet.")]
	InvalidCharacter,
}

/// Random identifier (`rid`) shared by a read token and the write token derived from it.
///
/// Uniqueness is probabilistic: 64^8 possible values, with no collision check.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rid(String);
impl Rid {
	/// Draws a fresh identifier from the thread-local CSPRNG.
	pub fn generate() -> Self {
		let mut rng = rand::rng();
		let rid = (0..ID_LEN)
			.map(|_| char::from(ALPHABET[rng.random_range(0..ALPHABET.len())]))
			.collect();

		Self(rid)
	}

	/// Creates an identifier after validation.
	pub fn new(value: impl AsRef<str>) -> Result<Self, IdentifierError> {
		let view = value.as_ref();

		validate_view(view)?;

		Ok(Self(view.to_owned()))
	}
}
impl Deref for Rid {
	type Target = str;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl AsRef<str> for Rid {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl Borrow<str> for Rid {
	fn borrow(&self) -> &str {
		&self.0
	}
}
impl From<Rid> for String {
	fn from(value: Rid) -> Self {
		value.0
	}
}
impl TryFrom<String> for Rid {
	type Error = IdentifierError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		validate_view(&value)?;

		Ok(Self(value))
	}
}
impl Debug for Rid {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "Rid({})", self.0)
	}
}
impl Display for Rid {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}
impl FromStr for Rid {
	type Err = IdentifierError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}

/// Returns `true` when the byte belongs to [`ALPHABET`].
pub fn is_alphabet_byte(b: u8) -> bool {
	b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

fn validate_view(view: &str) -> Result<(), IdentifierError> {
	if view.len() != ID_LEN {
		return Err(IdentifierError::WrongLength { expected: ID_LEN, actual: view.len() });
	}
	if !view.bytes().all(is_alphabet_byte) {
		return Err(IdentifierError::InvalidCharacter);
	}

	Ok(())
}
