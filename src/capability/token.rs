//! Typed read/write capability tokens, token classes, and verification failures.

// self
use crate::{_prelude::*, capability::Rid};

/// Domain tag mixed into the signing input of write tokens.
pub const WRITE_DOMAIN_TAG: &str = "write:";

macro_rules! def_token {
	($name:ident, $doc:literal, $class:expr) => {
		#[doc = $doc]
		///
		/// Values only exist after the codec minted them or verified their signature.
		#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
		#[serde(into = "String")]
		pub struct $name {
			rid: Rid,
			sig: String,
		}
		impl $name {
			/// Token class used to sign this token.
			pub const CLASS: TokenClass = $class;

			pub(crate) fn from_parts(rid: Rid, sig: String) -> Self {
				Self { rid, sig }
			}

			/// Random identifier embedded in the token.
			pub fn rid(&self) -> &Rid {
				&self.rid
			}

			/// Truncated signature embedded in the token.
			pub fn signature(&self) -> &str {
				&self.sig
			}
		}
		impl From<$name> for String {
			fn from(value: $name) -> Self {
				value.to_string()
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				write!(f, concat!(stringify!($name), "({}{})"), self.rid, self.sig)
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(&self.rid)?;
				f.write_str(&self.sig)
			}
		}
	};
}

/// Capability classes sharing one secret but occupying disjoint signature spaces.
///
/// A new class needs a tag that is neither a prefix of, nor prefixed by, an existing tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenClass {
	/// Inbox access; signed over the bare identifier.
	Read,
	/// Send-only access; signed over [`WRITE_DOMAIN_TAG`] followed by the identifier.
	Write,
}
impl TokenClass {
	/// Returns the domain tag prepended to the identifier before signing.
	pub const fn domain_tag(self) -> &'static str {
		match self {
			TokenClass::Read => "",
			TokenClass::Write => WRITE_DOMAIN_TAG,
		}
	}

	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			TokenClass::Read => "read",
			TokenClass::Write => "write",
		}
	}

	/// Builds the exact message handed to the signer for `rid`.
	pub fn signing_input(self, rid: &Rid) -> String {
		format!("{}{rid}", self.domain_tag())
	}
}
impl Display for TokenClass {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Reasons a candidate token failed verification.
///
/// Callers must answer every variant identically; the distinction is for logs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ThisError)]
pub enum VerifyError {
	/// Wrong length or a character outside the URL-safe alphabet. No signature was computed.
	#[error("Token is malformed ({len} bytes).")]
	Malformed {
		/// Observed byte length.
		len: usize,
	},
	/// Signature does not match the identifier for the expected class.
	///
	/// Presenting a token of the other class lands here too.
	#[error("Token signature does not match for a {class} token.")]
	BadSignature {
		/// Class the token was verified as.
		class: TokenClass,
	},
}
impl VerifyError {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			VerifyError::Malformed { .. } => "malformed",
			VerifyError::BadSignature { .. } => "bad_signature",
		}
	}
}

def_token! { ReadToken, "Read capability granting access to one inbox.", TokenClass::Read }
def_token! { WriteToken, "Send-only capability for one inbox.", TokenClass::Write }
