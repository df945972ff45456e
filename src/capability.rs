//! Capability tokens: short, unguessable, tamper-evident identifiers that stand in for
//! authorization inside URLs.
//!
//! A token is `rid || sig`, where `rid` is an [`ID_LEN`]-character random identifier and `sig`
//! is the first [`SIG_LEN`] characters of the base64url HMAC-SHA-256 digest of the token
//! class's domain tag followed by `rid`. Verification is stateless: re-signing the embedded
//! identifier must reproduce the embedded signature.
//!
//! [`CapabilityCodec`] is the single entry point. Its operations live next to the token class
//! they serve:
//!
//! - [`signed_id`]: read (inbox) tokens.
//! - [`write_id`]: send-only tokens, domain-separated from read tokens.
//! - [`bridge`]: re-signs the identifier of a verified write token as a read token.

pub mod bridge;
pub mod id;
pub mod secret;
pub mod signed_id;
pub mod signer;
pub mod token;
pub mod write_id;

pub use id::*;
pub use secret::*;
pub use signer::*;
pub use token::*;

// crates.io
use subtle::ConstantTimeEq;
// self
use crate::error::ConfigError;

/// Mints and verifies read and write capability tokens with a single process-wide signer.
///
/// The codec holds no mutable state; every operation is a pure function of the signer's key
/// and its input, so one instance can be shared across any number of concurrent requests.
#[derive(Clone, Debug)]
pub struct CapabilityCodec<S = HmacSigner>
where
	S: Signer,
{
	signer: S,
}
impl<S> CapabilityCodec<S>
where
	S: Signer,
{
	/// Creates a codec around the provided signer.
	pub fn new(signer: S) -> Self {
		Self { signer }
	}

	/// Returns the underlying signer.
	pub fn signer(&self) -> &S {
		&self.signer
	}

	fn seal(&self, class: TokenClass, rid: Rid) -> (Rid, String) {
		let sig = self.signer.sign(&class.signing_input(&rid));

		(rid, sig)
	}

	fn open(&self, class: TokenClass, token: &str) -> Result<(Rid, String), VerifyError> {
		let (rid, sig) = split_token(token)?;
		let expected = self.signer.sign(&class.signing_input(&rid));

		if !bool::from(expected.as_bytes().ct_eq(sig.as_bytes())) {
			return Err(VerifyError::BadSignature { class });
		}

		Ok((rid, sig.to_owned()))
	}
}
impl CapabilityCodec<HmacSigner> {
	/// Builds an HMAC-backed codec from the process secret.
	pub fn from_key(key: &SigningKey) -> Result<Self, ConfigError> {
		Ok(Self::new(HmacSigner::new(key)?))
	}
}

/// Splits a candidate token into identifier and signature without touching the signer.
fn split_token(token: &str) -> Result<(Rid, &str), VerifyError> {
	if token.len() != TOKEN_LEN {
		return Err(VerifyError::Malformed { len: token.len() });
	}
	if !token.bytes().all(is_alphabet_byte) {
		return Err(VerifyError::Malformed { len: token.len() });
	}

	let (rid, sig) = token.split_at(ID_LEN);
	let rid = Rid::new(rid).map_err(|_| VerifyError::Malformed { len: token.len() })?;

	Ok((rid, sig))
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn split_rejects_wrong_length_and_alphabet() {
		assert_eq!(split_token("short"), Err(VerifyError::Malformed { len: 5 }));
		assert_eq!(split_token("AbCdEfGh123456789"), Err(VerifyError::Malformed { len: 17 }));
		assert_eq!(split_token("AbCdEfGh12345/"), Err(VerifyError::Malformed { len: 14 }));
		// Multi-byte input must never be sliced mid-character.
		assert!(split_token("AbCdEfGh1234é").is_err());

		let (rid, sig) = split_token("AbCdEfGh12_-45").expect("URL-safe token should split.");

		assert_eq!(rid.as_ref(), "AbCdEfGh");
		assert_eq!(sig, "12_-45");
	}
}
