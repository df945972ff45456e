//! Keyed signatures over arbitrary strings, truncated for URL display.

// crates.io
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use sha2::Sha256;
// self
use crate::{
	_prelude::*,
	capability::{SIG_LEN, SigningKey},
	error::ConfigError,
};

type HmacSha256 = Hmac<Sha256>;

/// Deterministic keyed signer used by [`CapabilityCodec`](crate::capability::CapabilityCodec).
///
/// Implementations must return exactly [`SIG_LEN`] characters from the base64url alphabet and
/// must produce the same output for the same message every time.
pub trait Signer
where
	Self: Send + Sync,
{
	/// Signs `message` and returns the truncated signature.
	fn sign(&self, message: &str) -> String;
}
impl<S> Signer for Arc<S>
where
	S: ?Sized + Signer,
{
	fn sign(&self, message: &str) -> String {
		(**self).sign(message)
	}
}

/// HMAC-SHA-256 signer: base64url (no padding) digest truncated to [`SIG_LEN`] characters.
///
/// Six characters carry 36 bits; brute-force resistance comes jointly from the signature and
/// the unguessable identifier it covers.
#[derive(Clone)]
pub struct HmacSigner {
	mac: HmacSha256,
}
impl HmacSigner {
	/// Keys the MAC once; a key the primitive refuses is a startup error.
	pub fn new(key: &SigningKey) -> Result<Self, ConfigError> {
		let mac = HmacSha256::new_from_slice(key.expose()).map_err(|_| ConfigError::InvalidSecret)?;

		Ok(Self { mac })
	}
}
impl Signer for HmacSigner {
	fn sign(&self, message: &str) -> String {
		let mut mac = self.mac.clone();

		mac.update(message.as_bytes());

		let mut encoded = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

		encoded.truncate(SIG_LEN);

		encoded
	}
}
impl Debug for HmacSigner {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("HmacSigner(<redacted>)")
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::capability::is_alphabet_byte;

	fn signer(secret: &str) -> HmacSigner {
		HmacSigner::new(&SigningKey::new(secret).expect("Fixture secret should be valid."))
			.expect("HMAC should accept any key length.")
	}

	#[test]
	fn signatures_are_truncated_url_safe_and_deterministic() {
		let signer = signer("s3cr3t");
		let first = signer.sign("AbCdEfGh");

		assert_eq!(first.len(), SIG_LEN);
		assert!(first.bytes().all(is_alphabet_byte));
		assert_eq!(first, signer.sign("AbCdEfGh"));
		assert_ne!(first, signer.sign("write:AbCdEfGh"));
	}

	#[test]
	fn signature_is_prefix_of_full_digest() {
		let mut mac = HmacSha256::new_from_slice(b"s3cr3t").expect("HMAC accepts any key.");

		mac.update(b"AbCdEfGh");

		let full = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

		assert_eq!(full.len(), 43);
		assert_eq!(signer("s3cr3t").sign("AbCdEfGh"), full[..SIG_LEN]);
	}

	#[test]
	fn debug_does_not_leak_key() {
		assert_eq!(format!("{:?}", signer("s3cr3t")), "HmacSigner(<redacted>)");
	}
}
