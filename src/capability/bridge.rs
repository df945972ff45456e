//! Write-to-read token bridge.
//!
//! A send request holds only a write token, but the provider authorizes by read identity. The
//! bridge re-signs the write token's identifier as a read token instead of storing a mapping.
//! Taking a [`WriteToken`] rather than a bare identifier keeps the bridge out of reach of
//! unauthenticated input: that type only exists after minting or a successful
//! [`verify_write_id`](CapabilityCodec::verify_write_id).

// self
use crate::capability::{CapabilityCodec, ReadToken, Signer, TokenClass, WriteToken};

impl<S> CapabilityCodec<S>
where
	S: Signer,
{
	/// Re-signs the identifier of an authenticated write token as a read token.
	///
	/// The result must stay server-side; it is never returned to the write token's holder.
	pub fn derive_read_id(&self, write: &WriteToken) -> ReadToken {
		let (rid, sig) = self.seal(TokenClass::Read, write.rid().clone());

		ReadToken::from_parts(rid, sig)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::capability::SigningKey;

	#[test]
	fn bridged_token_matches_original_read_token() {
		let codec = CapabilityCodec::from_key(
			&SigningKey::new("s3cr3t").expect("Fixture secret should be valid."),
		)
		.expect("Codec should build from a valid secret.");
		let read = codec.create_signed_id();
		let write = codec
			.verify_write_id(&codec.create_write_id(&read).to_string())
			.expect("Derived write token should verify.");
		let bridged = codec.derive_read_id(&write);

		assert_eq!(bridged, read);

		let verified = codec
			.verify_signed_id(&bridged.to_string())
			.expect("Bridged token should verify as a read token.");

		assert_eq!(verified.rid(), read.rid());
	}
}
