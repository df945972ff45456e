//! Send-only capability tokens (`rid || sign("write:" + rid)`).

// self
use crate::capability::{CapabilityCodec, ReadToken, Signer, TokenClass, VerifyError, WriteToken};

impl<S> CapabilityCodec<S>
where
	S: Signer,
{
	/// Derives the write token paired with a read token.
	///
	/// Both tokens carry the same identifier; only the signature differs.
	pub fn create_write_id(&self, read: &ReadToken) -> WriteToken {
		let (rid, sig) = self.seal(TokenClass::Write, read.rid().clone());

		WriteToken::from_parts(rid, sig)
	}

	/// Verifies a candidate write token taken from untrusted input.
	///
	/// A read token for the same identifier fails here because its signature lacks the write
	/// domain tag.
	pub fn verify_write_id(&self, token: &str) -> Result<WriteToken, VerifyError> {
		let (rid, sig) = self.open(TokenClass::Write, token)?;

		Ok(WriteToken::from_parts(rid, sig))
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::capability::SigningKey;

	#[test]
	fn write_tokens_share_identifier_but_not_signature() {
		let codec = CapabilityCodec::from_key(
			&SigningKey::new("s3cr3t").expect("Fixture secret should be valid."),
		)
		.expect("Codec should build from a valid secret.");
		let read = codec.create_signed_id();
		let write = codec.create_write_id(&read);

		assert_eq!(write.rid(), read.rid());
		assert_ne!(write.signature(), read.signature());

		let verified = codec
			.verify_write_id(&write.to_string())
			.expect("Derived write token should verify as a write token.");

		assert_eq!(verified, write);
		assert_eq!(
			codec.verify_write_id(&read.to_string()),
			Err(VerifyError::BadSignature { class: TokenClass::Write })
		);
		assert_eq!(
			codec.verify_signed_id(&write.to_string()),
			Err(VerifyError::BadSignature { class: TokenClass::Read })
		);
	}
}
