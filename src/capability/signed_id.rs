//! Read capability tokens (`rid || sign(rid)`).

// self
use crate::capability::{CapabilityCodec, ReadToken, Rid, Signer, TokenClass, VerifyError};

impl<S> CapabilityCodec<S>
where
	S: Signer,
{
	/// Mints a read token for a freshly generated identifier.
	pub fn create_signed_id(&self) -> ReadToken {
		let (rid, sig) = self.seal(TokenClass::Read, Rid::generate());

		ReadToken::from_parts(rid, sig)
	}

	/// Verifies a candidate read token taken from untrusted input.
	///
	/// Length and alphabet are checked before any signature is computed. On success the
	/// returned token's [`rid`](ReadToken::rid) is the authenticated identifier.
	pub fn verify_signed_id(&self, token: &str) -> Result<ReadToken, VerifyError> {
		let (rid, sig) = self.open(TokenClass::Read, token)?;

		Ok(ReadToken::from_parts(rid, sig))
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::capability::{SigningKey, TOKEN_LEN};

	fn codec(secret: &str) -> CapabilityCodec {
		CapabilityCodec::from_key(&SigningKey::new(secret).expect("Fixture secret is valid."))
			.expect("Codec should build from a valid secret.")
	}

	#[test]
	fn minted_tokens_verify_to_their_identifier() {
		let codec = codec("s3cr3t");
		let token = codec.create_signed_id();
		let rendered = token.to_string();

		assert_eq!(rendered.len(), TOKEN_LEN);

		let verified =
			codec.verify_signed_id(&rendered).expect("Freshly minted token should verify.");

		assert_eq!(verified.rid(), token.rid());
		assert_eq!(verified, token);
	}

	#[test]
	fn foreign_key_and_tampering_are_rejected() {
		let token = codec("s3cr3t").create_signed_id().to_string();

		assert_eq!(
			codec("other-key").verify_signed_id(&token),
			Err(VerifyError::BadSignature { class: TokenClass::Read })
		);
		assert_eq!(codec("s3cr3t").verify_signed_id(""), Err(VerifyError::Malformed { len: 0 }));
	}
}
