//! Short-lived bearer credentials presented to the notification provider.
//!
//! The provider authorizes a request as "the inbox whose external id is X". The inbox mints
//! that assertion itself as an HS256 compact JWS signed with the process secret; its lifetime
//! is independent of, and shorter than, the capability token it is derived from.

// crates.io
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use sha2::Sha256;
// self
use crate::{
	_prelude::*,
	capability::{ReadToken, SigningKey, TokenSecret},
	error::ConfigError,
	provider::ProviderDescriptor,
};

type HmacSha256 = Hmac<Sha256>;

/// Bearer credential accepted by the notification provider.
#[derive(Clone, Debug)]
pub struct ProviderCredential {
	/// Compact JWS; callers must avoid logging it.
	pub bearer: TokenSecret,
	/// Instant after which the provider refuses the credential.
	pub expires_at: OffsetDateTime,
}

#[derive(Serialize)]
struct Header {
	alg: &'static str,
}

#[derive(Serialize)]
struct Claims<'a> {
	user_email: Option<&'a str>,
	user_external_id: &'a str,
	api_key: &'a str,
	exp: i64,
}

/// Mints provider credentials for verified read tokens.
#[derive(Clone)]
pub struct CredentialIssuer {
	api_key: String,
	mac: HmacSha256,
	ttl: Duration,
}
impl CredentialIssuer {
	/// Default credential lifetime.
	pub const DEFAULT_TTL: Duration = Duration::days(7);
	/// Longest accepted credential lifetime.
	pub const MAX_TTL: Duration = Duration::days(365);

	/// Keys the issuer with the process secret and the provider's API key.
	pub fn new(descriptor: &ProviderDescriptor, key: &SigningKey) -> Result<Self, ConfigError> {
		let mac = HmacSha256::new_from_slice(key.expose()).map_err(|_| ConfigError::InvalidSecret)?;

		Ok(Self { api_key: descriptor.api_key.clone(), mac, ttl: Self::DEFAULT_TTL })
	}

	/// Overrides the credential lifetime (defaults to seven days, at most [`Self::MAX_TTL`]).
	pub fn with_ttl(mut self, ttl: Duration) -> Result<Self, ConfigError> {
		if !ttl.is_positive() {
			return Err(ConfigError::NonPositiveCredentialTtl);
		}
		if ttl > Self::MAX_TTL {
			return Err(ConfigError::CredentialTtlOutOfRange);
		}

		self.ttl = ttl;

		Ok(self)
	}

	/// Credential lifetime applied to every issued credential.
	pub fn ttl(&self) -> Duration {
		self.ttl
	}

	/// Issues a credential for `read`, valid from `now` for the configured lifetime.
	///
	/// Only call this with a token returned by verification, minting, or the bridge.
	pub fn issue_at(&self, read: &ReadToken, now: OffsetDateTime) -> Result<ProviderCredential> {
		let expires_at =
			now.checked_add(self.ttl).ok_or(ConfigError::CredentialTtlOutOfRange)?;
		let external_id = read.to_string();
		let header = serde_json::to_vec(&Header { alg: "HS256" })?;
		let claims = serde_json::to_vec(&Claims {
			user_email: None,
			user_external_id: &external_id,
			api_key: &self.api_key,
			exp: expires_at.unix_timestamp(),
		})?;
		let signing_input =
			format!("{}.{}", URL_SAFE_NO_PAD.encode(header), URL_SAFE_NO_PAD.encode(claims));
		let mut mac = self.mac.clone();

		mac.update(signing_input.as_bytes());

		let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

		Ok(ProviderCredential {
			bearer: TokenSecret::new(format!("{signing_input}.{signature}")),
			expires_at,
		})
	}

	/// Issues a credential valid from the current UTC instant.
	pub fn issue(&self, read: &ReadToken) -> Result<ProviderCredential> {
		self.issue_at(read, OffsetDateTime::now_utc())
	}
}
impl Debug for CredentialIssuer {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("CredentialIssuer").field("ttl", &self.ttl).finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros::datetime;
	// self
	use super::*;
	use crate::capability::CapabilityCodec;

	fn fixtures() -> (CapabilityCodec, CredentialIssuer) {
		let key = SigningKey::new("s3cr3t").expect("Fixture secret should be valid.");
		let descriptor = ProviderDescriptor::new(
			Url::parse("https://api.example.com").expect("Fixture URL should parse."),
			"pk_test",
		)
		.expect("Descriptor should build.");
		let codec = CapabilityCodec::from_key(&key).expect("Codec should build.");
		let issuer = CredentialIssuer::new(&descriptor, &key).expect("Issuer should build.");

		(codec, issuer)
	}

	fn decode_json(segment: &str) -> serde_json::Value {
		let bytes = URL_SAFE_NO_PAD.decode(segment).expect("JWS segment should be base64url.");

		serde_json::from_slice(&bytes).expect("JWS segment should be JSON.")
	}

	#[test]
	fn credential_carries_external_id_api_key_and_expiry() {
		let (codec, issuer) = fixtures();
		let read = codec.create_signed_id();
		let now = datetime!(2026-01-01 00:00 UTC);
		let credential = issuer.issue_at(&read, now).expect("Credential should be issued.");
		let parts = credential.bearer.expose().split('.').collect::<Vec<_>>();

		assert_eq!(parts.len(), 3);
		assert_eq!(decode_json(parts[0]), serde_json::json!({ "alg": "HS256" }));

		let claims = decode_json(parts[1]);

		assert_eq!(claims["user_email"], serde_json::Value::Null);
		assert_eq!(claims["user_external_id"], read.to_string());
		assert_eq!(claims["api_key"], "pk_test");
		assert_eq!(claims["exp"], datetime!(2026-01-08 00:00 UTC).unix_timestamp());
		assert_eq!(credential.expires_at, datetime!(2026-01-08 00:00 UTC));
	}

	#[test]
	fn credential_signature_verifies_with_process_secret() {
		let (codec, issuer) = fixtures();
		let credential =
			issuer.issue(&codec.create_signed_id()).expect("Credential should be issued.");
		let (signing_input, signature) = credential
			.bearer
			.expose()
			.rsplit_once('.')
			.expect("Compact JWS should contain a signature segment.");
		let mut mac = HmacSha256::new_from_slice(b"s3cr3t").expect("HMAC accepts any key.");

		mac.update(signing_input.as_bytes());
		mac.verify_slice(
			&URL_SAFE_NO_PAD.decode(signature).expect("Signature should be base64url."),
		)
		.expect("Signature should verify with the process secret.");
	}

	#[test]
	fn ttl_must_be_positive() {
		let (_, issuer) = fixtures();

		assert!(matches!(
			issuer.clone().with_ttl(Duration::ZERO),
			Err(ConfigError::NonPositiveCredentialTtl)
		));

		let issuer = issuer.with_ttl(Duration::hours(1)).expect("Positive TTL should be accepted.");

		assert_eq!(issuer.ttl(), Duration::hours(1));
	}

	#[test]
	fn oversized_ttl_is_refused_at_configuration() {
		let (_, issuer) = fixtures();

		assert!(matches!(
			issuer.clone().with_ttl(Duration::seconds(1_000_000_000_000)),
			Err(ConfigError::CredentialTtlOutOfRange)
		));
		assert!(matches!(
			issuer.clone().with_ttl(CredentialIssuer::MAX_TTL + Duration::SECOND),
			Err(ConfigError::CredentialTtlOutOfRange)
		));

		issuer.with_ttl(CredentialIssuer::MAX_TTL).expect("Maximum TTL should be accepted.");
	}

	#[test]
	fn unrepresentable_expiry_is_an_error() {
		let (codec, issuer) = fixtures();
		let err = issuer
			.issue_at(&codec.create_signed_id(), datetime!(9999-12-30 00:00 UTC))
			.expect_err("Expiry past the supported calendar must not panic.");

		assert!(matches!(err, Error::Config(ConfigError::CredentialTtlOutOfRange)));
	}
}
