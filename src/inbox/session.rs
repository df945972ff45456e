//! Opening an inbox with a read token.

// self
use crate::{
	_prelude::*,
	capability::{ReadToken, WriteToken},
	http::ProviderHttpClient,
	inbox::Inbox,
	obs::InboxOp,
	provider::ProviderCredential,
};

/// Everything an inbox client needs after presenting a valid read token.
#[derive(Clone, Debug)]
pub struct InboxSession {
	/// The verified read token.
	pub read_token: ReadToken,
	/// Send-only token for the same inbox, safe to share with senders.
	pub write_token: WriteToken,
	/// Bearer credential for the provider's inbox API.
	pub credential: ProviderCredential,
	/// Provider API base URL the client talks to directly.
	pub api_url: Url,
	/// Server clock at issue time, for client-side skew correction.
	pub server_time: OffsetDateTime,
}

impl<C> Inbox<C>
where
	C: ?Sized + ProviderHttpClient,
{
	/// Verifies a read token and issues the session for its inbox.
	pub fn open(&self, token: &str) -> Result<InboxSession> {
		self.open_at(token, OffsetDateTime::now_utc())
	}

	/// Same as [`Inbox::open`] with an explicit clock.
	pub fn open_at(&self, token: &str, now: OffsetDateTime) -> Result<InboxSession> {
		self.observe(InboxOp::Open, || {
			let read_token = self.verify_read(InboxOp::Open, token)?;
			let credential = self.issuer.issue_at(&read_token, now)?;
			let write_token = self.codec.create_write_id(&read_token);

			Ok(InboxSession {
				read_token,
				write_token,
				credential,
				api_url: self.descriptor.api_url.clone(),
				server_time: now,
			})
		})
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros::datetime;
	// self
	use super::*;
	use crate::{
		capability::{SigningKey, TokenClass, VerifyError},
		config::InboxConfig,
		error::ConfigError,
		http::{FetchFuture, FetchedBody, HttpFuture, ResponseMetadata},
	};

	struct NoopClient;
	impl ProviderHttpClient for NoopClient {
		fn post_json<'a>(
			&'a self,
			_url: &'a Url,
			_bearer: &'a crate::capability::TokenSecret,
			_body: Vec<u8>,
		) -> HttpFuture<'a> {
			Box::pin(async { Ok(ResponseMetadata { status: 200, retry_after: None }) })
		}

		fn get<'a>(&'a self, _url: &'a Url) -> FetchFuture<'a> {
			Box::pin(async { Ok(FetchedBody::default()) })
		}
	}

	fn config() -> InboxConfig {
		InboxConfig::new(
			Url::parse("https://api.example.com").expect("Fixture URL should parse."),
			"pk",
			SigningKey::new("s3cr3t").expect("Fixture secret should be valid."),
		)
	}

	fn inbox() -> Inbox<NoopClient> {
		Inbox::with_http_client(config(), NoopClient).expect("Inbox should build.")
	}

	#[test]
	fn open_issues_paired_write_token_and_credential() {
		let inbox = inbox();
		let read = inbox.mint();
		let now = datetime!(2026-03-01 12:00 UTC);
		let session = inbox.open_at(&read.to_string(), now).expect("Minted token should open.");

		assert_eq!(session.read_token, read);
		assert_eq!(session.write_token.rid(), read.rid());
		assert_eq!(session.credential.expires_at, datetime!(2026-03-08 12:00 UTC));
		assert_eq!(session.server_time, now);
		assert_eq!(session.api_url.as_str(), "https://api.example.com/");
	}

	#[test]
	fn open_rejects_write_tokens() {
		let inbox = inbox();
		let write = inbox.codec.create_write_id(&inbox.mint());
		let err = inbox.open(&write.to_string()).expect_err("Write tokens must not open inboxes.");

		assert!(matches!(
			err,
			Error::Rejected(VerifyError::BadSignature { class: TokenClass::Read })
		));
	}

	#[test]
	fn oversized_credential_ttl_refuses_to_build() {
		let err = Inbox::<NoopClient>::with_http_client(
			config().with_credential_ttl(Duration::seconds(1_000_000_000_000)),
			NoopClient,
		)
		.expect_err("An expiry past the supported calendar must fail at startup.");

		assert!(matches!(err, ConfigError::CredentialTtlOutOfRange));
	}
}
