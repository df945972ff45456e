//! Request-scoped inbox operations composed from the capability codec and the provider.

pub mod manifest;
pub mod og_image;
pub mod send;
pub mod session;

pub use manifest::*;
pub use og_image::*;
pub use send::*;
pub use session::*;

// self
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;
use crate::{
	_prelude::*,
	capability::{CapabilityCodec, ReadToken, VerifyError, WriteToken},
	config::InboxConfig,
	error::ConfigError,
	http::ProviderHttpClient,
	obs::{self, InboxOp, OpOutcome, OpSpan},
	provider::{CredentialIssuer, ProviderDescriptor, QrCodeService},
};

#[cfg(feature = "reqwest")]
/// Inbox specialized for the crate's default reqwest transport.
pub type ReqwestInbox = Inbox<ReqwestHttpClient>;

/// Verifies capability tokens and fronts the notification provider on their behalf.
///
/// Holds only immutable, process-wide state (the codec's key, the provider descriptor, and the
/// credential issuer); each operation is independent, so one instance serves every request.
#[derive(Clone)]
pub struct Inbox<C>
where
	C: ?Sized + ProviderHttpClient,
{
	/// Capability codec keyed with the process secret.
	pub codec: CapabilityCodec,
	/// Provider endpoints and API key.
	pub descriptor: ProviderDescriptor,
	/// Issuer for provider bearer credentials.
	pub issuer: CredentialIssuer,
	/// QR renderer for share images.
	pub qr: QrCodeService,
	/// HTTP client used for every provider call.
	pub http_client: Arc<C>,
}
impl<C> Inbox<C>
where
	C: ?Sized + ProviderHttpClient,
{
	/// Builds an inbox around a caller-provided transport.
	///
	/// Every key and endpoint is validated here so a misconfigured process fails at startup
	/// instead of on the first request.
	pub fn with_http_client(
		config: InboxConfig,
		http_client: impl Into<Arc<C>>,
	) -> Result<Self, ConfigError> {
		let codec = CapabilityCodec::from_key(&config.api_secret)?;
		let descriptor = ProviderDescriptor::new(config.api_url, config.api_key)?;
		let issuer = CredentialIssuer::new(&descriptor, &config.api_secret)?
			.with_ttl(config.credential_ttl)?;
		let qr = QrCodeService::new(config.qr_api_url)?;

		Ok(Self { codec, descriptor, issuer, qr, http_client: http_client.into() })
	}

	/// Mints a capability for a brand-new inbox.
	pub fn mint(&self) -> ReadToken {
		let _span = OpSpan::new(InboxOp::Mint).entered();

		obs::record_op_outcome(InboxOp::Mint, OpOutcome::Attempt);

		let token = self.codec.create_signed_id();

		obs::record_op_outcome(InboxOp::Mint, OpOutcome::Success);

		token
	}

	pub(crate) fn verify_read(&self, op: InboxOp, token: &str) -> Result<ReadToken> {
		self.codec.verify_signed_id(token).map_err(|e| reject(op, e))
	}

	pub(crate) fn verify_write(&self, op: InboxOp, token: &str) -> Result<WriteToken> {
		self.codec.verify_write_id(token).map_err(|e| reject(op, e))
	}

	/// Runs a synchronous operation inside its span and records the outcome.
	pub(crate) fn observe<T>(&self, op: InboxOp, f: impl FnOnce() -> Result<T>) -> Result<T> {
		let _span = OpSpan::new(op).entered();

		obs::record_op_outcome(op, OpOutcome::Attempt);

		let result = f();

		finish(op, &result);

		result
	}

	/// Runs an asynchronous operation instrumented with its span and records the outcome.
	pub(crate) async fn observe_async<T, Fut>(&self, op: InboxOp, fut: Fut) -> Result<T>
	where
		Fut: Future<Output = Result<T>>,
	{
		let span = OpSpan::new(op);

		obs::record_op_outcome(op, OpOutcome::Attempt);

		let result = span.instrument(fut).await;

		finish(op, &result);

		result
	}
}
#[cfg(feature = "reqwest")]
impl Inbox<ReqwestHttpClient> {
	/// Creates an inbox backed by a default reqwest client.
	pub fn new(config: InboxConfig) -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder().build()?;

		Self::with_http_client(config, ReqwestHttpClient::with_client(client))
	}
}
impl<C> Debug for Inbox<C>
where
	C: ?Sized + ProviderHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Inbox")
			.field("descriptor", &self.descriptor)
			.field("issuer", &self.issuer)
			.finish()
	}
}

fn reject(op: InboxOp, reason: VerifyError) -> Error {
	obs::log_rejection(op, &reason);

	Error::Rejected(reason)
}

/// Records the final outcome of an operation and logs non-rejection failures.
fn finish<T>(op: InboxOp, result: &Result<T>) {
	let outcome = OpOutcome::of(result);

	obs::record_op_outcome(op, outcome);

	if let (OpOutcome::Failure, Err(e)) = (outcome, result) {
		obs::log_failure(op, e);
	}
}
