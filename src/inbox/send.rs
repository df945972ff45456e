//! Write-token operations: describing the send endpoint and forwarding notifications.

// self
use crate::{
	_prelude::*,
	capability::WriteToken,
	error::{ConfigError, TransientError},
	http::ProviderHttpClient,
	inbox::Inbox,
	obs::InboxOp,
	provider::{self, NotificationPayload},
};

/// Public description of a send endpoint, handed to whoever holds the write token.
#[derive(Clone, Debug, Serialize)]
pub struct SendTarget {
	/// The verified write token.
	pub write_token: WriteToken,
	/// Absolute URL accepting `POST` requests with a JSON payload.
	pub send_url: Url,
	/// Ready-to-run `curl` example against `send_url`.
	pub curl: String,
}

impl<C> Inbox<C>
where
	C: ?Sized + ProviderHttpClient,
{
	/// Verifies a write token and returns its absolute send URL under `origin`.
	pub fn send_target(&self, token: &str, origin: &Url) -> Result<SendTarget> {
		self.observe(InboxOp::SendTarget, || {
			let write_token = self.verify_write(InboxOp::SendTarget, token)?;
			let send_url = send_url(origin, &write_token)?;
			let curl = provider::curl_snippet(&send_url);

			Ok(SendTarget { write_token, send_url, curl })
		})
	}

	/// Verifies a write token and forwards `payload` to its inbox.
	pub async fn send(&self, token: &str, payload: NotificationPayload) -> Result<()> {
		self.run_send(token, || Ok(payload)).await
	}

	/// Verifies a write token, then decodes `body` and forwards it to the inbox.
	///
	/// The token is checked first so an invalid token is never distinguishable by payload.
	pub async fn send_json(&self, token: &str, body: &[u8]) -> Result<()> {
		self.run_send(token, || NotificationPayload::from_json(body)).await
	}

	async fn run_send<F>(&self, token: &str, payload: F) -> Result<()>
	where
		F: Send + FnOnce() -> Result<NotificationPayload>,
	{
		self.observe_async(InboxOp::Send, async move {
			let write = self.verify_write(InboxOp::Send, token)?;
			let payload = payload()?;

			self.deliver(&write, payload).await
		})
		.await
	}

	async fn deliver(&self, write: &WriteToken, payload: NotificationPayload) -> Result<()> {
		// The bridged read token authorizes upstream only; it never leaves this function.
		let read = self.codec.derive_read_id(write);
		let credential = self.issuer.issue(&read)?;
		let body = serde_json::to_vec(&payload.normalize())?;
		let meta = self
			.http_client
			.post_json(self.descriptor.echo_endpoint(), &credential.bearer, body)
			.await?;

		if !meta.is_success() {
			return Err(TransientError::Upstream {
				status: meta.status,
				retry_after: meta.retry_after,
			}
			.into());
		}

		Ok(())
	}
}

pub(crate) fn send_url(origin: &Url, write: &WriteToken) -> Result<Url, ConfigError> {
	let path = format!("/send/{write}");

	origin.join(&path).map_err(|source| ConfigError::InvalidEndpoint { path, source })
}
