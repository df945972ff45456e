//! Share image for an inbox: a QR code of its page URL.

// self
use crate::{
	_prelude::*,
	error::{ConfigError, TransientError},
	http::ProviderHttpClient,
	inbox::Inbox,
	obs::InboxOp,
};

/// `Cache-Control` value for share images; the image only depends on the token.
pub const OG_IMAGE_CACHE_CONTROL: &str = "public, max-age=86400";

/// PNG bytes returned by the QR renderer.
#[derive(Clone, PartialEq, Eq)]
pub struct OgImage {
	/// Raw image body, passed through unchanged.
	pub png: Vec<u8>,
}
impl Debug for OgImage {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("OgImage").field("len", &self.png.len()).finish()
	}
}

impl<C> Inbox<C>
where
	C: ?Sized + ProviderHttpClient,
{
	/// Verifies a read token and renders the QR code of its inbox URL under `origin`.
	///
	/// The renderer is only contacted after verification succeeds.
	pub async fn og_image(&self, token: &str, origin: &Url) -> Result<OgImage> {
		self.observe_async(InboxOp::OgImage, async move {
			let read = self.verify_read(InboxOp::OgImage, token)?;
			let path = format!("/{read}");
			let page_url =
				origin.join(&path).map_err(|source| ConfigError::InvalidEndpoint { path, source })?;
			let fetched = self.http_client.get(&self.qr.image_url(&page_url)).await?;

			if !fetched.meta.is_success() {
				return Err(TransientError::Upstream {
					status: fetched.meta.status,
					retry_after: fetched.meta.retry_after,
				}
				.into());
			}

			Ok(OgImage { png: fetched.body })
		})
		.await
	}
}
