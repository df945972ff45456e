//! Outbound transport for notification provider calls.
//!
//! [`ProviderHttpClient`] is the inbox's only dependency on an HTTP stack. The provider's
//! response body is never read back into the inbox, so `post_json` only reports the status
//! and any retry hint through [`ResponseMetadata`]. `get` is used for share images and hands
//! the body back untouched.

// self
use crate::{_prelude::*, capability::TokenSecret, error::TransportError};
#[cfg(feature = "reqwest")]
use {
	reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, RETRY_AFTER},
	std::ops::Deref,
	time::format_description::well_known::Rfc2822,
};

/// Boxed future returned by [`ProviderHttpClient::post_json`].
pub type HttpFuture<'a> =
	Pin<Box<dyn Future<Output = Result<ResponseMetadata, TransportError>> + 'a + Send>>;

/// Boxed future returned by [`ProviderHttpClient::get`].
pub type FetchFuture<'a> =
	Pin<Box<dyn Future<Output = Result<FetchedBody, TransportError>> + 'a + Send>>;

/// HTTP transport capable of posting JSON to the provider with a bearer credential.
pub trait ProviderHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Posts `body` as `application/json` to `url`, authorized by `bearer`.
	///
	/// Non-success statuses are not errors at this layer; they are reported in the returned
	/// metadata. Only failures to complete the exchange map to [`TransportError`].
	fn post_json<'a>(&'a self, url: &'a Url, bearer: &'a TokenSecret, body: Vec<u8>)
	-> HttpFuture<'a>;

	/// Fetches `url` without credentials and returns the raw response body.
	fn get<'a>(&'a self, url: &'a Url) -> FetchFuture<'a>;
}

/// Status and retry information captured from a provider response.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResponseMetadata {
	/// HTTP status code returned by the provider.
	pub status: u16,
	/// Retry-After hint expressed as a relative duration.
	pub retry_after: Option<Duration>,
}
impl ResponseMetadata {
	/// Returns `true` for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

/// Response of an unauthenticated [`ProviderHttpClient::get`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FetchedBody {
	/// Status and retry information.
	pub meta: ResponseMetadata,
	/// Raw response body.
	pub body: Vec<u8>,
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ProviderHttpClient for ReqwestHttpClient {
	fn post_json<'a>(
		&'a self,
		url: &'a Url,
		bearer: &'a TokenSecret,
		body: Vec<u8>,
	) -> HttpFuture<'a> {
		Box::pin(async move {
			let response = self
				.0
				.post(url.clone())
				.header(AUTHORIZATION, format!("Bearer {}", bearer.expose()))
				.header(CONTENT_TYPE, "application/json")
				.body(body)
				.send()
				.await?;
			let status = response.status().as_u16();
			let retry_after = parse_retry_after(response.headers());

			Ok(ResponseMetadata { status, retry_after })
		})
	}

	fn get<'a>(&'a self, url: &'a Url) -> FetchFuture<'a> {
		Box::pin(async move {
			let response = self.0.get(url.clone()).send().await?;
			let meta = ResponseMetadata {
				status: response.status().as_u16(),
				retry_after: parse_retry_after(response.headers()),
			};
			let body = response.bytes().await?.to_vec();

			Ok(FetchedBody { meta, body })
		})
	}
}

#[cfg(feature = "reqwest")]
fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
	let value = headers.get(RETRY_AFTER)?;
	let raw = value.to_str().ok()?.trim();

	if let Ok(secs) = raw.parse::<u32>() {
		return Some(Duration::seconds(secs.into()));
	}
	if let Ok(moment) = OffsetDateTime::parse(raw, &Rfc2822) {
		let delta = moment - OffsetDateTime::now_utc();

		if delta.is_positive() {
			return Some(delta);
		}
	}

	None
}
