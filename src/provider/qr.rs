//! QR code rendering service used for inbox share images.

// self
use crate::{_prelude::*, error::ConfigError};

/// Public QR rendering endpoint used when none is configured.
pub const DEFAULT_QR_API_URL: &str = "https://api.qrserver.com/v1/create-qr-code/";

const QR_SIZE: &str = "600x600";

/// Renders URLs as PNG QR codes through an external HTTP service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QrCodeService {
	endpoint: Url,
}
impl QrCodeService {
	/// Uses `endpoint`, or [`DEFAULT_QR_API_URL`] when absent.
	pub fn new(endpoint: Option<Url>) -> Result<Self, ConfigError> {
		let endpoint = match endpoint {
			Some(endpoint) => endpoint,
			None => Url::parse(DEFAULT_QR_API_URL).map_err(|source| {
				ConfigError::InvalidEndpoint { path: DEFAULT_QR_API_URL.into(), source }
			})?,
		};

		Ok(Self { endpoint })
	}

	/// Rendering endpoint without query parameters.
	pub fn endpoint(&self) -> &Url {
		&self.endpoint
	}

	/// URL whose response is a square PNG encoding `data`.
	pub fn image_url(&self, data: &Url) -> Url {
		let mut url = self.endpoint.clone();

		url.query_pairs_mut().append_pair("size", QR_SIZE).append_pair("data", data.as_str());

		url
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn image_url_encodes_page_url() {
		let qr = QrCodeService::new(None).expect("Default endpoint should parse.");
		let page = Url::parse("https://inbox.example.com/AbCdEfGh123456?x=1&y=2")
			.expect("Fixture URL should parse.");
		let url = qr.image_url(&page);

		assert_eq!(url.path(), "/v1/create-qr-code/");
		assert_eq!(
			url.query_pairs().collect::<Vec<_>>(),
			vec![("size".into(), "600x600".into()), ("data".into(), page.as_str().into())]
		);
		assert!(url.as_str().contains("data=https%3A%2F%2Finbox.example.com%2F"));
	}

	#[test]
	fn configured_endpoint_wins() {
		let endpoint = Url::parse("http://127.0.0.1:9/qr").expect("Fixture URL should parse.");
		let qr = QrCodeService::new(Some(endpoint.clone())).expect("Endpoint should be accepted.");

		assert_eq!(qr.endpoint(), &endpoint);
	}
}
