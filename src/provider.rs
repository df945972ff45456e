//! Notification provider boundary: endpoints, bearer credentials, payloads, and the QR
//! renderer used for share images.

pub mod credential;
pub mod payload;
pub mod qr;

pub use credential::*;
pub use payload::*;
pub use qr::*;

// self
use crate::{_prelude::*, error::ConfigError};

const ECHO_PATH: &str = "codeinbox/echo";

/// Describes the hosted notification provider the inbox delegates to.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderDescriptor {
	/// REST API base URL. Handed to inbox clients as-is.
	pub api_url: Url,
	/// Public API key embedded in every bearer credential.
	pub api_key: String,
	echo_endpoint: Url,
}
impl ProviderDescriptor {
	/// Validates the API key and precomputes provider endpoints.
	pub fn new(api_url: Url, api_key: impl Into<String>) -> Result<Self, ConfigError> {
		let api_key = api_key.into();

		if api_key.is_empty() {
			return Err(ConfigError::EmptyApiKey);
		}

		let echo_endpoint = join_endpoint(&api_url, ECHO_PATH)?;

		Ok(Self { api_url, api_key, echo_endpoint })
	}

	/// Endpoint that delivers a notification to the inbox identified by the bearer credential.
	pub fn echo_endpoint(&self) -> &Url {
		&self.echo_endpoint
	}
}
impl Debug for ProviderDescriptor {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ProviderDescriptor")
			.field("api_url", &self.api_url.as_str())
			.field("api_key_set", &!self.api_key.is_empty())
			.finish()
	}
}

/// Appends `path` below the API base, keeping any base path segments.
fn join_endpoint(base: &Url, path: &str) -> Result<Url, ConfigError> {
	let mut base = base.clone();

	if !base.path().ends_with('/') {
		let with_slash = format!("{}/", base.path());

		base.set_path(&with_slash);
	}

	base.join(path)
		.map_err(|source| ConfigError::InvalidEndpoint { path: path.to_owned(), source })
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn url(value: &str) -> Url {
		Url::parse(value).expect("Fixture URL should parse.")
	}

	#[test]
	fn echo_endpoint_keeps_base_path() {
		let bare = ProviderDescriptor::new(url("https://api.example.com"), "pk")
			.expect("Descriptor should build.");
		let nested = ProviderDescriptor::new(url("https://api.example.com/v2"), "pk")
			.expect("Descriptor should build.");
		let slashed = ProviderDescriptor::new(url("https://api.example.com/v2/"), "pk")
			.expect("Descriptor should build.");

		assert_eq!(bare.echo_endpoint().as_str(), "https://api.example.com/codeinbox/echo");
		assert_eq!(nested.echo_endpoint().as_str(), "https://api.example.com/v2/codeinbox/echo");
		assert_eq!(slashed.echo_endpoint(), nested.echo_endpoint());
		assert_eq!(nested.api_url.as_str(), "https://api.example.com/v2");
	}

	#[test]
	fn empty_api_key_is_rejected() {
		let err = ProviderDescriptor::new(url("https://api.example.com"), "")
			.expect_err("Empty API keys must be refused.");

		assert!(matches!(err, ConfigError::EmptyApiKey));
	}
}
