//! Process configuration: the validated library config and the server's CLI/env surface.

// self
use crate::{_prelude::*, capability::SigningKey};

/// Validated configuration for an [`Inbox`](crate::inbox::Inbox).
#[derive(Clone, Debug)]
pub struct InboxConfig {
	/// Provider REST API base URL.
	pub api_url: Url,
	/// Provider public API key.
	pub api_key: String,
	/// Process-wide secret used for capability tokens and provider credentials.
	pub api_secret: SigningKey,
	/// Lifetime of issued provider credentials.
	pub credential_ttl: Duration,
	/// QR rendering endpoint for share images; the public service when unset.
	pub qr_api_url: Option<Url>,
}
impl InboxConfig {
	/// Creates a config with the default seven-day credential lifetime.
	pub fn new(api_url: Url, api_key: impl Into<String>, api_secret: SigningKey) -> Self {
		Self {
			api_url,
			api_key: api_key.into(),
			api_secret,
			credential_ttl: crate::provider::CredentialIssuer::DEFAULT_TTL,
			qr_api_url: None,
		}
	}

	/// Overrides the provider credential lifetime.
	pub fn with_credential_ttl(mut self, ttl: Duration) -> Self {
		self.credential_ttl = ttl;

		self
	}

	/// Overrides the QR rendering endpoint.
	pub fn with_qr_api_url(mut self, url: Url) -> Self {
		self.qr_api_url = Some(url);

		self
	}
}

/// Command-line and environment configuration for the `pwa-inbox` server.
#[cfg(feature = "server")]
#[derive(Clone, Debug, clap::Parser)]
#[command(name = "pwa-inbox", version, about)]
pub struct ServerConfig {
	/// Socket address to listen on.
	#[arg(long, env = "PWA_INBOX_LISTEN", default_value = "0.0.0.0:8787")]
	pub listen: std::net::SocketAddr,
	/// Public origin used to build absolute inbox and send URLs.
	#[arg(long, env = "PUBLIC_URL", default_value = "http://localhost:8787")]
	pub public_url: Url,
	/// Notification provider REST API base URL.
	#[arg(long, env = "API_URL")]
	pub api_url: Url,
	/// Notification provider public API key.
	#[arg(long, env = "API_KEY")]
	pub api_key: String,
	/// Shared secret for capability tokens and provider credentials.
	#[arg(long, env = "API_SECRET", hide_env_values = true)]
	pub api_secret: SigningKey,
	/// Optional analytics key handed to inbox clients.
	#[arg(long, env = "POSTHOG_API_KEY")]
	pub posthog_key: Option<String>,
	/// Provider credential lifetime in seconds.
	#[arg(long, env = "CREDENTIAL_TTL_SECS", default_value_t = 604_800)]
	pub credential_ttl_secs: i64,
	/// QR rendering endpoint for share images.
	#[arg(long, env = "QR_API_URL")]
	pub qr_api_url: Option<Url>,
}
#[cfg(feature = "server")]
impl ServerConfig {
	/// Projects the library configuration out of the server flags.
	pub fn inbox_config(&self) -> InboxConfig {
		let config =
			InboxConfig::new(self.api_url.clone(), self.api_key.clone(), self.api_secret.clone())
				.with_credential_ttl(Duration::seconds(self.credential_ttl_secs));

		match &self.qr_api_url {
			Some(url) => config.with_qr_api_url(url.clone()),
			None => config,
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn inbox_config_defaults_to_seven_day_credentials() {
		let config = InboxConfig::new(
			Url::parse("https://api.example.com").expect("Fixture URL should parse."),
			"pk",
			SigningKey::new("s3cr3t").expect("Non-empty secret should parse."),
		);

		assert_eq!(config.credential_ttl, Duration::days(7));
		assert_eq!(config.qr_api_url, None);
	}

	#[cfg(feature = "server")]
	#[test]
	fn server_config_parses_flags() {
		use clap::Parser;

		let config = ServerConfig::try_parse_from([
			"pwa-inbox",
			"--api-url",
			"https://api.example.com",
			"--api-key",
			"pk",
			"--api-secret",
			"s3cr3t",
			"--credential-ttl-secs",
			"3600",
		])
		.expect("Flags should parse.");

		assert_eq!(config.listen.port(), 8787);
		assert_eq!(config.public_url.as_str(), "http://localhost:8787/");
		assert_eq!(config.inbox_config().credential_ttl, Duration::hours(1));
		assert!(!format!("{config:?}").contains("s3cr3t"));
	}

	#[cfg(feature = "server")]
	#[test]
	fn server_config_refuses_empty_secret() {
		use clap::Parser;

		let result = ServerConfig::try_parse_from([
			"pwa-inbox",
			"--api-url",
			"https://api.example.com",
			"--api-key",
			"pk",
			"--api-secret",
			"",
		]);

		assert!(result.is_err());
	}
}
