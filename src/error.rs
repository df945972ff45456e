//! Inbox-level error types shared across the capability codec, provider calls, and the server.

// self
use crate::{_prelude::*, capability::VerifyError};

/// Inbox-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical inbox error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Temporary upstream failure; retry with backoff.
	#[error(transparent)]
	Transient(#[from] TransientError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// A capability token failed shape or signature verification.
	///
	/// Every variant of [`VerifyError`] must look the same to the caller; the inner reason
	/// exists for logs only.
	#[error("Capability token was rejected.")]
	Rejected(#[source] VerifyError),
	/// The notification payload could not be decoded.
	#[error("Notification payload is invalid.")]
	InvalidPayload {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// A credential or request body could not be encoded.
	#[error("Failed to encode JSON.")]
	Encode(#[from] serde_json::Error),
}
impl From<VerifyError> for Error {
	fn from(e: VerifyError) -> Self {
		Self::Rejected(e)
	}
}

/// Configuration and validation failures raised at startup.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Provider endpoint cannot be derived from the API base URL.
	#[error("Provider endpoint `{path}` is invalid.")]
	InvalidEndpoint {
		/// Relative path that failed to join.
		path: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Signing secret was empty.
	#[error("Signing secret must not be empty.")]
	EmptySecret,
	/// The keyed hash primitive rejected the secret.
	#[error("Signing secret cannot key HMAC-SHA-256.")]
	InvalidSecret,
	/// Provider API key was empty.
	#[error("Provider API key must not be empty.")]
	EmptyApiKey,
	/// Bearer credential lifetime was zero or negative.
	#[error("Credential lifetime must be positive.")]
	NonPositiveCredentialTtl,
	/// Bearer credential lifetime exceeds the supported maximum, or its expiry is not
	/// representable.
	#[error("Credential lifetime is out of range.")]
	CredentialTtlOutOfRange,
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Temporary failure variants (safe to retry).
#[derive(Debug, ThisError)]
pub enum TransientError {
	/// Provider answered with a non-success status.
	#[error("Notification provider responded with status {status}.")]
	Upstream {
		/// HTTP status code.
		status: u16,
		/// Retry-After hint from upstream, if supplied.
		retry_after: Option<Duration>,
	},
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the notification provider.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while serving or calling the notification provider.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::error::Error as StdError;
	// self
	use super::*;
	use crate::capability::TokenClass;

	#[test]
	fn rejection_hides_reason_in_display_but_keeps_source() {
		let malformed: Error = VerifyError::Malformed { len: 3 }.into();
		let forged: Error = VerifyError::BadSignature { class: TokenClass::Write }.into();

		assert_eq!(malformed.to_string(), forged.to_string());

		let source = StdError::source(&forged)
			.expect("Rejected errors should expose the verification reason as their source.");

		assert!(source.to_string().contains("write"));
	}

	#[test]
	fn transient_error_reports_status() {
		let err: Error = TransientError::Upstream { status: 503, retry_after: None }.into();

		assert!(matches!(err, Error::Transient(_)));
		assert!(err.to_string().contains("503"));
	}
}
