//! Optional observability helpers for inbox operations.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `pwa_inbox.op` with the `op` field, plus
//!   `debug` events for rejected tokens and `warn` events for provider failures.
//! - Enable `metrics` to increment the `pwa_inbox_op_total` counter for every
//!   attempt/success/rejection/failure, labeled by `op` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Inbox operations observed at the request boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InboxOp {
	/// Minting a fresh inbox capability.
	Mint,
	/// Opening an inbox with a read token.
	Open,
	/// Serving the scoped web app manifest.
	Manifest,
	/// Rendering the share image for an inbox.
	OgImage,
	/// Describing the send endpoint for a write token.
	SendTarget,
	/// Forwarding a notification with a write token.
	Send,
}
impl InboxOp {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			InboxOp::Mint => "mint",
			InboxOp::Open => "open",
			InboxOp::Manifest => "manifest",
			InboxOp::OgImage => "og_image",
			InboxOp::SendTarget => "send_target",
			InboxOp::Send => "send",
		}
	}
}
impl Display for InboxOp {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpOutcome {
	/// Entry to an inbox operation.
	Attempt,
	/// Successful completion.
	Success,
	/// A capability token failed verification.
	Rejected,
	/// Any other failure propagated back to the caller.
	Failure,
}
impl OpOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OpOutcome::Attempt => "attempt",
			OpOutcome::Success => "success",
			OpOutcome::Rejected => "rejected",
			OpOutcome::Failure => "failure",
		}
	}

	/// Classifies a finished operation.
	pub fn of<T>(result: &Result<T>) -> Self {
		match result {
			Ok(_) => OpOutcome::Success,
			Err(Error::Rejected(_)) => OpOutcome::Rejected,
			Err(_) => OpOutcome::Failure,
		}
	}
}
impl Display for OpOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::capability::VerifyError;

	#[test]
	fn outcome_distinguishes_rejections() {
		let rejected: Result<()> = Err(VerifyError::Malformed { len: 1 }.into());
		let failed: Result<()> = Err(crate::error::ConfigError::EmptyApiKey.into());

		assert_eq!(OpOutcome::of(&Ok::<_, Error>(())), OpOutcome::Success);
		assert_eq!(OpOutcome::of(&rejected), OpOutcome::Rejected);
		assert_eq!(OpOutcome::of(&failed), OpOutcome::Failure);
	}
}
