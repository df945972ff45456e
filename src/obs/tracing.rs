// self
use crate::{_prelude::*, capability::VerifyError, obs::InboxOp};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedOp<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedOp<F> = F;

/// A span builder used by inbox operations.
#[derive(Debug)]
pub struct OpSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl OpSpan {
	/// Creates a new span tagged with the provided operation.
	pub fn new(op: InboxOp) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("pwa_inbox.op", op = op.as_str());

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = op;

			Self {}
		}
	}

	/// Enters the span for synchronous sections.
	pub fn entered(self) -> OpSpanGuard {
		#[cfg(feature = "tracing")]
		{
			OpSpanGuard { guard: self.span.entered() }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = self;

			OpSpanGuard {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedOp<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// RAII guard returned by [`OpSpan::entered`].
pub struct OpSpanGuard {
	#[cfg(feature = "tracing")]
	#[allow(dead_code)]
	guard: tracing::span::EnteredSpan,
}
impl Debug for OpSpanGuard {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("OpSpanGuard(..)")
	}
}

/// Logs why a token was rejected. The reason never reaches the caller.
pub fn log_rejection(op: InboxOp, reason: &VerifyError) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(op = op.as_str(), reason = reason.as_str(), "{reason}");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (op, reason);
	}
}

/// Logs a failure that is not a token rejection.
pub fn log_failure(op: InboxOp, error: &Error) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(op = op.as_str(), error = %error, "inbox operation failed");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (op, error);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn op_span_noop_without_tracing() {
		let _guard = OpSpan::new(InboxOp::Open).entered();
		// Compile-time smoke test ensures the guard exists even when tracing is disabled.
	}

	#[cfg(feature = "tracing")]
	#[tokio::test]
	async fn instrument_wraps_future() {
		let span = OpSpan::new(InboxOp::Send);
		let value = span.instrument(async { 42 }).await;

		assert_eq!(value, 42);
	}
}
