//! Mapping inbox errors onto HTTP responses.

// crates.io
use axum::{
	Json,
	http::StatusCode,
	response::{IntoResponse, Response},
};
// self
use crate::_prelude::*;

/// Body of every `POST /send/{write_id}` response.
#[derive(Debug, Serialize)]
pub(super) struct SendReply {
	ok: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	error: Option<&'static str>,
}
impl SendReply {
	pub(super) fn ok() -> Self {
		Self { ok: true, error: None }
	}
}

/// Error rendered as plain text for page-style routes.
#[derive(Debug)]
pub(super) struct PageError(pub(super) Error);
impl From<Error> for PageError {
	fn from(e: Error) -> Self {
		Self(e)
	}
}
impl IntoResponse for PageError {
	fn into_response(self) -> Response {
		let (status, message) = classify(&self.0);

		(status, message).into_response()
	}
}

/// Error rendered as a JSON [`SendReply`] for the send endpoint.
#[derive(Debug)]
pub(super) struct SendError(pub(super) Error);
impl From<Error> for SendError {
	fn from(e: Error) -> Self {
		Self(e)
	}
}
impl IntoResponse for SendError {
	fn into_response(self) -> Response {
		let (status, message) = classify(&self.0);

		(status, Json(SendReply { ok: false, error: Some(message) })).into_response()
	}
}

/// Status and public message for an error.
///
/// Nothing from the error's source chain reaches the response: rejection reasons and
/// provider details stay in the logs.
fn classify(error: &Error) -> (StatusCode, &'static str) {
	match error {
		Error::Rejected(_) => (StatusCode::NOT_FOUND, "Not found"),
		Error::InvalidPayload { .. } => (StatusCode::BAD_REQUEST, "Invalid payload"),
		Error::Transient(_) | Error::Transport(_) => (StatusCode::BAD_GATEWAY, "Failed to send"),
		Error::Config(_) | Error::Encode(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal error"),
	}
}
