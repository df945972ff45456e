//! Route handlers. Each one verifies its path token through the inbox before doing anything else.

// crates.io
use axum::{
	Json,
	body::Bytes,
	extract::{Path, State},
	http::{
		HeaderMap,
		header::{CACHE_CONTROL, CONTENT_TYPE, USER_AGENT},
	},
	response::{Html, IntoResponse, Redirect, Response},
};
// self
use crate::{
	_prelude::*,
	error::ConfigError,
	inbox::{self, InboxSession, OG_IMAGE_CACHE_CONTROL, WebManifest},
	server::{
		AppState,
		reply::{PageError, SendError, SendReply},
	},
};

const SOCIAL_CRAWLERS: &[&str] = &[
	"facebookexternalhit",
	"twitterbot",
	"linkedinbot",
	"slackbot",
	"discordbot",
	"whatsapp",
	"telegrambot",
	"redditbot",
];

/// Bootstrap data for an inbox client.
#[derive(Debug, Serialize)]
pub(super) struct InboxView {
	id: String,
	url: Url,
	token: String,
	api_url: Url,
	write_id: String,
	send_url: Url,
	#[serde(with = "time::serde::rfc3339")]
	server_time: OffsetDateTime,
	#[serde(with = "time::serde::rfc3339")]
	token_expires_at: OffsetDateTime,
	#[serde(skip_serializing_if = "Option::is_none")]
	posthog_key: Option<String>,
}
impl InboxView {
	fn new(state: &AppState, session: InboxSession) -> Result<Self> {
		let id = session.read_token.to_string();
		let path = format!("/{id}");
		let url = state
			.public_url
			.join(&path)
			.map_err(|source| ConfigError::InvalidEndpoint { path, source })?;
		let send_url = inbox::send::send_url(&state.public_url, &session.write_token)?;

		Ok(Self {
			id,
			url,
			token: session.credential.bearer.expose().to_owned(),
			api_url: session.api_url,
			write_id: session.write_token.to_string(),
			send_url,
			server_time: session.server_time,
			token_expires_at: session.credential.expires_at,
			posthog_key: state.posthog_key.clone(),
		})
	}
}

/// `GET /`: link previews for crawlers, a fresh inbox for everyone else.
pub(super) async fn root(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
	let user_agent = headers.get(USER_AGENT).and_then(|v| v.to_str().ok()).unwrap_or_default();

	if is_social_crawler(user_agent) {
		return Html(open_graph_stub(&state.public_url)).into_response();
	}

	let token = state.inbox.mint();

	Redirect::to(&format!("/{token}")).into_response()
}

/// `GET /{id}`
pub(super) async fn inbox_page(
	State(state): State<Arc<AppState>>,
	Path(id): Path<String>,
) -> Result<Json<InboxView>, PageError> {
	let session = state.inbox.open(&id)?;

	Ok(Json(InboxView::new(&state, session)?))
}

/// `GET /{id}/manifest.json`
pub(super) async fn manifest(
	State(state): State<Arc<AppState>>,
	Path(id): Path<String>,
) -> Result<Json<WebManifest>, PageError> {
	Ok(Json(state.inbox.manifest(&id)?))
}

/// `GET /{id}/og.png`
pub(super) async fn og_image(
	State(state): State<Arc<AppState>>,
	Path(id): Path<String>,
) -> Result<Response, PageError> {
	let image = state.inbox.og_image(&id, &state.public_url).await?;

	Ok((
		[(CONTENT_TYPE, "image/png"), (CACHE_CONTROL, OG_IMAGE_CACHE_CONTROL)],
		image.png,
	)
		.into_response())
}

/// `GET /send/{write_id}`
pub(super) async fn send_target(
	State(state): State<Arc<AppState>>,
	Path(write_id): Path<String>,
) -> Result<Json<inbox::SendTarget>, PageError> {
	Ok(Json(state.inbox.send_target(&write_id, &state.public_url)?))
}

/// `POST /send/{write_id}`
pub(super) async fn send(
	State(state): State<Arc<AppState>>,
	Path(write_id): Path<String>,
	body: Bytes,
) -> Result<Json<SendReply>, SendError> {
	state.inbox.send_json(&write_id, &body).await?;

	Ok(Json(SendReply::ok()))
}

fn is_social_crawler(user_agent: &str) -> bool {
	let user_agent = user_agent.to_ascii_lowercase();

	SOCIAL_CRAWLERS.iter().any(|bot| user_agent.contains(bot))
}

fn open_graph_stub(public_url: &Url) -> String {
	let origin = public_url.origin().ascii_serialization();

	format!(
		r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <title>PWA Inbox</title>
  <meta property="og:title" content="PWA Inbox" />
  <meta property="og:type" content="website" />
  <meta property="og:description" content="PWA Inbox - a Progressive Web Application powered by MagicBell" />
  <meta property="og:url" content="{origin}/" />
  <meta property="og:image" content="{origin}/sharing-banner.png" />
  <meta name="twitter:card" content="summary_large_image" />
  <meta name="twitter:image" content="{origin}/sharing-banner.png" />
</head>
<body></body>
</html>"#
	)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn crawler_detection_is_case_insensitive() {
		assert!(is_social_crawler("Mozilla/5.0 (compatible; Discordbot/2.0)"));
		assert!(is_social_crawler("TWITTERBOT/1.0"));
		assert!(is_social_crawler("WhatsApp/2.23.20.0"));
		assert!(!is_social_crawler("Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)"));
		assert!(!is_social_crawler(""));
	}

	#[test]
	fn open_graph_stub_uses_origin() {
		let url = Url::parse("https://inbox.example.com/ignored/path")
			.expect("Fixture URL should parse.");
		let html = open_graph_stub(&url);

		assert!(html.contains(r#"<meta property="og:url" content="https://inbox.example.com/" />"#));
		assert!(html.contains("https://inbox.example.com/sharing-banner.png"));
	}
}
