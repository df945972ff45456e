//! HTTP surface: capability URLs in, verified operations out.
//!
//! Every token failure (shape, signature, or the wrong token class) answers with the same
//! not-found response before any provider call is made.

mod handlers;
mod reply;

// crates.io
use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
// self
use crate::{
	_prelude::*,
	config::ServerConfig,
	error::{ConfigError, TransportError},
	inbox::{Inbox, ReqwestInbox},
};

const DEFAULT_LOG_FILTER: &str = "pwa_inbox=info,tower_http=info";

/// Shared, immutable request state.
#[derive(Debug)]
pub struct AppState {
	/// Inbox operations backed by the reqwest transport.
	pub inbox: ReqwestInbox,
	/// Public origin used for absolute URLs.
	pub public_url: Url,
	/// Optional analytics key handed to inbox clients.
	pub posthog_key: Option<String>,
}
impl AppState {
	/// Validates the server config and builds the inbox.
	pub fn new(config: &ServerConfig) -> Result<Self, ConfigError> {
		let inbox = Inbox::new(config.inbox_config())?;

		Ok(Self::with_inbox(inbox, config.public_url.clone(), config.posthog_key.clone()))
	}

	/// Wraps an already-built inbox.
	pub fn with_inbox(inbox: ReqwestInbox, public_url: Url, posthog_key: Option<String>) -> Self {
		Self { inbox, public_url, posthog_key }
	}
}

/// Builds the application router.
pub fn router(state: Arc<AppState>) -> Router {
	Router::new()
		.route("/", get(handlers::root))
		.route("/send/{write_id}", get(handlers::send_target).post(handlers::send))
		.route("/{id}", get(handlers::inbox_page))
		.route("/{id}/manifest.json", get(handlers::manifest))
		.route("/{id}/og.png", get(handlers::og_image))
		.layer(TraceLayer::new_for_http())
		.with_state(state)
}

/// Installs the global `tracing` subscriber, honoring `RUST_LOG` when set.
pub fn init_tracing() {
	// crates.io
	use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

	tracing_subscriber::registry()
		.with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()))
		.with(tracing_subscriber::fmt::layer())
		.init();
}

/// Validates configuration, binds the listener, and serves until Ctrl-C.
///
/// Configuration errors surface before the listener binds, so a process with a missing or
/// unusable secret never accepts a request.
pub async fn serve(config: ServerConfig) -> Result<()> {
	let state = Arc::new(AppState::new(&config)?);
	let listener = TcpListener::bind(config.listen).await.map_err(TransportError::from)?;

	tracing::info!(addr = %config.listen, public_url = %config.public_url, "pwa-inbox listening");

	axum::serve(listener, router(state))
		.with_graceful_shutdown(shutdown_signal())
		.await
		.map_err(TransportError::from)?;

	Ok(())
}

async fn shutdown_signal() {
	if let Err(e) = tokio::signal::ctrl_c().await {
		tracing::warn!(error = %e, "failed to listen for shutdown signal");
	}
}
