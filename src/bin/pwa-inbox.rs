//! `pwa-inbox` server entry point.

// crates.io
use clap::Parser;
// self
use pwa_inbox::{config::ServerConfig, server};

#[tokio::main]
async fn main() -> pwa_inbox::error::Result<()> {
	server::init_tracing();

	let config = ServerConfig::parse();

	server::serve(config).await
}
