//! Capability-URL notification inbox: stateless HMAC read/write tokens, a write-to-read token
//! bridge, and a thin server fronting a hosted notification provider.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod capability;
pub mod config;
pub mod error;
pub mod http;
pub mod inbox;
pub mod obs;
pub mod provider;
#[cfg(feature = "server")] pub mod server;

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {httpmock as _, parking_lot as _, tokio as _};
