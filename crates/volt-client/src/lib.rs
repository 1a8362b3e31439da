//! # volt-client
//!
//! Session-level glue around the settings store: auth records and the login
//! flow, the [`HttpClient`](http::HttpClient) collaborator, configuration,
//! and the [`ClientState`](state::ClientState) that applies pushed settings
//! updates.

pub mod auth;
pub mod config;
pub mod events;
pub mod http;
pub mod state;

mod error;

use tracing_subscriber::{fmt, EnvFilter};

pub use error::{AuthError, Result};

use crate::config::ClientConfig;

/// Install the global tracing subscriber. `RUST_LOG` takes precedence over
/// the configured filter.
pub fn init_tracing(config: &ClientConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}
