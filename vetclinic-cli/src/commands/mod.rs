//! Subcommand implementations.

pub mod appointments;
pub mod completion;
pub mod config;
pub mod navigate;
pub mod owners;
pub mod pets;
pub mod session;

use std::sync::Arc;

use anyhow::{Context, Result};
use client::{ApiClient, ApiError, FileStorage, SessionStore};
use shared::config::ClientConfig;
use tracing::debug;

/// Everything a session-aware command needs: one store over the session file.
#[derive(Debug)]
pub struct AppContext {
    pub store: SessionStore,
}

impl AppContext {
    /// Opens the session file and loads any persisted session.
    ///
    /// A half-written session is reported on stderr and discarded; the
    /// command then runs anonymously.
    pub fn connect(config: &ClientConfig) -> Result<Self> {
        let session_path = config.storage.session_path();
        debug!(path = %session_path.display(), "using session file");
        let storage = Arc::new(FileStorage::new(session_path));
        let api = ApiClient::from_config(config, storage).context("failed to build API client")?;
        let store = SessionStore::new(api);

        match store.initialize_auth() {
            Ok(()) => {}
            Err(err @ ApiError::CorruptSession(_)) => eprintln!("warning: {err}"),
            Err(err) => return Err(err).context("failed to read stored session"),
        }
        Ok(Self { store })
    }

    pub fn api(&self) -> &ApiClient {
        self.store.api()
    }
}

/// Renders an optional value for table output.
pub(crate) fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |value| value.to_string())
}
