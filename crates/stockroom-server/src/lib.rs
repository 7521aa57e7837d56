//! HTTP server wiring for Stockroom: configuration, the top-level router, and
//! a change follower for embedders that hold a live projection of the
//! inventory. The HTTP list endpoint does not use it; it projects a fresh
//! snapshot per request.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use serde::Deserialize;
use stockroom_core::{ProjectedAsset, store::InventoryStore};
use stockroom_store_sqlite::SqliteStore;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `STOCKROOM_*` environment variables.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

impl ServerConfig {
  /// Layer defaults, the optional TOML file at `path`, and the environment,
  /// in increasing order of precedence.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .set_default("host", "127.0.0.1")?
      .set_default("port", 8080)?
      .set_default("store_path", "stockroom.db")?
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("STOCKROOM"))
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The full application: the JSON API under `/api`, with request tracing.
pub fn app<S>(store: Arc<S>) -> Router
where
  S: InventoryStore + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    .nest("/api", stockroom_api::api_router(store))
    .layer(TraceLayer::new_for_http())
}

// ─── Change follower ─────────────────────────────────────────────────────────

/// Project the inventory once, then again every time the store's revision
/// moves, handing each result to `on_change`.
///
/// Revisions that land while a projection is being computed are coalesced
/// into the next one. Runs until the task is aborted.
pub async fn follow_changes<F>(store: SqliteStore, mut on_change: F)
where
  F: FnMut(u64, &[ProjectedAsset]),
{
  let mut rx = store.subscribe();
  loop {
    let revision = *rx.borrow_and_update();
    match store.snapshot().await {
      Ok(snapshot) => on_change(revision, &snapshot.project()),
      Err(e) => {
        tracing::warn!(revision, error = %e, "failed to refresh projection");
      }
    }
    if rx.changed().await.is_err() {
      break;
    }
  }
}
