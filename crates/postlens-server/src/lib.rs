//! Configuration and application assembly for the postlens server binary.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use postlens_api::AppState;
use postlens_query::Limits;
use postlens_store_fs::FsStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing::warn;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `postlens.toml` layered
/// under `POSTLENS_*` environment variables.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub host:     String,
  pub port:     u16,
  /// Directory holding the JSON collections; a leading `~/` is expanded.
  pub data_dir: PathBuf,
  pub limits:   Limits,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:     "127.0.0.1".to_owned(),
      port:     8080,
      data_dir: PathBuf::from("."),
      limits:   Limits::default(),
    }
  }
}

impl ServerConfig {
  /// Layer the optional file at `path` under the environment.
  ///
  /// Nested keys use a double underscore, e.g.
  /// `POSTLENS_LIMITS__POSTS_PAGE=10`.
  ///
  /// Page caps above their ceilings are lowered to the ceiling.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    let mut cfg: Self = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(
        config::Environment::with_prefix("POSTLENS")
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      )
      .build()?
      .try_deserialize()?;

    let clamped = cfg.limits.clamped();
    if clamped != cfg.limits {
      warn!(
        posts_page = cfg.limits.posts_page,
        threads_page = cfg.limits.threads_page,
        "configured page size exceeds its ceiling; clamping"
      );
      cfg.limits = clamped;
    }
    Ok(cfg)
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

// ─── Application ──────────────────────────────────────────────────────────────

/// The API router over `store`, wrapped in request tracing.
pub fn app(store: FsStore, limits: Limits) -> Router {
  postlens_api::api_router(AppState::new(Arc::new(store), limits))
    .layer(TraceLayer::new_for_http())
}
