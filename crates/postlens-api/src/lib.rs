//! JSON API for postlens.
//!
//! Exposes an axum [`Router`] backed by any
//! [`postlens_core::store::ContentStore`]. The upstream fetch collaborator
//! writes already-shaped records through the `PUT` routes; every query and
//! analytics operation is a `GET`.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", postlens_api::api_router(state))
//! ```

pub mod analytics;
pub mod comments;
pub mod error;
pub mod extract;
pub mod posts;
pub mod threads;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, put},
};
use postlens_core::store::ContentStore;
use postlens_query::{Limits, Reader};

pub use error::ApiError;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
pub struct AppState<S> {
  pub store:  Arc<S>,
  pub limits: Limits,
}

impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store), limits: self.limits } }
}

impl<S> AppState<S>
where
  S: ContentStore + 'static,
{
  pub fn new(store: Arc<S>, limits: Limits) -> Self { Self { store, limits } }

  /// Run a read on the blocking pool; store access is synchronous file I/O.
  pub(crate) async fn read<T, F>(&self, op: F) -> Result<T, ApiError>
  where
    T: Send + 'static,
    F: for<'s> FnOnce(Reader<'s, S>) -> postlens_query::Result<T> + Send + 'static,
  {
    let store  = Arc::clone(&self.store);
    let limits = self.limits;
    let result = tokio::task::spawn_blocking(move || op(Reader::new(&*store, limits))).await?;
    Ok(result?)
  }

  /// Run a write on the blocking pool.
  pub(crate) async fn write<T, F>(&self, op: F) -> Result<T, ApiError>
  where
    T: Send + 'static,
    F: FnOnce(&S) -> postlens_core::Result<T> + Send + 'static,
  {
    let store  = Arc::clone(&self.store);
    let result = tokio::task::spawn_blocking(move || op(&*store)).await?;
    Ok(result?)
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(state: AppState<S>) -> Router<()>
where
  S: ContentStore + 'static,
{
  Router::new()
    // Posts
    .route("/posts", get(posts::list::<S>).put(posts::replace::<S>))
    .route("/posts/search", get(posts::search::<S>))
    .route("/posts/top", get(posts::top::<S>))
    .route("/posts/by-date", get(posts::by_date::<S>))
    // Threads
    .route("/threads", get(threads::list::<S>).put(threads::upsert::<S>))
    .route("/threads/top", get(threads::top::<S>))
    .route("/threads/top-commented", get(threads::top_commented::<S>))
    // Paginated comments
    .route("/comments/search", get(comments::search::<S>))
    .route("/comments/{urn}", get(comments::get_cached::<S>))
    .route("/comments/{urn}/pages", put(comments::write_page::<S>))
    // Analytics
    .route("/analytics/comments", get(analytics::comments::<S>))
    .with_state(state)
}

#[cfg(test)]
mod tests;
