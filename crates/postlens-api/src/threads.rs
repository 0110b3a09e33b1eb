//! Handlers for `/threads` endpoints: posts stored together with their
//! comments.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `PUT`  | `/threads` | Body: `PostThread`; upserted by `Post URN` |
//! | `GET`  | `/threads` | `?start=0&limit=3`; limit is capped |
//! | `GET`  | `/threads/top` | `?metric=Like Count&top_n=5` |
//! | `GET`  | `/threads/top-commented` | `?top_n=5`; summaries only |

use axum::extract::State;
use postlens_core::{
  PostUrn,
  store::ContentStore,
  thread::{PostThread, Upserted},
};
use postlens_query::{
  rank::ThreadSummary,
  reader::{Ranked, ThreadsPage},
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
  AppState,
  error::ApiError,
  extract::{Json, Query},
  posts::{ListParams, TopParams, default_top_n},
};

// ─── Upsert ───────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ThreadSaved {
  pub message:  String,
  pub post_urn: PostUrn,
  #[serde(flatten)]
  pub upserted: Upserted,
}

/// `PUT /threads` — body: `PostThread`
pub async fn upsert<S>(
  State(state): State<AppState<S>>,
  Json(thread): Json<PostThread>,
) -> Result<Json<ThreadSaved>, ApiError>
where
  S: ContentStore + 'static,
{
  let post_urn = thread.post_urn.clone();
  let comments = thread.comments.len();
  let upserted = state.write(move |store| store.upsert_thread(thread)).await?;
  info!(%post_urn, comments, ?upserted, "stored post thread");
  Ok(Json(ThreadSaved {
    message: format!("Post with {comments} comments saved"),
    post_urn,
    upserted,
  }))
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /threads[?start=..][&limit=..]`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<ThreadsPage>, ApiError>
where
  S: ContentStore + 'static,
{
  let limit = params.limit.unwrap_or(state.limits.threads_page);
  let page = state.read(move |r| r.threads_page(params.start, limit)).await?;
  Ok(Json(page))
}

// ─── Rankings ─────────────────────────────────────────────────────────────────

/// `GET /threads/top[?metric=..][&top_n=..]`
pub async fn top<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<TopParams>,
) -> Result<Json<Ranked<PostThread>>, ApiError>
where
  S: ContentStore + 'static,
{
  let ranked = state.read(move |r| r.top_threads(&params.metric, params.top_n)).await?;
  Ok(Json(ranked))
}

#[derive(Debug, Deserialize)]
pub struct TopCommentedParams {
  #[serde(default = "default_top_n")]
  pub top_n: usize,
}

/// `GET /threads/top-commented[?top_n=..]`
pub async fn top_commented<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<TopCommentedParams>,
) -> Result<Json<Ranked<ThreadSummary>>, ApiError>
where
  S: ContentStore + 'static,
{
  let ranked = state.read(move |r| r.most_commented(params.top_n)).await?;
  Ok(Json(ranked))
}
