//! Handlers for `/posts` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `PUT`  | `/posts` | Body: `[Post]`; replaces the whole collection |
//! | `GET`  | `/posts` | `?start=0&limit=5`; limit is capped |
//! | `GET`  | `/posts/search` | `?keyword=...` |
//! | `GET`  | `/posts/top` | `?metric=Like Count&top_n=5` |
//! | `GET`  | `/posts/by-date` | `?start_date=YYYY-MM-DD&end_date=YYYY-MM-DD` |

use axum::extract::State;
use postlens_core::{post::Post, store::ContentStore};
use postlens_query::{
  rank::Metric,
  reader::{DateRange, PostSearch, PostsPage, Ranked},
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
  AppState,
  error::ApiError,
  extract::{Json, Query},
};

pub(crate) fn default_metric() -> String { Metric::LikeCount.label().to_owned() }

pub(crate) fn default_top_n() -> usize { 5 }

// ─── Replace ──────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct Saved {
  pub message: String,
  pub count:   usize,
}

/// `PUT /posts` — body: `[Post]`
pub async fn replace<S>(
  State(state): State<AppState<S>>,
  Json(posts): Json<Vec<Post>>,
) -> Result<Json<Saved>, ApiError>
where
  S: ContentStore + 'static,
{
  let count = posts.len();
  state.write(move |store| store.replace_posts(&posts)).await?;
  info!(count, "replaced posts collection");
  Ok(Json(Saved { message: format!("{count} posts saved"), count }))
}

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  #[serde(default)]
  pub start: usize,
  pub limit: Option<usize>,
}

/// `GET /posts[?start=..][&limit=..]`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<PostsPage>, ApiError>
where
  S: ContentStore + 'static,
{
  let limit = params.limit.unwrap_or(state.limits.posts_page);
  let page = state.read(move |r| r.posts_page(params.start, limit)).await?;
  Ok(Json(page))
}

// ─── Search ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SearchParams {
  pub keyword: String,
}

/// `GET /posts/search?keyword=..`
pub async fn search<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<SearchParams>,
) -> Result<Json<PostSearch>, ApiError>
where
  S: ContentStore + 'static,
{
  let found = state.read(move |r| r.search_posts(&params.keyword)).await?;
  Ok(Json(found))
}

// ─── Top ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TopParams {
  #[serde(default = "default_metric")]
  pub metric: String,
  #[serde(default = "default_top_n")]
  pub top_n:  usize,
}

/// `GET /posts/top[?metric=..][&top_n=..]`
pub async fn top<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<TopParams>,
) -> Result<Json<Ranked<Post>>, ApiError>
where
  S: ContentStore + 'static,
{
  let ranked = state.read(move |r| r.top_posts(&params.metric, params.top_n)).await?;
  Ok(Json(ranked))
}

// ─── Date range ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct DateParams {
  pub start_date: String,
  pub end_date:   String,
}

/// `GET /posts/by-date?start_date=..&end_date=..`
pub async fn by_date<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<DateParams>,
) -> Result<Json<DateRange>, ApiError>
where
  S: ContentStore + 'static,
{
  let range = state
    .read(move |r| r.posts_by_date(&params.start_date, &params.end_date))
    .await?;
  Ok(Json(range))
}
