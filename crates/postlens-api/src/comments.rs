//! Handlers for `/comments` endpoints: the per-post paginated comment cache
//! and the cross-source comment search.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `PUT`  | `/comments/{urn}/pages` | Body: `CommentPage`; its `Post URN` must match `{urn}` |
//! | `GET`  | `/comments/{urn}` | Whole cache, or `?page=N` for one page |
//! | `GET`  | `/comments/search` | `?keyword=..[&post_urn=..][&include_paginated=false]` |

use axum::extract::State;
use postlens_core::{
  PostUrn,
  cache::{CacheMetadata, CommentCache, CommentPage},
  store::ContentStore,
};
use postlens_query::reader::{CommentSearch, PageView};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
  AppState,
  error::ApiError,
  extract::{Json, Path, Query},
};

// ─── Write page ───────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct PageSaved {
  pub message:  String,
  pub metadata: CacheMetadata,
}

/// `PUT /comments/{urn}/pages` — body: `CommentPage`
pub async fn write_page<S>(
  State(state): State<AppState<S>>,
  Path(urn): Path<String>,
  Json(page): Json<CommentPage>,
) -> Result<Json<PageSaved>, ApiError>
where
  S: ContentStore + 'static,
{
  let post_urn = PostUrn::parse(urn)?;
  let number = page.page;
  let comments = page.comments.len();
  let metadata = {
    let post_urn = post_urn.clone();
    state.write(move |store| store.write_comment_page(&post_urn, page)).await?
  };
  info!(%post_urn, page = number, comments, "stored comment page");
  Ok(Json(PageSaved {
    message: format!(
      "Page {number} with {comments} comments saved. Total: {} comments across {} pages",
      metadata.total_comments, metadata.total_pages,
    ),
    metadata,
  }))
}

// ─── Read cache ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CacheParams {
  pub page: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum CachedComments {
  Whole(CommentCache),
  Page(PageView),
}

/// `GET /comments/{urn}[?page=N]`
pub async fn get_cached<S>(
  State(state): State<AppState<S>>,
  Path(urn): Path<String>,
  Query(params): Query<CacheParams>,
) -> Result<Json<CachedComments>, ApiError>
where
  S: ContentStore + 'static,
{
  let post_urn = PostUrn::parse(urn)?;
  let cached = state
    .read(move |r| match params.page {
      Some(page) => r.comment_page(&post_urn, page).map(CachedComments::Page),
      None => r.comment_cache(&post_urn).map(CachedComments::Whole),
    })
    .await?;
  Ok(Json(cached))
}

// ─── Search ───────────────────────────────────────────────────────────────────

fn include_paginated_default() -> bool { true }

#[derive(Debug, Deserialize)]
pub struct SearchParams {
  pub keyword:           String,
  pub post_urn:          Option<String>,
  #[serde(default = "include_paginated_default")]
  pub include_paginated: bool,
}

/// `GET /comments/search?keyword=..[&post_urn=..][&include_paginated=..]`
pub async fn search<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<SearchParams>,
) -> Result<Json<CommentSearch>, ApiError>
where
  S: ContentStore + 'static,
{
  let post_urn = params.post_urn.map(PostUrn::parse).transpose()?;
  let found = state
    .read(move |r| r.search_comments(&params.keyword, post_urn.as_ref(), params.include_paginated))
    .await?;
  Ok(Json(found))
}
