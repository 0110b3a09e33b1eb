//! Handler for `GET /analytics/comments`.
//!
//! Aggregates over the comments stored in post threads; an optional
//! `post_urn` restricts the aggregate to one post.

use axum::extract::State;
use postlens_core::{PostUrn, store::ContentStore};
use postlens_query::analytics::CommentAnalytics;
use serde::Deserialize;

use crate::{
  AppState,
  error::ApiError,
  extract::{Json, Query},
};

#[derive(Debug, Deserialize)]
pub struct AnalyticsParams {
  pub post_urn: Option<String>,
}

/// `GET /analytics/comments[?post_urn=..]`
pub async fn comments<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<AnalyticsParams>,
) -> Result<Json<CommentAnalytics>, ApiError>
where
  S: ContentStore + 'static,
{
  let post_urn = params.post_urn.map(PostUrn::parse).transpose()?;
  let analytics = state.read(move |r| r.comment_analytics(post_urn.as_ref())).await?;
  Ok(Json(analytics))
}
