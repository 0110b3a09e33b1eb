//! Top-N rankings by an engagement metric.
//!
//! All rankings are stable: records with equal scores keep their collection
//! order.

use std::{cmp::Reverse, fmt, str::FromStr};

use postlens_core::{PostUrn, post::Post, thread::PostThread};
use serde::Serialize;

use crate::{QueryError, text::excerpt};

/// A numeric field records can be ranked by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Metric {
  #[serde(rename = "Like Count")]
  LikeCount,
  #[serde(rename = "Total Reactions")]
  TotalReactions,
  /// Number of stored comments on a thread. Threads only.
  #[serde(rename = "Comments Count")]
  CommentCount,
}

const POST_METRICS: &str = "'Like Count', 'Total Reactions'";
const THREAD_METRICS: &str = "'Like Count', 'Total Reactions', 'Comments Count'";

impl Metric {
  pub fn label(self) -> &'static str {
    match self {
      Self::LikeCount => "Like Count",
      Self::TotalReactions => "Total Reactions",
      Self::CommentCount => "Comments Count",
    }
  }

  /// Parse a metric that applies to flat posts.
  pub fn for_posts(name: &str) -> Result<Self, QueryError> {
    match name.parse::<Self>() {
      Ok(Self::CommentCount) | Err(_) => Err(QueryError::InvalidMetric {
        metric:    name.to_owned(),
        supported: POST_METRICS,
      }),
      Ok(metric) => Ok(metric),
    }
  }

  /// Parse a metric that applies to threads.
  pub fn for_threads(name: &str) -> Result<Self, QueryError> { name.parse() }

  fn score_post(self, post: &Post) -> u64 {
    match self {
      Self::LikeCount => post.like_count,
      Self::TotalReactions => post.total_reactions,
      Self::CommentCount => 0,
    }
  }

  fn score_thread(self, thread: &PostThread) -> u64 {
    match self {
      Self::LikeCount => thread.like_count,
      Self::TotalReactions => thread.total_reactions,
      Self::CommentCount => thread.comments.len() as u64,
    }
  }
}

impl fmt::Display for Metric {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.label()) }
}

impl FromStr for Metric {
  type Err = QueryError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim() {
      "Like Count" | "like_count" | "likes" => Ok(Self::LikeCount),
      "Total Reactions" | "total_reactions" | "reactions" => Ok(Self::TotalReactions),
      "Comments Count" | "comments_count" | "comments" => Ok(Self::CommentCount),
      _ => Err(QueryError::InvalidMetric { metric: s.to_owned(), supported: THREAD_METRICS }),
    }
  }
}

/// Stable descending sort by `score`, truncated to `n`.
fn top_by<T>(mut items: Vec<T>, n: usize, score: impl Fn(&T) -> u64) -> Vec<T> {
  items.sort_by_key(|item| Reverse(score(item)));
  items.truncate(n);
  items
}

pub fn top_posts(posts: Vec<Post>, metric: Metric, n: usize) -> Vec<Post> {
  top_by(posts, n, |p| metric.score_post(p))
}

pub fn top_threads(threads: Vec<PostThread>, metric: Metric, n: usize) -> Vec<PostThread> {
  top_by(threads, n, |t| metric.score_thread(t))
}

// ─── Most-commented summaries ────────────────────────────────────────────────

/// A compact view of a thread for most-commented listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThreadSummary {
  #[serde(rename = "Post URN")]
  pub post_urn:        PostUrn,
  #[serde(rename = "Post Text")]
  pub text:            String,
  #[serde(rename = "Author")]
  pub author:          String,
  #[serde(rename = "Posted Date")]
  pub posted_date:     String,
  #[serde(rename = "Comments Count")]
  pub comments_count:  usize,
  #[serde(rename = "Total Reactions")]
  pub total_reactions: u64,
  #[serde(rename = "Like Count")]
  pub like_count:      u64,
}

/// Threads with the most stored comments, text cut to `excerpt_len`.
pub fn most_commented(
  threads: Vec<PostThread>,
  n: usize,
  excerpt_len: usize,
) -> Vec<ThreadSummary> {
  top_threads(threads, Metric::CommentCount, n)
    .into_iter()
    .map(|t| ThreadSummary {
      text:            excerpt(&t.text, excerpt_len),
      author:          t.author.name,
      posted_date:     t.posted_date,
      comments_count:  t.comments.len(),
      total_reactions: t.total_reactions,
      like_count:      t.like_count,
      post_urn:        t.post_urn,
    })
    .collect()
}
