//! Result caps applied by the read operations.

use serde::{Deserialize, Serialize};

/// Upper bounds on how much each operation returns.
///
/// The defaults keep responses small enough for a conversational client;
/// thread pages are smaller because every thread carries its comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
  pub posts_page:          usize,
  pub threads_page:        usize,
  pub post_search:         usize,
  pub date_range:          usize,
  pub comment_search:      usize,
  pub top_commenters:      usize,
  pub most_liked_comments: usize,
  /// Characters of comment text kept in analytics output.
  pub comment_excerpt:     usize,
  /// Characters of post text kept in thread summaries.
  pub post_excerpt:        usize,
}

impl Default for Limits {
  fn default() -> Self {
    Self {
      posts_page:          Self::MAX_POSTS_PAGE,
      threads_page:        Self::MAX_THREADS_PAGE,
      post_search:         5,
      date_range:          5,
      comment_search:      15,
      top_commenters:      10,
      most_liked_comments: 5,
      comment_excerpt:     150,
      post_excerpt:        200,
    }
  }
}

impl Limits {
  /// Largest page a posts listing may return.
  pub const MAX_POSTS_PAGE: usize = 5;
  /// Largest page a threads listing may return.
  pub const MAX_THREADS_PAGE: usize = 3;

  /// These limits with the page caps held at or below their ceilings.
  /// Other limits are left as configured.
  pub fn clamped(self) -> Self {
    Self {
      posts_page:   self.posts_page.min(Self::MAX_POSTS_PAGE),
      threads_page: self.threads_page.min(Self::MAX_THREADS_PAGE),
      ..self
    }
  }
}
