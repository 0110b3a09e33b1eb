//! Keyword search over stored posts, threads, and cached comment pages.
//!
//! Matching is a case-insensitive substring test. Multi-source search scans
//! the thread collection first and the paginated caches second, so capped
//! results always favour thread data.

use postlens_core::{PostUrn, cache::CommentCache, post::Post, thread::PostThread};
use serde::Serialize;

use crate::text::Keyword;

/// Where a hit was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Source {
  /// The thread collection (post + full comment list).
  ThreadData,
  /// A per-post paginated comment cache.
  PaginatedData,
}

/// One match from [`search_comments`], with enough context to locate the
/// matched record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SearchHit {
  Post {
    source:      Source,
    post_urn:    PostUrn,
    post_text:   String,
    author:      String,
    posted_date: String,
  },
  Comment {
    source:         Source,
    post_urn:       PostUrn,
    /// Thread comments only.
    #[serde(skip_serializing_if = "Option::is_none")]
    comment_urn:    Option<String>,
    /// Paginated comments only.
    #[serde(skip_serializing_if = "Option::is_none")]
    page:           Option<u32>,
    comment_text:   String,
    comment_author: String,
    comment_date:   String,
    #[serde(skip_serializing_if = "Option::is_none")]
    comment_likes:  Option<u64>,
    permalink:      String,
    #[serde(skip_serializing_if = "Option::is_none")]
    post_author:    Option<String>,
  },
}

impl SearchHit {
  pub fn source(&self) -> Source {
    match self {
      Self::Post { source, .. } | Self::Comment { source, .. } => *source,
    }
  }

  pub fn post_urn(&self) -> &PostUrn {
    match self {
      Self::Post { post_urn, .. } | Self::Comment { post_urn, .. } => post_urn,
    }
  }
}

/// Posts whose text contains `keyword`, in collection order.
pub fn search_posts(posts: Vec<Post>, keyword: &str) -> Vec<Post> {
  let keyword = Keyword::new(keyword);
  posts.into_iter().filter(|p| keyword.matches(&p.text)).collect()
}

/// Every hit across `threads` and then `caches`, in scan order.
///
/// With `post_urn` set, both sources are restricted to that post. Pass an
/// empty `caches` slice to search thread data only.
pub fn search_comments(
  keyword: &str,
  post_urn: Option<&PostUrn>,
  threads: &[PostThread],
  caches: &[(PostUrn, CommentCache)],
) -> Vec<SearchHit> {
  let keyword = Keyword::new(keyword);
  let wanted = |urn: &PostUrn| post_urn.is_none_or(|want| want == urn);
  let mut hits = Vec::new();

  for thread in threads.iter().filter(|t| wanted(&t.post_urn)) {
    if keyword.matches(&thread.text) {
      hits.push(SearchHit::Post {
        source:      Source::ThreadData,
        post_urn:    thread.post_urn.clone(),
        post_text:   thread.text.clone(),
        author:      thread.author.name.clone(),
        posted_date: thread.posted_date.clone(),
      });
    }

    for comment in thread.comments.iter().filter(|c| keyword.matches(&c.text)) {
      hits.push(SearchHit::Comment {
        source:         Source::ThreadData,
        post_urn:       thread.post_urn.clone(),
        comment_urn:    Some(comment.urn.clone()),
        page:           None,
        comment_text:   comment.text.clone(),
        comment_author: comment.author.name.clone(),
        comment_date:   comment.created_date.clone(),
        comment_likes:  Some(comment.like_count),
        permalink:      comment.permalink.clone(),
        post_author:    Some(thread.author.name.clone()),
      });
    }
  }

  for (urn, cache) in caches.iter().filter(|(urn, _)| wanted(urn)) {
    for (page, comment) in cache.comments().filter(|(_, c)| keyword.matches(&c.text)) {
      hits.push(SearchHit::Comment {
        source:         Source::PaginatedData,
        post_urn:       urn.clone(),
        comment_urn:    None,
        page:           Some(page),
        comment_text:   comment.text.clone(),
        comment_author: comment.author.name.clone(),
        comment_date:   comment.created_date.clone(),
        comment_likes:  None,
        permalink:      comment.permalink.clone(),
        post_author:    None,
      });
    }
  }

  hits
}
