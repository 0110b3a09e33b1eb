//! The paginated comment cache for a single post.
//!
//! Comments fetched with provider-side pagination are kept per page number.
//! Pages may arrive out of order and need not be contiguous; the metadata
//! block is derived from the pages after every write and is never edited on
//! its own.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Error, Result, compat, thread::CommentAuthor, urn::PostUrn};

// ─── Page records ────────────────────────────────────────────────────────────

/// A comment as returned by the paginated endpoint. Lighter than
/// [`crate::thread::Comment`]: no like or reaction counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageComment {
  #[serde(rename = "Text", default, deserialize_with = "compat::text")]
  pub text:         String,
  #[serde(rename = "Created Date", default, deserialize_with = "compat::text")]
  pub created_date: String,
  #[serde(rename = "Created Timestamp", default, deserialize_with = "compat::timestamp")]
  pub created_at:   Option<i64>,
  #[serde(rename = "Permalink", default, deserialize_with = "compat::text")]
  pub permalink:    String,
  #[serde(rename = "Is Pinned", default)]
  pub is_pinned:    bool,
  #[serde(rename = "Is Edited", default)]
  pub is_edited:    bool,
  #[serde(rename = "Thread URN", default, deserialize_with = "compat::text")]
  pub thread_urn:   String,
  #[serde(rename = "Author", default)]
  pub author:       CommentAuthor,
}

/// One provider page of comments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentPage {
  #[serde(rename = "Post URN")]
  pub post_urn:         PostUrn,
  /// 1-based.
  #[serde(rename = "Page")]
  pub page:             u32,
  #[serde(rename = "Sort", default, deserialize_with = "compat::text")]
  pub sort:             String,
  #[serde(rename = "Total Comments", default, deserialize_with = "compat::count")]
  pub total_comments:   u64,
  #[serde(rename = "Total Pages", default = "one_page", deserialize_with = "compat::count")]
  pub total_pages:      u64,
  #[serde(rename = "Pagination Token", default, deserialize_with = "compat::text")]
  pub pagination_token: String,
  #[serde(rename = "Comments", default)]
  pub comments:         Vec<PageComment>,
}

fn one_page() -> u64 { 1 }

// ─── Metadata ────────────────────────────────────────────────────────────────

/// Derived summary of a post's cached pages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheMetadata {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub post_urn:       Option<PostUrn>,
  /// Totals as reported by the most recently written page.
  #[serde(default)]
  pub total_comments: u64,
  #[serde(default)]
  pub total_pages:    u64,
  /// `Created Date` of the first comment on the most recently written page;
  /// empty when that page had no comments.
  #[serde(default)]
  pub last_updated:   String,
  /// Cached page numbers in ascending numeric order.
  #[serde(default)]
  pub pages_fetched:  Vec<String>,
}

// ─── Cache ───────────────────────────────────────────────────────────────────

/// Every cached page for one post, plus derived metadata.
///
/// `CommentCache::default()` is the empty batch returned when nothing has
/// been fetched yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommentCache {
  /// Keyed by page number; serialised with string keys (`"1"`, `"2"`, …).
  #[serde(default)]
  pub pages:    BTreeMap<u32, CommentPage>,
  #[serde(default)]
  pub metadata: CacheMetadata,
}

/// Result of asking a cache for one page.
#[derive(Debug, Clone, PartialEq)]
pub enum PageLookup {
  Found {
    metadata: CacheMetadata,
    page:     CommentPage,
  },
  /// The page is not cached; `available` lists the pages that are.
  Missing { available: Vec<String> },
}

impl CommentCache {
  /// Insert or replace `page` under its page number and recompute metadata.
  pub fn insert_page(&mut self, page: CommentPage) -> Result<&CacheMetadata> {
    if page.page == 0 {
      return Err(Error::InvalidPage(page.page));
    }

    let last_updated = page
      .comments
      .first()
      .map(|c| c.created_date.clone())
      .unwrap_or_default();
    let post_urn       = page.post_urn.clone();
    let total_comments = page.total_comments;
    let total_pages    = page.total_pages;

    self.pages.insert(page.page, page);
    self.metadata = CacheMetadata {
      post_urn: Some(post_urn),
      total_comments,
      total_pages,
      last_updated,
      pages_fetched: self.available_pages(),
    };
    Ok(&self.metadata)
  }

  /// Cached page numbers as strings, ascending.
  pub fn available_pages(&self) -> Vec<String> {
    self.pages.keys().map(u32::to_string).collect()
  }

  pub fn lookup(&self, page: u32) -> PageLookup {
    match self.pages.get(&page) {
      Some(p) => PageLookup::Found {
        metadata: self.metadata.clone(),
        page:     p.clone(),
      },
      None => PageLookup::Missing { available: self.available_pages() },
    }
  }

  /// All cached comments, in page order then provider order.
  pub fn comments(&self) -> impl Iterator<Item = (u32, &PageComment)> + '_ {
    self
      .pages
      .iter()
      .flat_map(|(n, p)| p.comments.iter().map(move |c| (*n, c)))
  }
}
