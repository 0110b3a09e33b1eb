//! The `ContentStore` trait.
//!
//! Implemented by storage backends (e.g. `postlens-store-fs`, or
//! [`crate::memory::MemoryStore`] for tests). The query and API layers depend
//! on this abstraction, not on any concrete backend.
//!
//! Absence is a value, not an error: loads return `Ok(None)` when a unit has
//! never been written. A unit that exists but cannot be parsed is
//! [`Error::Corrupted`](crate::Error::Corrupted).

use crate::{
  Result,
  cache::{CacheMetadata, CommentCache, CommentPage, PageLookup},
  post::Post,
  thread::{PostThread, Upserted},
  urn::PostUrn,
};

/// Abstraction over a postlens storage backend.
///
/// Every whole-unit write must be atomic from a reader's point of view: a
/// concurrent load observes either the previous or the new document, never a
/// partial one.
pub trait ContentStore: Send + Sync {
  // ── Posts ─────────────────────────────────────────────────────────────

  /// Load the flat Posts collection. `None` if no feed was ever saved.
  fn load_posts(&self) -> Result<Option<Vec<Post>>>;

  /// Overwrite the entire Posts collection.
  fn replace_posts(&self, posts: &[Post]) -> Result<()>;

  // ── Threads ───────────────────────────────────────────────────────────

  /// Load every stored thread. `None` if no thread was ever saved.
  fn load_threads(&self) -> Result<Option<Vec<PostThread>>>;

  /// Insert-or-replace `thread` by URN and persist the full collection.
  ///
  /// A corrupted collection is reported, never overwritten.
  fn upsert_thread(&self, thread: PostThread) -> Result<Upserted>;

  // ── Paginated comments ────────────────────────────────────────────────

  /// Load the comment cache for one post. `None` if nothing is cached.
  fn load_comment_cache(&self, post_urn: &PostUrn) -> Result<Option<CommentCache>>;

  /// Insert or replace one page, recompute metadata, and persist the post's
  /// cache unit. Returns the recomputed metadata.
  fn write_comment_page(
    &self,
    post_urn: &PostUrn,
    page: CommentPage,
  ) -> Result<CacheMetadata>;

  /// Every post that has a comment cache, in ascending URN order.
  fn cached_post_urns(&self) -> Result<Vec<PostUrn>>;

  /// Look up one cached page. `None` if nothing is cached for the post.
  fn read_comment_page(
    &self,
    post_urn: &PostUrn,
    page: u32,
  ) -> Result<Option<PageLookup>> {
    Ok(self.load_comment_cache(post_urn)?.map(|cache| cache.lookup(page)))
  }
}

/// Presence checks applied before a page touches storage: the page number is
/// 1-based and the page's own URN matches the unit it is written to.
pub fn validate_page(post_urn: &PostUrn, page: &CommentPage) -> Result<()> {
  if page.page == 0 {
    return Err(crate::Error::InvalidPage(page.page));
  }
  if &page.post_urn != post_urn {
    return Err(crate::Error::UrnMismatch {
      expected: post_urn.clone(),
      found:    page.post_urn.clone(),
    });
  }
  Ok(())
}
