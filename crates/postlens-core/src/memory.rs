//! [`MemoryStore`], a [`ContentStore`] held entirely in memory.
//!
//! Useful for tests of the query and API layers; nothing is persisted.

use std::{
  collections::BTreeMap,
  sync::{Mutex, MutexGuard, PoisonError},
};

use crate::{
  Result,
  cache::{CacheMetadata, CommentCache, CommentPage},
  post::Post,
  store::{ContentStore, validate_page},
  thread::{PostThread, Upserted, upsert_by_urn},
  urn::PostUrn,
};

#[derive(Debug, Default)]
struct Inner {
  posts:   Option<Vec<Post>>,
  threads: Option<Vec<PostThread>>,
  caches:  BTreeMap<PostUrn, CommentCache>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
  inner: Mutex<Inner>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  fn lock(&self) -> MutexGuard<'_, Inner> {
    self.inner.lock().unwrap_or_else(PoisonError::into_inner)
  }
}

impl ContentStore for MemoryStore {
  fn load_posts(&self) -> Result<Option<Vec<Post>>> { Ok(self.lock().posts.clone()) }

  fn replace_posts(&self, posts: &[Post]) -> Result<()> {
    self.lock().posts = Some(posts.to_vec());
    Ok(())
  }

  fn load_threads(&self) -> Result<Option<Vec<PostThread>>> {
    Ok(self.lock().threads.clone())
  }

  fn upsert_thread(&self, thread: PostThread) -> Result<Upserted> {
    let mut inner = self.lock();
    Ok(upsert_by_urn(inner.threads.get_or_insert_with(Vec::new), thread))
  }

  fn load_comment_cache(&self, post_urn: &PostUrn) -> Result<Option<CommentCache>> {
    Ok(self.lock().caches.get(post_urn).cloned())
  }

  fn write_comment_page(
    &self,
    post_urn: &PostUrn,
    page: CommentPage,
  ) -> Result<CacheMetadata> {
    validate_page(post_urn, &page)?;
    let mut inner = self.lock();
    let cache = inner.caches.entry(post_urn.clone()).or_default();
    cache.insert_page(page).cloned()
  }

  fn cached_post_urns(&self) -> Result<Vec<PostUrn>> {
    Ok(self.lock().caches.keys().cloned().collect())
  }
}
