//! [`FsStore`], the filesystem implementation of [`ContentStore`].

use std::{
  fs,
  io::ErrorKind,
  path::{Path, PathBuf},
  sync::{Mutex, MutexGuard, PoisonError},
};

use postlens_core::{
  Error, PostUrn, Result,
  cache::{CacheMetadata, CommentCache, CommentPage},
  post::Post,
  store::{ContentStore, validate_page},
  thread::{PostThread, Upserted, upsert_by_urn},
};
use tracing::{debug, warn};

use crate::files::{
  POSTS_UNIT, THREADS_UNIT, cache_unit, read_unit, replace_unit, urn_from_cache_unit,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A content store backed by JSON files in one directory.
///
/// Writes that read the current document first (thread upsert, page write)
/// hold a store-wide writer lock so concurrent writers cannot lose each
/// other's update. Reads never take the lock.
#[derive(Debug)]
pub struct FsStore {
  base_dir:   PathBuf,
  write_lock: Mutex<()>,
}

impl FsStore {
  /// Open (or create) a store rooted at `base_dir`.
  pub fn open(base_dir: impl AsRef<Path>) -> Result<Self> {
    let base_dir = base_dir.as_ref().to_path_buf();
    fs::create_dir_all(&base_dir).map_err(|source| Error::Io {
      unit: base_dir.display().to_string(),
      source,
    })?;
    debug!(dir = %base_dir.display(), "opened content store");
    Ok(Self { base_dir, write_lock: Mutex::new(()) })
  }

  pub fn base_dir(&self) -> &Path { &self.base_dir }

  fn writer(&self) -> MutexGuard<'_, ()> {
    self.write_lock.lock().unwrap_or_else(PoisonError::into_inner)
  }
}

// ─── ContentStore impl ───────────────────────────────────────────────────────

impl ContentStore for FsStore {
  // ── Posts ─────────────────────────────────────────────────────────────────

  fn load_posts(&self) -> Result<Option<Vec<Post>>> {
    read_unit(&self.base_dir, POSTS_UNIT)
  }

  fn replace_posts(&self, posts: &[Post]) -> Result<()> {
    let _guard = self.writer();
    replace_unit(&self.base_dir, POSTS_UNIT, &posts)?;
    debug!(count = posts.len(), "replaced posts collection");
    Ok(())
  }

  // ── Threads ───────────────────────────────────────────────────────────────

  fn load_threads(&self) -> Result<Option<Vec<PostThread>>> {
    read_unit(&self.base_dir, THREADS_UNIT)
  }

  fn upsert_thread(&self, thread: PostThread) -> Result<Upserted> {
    let _guard = self.writer();
    let urn = thread.post_urn.clone();

    // A corrupted collection propagates here and is left on disk untouched.
    let mut threads: Vec<PostThread> =
      read_unit(&self.base_dir, THREADS_UNIT)?.unwrap_or_default();
    let outcome = upsert_by_urn(&mut threads, thread);
    replace_unit(&self.base_dir, THREADS_UNIT, &threads)?;

    debug!(%urn, ?outcome, total = threads.len(), "upserted thread");
    Ok(outcome)
  }

  // ── Paginated comments ────────────────────────────────────────────────────

  fn load_comment_cache(&self, post_urn: &PostUrn) -> Result<Option<CommentCache>> {
    read_unit(&self.base_dir, &cache_unit(post_urn))
  }

  fn write_comment_page(
    &self,
    post_urn: &PostUrn,
    page: CommentPage,
  ) -> Result<CacheMetadata> {
    validate_page(post_urn, &page)?;
    let unit   = cache_unit(post_urn);
    let number = page.page;

    let _guard = self.writer();
    let mut cache: CommentCache = read_unit(&self.base_dir, &unit)?.unwrap_or_default();
    let metadata = cache.insert_page(page)?.clone();
    replace_unit(&self.base_dir, &unit, &cache)?;

    debug!(
      %post_urn,
      page = number,
      pages_fetched = ?metadata.pages_fetched,
      "wrote comment page"
    );
    Ok(metadata)
  }

  fn cached_post_urns(&self) -> Result<Vec<PostUrn>> {
    let entries = match fs::read_dir(&self.base_dir) {
      Ok(entries) => entries,
      Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
      Err(source) => {
        return Err(Error::Io { unit: self.base_dir.display().to_string(), source });
      }
    };

    let mut urns = Vec::new();
    for entry in entries {
      let entry = entry.map_err(|source| Error::Io {
        unit: self.base_dir.display().to_string(),
        source,
      })?;
      let name = entry.file_name();
      match name.to_str() {
        Some(name) => urns.extend(urn_from_cache_unit(name)),
        None => warn!(name = ?name, "skipping non-utf8 file name in store directory"),
      }
    }
    urns.sort();
    Ok(urns)
  }
}
