//! [`Reader`] runs every read operation, loading through a [`ContentStore`].
//!
//! Each method returns a plain serialisable result, or a [`QueryError`] that
//! tells the caller whether to fetch, repair, or fix its arguments.

use postlens_core::{
  PostUrn,
  cache::{CacheMetadata, CommentCache, CommentPage, PageLookup},
  post::Post,
  store::ContentStore,
  thread::PostThread,
};
use serde::Serialize;
use tracing::warn;

use crate::{
  Collection, Limits, QueryError, Result,
  analytics::{CommentAnalytics, comment_analytics},
  dates::{parse_day, posts_between},
  paginate::{first, paginate},
  rank::{Metric, ThreadSummary, most_commented, top_posts, top_threads},
  search::{SearchHit, Source, search_comments, search_posts},
};

// ─── Result shapes ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostsPage {
  pub posts:       Vec<Post>,
  pub total_posts: usize,
  pub has_more:    bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThreadsPage {
  pub posts:       Vec<PostThread>,
  pub total_posts: usize,
  pub has_more:    bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostSearch {
  pub keyword:       String,
  pub total_results: usize,
  pub posts:         Vec<Post>,
  pub has_more:      bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateRange {
  pub start_date:    String,
  pub end_date:      String,
  pub total_results: usize,
  pub posts:         Vec<Post>,
  pub has_more:      bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranked<T> {
  pub metric: Metric,
  pub posts:  Vec<T>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView {
  pub metadata:  CacheMetadata,
  pub page_data: CommentPage,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentSearch {
  pub keyword:          String,
  pub post_urn_filter:  Option<PostUrn>,
  pub total_results:    usize,
  pub results:          Vec<SearchHit>,
  pub has_more:         bool,
  pub sources_searched: Vec<Source>,
  /// Cache units skipped because they could not be parsed.
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub unreadable_units: Vec<PostUrn>,
}

// ─── Reader ──────────────────────────────────────────────────────────────────

/// Read-side facade over a store. Never mutates stored state.
pub struct Reader<'s, S: ?Sized> {
  store:  &'s S,
  limits: Limits,
}

impl<'s, S> Reader<'s, S>
where
  S: ContentStore + ?Sized,
{
  pub fn new(store: &'s S, limits: Limits) -> Self { Self { store, limits } }

  pub fn limits(&self) -> &Limits { &self.limits }

  fn posts(&self) -> Result<Vec<Post>> {
    self.store.load_posts()?.ok_or(QueryError::NoDataYet(Collection::Posts))
  }

  fn threads(&self) -> Result<Vec<PostThread>> {
    self.store.load_threads()?.ok_or(QueryError::NoDataYet(Collection::Threads))
  }

  // ── Posts ─────────────────────────────────────────────────────────────────

  pub fn posts_page(&self, start: usize, limit: usize) -> Result<PostsPage> {
    let window = paginate(self.posts()?, start, limit, self.limits.posts_page);
    Ok(PostsPage {
      posts:       window.items,
      total_posts: window.total,
      has_more:    window.has_more,
    })
  }

  pub fn search_posts(&self, keyword: &str) -> Result<PostSearch> {
    let hits = first(search_posts(self.posts()?, keyword), self.limits.post_search);
    Ok(PostSearch {
      keyword:       keyword.to_owned(),
      total_results: hits.total,
      posts:         hits.items,
      has_more:      hits.has_more,
    })
  }

  pub fn top_posts(&self, metric: &str, top_n: usize) -> Result<Ranked<Post>> {
    let metric = Metric::for_posts(metric)?;
    Ok(Ranked { metric, posts: top_posts(self.posts()?, metric, top_n) })
  }

  pub fn posts_by_date(&self, start_date: &str, end_date: &str) -> Result<DateRange> {
    let start = parse_day(start_date)?;
    let end = parse_day(end_date)?;
    let hits = first(posts_between(self.posts()?, start, end)?, self.limits.date_range);
    Ok(DateRange {
      start_date:    start_date.to_owned(),
      end_date:      end_date.to_owned(),
      total_results: hits.total,
      posts:         hits.items,
      has_more:      hits.has_more,
    })
  }

  // ── Threads ───────────────────────────────────────────────────────────────

  pub fn threads_page(&self, start: usize, limit: usize) -> Result<ThreadsPage> {
    let window = paginate(self.threads()?, start, limit, self.limits.threads_page);
    Ok(ThreadsPage {
      posts:       window.items,
      total_posts: window.total,
      has_more:    window.has_more,
    })
  }

  pub fn top_threads(&self, metric: &str, top_n: usize) -> Result<Ranked<PostThread>> {
    let metric = Metric::for_threads(metric)?;
    Ok(Ranked { metric, posts: top_threads(self.threads()?, metric, top_n) })
  }

  pub fn most_commented(&self, top_n: usize) -> Result<Ranked<ThreadSummary>> {
    Ok(Ranked {
      metric: Metric::CommentCount,
      posts:  most_commented(self.threads()?, top_n, self.limits.post_excerpt),
    })
  }

  // ── Paginated comments ────────────────────────────────────────────────────

  pub fn comment_cache(&self, post_urn: &PostUrn) -> Result<CommentCache> {
    self
      .store
      .load_comment_cache(post_urn)?
      .ok_or_else(|| QueryError::NoDataYet(Collection::CommentCache(post_urn.clone())))
  }

  pub fn comment_page(&self, post_urn: &PostUrn, page: u32) -> Result<PageView> {
    match self.store.read_comment_page(post_urn, page)? {
      None => Err(QueryError::NoDataYet(Collection::CommentCache(post_urn.clone()))),
      Some(PageLookup::Found { metadata, page }) => Ok(PageView { metadata, page_data: page }),
      Some(PageLookup::Missing { available }) => Err(QueryError::PageNotFound {
        post_urn: post_urn.clone(),
        page,
        available,
      }),
    }
  }

  // ── Search & analytics ────────────────────────────────────────────────────

  /// Search thread data and, when `include_paginated`, every cached page.
  ///
  /// Missing sources contribute nothing. A corrupted thread collection fails
  /// the search; a corrupted cache unit is skipped and listed in
  /// `unreadable_units`.
  pub fn search_comments(
    &self,
    keyword: &str,
    post_urn: Option<&PostUrn>,
    include_paginated: bool,
  ) -> Result<CommentSearch> {
    let threads = self.store.load_threads()?.unwrap_or_default();

    let mut sources_searched = vec![Source::ThreadData];
    let mut caches = Vec::new();
    let mut unreadable_units = Vec::new();
    if include_paginated {
      sources_searched.push(Source::PaginatedData);
      for urn in self.store.cached_post_urns()? {
        if post_urn.is_some_and(|want| want != &urn) {
          continue;
        }
        match self.store.load_comment_cache(&urn) {
          Ok(Some(cache)) => caches.push((urn, cache)),
          Ok(None) => {}
          Err(e) if e.is_corrupted() => {
            warn!(%urn, error = %e, "skipping unreadable comment cache");
            unreadable_units.push(urn);
          }
          Err(e) => return Err(e.into()),
        }
      }
    }

    let hits = first(
      search_comments(keyword, post_urn, &threads, &caches),
      self.limits.comment_search,
    );
    Ok(CommentSearch {
      keyword: keyword.to_owned(),
      post_urn_filter: post_urn.cloned(),
      total_results: hits.total,
      results: hits.items,
      has_more: hits.has_more,
      sources_searched,
      unreadable_units,
    })
  }

  pub fn comment_analytics(&self, post_urn: Option<&PostUrn>) -> Result<CommentAnalytics> {
    Ok(comment_analytics(&self.threads()?, post_urn, &self.limits))
  }
}
