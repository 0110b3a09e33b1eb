//! Error type for `postlens-query`.

use std::fmt;

use postlens_core::{Error as StoreError, PostUrn};
use serde::Serialize;
use thiserror::Error;

/// Which stored unit a query needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Collection {
  Posts,
  Threads,
  CommentCache(PostUrn),
}

impl fmt::Display for Collection {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Posts => f.write_str("posts"),
      Self::Threads => f.write_str("posts with comments"),
      Self::CommentCache(urn) => write!(f, "paginated comments for post {urn}"),
    }
  }
}

#[derive(Debug, Error)]
pub enum QueryError {
  #[error("no {0} found; fetch them first")]
  NoDataYet(Collection),

  #[error("page {page} not found for post {post_urn}; available pages: {available:?}")]
  PageNotFound {
    post_urn:  PostUrn,
    page:      u32,
    available: Vec<String>,
  },

  #[error("invalid metric {metric:?}; use one of: {supported}")]
  InvalidMetric {
    metric:    String,
    supported: &'static str,
  },

  #[error("invalid date {input:?}; use YYYY-MM-DD")]
  InvalidDate { input: String },

  #[error("stored post {id} has a malformed posted date {input:?}; expected YYYY-MM-DD")]
  MalformedStoredDate { id: String, input: String },

  #[error(transparent)]
  Store(#[from] StoreError),
}

/// Coarse classification callers branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
  /// Nothing stored yet; fetch first.
  NoDataYet,
  /// Stored unit is unreadable; re-fetch or repair.
  CorruptedData,
  /// A caller-supplied parameter was rejected.
  Validation,
  /// A specific page is missing while its parent exists.
  NotFound,
  /// Disk or serialisation failure.
  Internal,
}

impl QueryError {
  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::NoDataYet(_) => ErrorKind::NoDataYet,
      Self::PageNotFound { .. } => ErrorKind::NotFound,
      Self::InvalidMetric { .. } | Self::InvalidDate { .. } => ErrorKind::Validation,
      Self::MalformedStoredDate { .. } => ErrorKind::CorruptedData,
      Self::Store(StoreError::Corrupted { .. }) => ErrorKind::CorruptedData,
      Self::Store(
        StoreError::InvalidUrn(_) | StoreError::InvalidPage(_) | StoreError::UrnMismatch { .. },
      ) => ErrorKind::Validation,
      Self::Store(StoreError::Io { .. } | StoreError::Serialization(_)) => ErrorKind::Internal,
    }
  }
}

pub type Result<T, E = QueryError> = std::result::Result<T, E>;
