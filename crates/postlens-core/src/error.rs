//! Error types for `postlens-core`.

use thiserror::Error;

use crate::urn::PostUrn;

#[derive(Debug, Error)]
pub enum Error {
  /// A persisted unit exists but is not valid JSON for its record type.
  #[error("stored data in {unit} is corrupted: {source}")]
  Corrupted {
    unit:   String,
    #[source]
    source: serde_json::Error,
  },

  #[error("i/o error on {unit}: {source}")]
  Io {
    unit:   String,
    #[source]
    source: std::io::Error,
  },

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),

  #[error("invalid post urn: {0:?}")]
  InvalidUrn(String),

  #[error("invalid page number {0}; pages are numbered from 1")]
  InvalidPage(u32),

  #[error("page record belongs to post {found}, not {expected}")]
  UrnMismatch { expected: PostUrn, found: PostUrn },
}

impl Error {
  /// `true` when the failure means stored data must be repaired or
  /// re-fetched rather than retried.
  pub fn is_corrupted(&self) -> bool { matches!(self, Self::Corrupted { .. }) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
