//! [`PostUrn`]: the stable external identifier of a post.
//!
//! The URN is the upsert key for threads and also names the per-post comment
//! cache unit, so it is restricted to characters that cannot escape a
//! directory.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

#[derive(
  Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct PostUrn(String);

impl PostUrn {
  /// Validate and wrap a URN such as `7181285160586211328` or
  /// `urn:li:activity:7181285160586211328`.
  pub fn parse(raw: impl Into<String>) -> Result<Self> {
    let raw = raw.into();
    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, ':' | '-' | '_' | '.');
    if raw.is_empty() || raw == "." || raw == ".." || !raw.chars().all(allowed) {
      return Err(Error::InvalidUrn(raw));
    }
    Ok(Self(raw))
  }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for PostUrn {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl FromStr for PostUrn {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> { Self::parse(s) }
}

impl TryFrom<String> for PostUrn {
  type Error = Error;

  fn try_from(s: String) -> Result<Self> { Self::parse(s) }
}

impl From<PostUrn> for String {
  fn from(urn: PostUrn) -> Self { urn.0 }
}

impl AsRef<str> for PostUrn {
  fn as_ref(&self) -> &str { &self.0 }
}

impl PartialEq<str> for PostUrn {
  fn eq(&self, other: &str) -> bool { self.0 == other }
}
