//! Unit naming and the read/replace primitives.
//!
//! File names follow the established on-disk layout, so existing data
//! directories can be served as-is.

use std::{
  fs,
  io::{BufWriter, ErrorKind, Write as _},
  path::Path,
};

use postlens_core::{Error, PostUrn, Result};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::ser::PrettyFormatter;
use tempfile::NamedTempFile;

pub const POSTS_UNIT: &str = "linkedin_posts.json";
pub const THREADS_UNIT: &str = "linkedin_posts_with_comments.json";

const CACHE_PREFIX: &str = "linkedin_comments_paginated_";
const CACHE_SUFFIX: &str = ".json";

pub fn cache_unit(post_urn: &PostUrn) -> String {
  format!("{CACHE_PREFIX}{post_urn}{CACHE_SUFFIX}")
}

/// Recover the post URN from a cache file name. `None` for anything else in
/// the directory, including in-flight temp files.
pub fn urn_from_cache_unit(file_name: &str) -> Option<PostUrn> {
  let raw = file_name
    .strip_prefix(CACHE_PREFIX)?
    .strip_suffix(CACHE_SUFFIX)?;
  PostUrn::parse(raw).ok()
}

/// Read and parse one unit. `Ok(None)` if the file does not exist.
pub fn read_unit<T: DeserializeOwned>(dir: &Path, unit: &str) -> Result<Option<T>> {
  let bytes = match fs::read(dir.join(unit)) {
    Ok(bytes) => bytes,
    Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
    Err(source) => return Err(Error::Io { unit: unit.to_owned(), source }),
  };

  serde_json::from_slice(&bytes)
    .map(Some)
    .map_err(|source| Error::Corrupted { unit: unit.to_owned(), source })
}

/// Replace one unit atomically: serialise into a temp file in the same
/// directory, fsync, then rename over the target.
pub fn replace_unit<T: Serialize>(dir: &Path, unit: &str, value: &T) -> Result<()> {
  let io_err = |source| Error::Io { unit: unit.to_owned(), source };

  let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
  {
    let mut writer = BufWriter::new(tmp.as_file_mut());
    let mut ser =
      serde_json::Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut ser)?;
    writer.flush().map_err(io_err)?;
  }
  tmp.as_file().sync_all().map_err(io_err)?;
  tmp.persist(dir.join(unit)).map_err(|e| io_err(e.error))?;
  Ok(())
}
