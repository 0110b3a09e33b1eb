//! Inclusive date-range filtering over `YYYY-MM-DD` posted dates.

use chrono::NaiveDate;
use postlens_core::post::Post;

use crate::{QueryError, Result};

const DAY_FORMAT: &str = "%Y-%m-%d";

/// Parse a caller-supplied `YYYY-MM-DD` bound.
pub fn parse_day(input: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(input.trim(), DAY_FORMAT)
    .map_err(|_| QueryError::InvalidDate { input: input.to_owned() })
}

/// Posts dated within `[start, end]`, in collection order.
///
/// A stored post whose date does not parse aborts the filter; it is reported
/// rather than skipped.
pub fn posts_between(posts: Vec<Post>, start: NaiveDate, end: NaiveDate) -> Result<Vec<Post>> {
  let mut within = Vec::new();
  for post in posts {
    let day = NaiveDate::parse_from_str(post.posted_date.trim(), DAY_FORMAT).map_err(|_| {
      QueryError::MalformedStoredDate {
        id:    post.permalink().to_owned(),
        input: post.posted_date.clone(),
      }
    })?;
    if (start..=end).contains(&day) {
      within.push(post);
    }
  }
  Ok(within)
}
