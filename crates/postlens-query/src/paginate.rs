//! Bounded windows over a loaded collection.

use serde::Serialize;

/// A slice of a collection plus what is needed to ask for the next one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Window<T> {
  pub items:    Vec<T>,
  /// Length of the whole collection.
  pub total:    usize,
  pub has_more: bool,
}

/// Return `items[start .. start + min(limit, cap)]`.
///
/// A `start` past the end yields an empty window rather than an error.
pub fn paginate<T>(items: Vec<T>, start: usize, limit: usize, cap: usize) -> Window<T> {
  let limit = limit.min(cap);
  let total = items.len();
  let has_more = start.saturating_add(limit) < total;
  let items = items.into_iter().skip(start).take(limit).collect();
  Window { items, total, has_more }
}

/// The first `cap` of a list of matches, keeping the uncapped count.
pub fn first<T>(matches: Vec<T>, cap: usize) -> Window<T> {
  paginate(matches, 0, cap, cap)
}
