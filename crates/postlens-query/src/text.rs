//! Text helpers shared by search and analytics.

/// Case-insensitive substring matcher. An empty keyword matches everything.
pub struct Keyword {
  needle: String,
}

impl Keyword {
  pub fn new(keyword: &str) -> Self { Self { needle: keyword.to_lowercase() } }

  pub fn matches(&self, haystack: &str) -> bool {
    haystack.to_lowercase().contains(&self.needle)
  }
}

/// Keep at most `max` characters, marking the cut with `...`.
pub fn excerpt(text: &str, max: usize) -> String {
  match text.char_indices().nth(max) {
    Some((cut, _)) => format!("{}...", &text[..cut]),
    None => text.to_owned(),
  }
}
