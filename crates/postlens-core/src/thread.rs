//! [`PostThread`]: a post together with its full comment list.
//!
//! Threads are keyed by [`PostUrn`]; the collection never holds two threads
//! with the same URN.

use serde::{Deserialize, Serialize};

use crate::{compat, urn::PostUrn};

// ─── Authors ─────────────────────────────────────────────────────────────────

/// The author of a thread's root post.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThreadAuthor {
  /// Display name, `"<first> <last>"` as assembled upstream.
  #[serde(rename = "Name", default, deserialize_with = "compat::text")]
  pub name:        String,
  #[serde(rename = "Username", default, deserialize_with = "compat::text")]
  pub username:    String,
  #[serde(rename = "Headline", default, deserialize_with = "compat::text")]
  pub headline:    String,
  #[serde(rename = "Profile URL", default, deserialize_with = "compat::text")]
  pub profile_url: String,
  #[serde(rename = "Profile Picture", default, deserialize_with = "compat::text")]
  pub picture:     String,
}

/// The author of a comment. Shared by thread comments and paginated comments
/// so both shapes carry the same single `Name` field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommentAuthor {
  #[serde(rename = "Name", default, deserialize_with = "compat::text")]
  pub name:        String,
  #[serde(rename = "Username", default, deserialize_with = "compat::text")]
  pub username:    String,
  #[serde(rename = "Title", default, deserialize_with = "compat::text")]
  pub title:       String,
  #[serde(rename = "LinkedIn URL", default, deserialize_with = "compat::text")]
  pub profile_url: String,
  #[serde(rename = "URN", default, deserialize_with = "compat::text")]
  pub urn:         String,
  #[serde(rename = "ID", default, deserialize_with = "compat::text")]
  pub id:          String,
}

impl CommentAuthor {
  /// The name analytics group by; blank names collapse into `"Unknown"`.
  pub fn display_name(&self) -> &str {
    let name = self.name.trim();
    if name.is_empty() { "Unknown" } else { name }
  }
}

// ─── Comment ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Comment {
  #[serde(rename = "Comment URN", default, deserialize_with = "compat::text")]
  pub urn:             String,
  #[serde(rename = "Text", default, deserialize_with = "compat::text")]
  pub text:            String,
  #[serde(rename = "Created Date", default, deserialize_with = "compat::text")]
  pub created_date:    String,
  #[serde(rename = "Created Timestamp", default, deserialize_with = "compat::timestamp")]
  pub created_at:      Option<i64>,
  #[serde(rename = "Like Count", default, deserialize_with = "compat::count")]
  pub like_count:      u64,
  #[serde(rename = "Total Reactions", default, deserialize_with = "compat::count")]
  pub total_reactions: u64,
  #[serde(rename = "Permalink", default, deserialize_with = "compat::text")]
  pub permalink:       String,
  #[serde(rename = "Is Pinned", default)]
  pub is_pinned:       bool,
  #[serde(rename = "Is Edited", default)]
  pub is_edited:       bool,
  #[serde(rename = "Author", default)]
  pub author:          CommentAuthor,
}

// ─── PostThread ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostThread {
  #[serde(rename = "Post URN")]
  pub post_urn:        PostUrn,
  #[serde(rename = "Post Text", default, deserialize_with = "compat::text")]
  pub text:            String,
  #[serde(rename = "Like Count", default, deserialize_with = "compat::count")]
  pub like_count:      u64,
  #[serde(rename = "Total Reactions", default, deserialize_with = "compat::count")]
  pub total_reactions: u64,
  /// The provider's reported count; may differ from `comments.len()`.
  #[serde(rename = "Comments Count", default, deserialize_with = "compat::count")]
  pub comments_count:  u64,
  #[serde(rename = "Reposts Count", default, deserialize_with = "compat::count")]
  pub reposts_count:   u64,
  #[serde(rename = "Posted Date", default, deserialize_with = "compat::text")]
  pub posted_date:     String,
  #[serde(rename = "Posted Timestamp", default, deserialize_with = "compat::timestamp")]
  pub posted_at:       Option<i64>,
  #[serde(rename = "Author", default)]
  pub author:          ThreadAuthor,
  /// Provider order.
  #[serde(rename = "Comments", default)]
  pub comments:        Vec<Comment>,
}

impl PostThread {
  pub fn new(post_urn: PostUrn) -> Self {
    Self {
      post_urn,
      text: String::new(),
      like_count: 0,
      total_reactions: 0,
      comments_count: 0,
      reposts_count: 0,
      posted_date: String::new(),
      posted_at: None,
      author: ThreadAuthor::default(),
      comments: Vec::new(),
    }
  }
}

// ─── Upsert ──────────────────────────────────────────────────────────────────

/// Where an upserted thread ended up in the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Upserted {
  /// A thread with the same URN existed and was replaced at `index`.
  Replaced { index: usize },
  /// The URN was new; the thread was appended at `index`.
  Appended { index: usize },
}

impl Upserted {
  pub fn index(self) -> usize {
    match self {
      Self::Replaced { index } | Self::Appended { index } => index,
    }
  }
}

/// Insert-or-replace `thread` by URN. Every other thread keeps its position.
pub fn upsert_by_urn(threads: &mut Vec<PostThread>, thread: PostThread) -> Upserted {
  match threads.iter().position(|t| t.post_urn == thread.post_urn) {
    Some(index) => {
      threads[index] = thread;
      Upserted::Replaced { index }
    }
    None => {
      threads.push(thread);
      Upserted::Appended { index: threads.len() - 1 }
    }
  }
}
