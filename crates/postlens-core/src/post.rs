//! [`Post`]: one entry of the flat profile feed.
//!
//! The feed has no stable key of its own; the whole collection is replaced on
//! every fetch.

use serde::{Deserialize, Serialize};

use crate::compat;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Post {
  #[serde(rename = "Post URL", default, deserialize_with = "compat::text")]
  pub post_url:        String,
  #[serde(rename = "Text", default, deserialize_with = "compat::text")]
  pub text:            String,
  #[serde(rename = "Like Count", default, deserialize_with = "compat::count")]
  pub like_count:      u64,
  #[serde(rename = "Total Reactions", default, deserialize_with = "compat::count")]
  pub total_reactions: u64,
  /// `YYYY-MM-DD`; only validated when a date filter is applied.
  #[serde(rename = "Posted Date", default, deserialize_with = "compat::text")]
  pub posted_date:     String,
  #[serde(rename = "Posted Timestamp", default, deserialize_with = "compat::timestamp")]
  pub posted_at:       Option<i64>,
  #[serde(rename = "Share URL", default, deserialize_with = "compat::text")]
  pub share_url:       String,
  #[serde(rename = "Author Name", default, deserialize_with = "compat::text")]
  pub author_name:     String,
  #[serde(rename = "Author Profile", default, deserialize_with = "compat::text")]
  pub author_profile:  String,
  #[serde(rename = "Author Headline", default, deserialize_with = "compat::text")]
  pub author_headline: String,
  #[serde(rename = "Author Profile Picture", default, deserialize_with = "compat::text")]
  pub author_picture:  String,
  #[serde(rename = "Main Image", default, deserialize_with = "compat::text")]
  pub main_image:      String,
  #[serde(
    rename = "All Images",
    default,
    serialize_with = "compat::serialize_image_list",
    deserialize_with = "compat::deserialize_image_list"
  )]
  pub images:          Vec<String>,
}

impl Post {
  /// The identifier the feed is keyed by: the share URL, falling back to the
  /// post URL when the provider omitted it.
  pub fn permalink(&self) -> &str {
    if self.share_url.is_empty() { &self.post_url } else { &self.share_url }
  }
}
