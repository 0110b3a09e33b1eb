//! Comment analytics over the thread collection.

use std::{cmp::Reverse, collections::HashMap};

use postlens_core::{
  PostUrn,
  thread::{Comment, PostThread},
};
use serde::Serialize;

use crate::{Limits, text::excerpt};

/// Activity of one comment author.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommenterStats {
  pub name:          String,
  pub comment_count: u64,
  pub total_likes:   u64,
  /// Taken from the author's first-seen comment.
  pub username:      String,
  pub title:         String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LikedComment {
  pub text:   String,
  pub author: String,
  pub likes:  u64,
  pub date:   String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentAnalytics {
  pub total_comments:            usize,
  pub unique_commenters:         usize,
  pub average_likes_per_comment: f64,
  pub top_commenters:            Vec<CommenterStats>,
  pub most_liked_comments:       Vec<LikedComment>,
  pub post_urn_filter:           Option<PostUrn>,
}

/// Aggregate comment activity across `threads`, optionally restricted to
/// one post.
pub fn comment_analytics(
  threads: &[PostThread],
  post_urn: Option<&PostUrn>,
  limits: &Limits,
) -> CommentAnalytics {
  let comments: Vec<&Comment> = threads
    .iter()
    .filter(|t| post_urn.is_none_or(|want| want == &t.post_urn))
    .flat_map(|t| t.comments.iter())
    .collect();

  // Authors in first-seen order; `index` maps a name to its slot.
  let mut authors: Vec<CommenterStats> = Vec::new();
  let mut index: HashMap<&str, usize> = HashMap::new();
  for comment in &comments {
    let name = comment.author.display_name();
    let slot = *index.entry(name).or_insert_with(|| {
      authors.push(CommenterStats {
        name:          name.to_owned(),
        comment_count: 0,
        total_likes:   0,
        username:      comment.author.username.clone(),
        title:         comment.author.title.clone(),
      });
      authors.len() - 1
    });
    authors[slot].comment_count += 1;
    authors[slot].total_likes += comment.like_count;
  }
  let unique_commenters = authors.len();

  let total_likes: u64 = comments.iter().map(|c| c.like_count).sum();
  let average_likes_per_comment = if comments.is_empty() {
    0.0
  } else {
    total_likes as f64 / comments.len() as f64
  };

  let mut top_commenters = authors;
  top_commenters.sort_by_key(|a| Reverse(a.comment_count));
  top_commenters.truncate(limits.top_commenters);

  let mut liked = comments.clone();
  liked.sort_by_key(|c| Reverse(c.like_count));
  let most_liked_comments = liked
    .into_iter()
    .take(limits.most_liked_comments)
    .map(|c| LikedComment {
      text:   excerpt(&c.text, limits.comment_excerpt),
      author: c.author.display_name().to_owned(),
      likes:  c.like_count,
      date:   c.created_date.clone(),
    })
    .collect();

  CommentAnalytics {
    total_comments: comments.len(),
    unique_commenters,
    average_likes_per_comment,
    top_commenters,
    most_liked_comments,
    post_urn_filter: post_urn.cloned(),
  }
}
