//! Integration tests for `FsStore` against a temporary directory.

use std::fs;

use postlens_core::{
  Error, PostUrn,
  cache::{CommentPage, PageComment, PageLookup},
  post::Post,
  store::ContentStore,
  thread::{Comment, PostThread, Upserted},
};
use serde_json::Value;
use tempfile::TempDir;

use crate::{
  FsStore,
  files::{POSTS_UNIT, THREADS_UNIT, cache_unit},
};

fn store() -> (TempDir, FsStore) {
  let dir = TempDir::new().expect("temp dir");
  let store = FsStore::open(dir.path()).expect("open store");
  (dir, store)
}

fn urn(s: &str) -> PostUrn { PostUrn::parse(s).unwrap() }

fn thread(id: &str, comments: usize) -> PostThread {
  let mut t = PostThread::new(urn(id));
  t.text = format!("post {id}");
  t.comments = (0..comments)
    .map(|i| Comment { text: format!("comment {i}"), like_count: i as u64, ..Comment::default() })
    .collect();
  t
}

fn page(post: &str, number: u32, first_date: Option<&str>) -> CommentPage {
  CommentPage {
    post_urn:         urn(post),
    page:             number,
    sort:             "mostRelevant".into(),
    total_comments:   25,
    total_pages:      3,
    pagination_token: format!("token-{number}"),
    comments:         first_date
      .map(|d| PageComment { text: "hello".into(), created_date: d.into(), ..PageComment::default() })
      .into_iter()
      .collect(),
  }
}

fn raw_json(store: &FsStore, unit: &str) -> Value {
  let bytes = fs::read(store.base_dir().join(unit)).unwrap();
  serde_json::from_slice(&bytes).unwrap()
}

// ─── Posts ───────────────────────────────────────────────────────────────────

#[test]
fn posts_absent_before_first_write() {
  let (_dir, s) = store();
  assert!(s.load_posts().unwrap().is_none());
}

#[test]
fn replace_posts_overwrites_whole_collection() {
  let (_dir, s) = store();
  let first = vec![
    Post { text: "one".into(), ..Post::default() },
    Post { text: "two".into(), ..Post::default() },
  ];
  s.replace_posts(&first).unwrap();
  s.replace_posts(&[Post { text: "three".into(), ..Post::default() }]).unwrap();

  let posts = s.load_posts().unwrap().unwrap();
  assert_eq!(posts.len(), 1);
  assert_eq!(posts[0].text, "three");
}

#[test]
fn posts_file_uses_pretty_layout() {
  let (_dir, s) = store();
  s.replace_posts(&[Post {
    post_url: "https://example.com/p/1".into(),
    images: vec!["https://img/a".into(), "https://img/b".into()],
    ..Post::default()
  }])
  .unwrap();

  let text = fs::read_to_string(s.base_dir().join(POSTS_UNIT)).unwrap();
  assert!(text.contains("\n        \"Post URL\""), "expected 4-space indent: {text}");

  let json = raw_json(&s, POSTS_UNIT);
  assert_eq!(json[0]["Post URL"], "https://example.com/p/1");
  assert_eq!(json[0]["All Images"], "https://img/a, https://img/b");
}

#[test]
fn corrupted_posts_are_reported_distinctly() {
  let (_dir, s) = store();
  fs::write(s.base_dir().join(POSTS_UNIT), b"[{\"Text\": ").unwrap();
  let err = s.load_posts().unwrap_err();
  assert!(err.is_corrupted(), "got {err:?}");
}

// ─── Threads ─────────────────────────────────────────────────────────────────

#[test]
fn upsert_appends_then_replaces_in_place() {
  let (_dir, s) = store();
  assert_eq!(s.upsert_thread(thread("1", 1)).unwrap(), Upserted::Appended { index: 0 });
  assert_eq!(s.upsert_thread(thread("2", 2)).unwrap(), Upserted::Appended { index: 1 });
  assert_eq!(s.upsert_thread(thread("3", 0)).unwrap(), Upserted::Appended { index: 2 });

  assert_eq!(s.upsert_thread(thread("2", 5)).unwrap(), Upserted::Replaced { index: 1 });

  let threads = s.load_threads().unwrap().unwrap();
  let urns: Vec<_> = threads.iter().map(|t| t.post_urn.as_str()).collect();
  assert_eq!(urns, ["1", "2", "3"]);
  assert_eq!(threads[1].comments.len(), 5);
}

#[test]
fn upsert_refuses_to_overwrite_corrupted_threads() {
  let (_dir, s) = store();
  let path = s.base_dir().join(THREADS_UNIT);
  fs::write(&path, b"not json").unwrap();

  let err = s.upsert_thread(thread("1", 0)).unwrap_err();
  assert!(matches!(err, Error::Corrupted { ref unit, .. } if unit == THREADS_UNIT));
  assert_eq!(fs::read(&path).unwrap(), b"not json");
}

#[test]
fn threads_file_uses_pretty_layout() {
  let (_dir, s) = store();
  s.upsert_thread(thread("77", 1)).unwrap();
  let json = raw_json(&s, THREADS_UNIT);
  assert_eq!(json[0]["Post URN"], "77");
  assert_eq!(json[0]["Comments"][0]["Text"], "comment 0");
  assert!(json[0]["Comments"][0]["Author"]["LinkedIn URL"].is_string());
}

#[test]
fn no_temp_files_left_behind() {
  let (_dir, s) = store();
  s.upsert_thread(thread("1", 0)).unwrap();
  s.replace_posts(&[]).unwrap();
  let names: Vec<_> = fs::read_dir(s.base_dir())
    .unwrap()
    .map(|e| e.unwrap().file_name().into_string().unwrap())
    .collect();
  assert_eq!(names.len(), 2, "unexpected files: {names:?}");
}

// ─── Comment cache ───────────────────────────────────────────────────────────

#[test]
fn comment_cache_absent_before_first_page() {
  let (_dir, s) = store();
  assert!(s.load_comment_cache(&urn("9")).unwrap().is_none());
  assert!(s.read_comment_page(&urn("9"), 1).unwrap().is_none());
}

#[test]
fn out_of_order_page_writes_merge() {
  let (_dir, s) = store();
  let meta = s.write_comment_page(&urn("9"), page("9", 2, Some("2024-05-02"))).unwrap();
  assert_eq!(meta.pages_fetched, ["2"]);
  assert_eq!(meta.last_updated, "2024-05-02");

  let meta = s.write_comment_page(&urn("9"), page("9", 1, None)).unwrap();
  assert_eq!(meta.pages_fetched, ["1", "2"]);
  assert_eq!(meta.total_pages, 3);
  assert_eq!(meta.total_comments, 25);
  assert_eq!(meta.last_updated, "");

  let json = raw_json(&s, &cache_unit(&urn("9")));
  assert_eq!(json["metadata"]["pages_fetched"], serde_json::json!(["1", "2"]));
  assert_eq!(json["pages"]["2"]["Pagination Token"], "token-2");
}

#[test]
fn out_of_range_page_lists_available() {
  let (_dir, s) = store();
  for n in 1..=3 {
    s.write_comment_page(&urn("9"), page("9", n, None)).unwrap();
  }
  assert_eq!(
    s.read_comment_page(&urn("9"), 9).unwrap(),
    Some(PageLookup::Missing { available: vec!["1".into(), "2".into(), "3".into()] })
  );
}

#[test]
fn caches_are_independent_per_post() {
  let (_dir, s) = store();
  s.write_comment_page(&urn("a"), page("a", 1, None)).unwrap();
  s.write_comment_page(&urn("b"), page("b", 4, None)).unwrap();

  let a = s.load_comment_cache(&urn("a")).unwrap().unwrap();
  assert_eq!(a.metadata.pages_fetched, ["1"]);
  let b = s.load_comment_cache(&urn("b")).unwrap().unwrap();
  assert_eq!(b.metadata.pages_fetched, ["4"]);
}

#[test]
fn cached_post_urns_ignores_other_files() {
  let (_dir, s) = store();
  s.write_comment_page(&urn("b"), page("b", 1, None)).unwrap();
  s.write_comment_page(&urn("a"), page("a", 1, None)).unwrap();
  s.replace_posts(&[]).unwrap();
  fs::write(s.base_dir().join("notes.txt"), b"x").unwrap();

  let urns = s.cached_post_urns().unwrap();
  assert_eq!(urns, [urn("a"), urn("b")]);
}

#[test]
fn page_for_other_post_is_rejected() {
  let (_dir, s) = store();
  let err = s.write_comment_page(&urn("a"), page("b", 1, None)).unwrap_err();
  assert!(matches!(err, Error::UrnMismatch { .. }));
  assert!(s.cached_post_urns().unwrap().is_empty());
}

#[test]
fn reopening_sees_existing_data() {
  let (dir, s) = store();
  s.upsert_thread(thread("1", 2)).unwrap();
  drop(s);

  let reopened = FsStore::open(dir.path()).unwrap();
  assert_eq!(reopened.load_threads().unwrap().unwrap().len(), 1);
}
