use std::sync::Arc;

use axum::{
  body::Body,
  http::{Request, StatusCode, header},
  response::Response,
};
use postlens_core::memory::MemoryStore;
use postlens_query::Limits;
use serde_json::{Value, json};
use tower::ServiceExt as _;

use super::*;

fn state() -> AppState<MemoryStore> { AppState::new(Arc::new(MemoryStore::new()), Limits::default()) }

async fn send(state: &AppState<MemoryStore>, method: &str, uri: &str, body: Option<Value>) -> Response {
  let mut builder = Request::builder().method(method).uri(uri);
  let body = match body {
    Some(value) => {
      builder = builder.header(header::CONTENT_TYPE, "application/json");
      Body::from(value.to_string())
    }
    None => Body::empty(),
  };
  api_router(state.clone()).oneshot(builder.body(body).unwrap()).await.unwrap()
}

async fn json_body(resp: Response) -> Value {
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  serde_json::from_slice(&bytes).unwrap()
}

fn post(url: &str, text: &str, likes: u64, date: &str) -> Value {
  json!({
    "Post URL": url,
    "Text": text,
    "Like Count": likes,
    "Total Reactions": likes + 1,
    "Posted Date": date,
    "Author Name": "Ada",
  })
}

fn thread(urn: &str, comments: &[(&str, &str, u64)]) -> Value {
  let comments: Vec<Value> = comments
    .iter()
    .map(|(author, text, likes)| {
      json!({
        "Comment URN": format!("{urn}-{author}"),
        "Text": text,
        "Like Count": likes,
        "Created Date": "2024-03-01 10:00:00",
        "Author": { "Name": author },
      })
    })
    .collect();
  json!({ "Post URN": urn, "Post Text": format!("post {urn}"), "Comments": comments })
}

fn page(urn: &str, number: u32, texts: &[&str]) -> Value {
  let comments: Vec<Value> = texts
    .iter()
    .map(|text| json!({ "Text": text, "Created Date": "2024-04-02", "Author": { "Name": "Grace" } }))
    .collect();
  json!({
    "Post URN": urn,
    "Page": number,
    "Total Comments": 12,
    "Total Pages": 3,
    "Comments": comments,
  })
}

// ── Posts ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn posts_before_fetch_is_404_with_message() {
  let state = state();
  let resp = send(&state, "GET", "/posts", None).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  let body = json_body(resp).await;
  assert_eq!(body["kind"], "no_data_yet");
  assert!(body["message"].as_str().unwrap().contains("fetch"), "message: {body}");
}

#[tokio::test]
async fn replaced_posts_are_listed_with_capped_limit() {
  let state = state();
  let posts: Vec<Value> =
    (0..8).map(|i| post(&format!("https://x/{i}"), "hello", i, "2024-01-01")).collect();
  let resp = send(&state, "PUT", "/posts", Some(json!(posts))).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(json_body(resp).await["count"], 8);

  let body = json_body(send(&state, "GET", "/posts?start=1&limit=50", None).await).await;
  assert_eq!(body["total_posts"], 8);
  assert_eq!(body["posts"].as_array().unwrap().len(), 5);
  assert_eq!(body["posts"][0]["Post URL"], "https://x/1");
  assert_eq!(body["has_more"], true);
}

#[tokio::test]
async fn unknown_metric_is_400_echoing_it() {
  let state = state();
  send(&state, "PUT", "/posts", Some(json!([post("https://x/1", "a", 1, "2024-01-01")]))).await;

  let resp = send(&state, "GET", "/posts/top?metric=Shares", None).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body = json_body(resp).await;
  assert_eq!(body["kind"], "validation");
  assert!(body["message"].as_str().unwrap().contains("Shares"), "message: {body}");
}

#[tokio::test]
async fn top_posts_default_to_like_count() {
  let state = state();
  let posts = json!([
    post("https://x/low", "a", 1, "2024-01-01"),
    post("https://x/high", "b", 9, "2024-01-02"),
  ]);
  send(&state, "PUT", "/posts", Some(posts)).await;

  let body = json_body(send(&state, "GET", "/posts/top?top_n=1", None).await).await;
  assert_eq!(body["metric"], "Like Count");
  assert_eq!(body["posts"].as_array().unwrap().len(), 1);
  assert_eq!(body["posts"][0]["Post URL"], "https://x/high");
}

#[tokio::test]
async fn search_and_date_range() {
  let state = state();
  let posts = json!([
    post("https://x/1", "Rust is fun", 1, "2024-01-05"),
    post("https://x/2", "gardening", 2, "2024-02-05"),
  ]);
  send(&state, "PUT", "/posts", Some(posts)).await;

  let body = json_body(send(&state, "GET", "/posts/search?keyword=RUST", None).await).await;
  assert_eq!(body["total_results"], 1);
  assert_eq!(body["posts"][0]["Post URL"], "https://x/1");

  let uri = "/posts/by-date?start_date=2024-02-01&end_date=2024-02-29";
  let body = json_body(send(&state, "GET", uri, None).await).await;
  assert_eq!(body["total_results"], 1);
  assert_eq!(body["posts"][0]["Post URL"], "https://x/2");

  let resp = send(&state, "GET", "/posts/by-date?start_date=02/01/2024&end_date=2024-02-29", None).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_query_strings_get_a_json_error() {
  let state = state();
  let uris = [
    "/posts/search",
    "/posts?limit=abc",
    "/comments/search?keyword=x&include_paginated=maybe",
  ];
  for uri in uris {
    let resp = send(&state, "GET", uri, None).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
    let body = json_body(resp).await;
    assert_eq!(body["kind"], "validation", "{uri}");
    assert!(!body["message"].as_str().unwrap().is_empty(), "{uri}");
  }
}

#[tokio::test]
async fn malformed_body_gets_a_json_error() {
  let resp = send(&state(), "PUT", "/threads", Some(json!({ "Post Text": "no urn" }))).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  assert_eq!(json_body(resp).await["kind"], "validation");
}

// ── Threads ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn thread_upsert_replaces_in_place() {
  let state = state();
  let resp = send(&state, "PUT", "/threads", Some(thread("urn:li:activity:1", &[("Ann", "hi", 1)]))).await;
  let body = json_body(resp).await;
  assert_eq!(body["message"], "Post with 1 comments saved");
  assert_eq!(body["outcome"], "appended");

  send(&state, "PUT", "/threads", Some(thread("urn:li:activity:2", &[]))).await;
  let resp = send(
    &state,
    "PUT",
    "/threads",
    Some(thread("urn:li:activity:1", &[("Ann", "hi", 1), ("Bob", "yo", 2)])),
  )
  .await;
  let body = json_body(resp).await;
  assert_eq!(body["outcome"], "replaced");
  assert_eq!(body["index"], 0);

  let body = json_body(send(&state, "GET", "/threads", None).await).await;
  assert_eq!(body["total_posts"], 2);
  assert_eq!(body["posts"][0]["Post URN"], "urn:li:activity:1");
  assert_eq!(body["posts"][0]["Comments"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn top_commented_summaries() {
  let state = state();
  send(&state, "PUT", "/threads", Some(thread("urn:li:activity:1", &[("Ann", "hi", 1)]))).await;
  send(
    &state,
    "PUT",
    "/threads",
    Some(thread("urn:li:activity:2", &[("Ann", "a", 0), ("Bob", "b", 0)])),
  )
  .await;

  let body = json_body(send(&state, "GET", "/threads/top-commented?top_n=1", None).await).await;
  assert_eq!(body["posts"].as_array().unwrap().len(), 1);
  assert_eq!(body["posts"][0]["Post URN"], "urn:li:activity:2");
}

// ── Paginated comments ────────────────────────────────────────────────────────

#[tokio::test]
async fn missing_page_lists_available_pages() {
  let state = state();
  let urn = "urn:li:activity:7";
  send(&state, "PUT", &format!("/comments/{urn}/pages"), Some(page(urn, 2, &["second"]))).await;
  let resp = send(&state, "PUT", &format!("/comments/{urn}/pages"), Some(page(urn, 1, &["first"]))).await;
  let body = json_body(resp).await;
  assert_eq!(body["metadata"]["pages_fetched"], json!(["1", "2"]));

  let resp = send(&state, "GET", &format!("/comments/{urn}?page=3"), None).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  let body = json_body(resp).await;
  assert_eq!(body["kind"], "not_found");
  assert_eq!(body["available_pages"], json!(["1", "2"]));

  let body = json_body(send(&state, "GET", &format!("/comments/{urn}?page=2"), None).await).await;
  assert_eq!(body["page_data"]["Comments"][0]["Text"], "second");

  let body = json_body(send(&state, "GET", &format!("/comments/{urn}"), None).await).await;
  assert!(body["pages"]["1"].is_object());
  assert!(body["pages"]["2"].is_object());
}

#[tokio::test]
async fn uncached_post_is_404() {
  let resp = send(&state(), "GET", "/comments/urn:li:activity:9", None).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  assert_eq!(json_body(resp).await["kind"], "no_data_yet");
}

#[tokio::test]
async fn page_for_another_post_is_rejected() {
  let state = state();
  let resp = send(
    &state,
    "PUT",
    "/comments/urn:li:activity:1/pages",
    Some(page("urn:li:activity:2", 1, &["x"])),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  assert_eq!(json_body(resp).await["kind"], "validation");
}

#[tokio::test]
async fn invalid_urn_in_path_is_400() {
  let resp = send(&state(), "GET", "/comments/bad%2Furn", None).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn comment_search_spans_both_sources() {
  let state = state();
  send(&state, "PUT", "/threads", Some(thread("urn:li:activity:1", &[("Ann", "Great talk", 3)]))).await;
  send(
    &state,
    "PUT",
    "/comments/urn:li:activity:2/pages",
    Some(page("urn:li:activity:2", 1, &["great slides"])),
  )
  .await;

  let body = json_body(send(&state, "GET", "/comments/search?keyword=great", None).await).await;
  assert_eq!(body["total_results"], 2);
  assert_eq!(body["sources_searched"], json!(["thread-data", "paginated-data"]));

  let uri = "/comments/search?keyword=great&include_paginated=false";
  let body = json_body(send(&state, "GET", uri, None).await).await;
  assert_eq!(body["total_results"], 1);
  assert_eq!(body["results"][0]["source"], "thread-data");
}

// ── Analytics ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn analytics_over_threads() {
  let state = state();
  send(
    &state,
    "PUT",
    "/threads",
    Some(thread("urn:li:activity:1", &[("Ann", "a", 4), ("Bob", "b", 0)])),
  )
  .await;
  send(&state, "PUT", "/threads", Some(thread("urn:li:activity:2", &[("Cy", "c", 2)]))).await;

  let body = json_body(send(&state, "GET", "/analytics/comments", None).await).await;
  assert_eq!(body["total_comments"], 3);
  assert_eq!(body["unique_commenters"], 3);
  assert_eq!(body["average_likes_per_comment"], 2.0);
  assert_eq!(body["post_urn_filter"], Value::Null);

  let uri = "/analytics/comments?post_urn=urn:li:activity:1";
  let body = json_body(send(&state, "GET", uri, None).await).await;
  assert_eq!(body["total_comments"], 2);
  assert_eq!(body["post_urn_filter"], "urn:li:activity:1");
  assert_eq!(body["most_liked_comments"][0]["author"], "Ann");
}
