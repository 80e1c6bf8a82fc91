//! Tests for the fetch engine

use super::*;
use crate::http::HttpClientConfig;
use crate::pagination::{CountedPaginator, TokenPaginator};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> HttpClient {
    HttpClient::with_config(HttpClientConfig::builder().base_url(server.uri()).build())
}

fn record_page(start: usize, count: usize) -> Vec<serde_json::Value> {
    (start..start + count)
        .map(|i| json!({"id": format!("rec{i:04}"), "fields": {"N": i}}))
        .collect()
}

// ============================================================================
// Token idiom
// ============================================================================

#[tokio::test]
async fn test_token_fetch_three_pages_complete() {
    let mock_server = MockServer::start().await;

    // Page 1: no offset param, returns token "p2"
    Mock::given(method("GET"))
        .and(path("/tbl"))
        .and(query_param("offset", "p2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "records": record_page(300, 300),
            "offset": "p3",
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/tbl"))
        .and(query_param("offset", "p3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "records": record_page(600, 47),
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    // Catch-all for the first (offset-less) request; mounted last so the
    // offset-bearing matchers above take precedence.
    Mock::given(method("GET"))
        .and(path("/tbl"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "records": record_page(0, 300),
            "offset": "p2",
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let template = RequestTemplate::get(format!("{}/tbl", mock_server.uri()));
    let mut paginator = TokenPaginator::default();

    let records = fetch_all(&client, &template, &mut paginator, &RecordsField)
        .await
        .unwrap();

    // 300 + 300 + 47 records, exactly 3 requests, page order preserved.
    assert_eq!(records.len(), 647);
    assert_eq!(records[0]["id"], "rec0000");
    assert_eq!(records[300]["id"], "rec0300");
    assert_eq!(records[646]["id"], "rec0646");
}

#[tokio::test]
async fn test_token_fetch_single_page_terminates() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tbl"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "records": record_page(0, 12),
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let template = RequestTemplate::get(format!("{}/tbl", mock_server.uri()));
    let mut paginator = TokenPaginator::default();

    let records = fetch_all(&client, &template, &mut paginator, &RecordsField)
        .await
        .unwrap();

    assert_eq!(records.len(), 12);
}

#[tokio::test]
async fn test_token_fetch_mid_page_failure_aborts() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tbl"))
        .and(query_param("offset", "p2"))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend exploded"))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/tbl"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "records": record_page(0, 10),
            "offset": "p2",
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let template = RequestTemplate::get(format!("{}/tbl", mock_server.uri()));
    let mut paginator = TokenPaginator::default();

    let result = fetch_all(&client, &template, &mut paginator, &RecordsField).await;
    match result {
        Err(crate::error::Error::HttpStatus { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "backend exploded");
        }
        other => panic!("Expected HttpStatus error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_token_fetch_missing_records_key_aborts() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tbl"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"rows": []})))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let template = RequestTemplate::get(format!("{}/tbl", mock_server.uri()));
    let mut paginator = TokenPaginator::default();

    let result = fetch_all(&client, &template, &mut paginator, &RecordsField).await;
    assert!(matches!(result, Err(crate::error::Error::Decode { .. })));
}

// ============================================================================
// Counted idiom
// ============================================================================

#[tokio::test]
async fn test_counted_fetch_stops_on_empty_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .and(body_partial_json(json!({"offset": 0, "maxResults": 300})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "searchResults": record_page(0, 300),
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .and(body_partial_json(json!({"offset": 300, "maxResults": 300})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "searchResults": record_page(300, 47),
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .and(body_partial_json(json!({"offset": 600, "maxResults": 300})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "searchResults": [],
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let template = RequestTemplate::post(
        format!("{}/search", mock_server.uri()),
        serde_json::Map::new(),
    );
    let mut paginator = CountedPaginator::new(300);

    let records = fetch_all(&client, &template, &mut paginator, &SearchResults)
        .await
        .unwrap();

    assert_eq!(records.len(), 347);
    assert_eq!(records[0]["id"], "rec0000");
    assert_eq!(records[346]["id"], "rec0346");
}

#[tokio::test]
async fn test_counted_fetch_template_body_constant_across_pages() {
    let mock_server = MockServer::start().await;

    // Every page must carry the same conditions from the template.
    Mock::given(method("POST"))
        .and(path("/search"))
        .and(body_partial_json(json!({"wildcardSearch": "abc"})))
        .and(body_partial_json(json!({"offset": 0})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "searchResults": record_page(0, 2),
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .and(body_partial_json(json!({"wildcardSearch": "abc"})))
        .and(body_partial_json(json!({"offset": 2})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "searchResults": [],
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut body = serde_json::Map::new();
    body.insert("wildcardSearch".to_string(), json!("abc"));
    let template = RequestTemplate::post(format!("{}/search", mock_server.uri()), body);
    let mut paginator = CountedPaginator::new(2);

    let records = fetch_all(&client, &template, &mut paginator, &SearchResults)
        .await
        .unwrap();
    assert_eq!(records.len(), 2);
}

// ============================================================================
// Decoder normalization
// ============================================================================

#[test]
fn test_search_results_array_and_object_normalize() {
    let decoder = SearchResults;

    let array_form = json!({"searchResults": [{"id": 1}, {"id": 2}]});
    let object_form = json!({"searchResults": {"a": {"id": 1}, "b": {"id": 2}}});

    let from_array = decoder.records(&array_form).unwrap();
    let from_object = decoder.records(&object_form).unwrap();

    assert_eq!(from_array, from_object);
}

#[test]
fn test_records_field_rejects_non_array() {
    let decoder = RecordsField;
    assert!(decoder.records(&json!({"records": "nope"})).is_err());
    assert!(decoder.records(&json!({})).is_err());
}
