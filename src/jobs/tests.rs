//! Tests for the job-management client

use super::*;
use crate::http::HttpClientConfig;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, page_size: u32) -> JobsClient {
    let http = HttpClient::with_config(
        HttpClientConfig::builder().bearer_token("tok_jobs").build(),
    );
    JobsClient::new(http, EndpointRegistry::standard(&server.uri())).with_page_size(page_size)
}

fn jobs_page(start: usize, count: usize) -> Vec<serde_json::Value> {
    (start..start + count)
        .map(|i| json!({"id": i, "name": format!("Job {i}")}))
        .collect()
}

#[tokio::test]
async fn test_search_body_skeleton() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/jobs/search"))
        .and(header("authorization", "Bearer tok_jobs"))
        .and(body_partial_json(json!({
            "conditionMatchTypeId": 1,
            "wildcardSearch": "",
            "sortAscending": true,
            "maxResults": 300,
            "offset": 0,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "searchResults": [],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, 300);
    let jobs = client.fetch_active_jobs().await.unwrap();
    assert!(jobs.is_empty());
}

#[tokio::test]
async fn test_fetch_jobs_sends_status_filters() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/jobs/search"))
        .and(body_partial_json(json!({
            "filterGroups": [
                {
                    "conditionMatchTypeId": 2,
                    "filterGroupTypeId": 3,
                    "filters": [
                        {"valueMatchTypeId": "1", "value": 1},
                        {"valueMatchTypeId": "1", "value": 2},
                        {"valueMatchTypeId": "1", "value": 5},
                    ],
                },
            ],
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "searchResults": [],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, 300);
    client.fetch_active_jobs().await.unwrap();
}

#[tokio::test]
async fn test_search_paginates_until_empty_page() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/jobs/search"))
        .and(body_partial_json(json!({"offset": 0})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "searchResults": jobs_page(0, 2),
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/jobs/search"))
        .and(body_partial_json(json!({"offset": 2})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "searchResults": jobs_page(2, 1),
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/jobs/search"))
        .and(body_partial_json(json!({"offset": 4})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "searchResults": [],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, 2);
    let jobs = client.fetch_all_jobs().await.unwrap();

    assert_eq!(jobs.len(), 3);
    assert_eq!(jobs[0]["name"], "Job 0");
    assert_eq!(jobs[2]["name"], "Job 2");
}

#[tokio::test]
async fn test_search_normalizes_keyed_object_results() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/companies/search"))
        .and(body_partial_json(json!({"offset": 0})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "searchResults": {"17": {"id": 17}, "23": {"id": 23}},
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/companies/search"))
        .and(body_partial_json(json!({"offset": 300})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "searchResults": [],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, 300);
    let companies = client.fetch_all_companies().await.unwrap();
    assert_eq!(companies.len(), 2);
}

#[tokio::test]
async fn test_fetch_archived_jobs_combines_conditions() {
    let server = MockServer::start().await;

    // Status condition AND archived-date condition, in order.
    Mock::given(method("POST"))
        .and(path("/jobs/search"))
        .and(body_partial_json(json!({
            "filterGroups": [
                {
                    "conditionMatchTypeId": 2,
                    "filterGroupTypeId": 3,
                    "filters": [{"valueMatchTypeId": "1", "value": 4}],
                },
                {
                    "conditionMatchTypeId": 1,
                    "filterGroupTypeId": 134,
                },
            ],
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "searchResults": [],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, 300);
    client.fetch_archived_jobs(30).await.unwrap();
}

#[tokio::test]
async fn test_fetch_users_plain_get() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .and(header("authorization", "Bearer tok_jobs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Alex"},
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, 300);
    let users = client.fetch_users().await.unwrap();
    assert_eq!(users[0]["name"], "Alex");
}

#[tokio::test]
async fn test_search_failure_aborts_without_retry() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/jobs/search"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, 300);
    let result = client.fetch_all_jobs().await;
    assert!(matches!(
        result,
        Err(crate::error::Error::HttpStatus { status: 502, .. })
    ));
}
