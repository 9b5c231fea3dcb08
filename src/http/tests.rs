//! Tests for the HTTP pipeline

use super::*;
use crate::auth::AuthConfig;
use crate::error::Error;
use crate::types::BackoffType;
use pretty_assertions::assert_eq;
use reqwest::Method;
use serde::Deserialize;
use std::time::{Duration, Instant};
use test_case::test_case;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Deserialize, PartialEq)]
struct Thing {
    name: String,
}

fn client_for(server: &MockServer) -> HttpClient {
    let config = HttpClientConfig::builder()
        .service_url(server.uri())
        .build();
    HttpClient::new(config, AuthConfig::NoAuth).unwrap()
}

fn fast_retries(max_retries: u32) -> RetryPolicy {
    RetryPolicy::new(max_retries, Duration::from_millis(50))
        .with_backoff(BackoffType::Constant, Duration::from_millis(5))
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert!(config.retry.is_none());
    assert!(config.service_url.is_empty());
    assert!(config.user_agent.starts_with("cos-resource-config/"));
}

#[test]
fn test_http_client_config_builder() {
    let config = HttpClientConfig::builder()
        .service_url("https://config.example.com/v1")
        .timeout(Duration::from_secs(60))
        .retry(RetryPolicy::default())
        .header("X-Custom", "value")
        .user_agent("test-agent/1.0")
        .build();

    assert_eq!(config.service_url, "https://config.example.com/v1");
    assert_eq!(config.timeout, Duration::from_secs(60));
    assert_eq!(config.retry, Some(RetryPolicy::default()));
    assert_eq!(
        config.default_headers.get("X-Custom"),
        Some(&"value".to_string())
    );
    assert_eq!(config.user_agent, "test-agent/1.0");
}

#[test_case("not a url" ; "unparseable")]
#[test_case("ftp://example.com/v1" ; "ftp scheme")]
#[test_case("mailto:ops@example.com" ; "mailto scheme")]
fn test_invalid_service_url_rejected(url: &str) {
    let config = HttpClientConfig::builder().service_url(url).build();
    let err = HttpClient::new(config, AuthConfig::NoAuth).unwrap_err();
    assert!(matches!(err, Error::InvalidServiceUrl { .. }));
}

#[test]
fn test_set_service_url_rejects_other_schemes() {
    let mut client = HttpClient::new(HttpClientConfig::default(), AuthConfig::NoAuth).unwrap();
    assert!(client.set_service_url("file:///tmp/x").is_err());
    assert!(client.set_service_url("http://localhost:8080/v1").is_ok());
    assert_eq!(client.service_url(), "http://localhost:8080/v1");
}

#[test]
fn test_invalid_authenticator_rejected() {
    let err = HttpClient::new(HttpClientConfig::default(), AuthConfig::bearer("")).unwrap_err();
    assert!(matches!(err, Error::InvalidAuthenticator { .. }));
}

#[test]
fn test_enable_and_disable_retries() {
    let mut client = HttpClient::new(HttpClientConfig::default(), AuthConfig::NoAuth).unwrap();
    assert!(client.retry_policy().is_none());

    client.enable_retries(0, Duration::ZERO);
    let policy = client.retry_policy().unwrap();
    assert_eq!(policy.max_retries, DEFAULT_MAX_RETRIES);
    assert_eq!(policy.max_interval, DEFAULT_MAX_INTERVAL);

    client.enable_retries(2, Duration::from_secs(5));
    assert_eq!(client.retry_policy().unwrap().max_retries, 2);

    client.disable_retries();
    assert!(client.retry_policy().is_none());
}

// ============================================================================
// Request building
// ============================================================================

#[test]
fn test_request_config_builder() {
    let req = RequestConfig::new("list_things", Method::GET, "/things")
        .query("page", "1")
        .query_opt("latest", Some(true))
        .query_opt("token", None::<String>)
        .header("X-Request-Id", "abc123")
        .header_opt("If-Match", None)
        .json(serde_json::json!({"key": "value"}));

    assert_eq!(
        req.query,
        vec![
            ("page".to_string(), "1".to_string()),
            ("latest".to_string(), "true".to_string())
        ]
    );
    assert_eq!(
        req.headers,
        vec![("X-Request-Id".to_string(), "abc123".to_string())]
    );
    assert_eq!(req.body.unwrap().content_type(), "application/json");
}

#[test_case("/b/{bucket}", &[("bucket", "my-bucket")], "/b/my-bucket")]
#[test_case("/b/{bucket}", &[("bucket", "a b/c")], "/b/a%20b%2Fc")]
#[test_case("/buckets/{bucket}/backup_policies/{policy_id}", &[("bucket", "x"), ("policy_id", "p-1")], "/buckets/x/backup_policies/p-1")]
#[test_case("/backup_vaults", &[], "/backup_vaults")]
fn test_render_path(template: &'static str, params: &[(&'static str, &str)], expected: &str) {
    let mut req = RequestConfig::new("op", Method::GET, template);
    for (name, value) in params {
        req = req.path_param(*name, *value);
    }
    assert_eq!(req.render_path().unwrap(), expected);
}

#[test]
fn test_render_path_missing_or_empty_param() {
    let req = RequestConfig::new("op", Method::GET, "/b/{bucket}");
    assert!(matches!(
        req.render_path(),
        Err(Error::MissingParameter { name }) if name == "bucket"
    ));

    let req = RequestConfig::new("op", Method::GET, "/b/{bucket}").path_param("bucket", "");
    assert!(matches!(req.render_path(), Err(Error::MissingParameter { .. })));
}

#[test]
fn test_build_url_requires_service_url() {
    let client = HttpClient::new(HttpClientConfig::default(), AuthConfig::NoAuth).unwrap();
    let req = RequestConfig::new("op", Method::GET, "/things");
    assert!(matches!(client.build_url(&req), Err(Error::ServiceUrlMissing)));
}

#[test]
fn test_build_url_with_query() {
    let config = HttpClientConfig::builder()
        .service_url("https://config.example.com/v1/")
        .build();
    let client = HttpClient::new(config, AuthConfig::NoAuth).unwrap();
    let req = RequestConfig::new("op", Method::GET, "/backup_vaults")
        .query("service_instance_id", "crn:v1:a b");

    let url = client.build_url(&req).unwrap();
    assert_eq!(
        url.as_str(),
        "https://config.example.com/v1/backup_vaults?service_instance_id=crn%3Av1%3Aa+b"
    );
}

// ============================================================================
// Retry policy
// ============================================================================

#[test_case(BackoffType::Constant, 3, 100)]
#[test_case(BackoffType::Linear, 2, 300)]
#[test_case(BackoffType::Exponential, 3, 800)]
#[test_case(BackoffType::Exponential, 20, 1000)]
fn test_backoff_delay(backoff: BackoffType, attempt: u32, expected_ms: u64) {
    let policy = RetryPolicy::new(3, Duration::from_secs(1))
        .with_backoff(backoff, Duration::from_millis(100));
    assert_eq!(policy.backoff_delay(attempt), Duration::from_millis(expected_ms));
}

#[test]
fn test_retry_policy_zero_values_select_defaults() {
    let policy = RetryPolicy::new(0, Duration::ZERO);
    assert_eq!(policy.max_retries, 4);
    assert_eq!(policy.max_interval, Duration::from_secs(30));
    assert!(!policy.retry_decode_errors);
}

// ============================================================================
// Pipeline against a mock server
// ============================================================================

#[tokio::test]
async fn test_request_decodes_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/things/abc"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": "abc"
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let req = RequestConfig::new("get_thing", Method::GET, "/things/{id}").path_param("id", "abc");
    let response = client.request::<Thing>(req).await.unwrap();

    assert_eq!(response.status_code(), 200);
    assert_eq!(
        response.result,
        Some(Thing {
            name: "abc".to_string()
        })
    );
}

#[tokio::test]
async fn test_empty_body_has_no_result() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/things"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let response = client
        .request::<Thing>(RequestConfig::new("get", Method::GET, "/things"))
        .await
        .unwrap();

    assert_eq!(response.status_code(), 200);
    assert!(response.result.is_none());
}

#[tokio::test]
async fn test_malformed_json_is_decode_error_with_raw_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/things"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("} this is not valid json {", "application/json"),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .request::<Thing>(RequestConfig::new("get", Method::GET, "/things"))
        .await
        .unwrap_err();

    let Error::Decode { response, .. } = err else {
        panic!("expected decode error, got {err:?}");
    };
    assert_eq!(response.status.as_u16(), 200);
    assert_eq!(response.text(), "} this is not valid json {");
    assert_eq!(response.header("content-type"), Some("application/json"));
}

#[tokio::test]
async fn test_api_error_carries_status_and_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/things/abc"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "errors": [{"code": "not_found", "message": "Thing not found"}],
            "trace": "t-1"
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let req =
        RequestConfig::new("delete_thing", Method::DELETE, "/things/{id}").path_param("id", "abc");
    let err = client.request_no_result(req).await.unwrap_err();

    match err {
        Error::Api {
            status,
            message,
            body,
            ..
        } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Thing not found");
            assert_eq!(body.unwrap()["trace"], "t-1");
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_request_no_result_ignores_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/things/abc"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let req = RequestConfig::new("delete", Method::DELETE, "/things/{id}").path_param("id", "abc");
    let response = client.request_no_result(req).await.unwrap();

    assert_eq!(response.status_code(), 204);
    assert!(response.result.is_none());
}

#[tokio::test]
async fn test_headers_query_and_merge_patch_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/things/abc"))
        .and(query_param("mode", "fast"))
        .and(header("X-Default", "d"))
        .and(header("If-Match", "etag-1"))
        .and(header("Content-Type", "application/merge-patch+json"))
        .and(body_json(serde_json::json!({"name": null, "size": 3})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": "abc"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .service_url(mock_server.uri())
        .header("X-Default", "d")
        .build();
    let client = HttpClient::new(config, AuthConfig::NoAuth).unwrap();

    let mut patch = crate::types::JsonObject::new();
    patch.insert("name".to_string(), serde_json::Value::Null);
    patch.insert("size".to_string(), serde_json::json!(3));

    let req = RequestConfig::new("update", Method::PATCH, "/things/{id}")
        .path_param("id", "abc")
        .query("mode", "fast")
        .header("If-Match", "etag-1")
        .merge_patch(patch);
    let response = client.request::<Thing>(req).await.unwrap();
    assert_eq!(response.status_code(), 200);
}

#[tokio::test]
async fn test_bearer_token_is_attached() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/things"))
        .and(header("Authorization", "Bearer secret"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .service_url(mock_server.uri())
        .build();
    let client = HttpClient::new(config, AuthConfig::bearer("secret")).unwrap();
    client
        .request_no_result(RequestConfig::new("get", Method::GET, "/things"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_validation_happens_before_io() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let req = RequestConfig::new("get", Method::GET, "/things/{id}");
    let err = client.request::<Thing>(req).await.unwrap_err();
    assert!(err.is_validation());
}

#[tokio::test]
async fn test_invalid_header_rejected_before_io() {
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server);

    let req = RequestConfig::new("get", Method::GET, "/things").header("Bad Header", "x");
    let err = client.request_no_result(req).await.unwrap_err();
    assert!(matches!(err, Error::InvalidHeader { .. }));
}

// ============================================================================
// Retries
// ============================================================================

#[tokio::test]
async fn test_retry_on_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/things"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/things"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": "ok"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server);
    client.set_retry_policy(fast_retries(3));

    let response = client
        .request::<Thing>(RequestConfig::new("get", Method::GET, "/things"))
        .await
        .unwrap();
    assert_eq!(response.result.unwrap().name, "ok");
}

#[tokio::test]
async fn test_retries_exhausted_returns_last_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/things"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server);
    client.set_retry_policy(fast_retries(2));

    let err = client
        .request::<Thing>(RequestConfig::new("get", Method::GET, "/things"))
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(500));
}

#[test_case(501)]
#[test_case(400)]
#[test_case(404)]
#[tokio::test]
async fn test_no_retry_on_non_transient_status(status: u16) {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/things"))
        .respond_with(ResponseTemplate::new(status))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server);
    client.set_retry_policy(fast_retries(3));

    let err = client
        .request::<Thing>(RequestConfig::new("get", Method::GET, "/things"))
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(status));
}

#[tokio::test]
async fn test_no_retry_when_disabled() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/things"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .request::<Thing>(RequestConfig::new("get", Method::GET, "/things"))
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(503));
}

fn slow_client_for(server: &MockServer) -> HttpClient {
    let config = HttpClientConfig::builder()
        .service_url(server.uri())
        .timeout(Duration::from_millis(100))
        .build();
    HttpClient::new(config, AuthConfig::NoAuth).unwrap()
}

#[tokio::test]
async fn test_retry_on_attempt_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/things"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(400)))
        .expect(3)
        .mount(&mock_server)
        .await;

    let mut client = slow_client_for(&mock_server);
    client.set_retry_policy(fast_retries(2));

    let err = client
        .request::<Thing>(RequestConfig::new("get", Method::GET, "/things"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Timeout(_)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_transport_errors_not_retried_when_switched_off() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/things"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(400)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut client = slow_client_for(&mock_server);
    let mut policy = fast_retries(2);
    policy.retry_transport_errors = false;
    client.set_retry_policy(policy);

    let err = client
        .request::<Thing>(RequestConfig::new("get", Method::GET, "/things"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Timeout(_)));
}

#[tokio::test]
async fn test_decode_errors_retried_only_on_opt_in() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/things"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{broken"))
        .expect(4)
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server);
    client.set_retry_policy(fast_retries(2));
    let err = client
        .request::<Thing>(RequestConfig::new("get", Method::GET, "/things"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));

    client.set_retry_policy(fast_retries(2).retry_decode_errors(true));
    let err = client
        .request::<Thing>(RequestConfig::new("get", Method::GET, "/things"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
}

#[tokio::test]
async fn test_retry_after_header_is_honoured_and_capped() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/things"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "120"))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/things"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server);
    client.set_retry_policy(fast_retries(1));

    let started = Instant::now();
    client
        .request_no_result(RequestConfig::new("get", Method::GET, "/things"))
        .await
        .unwrap();
    // 120 s requested, capped at the policy's 50 ms maximum
    assert!(started.elapsed() < Duration::from_secs(5));
}

// ============================================================================
// Deadlines
// ============================================================================

#[tokio::test]
async fn test_deadline_exceeded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/things"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let req = RequestConfig::new("get", Method::GET, "/things")
        .deadline(Some(Instant::now() + Duration::from_millis(80)));

    let err = client.request::<Thing>(req).await.unwrap_err();
    assert!(matches!(err, Error::DeadlineExceeded));
}

#[tokio::test]
async fn test_deadline_bounds_pending_retries() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/things"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server);
    client.set_retry_policy(
        RetryPolicy::new(10, Duration::from_secs(1))
            .with_backoff(BackoffType::Constant, Duration::from_secs(1)),
    );

    let started = Instant::now();
    let req = RequestConfig::new("get", Method::GET, "/things")
        .deadline(Some(Instant::now() + Duration::from_millis(80)));
    let err = client.request::<Thing>(req).await.unwrap_err();

    assert!(matches!(err, Error::DeadlineExceeded));
    assert!(started.elapsed() < Duration::from_secs(1));
}
