use jira_incident_reports::config::JiraConfig;
use jira_incident_reports::jira_client::{incidents_jql, JiraClient, JiraError, SearchOptions};
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{basic_auth, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SEARCH_PATH: &str = "/rest/api/3/search/jql";

fn issue(key: &str) -> Value {
    json!({"key": key, "fields": {"summary": key, "status": {"name": "Open"}}})
}

fn page(keys: &[&str], is_last: bool, token: Option<&str>) -> ResponseTemplate {
    let mut body = json!({
        "issues": keys.iter().map(|key| issue(key)).collect::<Vec<_>>(),
        "isLast": is_last,
    });
    if let Some(token) = token {
        body["nextPageToken"] = json!(token);
    }
    ResponseTemplate::new(200).set_body_json(body)
}

async fn fetch(server: &MockServer) -> Result<Vec<Value>, JiraError> {
    fetch_with_timeout(server, Duration::from_secs(30)).await
}

/// The blocking client owns its own runtime, so it is built and dropped off the test runtime.
async fn fetch_with_timeout(
    server: &MockServer,
    timeout: Duration,
) -> Result<Vec<Value>, JiraError> {
    let config = JiraConfig::new(server.uri(), "ops@example.com", "api-token");
    tokio::task::spawn_blocking(move || -> Result<Vec<Value>, JiraError> {
        let client = JiraClient::with_timeout(config, timeout)?;
        client.get_incidents("IIM", &SearchOptions::default())
    })
    .await
    .unwrap()
}

fn keys(issues: &[Value]) -> Vec<&str> {
    issues.iter().map(|issue| issue["key"].as_str().unwrap()).collect()
}

#[tokio::test]
async fn follows_tokens_until_the_last_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param_is_missing("nextPageToken"))
        .respond_with(page(&["IIM-1", "IIM-2"], false, Some("page-2")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("nextPageToken", "page-2"))
        .respond_with(page(&["IIM-3"], false, Some("page-3")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("nextPageToken", "page-3"))
        .respond_with(page(&["IIM-4", "IIM-5"], true, None))
        .expect(1)
        .mount(&server)
        .await;

    let issues = fetch(&server).await.unwrap();

    assert_eq!(keys(&issues), ["IIM-1", "IIM-2", "IIM-3", "IIM-4", "IIM-5"]);
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn stops_when_more_pages_are_claimed_without_a_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(page(&["IIM-1"], false, None))
        .expect(1)
        .mount(&server)
        .await;

    let issues = fetch(&server).await.unwrap();

    assert_eq!(keys(&issues), ["IIM-1"]);
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn sends_query_auth_and_accept_header() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("jql", incidents_jql("IIM")))
        .and(query_param("maxResults", "100"))
        .and(query_param("fields", "*all"))
        .and(basic_auth("ops@example.com", "api-token"))
        .and(header("accept", "application/json"))
        .respond_with(page(&["IIM-9"], true, None))
        .expect(1)
        .mount(&server)
        .await;

    let issues = fetch(&server).await.unwrap();

    assert_eq!(keys(&issues), ["IIM-9"]);
}

#[tokio::test]
async fn missing_issue_list_counts_as_empty_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"isLast": true})))
        .mount(&server)
        .await;

    let issues = fetch(&server).await.unwrap();

    assert!(issues.is_empty());
}

#[tokio::test]
async fn error_status_aborts_the_whole_search() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param_is_missing("nextPageToken"))
        .respond_with(page(&["IIM-1"], false, Some("page-2")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("nextPageToken", "page-2"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let err = fetch(&server).await.unwrap_err();

    match err {
        JiraError::Request(e) => {
            assert_eq!(e.status(), Some(reqwest::StatusCode::INTERNAL_SERVER_ERROR))
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn unauthorized_is_an_error_not_an_empty_result() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = fetch(&server).await.unwrap_err();

    assert!(matches!(err, JiraError::Request(_)));
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn slow_page_times_out_and_aborts_the_search() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(page(&["IIM-1"], true, None).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let err = fetch_with_timeout(&server, Duration::from_millis(200))
        .await
        .unwrap_err();

    match err {
        JiraError::Request(e) => assert!(e.is_timeout(), "expected a timeout, got: {e}"),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn undecodable_body_aborts_the_search() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let err = fetch(&server).await.unwrap_err();

    match err {
        JiraError::Request(e) => assert!(e.is_decode(), "expected a decode error, got: {e}"),
        other => panic!("unexpected error: {other}"),
    }
}
