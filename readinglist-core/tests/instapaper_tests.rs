use readinglist_core::{ApiError, Instapaper};
use reqwest::Client;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> Instapaper {
    Instapaper::with_base_url(Client::new(), server.uri(), "user@example.com", "secret")
}

#[tokio::test]
async fn authenticate_accepts_http_200() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/authenticate"))
        .and(body_string_contains("username=user%40example.com"))
        .and(body_string_contains("password=secret"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server).authenticate().await.unwrap();
}

#[tokio::test]
async fn authenticate_reports_invalid_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/authenticate"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let error = client_for(&server).authenticate().await.unwrap_err();
    match error {
        ApiError::Auth { status, message } => {
            assert_eq!(status, 403);
            assert_eq!(message, "Invalid username or password.");
        }
        other => panic!("expected auth error, got {other:?}"),
    }
}

#[tokio::test]
async fn add_submits_url_title_and_selection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/add"))
        .and(body_string_contains("url=http%3A%2F%2Fexample.com%2F1"))
        .and(body_string_contains("title=Article"))
        .and(body_string_contains("selection=Preview"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .add("http://example.com/1", "Article", "Preview")
        .await
        .unwrap();
}

#[tokio::test]
async fn add_rejection_is_fatal_with_documented_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/add"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&server)
        .await;

    let error = client_for(&server)
        .add("http://example.com/1", "Article", "")
        .await
        .unwrap_err();
    match error {
        ApiError::Rejected { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Bad request or exceeded the rate limit.");
        }
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn unknown_status_falls_back_to_the_response_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/add"))
        .respond_with(ResponseTemplate::new(418).set_body_string("weird teapot response"))
        .mount(&server)
        .await;

    let error = client_for(&server)
        .add("http://example.com/1", "Article", "")
        .await
        .unwrap_err();
    match error {
        ApiError::Rejected { status, message } => {
            assert_eq!(status, 418);
            assert_eq!(message, "weird teapot response");
        }
        other => panic!("expected rejection, got {other:?}"),
    }
}
