use std::time::Duration;

use serde_json::json;
use storefront_admin::backend::http::HttpBackend;
use storefront_admin::backend::{BackendInvoker, BackendRequest, RawResult};
use storefront_admin::domain::file::FileUpload;
use storefront_admin::domain::types::BearerToken;
use storefront_admin::pagination::{PageRequest, SortDirection};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn token() -> BearerToken {
    BearerToken::new("backend-token").unwrap()
}

#[tokio::test]
async fn json_request_carries_bearer_and_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/brands"))
        .and(header("authorization", "Bearer backend-token"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"name": "Acme"})))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"id": "b-1", "name": "Acme"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    let backend = HttpBackend::connect(server.uri()).unwrap();

    let request = BackendRequest::post("/brands")
        .json(&json!({"name": "Acme"}))
        .unwrap()
        .bearer(token());
    let raw = backend.invoke(request).await;

    assert_eq!(
        raw,
        RawResult::Success {
            status: 201,
            body: Some(json!({"id": "b-1", "name": "Acme"})),
        }
    );
}

#[tokio::test]
async fn empty_response_has_no_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/categories/cat-1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    let backend = HttpBackend::connect(server.uri()).unwrap();

    let raw = backend
        .invoke(BackendRequest::delete("/categories/cat-1").bearer(token()))
        .await;

    assert_eq!(
        raw,
        RawResult::Success {
            status: 204,
            body: None,
        }
    );
}

#[tokio::test]
async fn error_body_message_is_extracted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/p-404"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"message": "Not found: product p-404"})),
        )
        .mount(&server)
        .await;
    let backend = HttpBackend::connect(server.uri()).unwrap();

    let raw = backend
        .invoke(BackendRequest::get("/products/p-404").bearer(token()))
        .await;

    assert_eq!(
        raw,
        RawResult::HttpError {
            status: 404,
            message: "Not found: product p-404".to_string(),
        }
    );
}

#[tokio::test]
async fn unparseable_error_body_falls_back_to_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sales/today"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<h1>boom</h1>"))
        .mount(&server)
        .await;
    let backend = HttpBackend::connect(server.uri()).unwrap();

    let raw = backend.invoke(BackendRequest::get("/sales/today")).await;

    assert_eq!(
        raw,
        RawResult::HttpError {
            status: 500,
            message: "HTTP 500".to_string(),
        }
    );
}

#[tokio::test]
async fn paging_parameters_are_sent_as_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/inventory"))
        .and(query_param("page", "1"))
        .and(query_param("size", "50"))
        .and(query_param("sortBy", "stockQuantity"))
        .and(query_param("sortDir", "desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;
    let backend = HttpBackend::connect(server.uri()).unwrap();

    let page = PageRequest::new(1, 50).sort("stockQuantity", SortDirection::Desc);
    let raw = backend
        .invoke(BackendRequest::get("/products/inventory").page(&page))
        .await;

    assert!(matches!(raw, RawResult::Success { status: 200, .. }));
}

#[tokio::test]
async fn multipart_upload_reaches_backend() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/files/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "url": "https://cdn.example.com/a.png",
            "fileName": "a.png",
            "size": 3,
            "contentType": "image/png"
        })))
        .expect(1)
        .mount(&server)
        .await;
    let backend = HttpBackend::connect(server.uri()).unwrap();

    let upload = FileUpload {
        file_name: "a.png".to_string(),
        content_type: "image/png".to_string(),
        bytes: vec![1, 2, 3],
    };
    let raw = backend
        .invoke(
            BackendRequest::post("/files/upload")
                .multipart(upload)
                .timeout(Duration::from_secs(5)),
        )
        .await;

    let requests = server.received_requests().await.unwrap();
    let content_type = requests[0].headers.get("content-type").unwrap();
    assert!(content_type.to_str().unwrap().starts_with("multipart/form-data"));
    assert!(matches!(raw, RawResult::Success { status: 200, body: Some(_) }));
}

#[tokio::test]
async fn slow_upload_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/files/upload"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;
    let backend = HttpBackend::connect(server.uri()).unwrap();

    let raw = backend
        .invoke(
            BackendRequest::post("/files/upload")
                .multipart(FileUpload {
                    file_name: "big.bin".to_string(),
                    content_type: "application/octet-stream".to_string(),
                    bytes: vec![0; 16],
                })
                .timeout(Duration::from_millis(100)),
        )
        .await;

    match raw {
        RawResult::NetworkError { message } => assert!(message.contains("timed out")),
        other => panic!("expected a network error, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    // Nothing listens on the discard port.
    let backend = HttpBackend::connect("http://127.0.0.1:9").unwrap();

    let raw = backend.invoke(BackendRequest::get("/brands")).await;

    assert!(matches!(raw, RawResult::NetworkError { .. }));
}
