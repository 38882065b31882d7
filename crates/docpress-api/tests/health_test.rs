//! Health, history and OpenAPI endpoint tests.

mod helpers;

use docpress_core::ConversionStatus;
use helpers::fixtures::{self, DOC, DOCX};
use helpers::setup_test_app;

#[tokio::test]
async fn test_health_check() {
    let app = setup_test_app().await;

    let response = app.client().get("/health").await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(
        body,
        serde_json::json!({ "status": "OK", "message": "Backend is running" })
    );
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .get("/health")
        .add_header("X-Request-ID", "test-request-42")
        .await;

    assert_eq!(response.header("x-request-id"), "test-request-42");
}

#[tokio::test]
async fn test_conversions_lists_outcomes_newest_first() {
    let app = setup_test_app().await;

    let ok = app
        .client()
        .post("/convert")
        .multipart(fixtures::file_form(
            fixtures::build_docx(&["first"]),
            "first.docx",
            DOCX,
        ))
        .await;
    assert_eq!(ok.status_code(), 200);

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    let failed = app
        .client()
        .post("/convert")
        .multipart(fixtures::file_form(fixtures::legacy_doc(), "second.doc", DOC))
        .await;
    assert_eq!(failed.status_code(), 500);

    let response = app.client().get("/conversions").await;
    assert_eq!(response.status_code(), 200);

    let records: Vec<serde_json::Value> = response.json();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["filename"], "second.doc");
    assert_eq!(records[0]["status"], ConversionStatus::Failed.as_str());
    assert!(records[0]["converted_size"].is_null());
    assert_eq!(records[1]["filename"], "first.docx");
    assert_eq!(records[1]["status"], ConversionStatus::Completed.as_str());
    assert!(records[1]["converted_size"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn test_conversions_limited_to_ten() {
    let app = setup_test_app().await;

    for i in 0..12 {
        let id = app
            .state
            .records
            .create(&format!("file-{i}.docx"), 100)
            .await
            .unwrap()
            .id;
        app.state.records.complete(id, 200).await.unwrap();
    }

    let records: Vec<serde_json::Value> = app.client().get("/conversions").await.json();
    assert_eq!(records.len(), 10);
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = setup_test_app().await;

    let response = app.client().get("/api/openapi.json").await;
    assert_eq!(response.status_code(), 200);

    let doc: serde_json::Value = response.json();
    assert!(doc["paths"]["/convert"].is_object());
    assert!(doc["paths"]["/convert/image"].is_object());
}
