//! Word conversion API integration tests.
//!
//! Run with: `cargo test -p docpress-api --test convert_test`

mod helpers;

use std::future::IntoFuture;
use std::sync::Arc;

use axum_test::multipart::{MultipartForm, Part};
use docpress_core::{AppError, ConversionRecord, ConversionStatus};
use docpress_db::{ConversionRecordStore, InMemoryConversionRepository};
use helpers::fixtures::{self, DOC, DOCX};
use helpers::setup_test_app;

#[tokio::test]
async fn test_convert_docx_returns_pdf_attachment() {
    let app = setup_test_app().await;
    let docx = fixtures::build_docx(&["Quarterly report", "Revenue grew."]);

    let response = app
        .client()
        .post("/convert")
        .multipart(fixtures::file_form(docx, "report.docx", DOCX))
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.header("content-type"), "application/pdf");

    let disposition = response.header("content-disposition");
    let disposition = disposition.to_str().unwrap();
    assert!(disposition.starts_with("attachment; filename=\""));
    assert!(disposition.ends_with("-report.pdf\""), "{disposition}");

    let body = response.as_bytes();
    assert!(body.starts_with(b"%PDF-"));
}

#[tokio::test]
async fn test_convert_preserves_text() {
    let app = setup_test_app().await;
    let paragraphs = [
        "Meeting notes for the spring planning session",
        "Attendees: Ana, Bo, Chidi",
        "Action items are due by Friday.",
    ];
    let docx = fixtures::build_docx(&paragraphs);

    let response = app
        .client()
        .post("/convert")
        .multipart(fixtures::file_form(docx, "notes.docx", DOCX))
        .await;
    assert_eq!(response.status_code(), 200);

    let rendered = fixtures::pdf_text(response.as_bytes());
    assert_eq!(
        fixtures::non_whitespace(&rendered),
        fixtures::non_whitespace(&paragraphs.join(" "))
    );
}

#[tokio::test]
async fn test_long_document_spans_several_pages() {
    let app = setup_test_app().await;
    let paragraph = "Lorem ipsum dolor sit amet, consectetur adipiscing elit.";
    let paragraphs = vec![paragraph; 120];
    let docx = fixtures::build_docx(&paragraphs);

    let response = app
        .client()
        .post("/convert")
        .multipart(fixtures::file_form(docx, "long.docx", DOCX))
        .await;
    assert_eq!(response.status_code(), 200);
    assert!(fixtures::pdf_page_count(response.as_bytes()) > 1);
}

#[tokio::test]
async fn test_image_sent_to_word_route_is_rejected() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/convert")
        .multipart(fixtures::file_form(fixtures::png(4, 4), "image.png", "image/png"))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "Only .doc and .docx files are allowed");
    assert!(app.scratch_files().is_empty());
}

#[tokio::test]
async fn test_missing_file_is_rejected() {
    let app = setup_test_app().await;

    let form = MultipartForm::new().add_text("note", "no file here");
    let response = app.client().post("/convert").multipart(form).await;

    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "No file uploaded");
}

#[tokio::test]
async fn test_multiple_file_fields_are_rejected() {
    let app = setup_test_app().await;
    let first = Part::bytes(bytes::Bytes::from(fixtures::build_docx(&["one"])))
        .file_name("one.docx")
        .mime_type(DOCX);
    let second = Part::bytes(bytes::Bytes::from(fixtures::build_docx(&["two"])))
        .file_name("two.docx")
        .mime_type(DOCX);
    let form = MultipartForm::new()
        .add_part("file", first)
        .add_part("file", second);

    let response = app.client().post("/convert").multipart(form).await;
    assert_eq!(response.status_code(), 400);

    app.wait_for_cleanup().await;
    assert!(app.scratch_files().is_empty());
}

#[tokio::test]
async fn test_oversized_upload_is_rejected_without_leftovers() {
    let app = helpers::setup_test_app_with(|config| {
        config.max_document_size_bytes = 64 * 1024;
    })
    .await;

    let oversized = vec![b'x'; 64 * 1024 + 1];
    let response = app
        .client()
        .post("/convert")
        .multipart(fixtures::file_form(oversized, "big.docx", DOCX))
        .await;

    assert_eq!(response.status_code(), 413);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "File too large");
    assert!(app.scratch_files().is_empty());

    let records = app.state.records.recent(10).await.unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_legacy_doc_fails_conversion() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/convert")
        .multipart(fixtures::file_form(fixtures::legacy_doc(), "legacy.doc", DOC))
        .await;

    assert_eq!(response.status_code(), 500);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "Conversion failed");
    assert!(body.get("details").is_none());
}

#[tokio::test]
async fn test_scratch_files_removed_after_grace_delay() {
    let app = setup_test_app().await;
    let docx = fixtures::build_docx(&["short lived"]);

    let response = app
        .client()
        .post("/convert")
        .multipart(fixtures::file_form(docx, "temp.docx", DOCX))
        .await;
    assert_eq!(response.status_code(), 200);

    app.wait_for_cleanup().await;
    assert!(app.scratch_files().is_empty(), "{:?}", app.scratch_files());
}

#[tokio::test]
async fn test_scratch_files_removed_after_failure() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/convert")
        .multipart(fixtures::file_form(b"PK\x03\x04broken".to_vec(), "broken.docx", DOCX))
        .await;
    assert_eq!(response.status_code(), 500);

    app.wait_for_cleanup().await;
    assert!(app.scratch_files().is_empty(), "{:?}", app.scratch_files());
}

#[tokio::test]
async fn test_concurrent_conversions_are_independent() {
    let app = setup_test_app().await;
    let alpha = fixtures::build_docx(&["Alpha document body"]);
    let beta = fixtures::build_docx(&["Beta document body"]);

    let first = app
        .client()
        .post("/convert")
        .multipart(fixtures::file_form(alpha, "same.docx", DOCX));
    let second = app
        .client()
        .post("/convert")
        .multipart(fixtures::file_form(beta, "same.docx", DOCX));

    let (first, second) = tokio::join!(first.into_future(), second.into_future());

    assert_eq!(first.status_code(), 200);
    assert_eq!(second.status_code(), 200);
    assert_eq!(
        fixtures::non_whitespace(&fixtures::pdf_text(first.as_bytes())),
        "Alphadocumentbody"
    );
    assert_eq!(
        fixtures::non_whitespace(&fixtures::pdf_text(second.as_bytes())),
        "Betadocumentbody"
    );
}

#[tokio::test]
async fn test_same_stem_uploads_get_separate_outputs() {
    let app = setup_test_app().await;
    let modern = fixtures::build_docx(&["Modern container"]);
    let renamed = fixtures::build_docx(&["Renamed container"]);

    let first = app
        .client()
        .post("/convert")
        .multipart(fixtures::file_form(modern, "same.docx", DOCX));
    let second = app
        .client()
        .post("/convert")
        .multipart(fixtures::file_form(renamed, "same.doc", DOC));

    let (first, second) = tokio::join!(first.into_future(), second.into_future());

    assert_eq!(first.status_code(), 200);
    assert_eq!(second.status_code(), 200);
    assert_eq!(
        fixtures::non_whitespace(&fixtures::pdf_text(first.as_bytes())),
        "Moderncontainer"
    );
    assert_eq!(
        fixtures::non_whitespace(&fixtures::pdf_text(second.as_bytes())),
        "Renamedcontainer"
    );

    app.wait_for_cleanup().await;
    assert!(app.scratch_files().is_empty(), "{:?}", app.scratch_files());
}

/// In-memory records whose `complete` always errors.
struct CompleteFailsStore(InMemoryConversionRepository);

#[async_trait::async_trait]
impl ConversionRecordStore for CompleteFailsStore {
    async fn create(&self, filename: &str, original_size: i64) -> Result<ConversionRecord, AppError> {
        self.0.create(filename, original_size).await
    }

    async fn complete(&self, _id: uuid::Uuid, _converted_size: i64) -> Result<(), AppError> {
        Err(AppError::Internal("record store unavailable".to_string()))
    }

    async fn fail(&self, id: uuid::Uuid) -> Result<(), AppError> {
        self.0.fail(id).await
    }

    async fn recent(&self, limit: i64) -> Result<Vec<ConversionRecord>, AppError> {
        self.0.recent(limit).await
    }
}

#[tokio::test]
async fn test_record_marked_failed_when_completion_cannot_be_saved() {
    let store = Arc::new(CompleteFailsStore(InMemoryConversionRepository::new()));
    let app = helpers::setup_test_app_with_records(store.clone()).await;

    let response = app
        .client()
        .post("/convert")
        .multipart(fixtures::file_form(
            fixtures::build_docx(&["saved?"]),
            "saved.docx",
            DOCX,
        ))
        .await;
    assert_eq!(response.status_code(), 500);

    let records = store.recent(10).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].status, ConversionStatus::Failed);

    app.wait_for_cleanup().await;
    assert!(app.scratch_files().is_empty(), "{:?}", app.scratch_files());
}
