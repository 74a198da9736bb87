//! End-to-end tests against an in-process stand-in for the inference
//! endpoint.

use std::cell::RefCell;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::post;
use axum::Router;
use pipescan::{analyze_images, preview_image, AnalyzeOptions, HttpPredictClient};
use pipescan_core::{
    submit_with, FlowError, FlowState, SelectedFile, Settlement, SubmissionError, UploadSubmitFlow, Verdict,
};
use serde_json::{json, Value};

// =============================================================================
// Stub endpoint
// =============================================================================

/// Classifies by filename: anything containing "crack" is defective.
async fn classify(
    State(calls): State<Arc<AtomicUsize>>,
    mut multipart: Multipart,
) -> Result<Json<Value>, (StatusCode, String)> {
    calls.fetch_add(1, Ordering::SeqCst);

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let name = field.file_name().unwrap_or_default().to_string();
        let media_type = field.content_type().unwrap_or_default().to_string();
        let bytes = field.bytes().await.map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

        let status = if name.contains("crack") {
            "defect detected".to_string()
        } else if name.contains("echo") {
            format!("{}|{}|{}", name, media_type, bytes.len())
        } else {
            "good pipe".to_string()
        };
        let confidence = if name.contains("crack") { 0.87 } else { 0.95 };
        return Ok(Json(json!({ "status": status, "confidence": confidence })));
    }

    Err((StatusCode::UNPROCESSABLE_ENTITY, "no file field".into()))
}

async fn broken() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "model not loaded")
}

async fn garbage() -> &'static str {
    "<html>not json</html>"
}

/// Serve the stub on an ephemeral port; returns its base URL and call counter.
async fn spawn_endpoint() -> (String, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route("/predict", post(classify))
        .route("/broken", post(broken))
        .route("/garbage", post(garbage))
        .with_state(calls.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), calls)
}

fn session_with(name: &str, media_type: &str) -> RefCell<UploadSubmitFlow<Vec<u8>>> {
    let session = RefCell::new(UploadSubmitFlow::new());
    session
        .borrow_mut()
        .select_file(SelectedFile::from_bytes(name, media_type, vec![0x89, b'P', b'N', b'G', 0, 1, 2]))
        .unwrap();
    session
}

// =============================================================================
// Transport + flow
// =============================================================================

#[tokio::test]
async fn test_defect_classification() {
    let (base, calls) = spawn_endpoint().await;
    let client = HttpPredictClient::new(format!("{}/predict", base)).unwrap();
    let session = session_with("crack_01.png", "image/png");

    let settlement = submit_with(&session, &client).await;

    assert!(matches!(settlement, Settlement::Applied(_)));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    let flow = session.borrow();
    assert_eq!(flow.state(), FlowState::ResultReady);
    let result = flow.result().unwrap();
    assert_eq!(result.verdict(), Verdict::Defect);
    assert_eq!(result.confidence_percent(), "87.0%");
}

#[tokio::test]
async fn test_good_pipe_classification() {
    let (base, _) = spawn_endpoint().await;
    let client = HttpPredictClient::new(format!("{}/predict", base)).unwrap();
    let session = session_with("weld_02.png", "image/png");

    submit_with(&session, &client).await;

    let flow = session.borrow();
    let result = flow.result().unwrap();
    assert_eq!(result.verdict(), Verdict::NoDefect);
    assert_eq!(result.confidence_percent(), "95.0%");
}

#[tokio::test]
async fn test_multipart_field_carries_name_and_type() {
    let (base, _) = spawn_endpoint().await;
    let client = HttpPredictClient::new(format!("{}/predict", base)).unwrap();
    let session = session_with("echo.jpg", "image/jpeg");

    submit_with(&session, &client).await;

    let flow = session.borrow();
    assert_eq!(flow.result().unwrap().status, "echo.jpg|image/jpeg|7");
}

#[tokio::test]
async fn test_server_error_is_submission_failure() {
    let (base, _) = spawn_endpoint().await;
    let client = HttpPredictClient::new(format!("{}/broken", base)).unwrap();
    let session = session_with("weld_02.png", "image/png");

    let settlement = submit_with(&session, &client).await;

    match settlement {
        Settlement::Failed(FlowError::SubmissionFailed(SubmissionError::Status { code, body })) => {
            assert_eq!(code, 500);
            assert_eq!(body, "model not loaded");
        }
        other => panic!("unexpected settlement: {:?}", other),
    }
    let mut flow = session.borrow_mut();
    assert_eq!(flow.state(), FlowState::Error);
    assert!(!flow.is_submitting());
    assert!(flow.result().is_none());
    assert!(flow.take_notices().iter().any(|n| n.title == "Error"));
}

#[tokio::test]
async fn test_malformed_body_is_submission_failure() {
    let (base, _) = spawn_endpoint().await;
    let client = HttpPredictClient::new(format!("{}/garbage", base)).unwrap();
    let session = session_with("weld_02.png", "image/png");

    let settlement = submit_with(&session, &client).await;

    assert!(matches!(
        settlement,
        Settlement::Failed(FlowError::SubmissionFailed(SubmissionError::MalformedBody(_)))
    ));
    assert!(session.borrow().result().is_none());
}

#[tokio::test]
async fn test_unreachable_endpoint_is_transport_failure() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = HttpPredictClient::new(format!("http://{}/predict", addr)).unwrap();
    let session = session_with("weld_02.png", "image/png");

    let settlement = submit_with(&session, &client).await;

    assert!(matches!(
        settlement,
        Settlement::Failed(FlowError::SubmissionFailed(SubmissionError::Transport(_)))
    ));
    let flow = session.borrow();
    assert!(!flow.is_submitting());
    assert!(flow.can_submit());
}

// =============================================================================
// Commands
// =============================================================================

#[tokio::test]
async fn test_analyze_batch_skips_non_images() {
    let (base, calls) = spawn_endpoint().await;
    let client = HttpPredictClient::new(format!("{}/predict", base)).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let crack = dir.path().join("crack_01.png");
    let doc = dir.path().join("doc.pdf");
    let good = dir.path().join("weld_02.jpg");
    std::fs::write(&crack, [0x89, b'P', b'N', b'G']).unwrap();
    std::fs::write(&doc, b"%PDF-1.7").unwrap();
    std::fs::write(&good, [0xFF, 0xD8, 0xFF]).unwrap();

    let reports = analyze_images(&[crack, doc, good], &AnalyzeOptions::default(), &client).await;

    assert_eq!(reports.len(), 3);
    assert_eq!(reports[0].defect, Some(true));
    assert!(!reports[1].is_success());
    assert!(reports[1].error.as_deref().unwrap().contains("Invalid file type"));
    assert_eq!(reports[2].defect, Some(false));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_analyze_respects_size_limit() {
    let (base, calls) = spawn_endpoint().await;
    let client = HttpPredictClient::new(format!("{}/predict", base)).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let big = dir.path().join("big.png");
    std::fs::write(&big, vec![0u8; 64]).unwrap();

    let options = AnalyzeOptions { media_type: None, max_image_bytes: Some(32) };
    let reports = analyze_images(&[big], &options, &client).await;

    assert!(reports[0].error.as_deref().unwrap().contains("File too large"));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_analyze_reports_generic_failure() {
    let (base, _) = spawn_endpoint().await;
    let client = HttpPredictClient::new(format!("{}/broken", base)).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("weld_02.png");
    std::fs::write(&image, [0x89, b'P', b'N', b'G']).unwrap();

    let reports = analyze_images(&[image], &AnalyzeOptions::default(), &client).await;

    assert_eq!(reports[0].error.as_deref(), Some("Failed to analyze image"));
}

#[tokio::test]
async fn test_preview_command() {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("xray1.png");
    std::fs::write(&image, [0x89, b'P', b'N', b'G']).unwrap();

    let data_url = preview_image(&image, &AnalyzeOptions::default()).await.unwrap();
    assert_eq!(data_url, "data:image/png;base64,iVBORw==");

    let doc = dir.path().join("doc.pdf");
    std::fs::write(&doc, b"%PDF").unwrap();
    assert!(preview_image(&doc, &AnalyzeOptions::default()).await.is_err());
}
