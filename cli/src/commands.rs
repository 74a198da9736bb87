//! Command implementations.
//!
//! Each invocation is one session: a single [`UploadSubmitFlow`] that the
//! images are selected into one after another, exactly as an operator
//! would in the browser.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use pipescan_core::{
    encode_data_url, submit_with, AnalysisResult, Notice, PredictTransport, Settlement, UploadSubmitFlow, Verdict,
};
use serde::Serialize;

use crate::error::{CliError, CliResult};
use crate::media::{read_image, stat_image};

type Session = RefCell<UploadSubmitFlow<Vec<u8>>>;

/// Options shared by the commands.
#[derive(Clone, Debug, Default)]
pub struct AnalyzeOptions {
    /// Media type to declare instead of guessing
    pub media_type: Option<String>,
    /// Size limit, `None` for unlimited
    pub max_image_bytes: Option<u64>,
}

/// Outcome for one image.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageReport {
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<AnalysisResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defect: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ImageReport {
    fn analyzed(file: String, result: AnalysisResult) -> Self {
        let defect = Some(result.verdict() == Verdict::Defect);
        Self { file, result: Some(result), defect, error: None }
    }

    fn failed(file: String, error: impl ToString) -> Self {
        Self { file, result: None, defect: None, error: Some(error.to_string()) }
    }

    pub fn is_success(&self) -> bool {
        self.result.is_some()
    }
}

/// Select, preview and submit every image in order.
///
/// A failure on one image does not stop the batch.
pub async fn analyze_images<T>(paths: &[PathBuf], options: &AnalyzeOptions, transport: &T) -> Vec<ImageReport>
where
    T: PredictTransport<Vec<u8>>,
{
    let session: Session = RefCell::new(UploadSubmitFlow::new().with_size_limit(options.max_image_bytes));
    let mut reports = Vec::with_capacity(paths.len());

    for path in paths {
        let report = analyze_one(&session, path, options, transport).await;
        for notice in session.borrow_mut().take_notices() {
            eprintln!("{}", render_notice(&notice));
        }
        reports.push(report);
    }

    reports
}

async fn analyze_one<T>(session: &Session, path: &Path, options: &AnalyzeOptions, transport: &T) -> ImageReport
where
    T: PredictTransport<Vec<u8>>,
{
    let label = path.display().to_string();
    eprintln!("📄 Processing: {}", label);

    if let Err(e) = select_with_preview(session, path, options).await {
        return ImageReport::failed(label, e);
    }

    match submit_with(session, transport).await {
        Settlement::Applied(result) => ImageReport::analyzed(label, result),
        // Cause already logged by the flow
        Settlement::Failed(_) => ImageReport::failed(label, "Failed to analyze image"),
        Settlement::Rejected(e) => ImageReport::failed(label, e),
        Settlement::Superseded | Settlement::Ignored => ImageReport::failed(label, "result discarded"),
    }
}

/// Select `path` and fill in its preview.
///
/// Type and size are checked from metadata, so a rejected file is never
/// read. The preview is encoded only once the selection is accepted.
async fn select_with_preview(session: &Session, path: &Path, options: &AnalyzeOptions) -> CliResult<()> {
    let header = stat_image(path, options.media_type.as_deref()).await?;
    session.borrow_mut().check_candidate(&header.name, &header.media_type, header.size)?;

    let candidate = read_image(path, header).await?;
    let ticket = session.borrow_mut().select_file(candidate)?;

    let mut flow = session.borrow_mut();
    if let Some(data_url) = flow.selected().map(|file| encode_data_url(&file.media_type, &file.content)) {
        flow.complete_preview(ticket, data_url);
    }
    Ok(())
}

/// The data URL the UI would show for `path`.
pub async fn preview_image(path: &Path, options: &AnalyzeOptions) -> CliResult<String> {
    let session: Session = RefCell::new(UploadSubmitFlow::new().with_size_limit(options.max_image_bytes));
    let selected = select_with_preview(&session, path, options).await;

    for notice in session.borrow_mut().take_notices() {
        eprintln!("{}", render_notice(&notice));
    }
    selected?;

    let flow = session.borrow();
    flow.preview()
        .map(str::to_string)
        .ok_or_else(|| CliError::PreviewUnavailable { path: path.to_path_buf() })
}

/// Human-readable report block.
pub fn render_report(report: &ImageReport) -> String {
    match (&report.result, &report.error) {
        (Some(result), _) => {
            let verdict = result.verdict();
            format!(
                "📄 {}\n   {} {}\n   Confidence: {}",
                report.file,
                verdict.emoji(),
                verdict.title(),
                result.confidence_percent()
            )
        }
        (None, Some(error)) => format!("📄 {}\n   ❌ {}", report.file, error),
        (None, None) => format!("📄 {}", report.file),
    }
}

/// One stderr line for a notice.
pub fn render_notice(notice: &Notice) -> String {
    let prefix = if notice.is_destructive() { "❌" } else { "✅" };
    format!("{} {}: {}", prefix, notice.title, notice.description)
}
