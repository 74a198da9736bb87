//! HTTP transport to the inference endpoint.

use std::future::Future;

use gloo_net::http::Request;
use pipescan_core::{decode_prediction, AnalysisResult, PredictTransport, SelectedFile, SubmissionError, UPLOAD_FIELD};
use web_sys::{File, FormData};

/// Posts the selected browser `File` as multipart form data.
#[derive(Clone, Debug)]
pub struct GlooPredictClient {
    url: String,
}

impl GlooPredictClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl PredictTransport<File> for GlooPredictClient {
    fn predict(&self, file: &SelectedFile<File>) -> impl Future<Output = Result<AnalysisResult, SubmissionError>> {
        let url = self.url.clone();
        let content = file.content.clone();
        let name = file.name.clone();
        async move { upload_image(&url, &content, &name).await }
    }
}

/// Upload one image and decode the classification.
pub async fn upload_image(url: &str, file: &File, file_name: &str) -> Result<AnalysisResult, SubmissionError> {
    let form_data = FormData::new()
        .map_err(|e| SubmissionError::Transport(format!("Failed to create FormData: {:?}", e)))?;

    form_data
        .append_with_blob_and_filename(UPLOAD_FIELD, file, file_name)
        .map_err(|e| SubmissionError::Transport(format!("Failed to append file: {:?}", e)))?;

    let request = Request::post(url)
        .body(form_data)
        .map_err(|e| SubmissionError::Transport(format!("Failed to build request: {}", e)))?;

    let response = request
        .send()
        .await
        .map_err(|e| SubmissionError::Transport(format!("HTTP request failed: {}", e)))?;

    let status = response.status();
    let body = match response.binary().await {
        Ok(body) => body,
        Err(e) if response.ok() => {
            return Err(SubmissionError::Transport(format!("Failed to read response: {}", e)));
        }
        Err(_) => Vec::new(),
    };

    decode_prediction(status, &body)
}
