//! HTTP transport to the inference endpoint (reqwest).

use std::future::Future;

use pipescan_core::{decode_prediction, AnalysisResult, PredictTransport, SelectedFile, SubmissionError, UPLOAD_FIELD};
use reqwest::multipart::{Form, Part};

use crate::error::CliResult;

/// Posts images as `multipart/form-data`, one request per call, no retry.
#[derive(Clone, Debug)]
pub struct HttpPredictClient {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpPredictClient {
    pub fn new(endpoint: impl Into<String>) -> CliResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("pipescan/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, endpoint: endpoint.into() })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn post_image(&self, file: &SelectedFile<Vec<u8>>) -> Result<AnalysisResult, SubmissionError> {
        let part = Part::bytes(file.content.clone())
            .file_name(file.name.clone())
            .mime_str(&file.media_type)
            .map_err(|e| SubmissionError::Transport(format!("Invalid media type '{}': {}", file.media_type, e)))?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        tracing::debug!(endpoint = %self.endpoint, file = %file.name, size = file.size, "POST image");

        let response = self
            .http
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| SubmissionError::Transport(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let body = match response.bytes().await {
            Ok(body) => body.to_vec(),
            Err(e) if status.is_success() => {
                return Err(SubmissionError::Transport(format!("Failed to read response: {}", e)));
            }
            Err(_) => Vec::new(),
        };

        decode_prediction(status.as_u16(), &body)
    }
}

impl PredictTransport<Vec<u8>> for HttpPredictClient {
    fn predict(&self, file: &SelectedFile<Vec<u8>>) -> impl Future<Output = Result<AnalysisResult, SubmissionError>> {
        self.post_image(file)
    }
}
