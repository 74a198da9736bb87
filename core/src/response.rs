//! The inference endpoint's response contract.
//!
//! Transports only move bytes; deciding what a status/body pair means
//! happens here so the browser and native clients agree.
//!
//! | Response                              | Outcome                         |
//! |---------------------------------------|---------------------------------|
//! | 2xx, `{"status": s, "confidence": c}` | `Ok(AnalysisResult)`            |
//! | 2xx, anything else                    | `SubmissionError::MalformedBody`|
//! | non-2xx                               | `SubmissionError::Status`       |

use crate::config::MAX_ERROR_BODY_CHARS;
use crate::error::SubmissionError;
use crate::types::AnalysisResult;

/// Interpret an HTTP response from the endpoint.
pub fn decode_prediction(status: u16, body: &[u8]) -> Result<AnalysisResult, SubmissionError> {
    if !(200..300).contains(&status) {
        let text = String::from_utf8_lossy(body);
        return Err(SubmissionError::Status {
            code: status,
            body: text.chars().take(MAX_ERROR_BODY_CHARS).collect(),
        });
    }

    serde_json::from_slice::<AnalysisResult>(body).map_err(|e| SubmissionError::MalformedBody(e.to_string()))
}
