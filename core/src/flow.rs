//! The upload/submit/result state machine.
//!
//! [`UploadSubmitFlow`] is a plain record mutated by short synchronous
//! operations. The two asynchronous steps (reading the preview, waiting on
//! the endpoint) are split in two halves: an operation that hands out a
//! ticket, and a completion that takes the ticket back. Tickets carry the
//! selection generation they were issued under, so a completion that
//! arrives after the operator picked another file is dropped.
//!
//! ```text
//!   idle ──select──▶ fileSelected ──submit──▶ submitting ──ok──▶ resultReady
//!    ▲                    ▲  │                    │
//!    └──────clear─────────┘  │                    └──err──▶ error ──submit──▶ ...
//! ```

use crate::config::ACCEPTED_MEDIA_PREFIX;
use crate::error::{FlowError, FlowResult, SubmissionError};
use crate::types::{AnalysisResult, Notice, SelectedFile};

/// Lifecycle stage, derived from the flow record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlowState {
    Idle,
    FileSelected,
    Submitting,
    ResultReady,
    Error,
}

/// Handed out by [`UploadSubmitFlow::select_file`], redeemed by
/// [`UploadSubmitFlow::complete_preview`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PreviewTicket {
    generation: u64,
}

/// Identifies one in-flight submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubmitTicket {
    id: u64,
    generation: u64,
}

/// What a transport needs to perform one submission.
#[derive(Clone, Debug)]
pub struct SubmitRequest<B> {
    pub ticket: SubmitTicket,
    pub file: SelectedFile<B>,
}

/// How a submission ended, from the flow's point of view.
#[derive(Clone, Debug, PartialEq)]
pub enum Settlement {
    /// The result is now the flow's AnalysisResult.
    Applied(AnalysisResult),
    /// The submission failed and the flow is in the error state.
    Failed(FlowError),
    /// `submit` was refused before any request was made.
    Rejected(FlowError),
    /// The file changed while the request was in flight; outcome dropped.
    Superseded,
    /// The ticket does not match the in-flight submission.
    Ignored,
}

impl Settlement {
    /// `Ok(Some(result))` when applied, `Ok(None)` when dropped.
    pub fn into_result(self) -> FlowResult<Option<AnalysisResult>> {
        match self {
            Settlement::Applied(result) => Ok(Some(result)),
            Settlement::Failed(err) | Settlement::Rejected(err) => Err(err),
            Settlement::Superseded | Settlement::Ignored => Ok(None),
        }
    }
}

/// Session state for one operator.
#[derive(Clone, Debug)]
pub struct UploadSubmitFlow<B> {
    selected: Option<SelectedFile<B>>,
    preview: Option<String>,
    result: Option<AnalysisResult>,
    last_error: Option<FlowError>,
    in_flight: Option<SubmitTicket>,
    generation: u64,
    submissions: u64,
    max_image_bytes: Option<u64>,
    notices: Vec<Notice>,
}

impl<B> Default for UploadSubmitFlow<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B> UploadSubmitFlow<B> {
    pub fn new() -> Self {
        Self {
            selected: None,
            preview: None,
            result: None,
            last_error: None,
            in_flight: None,
            generation: 0,
            submissions: 0,
            max_image_bytes: None,
            notices: Vec::new(),
        }
    }

    /// Set the size limit; `None` (the default) accepts any size.
    pub fn with_size_limit(mut self, max_image_bytes: Option<u64>) -> Self {
        self.max_image_bytes = max_image_bytes;
        self
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Run the selection checks without selecting anything.
    ///
    /// Lets a host refuse a file before loading its content. A rejection
    /// queues the same notice `select_file` would.
    pub fn check_candidate(&mut self, name: &str, media_type: &str, size: u64) -> FlowResult<()> {
        if !is_image_media_type(media_type) {
            log::warn!("Rejected {} ({}): not an image", name, media_type);
            self.notify(Notice::destructive("Invalid file type", "Please upload an image file"));
            return Err(FlowError::InvalidFileType { media_type: media_type.to_string() });
        }

        if let Some(limit) = self.max_image_bytes {
            if size > limit {
                log::warn!("Rejected {}: {} bytes exceeds {}", name, size, limit);
                self.notify(Notice::destructive(
                    "File too large",
                    format!("Please upload an image up to {}", format_size(limit)),
                ));
                return Err(FlowError::FileTooLarge { size, limit });
            }
        }

        Ok(())
    }

    /// Validate and select `candidate`.
    ///
    /// On rejection nothing but the notice queue changes.
    pub fn select_file(&mut self, candidate: SelectedFile<B>) -> FlowResult<PreviewTicket> {
        self.check_candidate(&candidate.name, &candidate.media_type, candidate.size)?;

        self.generation += 1;
        log::debug!("Selected {} ({}, {} bytes)", candidate.name, candidate.media_type, candidate.size);

        self.selected = Some(candidate);
        self.preview = None;
        self.result = None;
        self.last_error = None;

        Ok(PreviewTicket { generation: self.generation })
    }

    /// Store the encoded preview if `ticket` still matches the selection.
    ///
    /// Returns whether the preview was applied.
    pub fn complete_preview(&mut self, ticket: PreviewTicket, data_url: String) -> bool {
        if ticket.generation != self.generation || self.selected.is_none() {
            log::debug!("Dropped stale preview (generation {} != {})", ticket.generation, self.generation);
            return false;
        }
        self.preview = Some(data_url);
        true
    }

    /// Forget the selection, its preview and any result.
    pub fn clear_selection(&mut self) {
        self.generation += 1;
        self.selected = None;
        self.preview = None;
        self.result = None;
        self.last_error = None;
        log::debug!("Selection cleared");
    }

    /// Enter `submitting` and hand out the request to perform.
    pub fn begin_submit(&mut self) -> FlowResult<SubmitRequest<B>>
    where
        B: Clone,
    {
        if self.in_flight.is_some() {
            log::warn!("Submit ignored: a request is already in flight");
            return Err(FlowError::SubmissionInProgress);
        }

        let file = match &self.selected {
            Some(file) => file.clone(),
            None => {
                self.notify(Notice::destructive("No image selected", "Please upload an image first"));
                return Err(FlowError::NoFileSelected);
            }
        };

        self.submissions += 1;
        let ticket = SubmitTicket { id: self.submissions, generation: self.generation };
        self.in_flight = Some(ticket);
        self.result = None;
        self.last_error = None;
        log::debug!("Submitting {} (request #{})", file.name, ticket.id);

        Ok(SubmitRequest { ticket, file })
    }

    /// Apply the outcome of the request identified by `ticket`.
    ///
    /// The submitting indicator is cleared here and nowhere else, so it
    /// flips back exactly once per request.
    pub fn settle(&mut self, ticket: SubmitTicket, outcome: Result<AnalysisResult, SubmissionError>) -> Settlement {
        if self.in_flight != Some(ticket) {
            log::debug!("Ignored settlement for request #{}", ticket.id);
            return Settlement::Ignored;
        }
        self.in_flight = None;

        if ticket.generation != self.generation {
            match &outcome {
                Ok(result) => log::info!("Dropped result of request #{} ({}): selection changed", ticket.id, result.status),
                Err(err) => log::info!("Dropped failure of request #{} ({}): selection changed", ticket.id, err),
            }
            return Settlement::Superseded;
        }

        match outcome {
            Ok(result) => {
                log::info!("Analysis complete: {} ({})", result.status, result.confidence_percent());
                self.notify(Notice::normal(
                    "Analysis complete",
                    format!("Confidence: {}", result.confidence_percent()),
                ));
                self.result = Some(result.clone());
                Settlement::Applied(result)
            }
            Err(err) => {
                log::error!("Error: {}", err);
                self.notify(Notice::destructive(
                    "Error",
                    "Failed to analyze image. Please check if the backend is running.",
                ));
                let err = FlowError::SubmissionFailed(err);
                self.last_error = Some(err.clone());
                Settlement::Failed(err)
            }
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn state(&self) -> FlowState {
        if self.in_flight.is_some() {
            FlowState::Submitting
        } else if self.result.is_some() {
            FlowState::ResultReady
        } else if self.last_error.is_some() {
            FlowState::Error
        } else if self.selected.is_some() {
            FlowState::FileSelected
        } else {
            FlowState::Idle
        }
    }

    pub fn selected(&self) -> Option<&SelectedFile<B>> {
        self.selected.as_ref()
    }

    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    /// The result, hidden while a request is in flight.
    pub fn result(&self) -> Option<&AnalysisResult> {
        match self.in_flight {
            Some(_) => None,
            None => self.result.as_ref(),
        }
    }

    pub fn last_error(&self) -> Option<&FlowError> {
        self.last_error.as_ref()
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Whether the submit control should be enabled.
    pub fn can_submit(&self) -> bool {
        self.selected.is_some() && self.in_flight.is_none()
    }

    pub fn max_image_bytes(&self) -> Option<u64> {
        self.max_image_bytes
    }

    /// Queued notices, oldest first.
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Drain the notice queue.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}

/// Whether a declared media type is in the image category.
pub fn is_image_media_type(media_type: &str) -> bool {
    media_type.starts_with(ACCEPTED_MEDIA_PREFIX)
}

fn format_size(bytes: u64) -> String {
    const MB: u64 = 1024 * 1024;
    if bytes >= MB && bytes % MB == 0 {
        format!("{}MB", bytes / MB)
    } else {
        format!("{} bytes", bytes)
    }
}
