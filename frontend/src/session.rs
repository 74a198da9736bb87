//! The operator's session: the flow record in a reactive signal.
//!
//! Components never touch the flow directly. They read derived values
//! through [`SessionFlow`] and trigger the three operations; every
//! mutation goes through [`FlowCell::with_flow`], which also moves the
//! flow's notices onto the toast stack.

use gloo_timers::callback::Timeout;
use leptos::*;
use pipescan_core::{
    submit_with, AnalysisResult, FlowCell, FlowState, Notice, SelectedFile, Settlement, UploadSubmitFlow,
};
use web_sys::File;

use crate::services::{read_preview, GlooPredictClient};
use crate::types::ToastQueue;
use crate::{MAX_TOASTS, PREDICT_URL, TOAST_DURATION_MS};

#[derive(Clone, Copy)]
pub struct SessionFlow {
    flow: RwSignal<UploadSubmitFlow<File>>,
    toasts: RwSignal<ToastQueue>,
}

impl SessionFlow {
    pub fn new() -> Self {
        Self {
            flow: create_rw_signal(UploadSubmitFlow::new()),
            toasts: create_rw_signal(ToastQueue::new(MAX_TOASTS)),
        }
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Select `file` and start reading its preview.
    pub fn select(&self, file: File) {
        let candidate = SelectedFile::new(file.name(), file.type_(), file.size() as u64, file.clone());
        match self.with_flow(|flow| flow.select_file(candidate)) {
            Some(Ok(ticket)) => read_preview(&file, ticket, *self),
            Some(Err(e)) => log::warn!("Selection rejected: {}", e),
            None => {}
        }
    }

    pub fn clear(&self) {
        self.with_flow(|flow| flow.clear_selection());
    }

    /// Fire-and-forget submission of the selected file.
    pub fn submit(&self) {
        let session = *self;
        spawn_local(async move {
            let client = GlooPredictClient::new(PREDICT_URL);
            match submit_with(&session, &client).await {
                Settlement::Applied(result) => log::info!("✅ {} ({})", result.status, result.confidence_percent()),
                Settlement::Failed(e) => log::error!("❌ {}", e),
                Settlement::Rejected(e) => log::warn!("Submit rejected: {}", e),
                Settlement::Superseded | Settlement::Ignored => log::debug!("Submission outcome dropped"),
            }
        });
    }

    pub fn dismiss_toast(&self, id: u64) {
        self.toasts.update(|queue| queue.dismiss(id));
    }

    // =========================================================================
    // Reactive reads
    // =========================================================================

    pub fn state(&self) -> FlowState {
        self.flow.with(|flow| flow.state())
    }

    pub fn selected_name(&self) -> Option<String> {
        self.flow.with(|flow| flow.selected().map(|file| file.name.clone()))
    }

    pub fn preview(&self) -> Option<String> {
        self.flow.with(|flow| flow.preview().map(str::to_string))
    }

    pub fn result(&self) -> Option<AnalysisResult> {
        self.flow.with(|flow| flow.result().cloned())
    }

    pub fn is_submitting(&self) -> bool {
        self.flow.with(|flow| flow.is_submitting())
    }

    pub fn can_submit(&self) -> bool {
        self.flow.with(|flow| flow.can_submit())
    }

    pub fn toasts(&self) -> ReadSignal<ToastQueue> {
        self.toasts.read_only()
    }

    fn show(&self, notice: Notice) {
        let timestamp = chrono::Local::now().format("%H:%M:%S").to_string();
        let Some(id) = self.toasts.try_update(|queue| queue.push(notice, timestamp)) else {
            return;
        };

        let toasts = self.toasts;
        Timeout::new(TOAST_DURATION_MS, move || {
            toasts.update(|queue| queue.dismiss(id));
        })
        .forget();
    }
}

impl Default for SessionFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl FlowCell<File> for SessionFlow {
    fn with_flow<R>(&self, f: impl FnOnce(&mut UploadSubmitFlow<File>) -> R) -> Option<R> {
        let (out, notices) = self.flow.try_update(|flow| {
            let out = f(flow);
            (out, flow.take_notices())
        })?;

        for notice in notices {
            self.show(notice);
        }
        Some(out)
    }
}
