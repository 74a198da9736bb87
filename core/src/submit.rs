//! Async submission driver.
//!
//! [`submit_with`] runs one `submit()`: it takes a ticket from the flow,
//! awaits the transport, and settles the ticket. The flow is reached
//! through a [`FlowCell`] so the same driver works over a Leptos signal in
//! the browser and a `RefCell` natively. A [`SubmitGuard`] settles the
//! ticket when the future is dropped before the transport answers.

use std::cell::RefCell;
use std::future::Future;
use std::marker::PhantomData;

use crate::error::SubmissionError;
use crate::flow::{Settlement, SubmitTicket, UploadSubmitFlow};
use crate::types::{AnalysisResult, SelectedFile};

/// Shared access to a session's flow.
pub trait FlowCell<B> {
    /// Run `f` against the flow. `None` when the session is gone.
    fn with_flow<R>(&self, f: impl FnOnce(&mut UploadSubmitFlow<B>) -> R) -> Option<R>;
}

impl<B> FlowCell<B> for RefCell<UploadSubmitFlow<B>> {
    fn with_flow<R>(&self, f: impl FnOnce(&mut UploadSubmitFlow<B>) -> R) -> Option<R> {
        let mut flow = self.borrow_mut();
        Some(f(&mut *flow))
    }
}

/// Sends one image to the inference endpoint.
pub trait PredictTransport<B> {
    fn predict(&self, file: &SelectedFile<B>) -> impl Future<Output = Result<AnalysisResult, SubmissionError>>;
}

/// Settles a submit ticket exactly once.
///
/// Dropping an unfinished guard settles with [`SubmissionError::Abandoned`].
pub struct SubmitGuard<'a, B, C: FlowCell<B>> {
    cell: &'a C,
    ticket: Option<SubmitTicket>,
    _payload: PhantomData<fn() -> B>,
}

impl<'a, B, C: FlowCell<B>> SubmitGuard<'a, B, C> {
    pub fn new(cell: &'a C, ticket: SubmitTicket) -> Self {
        Self { cell, ticket: Some(ticket), _payload: PhantomData }
    }

    pub fn finish(mut self, outcome: Result<AnalysisResult, SubmissionError>) -> Settlement {
        match self.ticket.take() {
            Some(ticket) => self.cell.with_flow(|flow| flow.settle(ticket, outcome)).unwrap_or(Settlement::Ignored),
            None => Settlement::Ignored,
        }
    }
}

impl<B, C: FlowCell<B>> Drop for SubmitGuard<'_, B, C> {
    fn drop(&mut self) {
        if let Some(ticket) = self.ticket.take() {
            log::warn!("Submission dropped before it settled");
            self.cell.with_flow(|flow| flow.settle(ticket, Err(SubmissionError::Abandoned)));
        }
    }
}

/// Run one `submit()` against the flow in `cell`.
///
/// Exactly one call to `transport` is made, and only when the flow
/// accepts the submission.
pub async fn submit_with<B, C, T>(cell: &C, transport: &T) -> Settlement
where
    B: Clone,
    C: FlowCell<B>,
    T: PredictTransport<B>,
{
    let request = match cell.with_flow(|flow| flow.begin_submit()) {
        Some(Ok(request)) => request,
        Some(Err(err)) => return Settlement::Rejected(err),
        None => return Settlement::Ignored,
    };

    let guard = SubmitGuard::new(cell, request.ticket);
    let outcome = transport.predict(&request.file).await;
    guard.finish(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FlowError;
    use crate::flow::FlowState;
    use futures::executor::block_on;
    use futures::FutureExt;
    use std::cell::Cell;

    /// Answers every request with a canned outcome and counts calls.
    struct FakeTransport {
        outcome: Result<AnalysisResult, SubmissionError>,
        calls: Cell<usize>,
    }

    impl FakeTransport {
        fn answering(status: &str, confidence: f64) -> Self {
            Self {
                outcome: Ok(AnalysisResult { status: status.into(), confidence }),
                calls: Cell::new(0),
            }
        }

        fn failing(err: SubmissionError) -> Self {
            Self { outcome: Err(err), calls: Cell::new(0) }
        }
    }

    impl PredictTransport<Vec<u8>> for FakeTransport {
        fn predict(&self, _file: &SelectedFile<Vec<u8>>) -> impl Future<Output = Result<AnalysisResult, SubmissionError>> {
            self.calls.set(self.calls.get() + 1);
            let outcome = self.outcome.clone();
            async move { outcome }
        }
    }

    /// Never answers.
    struct HangingTransport;

    impl PredictTransport<Vec<u8>> for HangingTransport {
        fn predict(&self, _file: &SelectedFile<Vec<u8>>) -> impl Future<Output = Result<AnalysisResult, SubmissionError>> {
            futures::future::pending()
        }
    }

    fn session_with_file() -> RefCell<UploadSubmitFlow<Vec<u8>>> {
        let cell = RefCell::new(UploadSubmitFlow::new());
        cell.borrow_mut()
            .select_file(SelectedFile::from_bytes("xray1.png", "image/png", vec![1, 2, 3]))
            .unwrap();
        cell
    }

    #[test]
    fn test_defect_result_is_applied() {
        let cell = session_with_file();
        let transport = FakeTransport::answering("defect detected", 0.87);

        let settlement = block_on(submit_with(&cell, &transport));

        assert!(matches!(settlement, Settlement::Applied(_)));
        assert_eq!(transport.calls.get(), 1);
        let flow = cell.borrow();
        assert_eq!(flow.state(), FlowState::ResultReady);
        let result = flow.result().unwrap();
        assert_eq!(result.status, "defect detected");
        assert_eq!(result.confidence_percent(), "87.0%");
    }

    #[test]
    fn test_non_defect_result() {
        let cell = session_with_file();
        let transport = FakeTransport::answering("ok", 0.95);

        block_on(submit_with(&cell, &transport));

        let flow = cell.borrow();
        let result = flow.result().unwrap();
        assert_eq!(result.verdict(), crate::Verdict::NoDefect);
        assert_eq!(result.confidence_percent(), "95.0%");
    }

    #[test]
    fn test_no_file_means_no_call() {
        let cell: RefCell<UploadSubmitFlow<Vec<u8>>> = RefCell::new(UploadSubmitFlow::new());
        let transport = FakeTransport::answering("ok", 0.95);

        let settlement = block_on(submit_with(&cell, &transport));

        assert_eq!(settlement, Settlement::Rejected(FlowError::NoFileSelected));
        assert_eq!(transport.calls.get(), 0);
        assert_eq!(cell.borrow().notices()[0].title, "No image selected");
    }

    #[test]
    fn test_transport_failure_settles_as_error() {
        let cell = session_with_file();
        let transport = FakeTransport::failing(SubmissionError::Transport("connection refused".into()));

        let settlement = block_on(submit_with(&cell, &transport));

        assert!(matches!(settlement, Settlement::Failed(_)));
        let mut flow = cell.borrow_mut();
        assert!(flow.result().is_none());
        assert!(!flow.is_submitting());
        assert_eq!(flow.state(), FlowState::Error);
        let notices = flow.take_notices();
        assert!(notices.iter().any(|n| n.title == "Error" && n.is_destructive()));
    }

    #[test]
    fn test_dropped_submission_settles_as_abandoned() {
        let cell = session_with_file();

        let polled = submit_with(&cell, &HangingTransport).now_or_never();

        assert!(polled.is_none());
        let flow = cell.borrow();
        assert!(!flow.is_submitting());
        assert_eq!(
            flow.last_error(),
            Some(&FlowError::SubmissionFailed(SubmissionError::Abandoned))
        );
        assert!(flow.can_submit());
    }

    #[test]
    fn test_second_submit_while_in_flight_makes_no_call() {
        let cell = session_with_file();
        let transport = FakeTransport::answering("ok", 0.95);

        let mut first = Box::pin(submit_with(&cell, &HangingTransport));
        assert!((&mut first).now_or_never().is_none());
        assert!(cell.borrow().is_submitting());

        let second = block_on(submit_with(&cell, &transport));
        assert_eq!(second, Settlement::Rejected(FlowError::SubmissionInProgress));
        assert_eq!(transport.calls.get(), 0);

        drop(first);
        assert!(!cell.borrow().is_submitting());
    }

    #[test]
    fn test_finished_guard_does_not_settle_again() {
        let cell = session_with_file();
        let request = cell.borrow_mut().begin_submit().unwrap();

        let guard = SubmitGuard::new(&cell, request.ticket);
        let settlement = guard.finish(Ok(AnalysisResult { status: "ok".into(), confidence: 0.95 }));

        assert!(matches!(settlement, Settlement::Applied(_)));
        let flow = cell.borrow();
        assert_eq!(flow.state(), FlowState::ResultReady);
        assert!(flow.last_error().is_none());
    }
}
