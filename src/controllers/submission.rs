use std::cell::{Cell, RefCell};

use tracing::{debug, info, warn};

use crate::api::ReviewApi;
use crate::sequence::RequestSequencer;
use crate::store::ReviewStore;

/// What happened to a submission attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Input too short; nothing was sent and the store is untouched
    Rejected,
    /// Result written to the store
    Applied,
    /// A newer submission settled first. A late success only adds its review
    /// to the history list; a late failure leaves the store untouched.
    Stale,
    /// The call failed and the store carries the error message
    Failed,
}

/// Turns user input into a submission and reconciles the result with the store
#[derive(Debug)]
pub struct SubmissionController {
    min_length: usize,
    sequencer: RequestSequencer,
    in_flight: Cell<usize>,
}

impl SubmissionController {
    pub fn new(min_length: usize) -> Self {
        Self {
            min_length,
            sequencer: RequestSequencer::new(),
            in_flight: Cell::new(0),
        }
    }

    /// Whether `text` is long enough to submit (trimmed, counted in characters)
    pub fn can_submit(&self, text: &str) -> bool {
        text.trim().chars().count() >= self.min_length
    }

    /// Number of submissions that have not settled yet
    pub fn in_flight(&self) -> usize {
        self.in_flight.get()
    }

    /// Submit `text` and apply the outcome to `store`.
    ///
    /// Never fails: errors end up in the store's error slot. Overlapping calls
    /// are allowed; the most recently issued one to settle owns
    /// `current_analysis` and `error`.
    pub async fn submit<A: ReviewApi + ?Sized>(
        &self,
        api: &A,
        store: &RefCell<ReviewStore>,
        text: &str,
    ) -> SubmitOutcome {
        if !self.can_submit(text) {
            debug!(
                min_length = self.min_length,
                "Submission below minimum length, not sent"
            );
            return SubmitOutcome::Rejected;
        }

        let seq = self.sequencer.issue();
        store.borrow_mut().clear_error();
        let _loading = LoadingGuard::acquire(&self.in_flight, store);

        info!(seq, "Submitting review");
        let result = api.submit_review(text).await;

        let mut state = store.borrow_mut();
        let current = self.sequencer.try_apply(seq);

        match result {
            Ok(analysis) => {
                let review = analysis.is_success().then(|| analysis.data.clone());
                if current {
                    state.set_current_analysis(analysis);
                }
                if let Some(review) = review {
                    state.add_review(review);
                }
                if current {
                    info!(seq, "Submission applied");
                    SubmitOutcome::Applied
                } else {
                    warn!(
                        seq,
                        latest = self.sequencer.last_applied(),
                        "Stale submission result, analysis not replaced"
                    );
                    SubmitOutcome::Stale
                }
            }
            Err(e) if current => {
                warn!(seq, error = %e, "Submission failed");
                state.set_error(Some(e.to_string()));
                SubmitOutcome::Failed
            }
            Err(e) => {
                warn!(seq, error = %e, "Stale submission failure discarded");
                SubmitOutcome::Stale
            }
        }
    }
}

/// Holds `loading` up while a submission is in flight.
///
/// Released on drop, so the flag also clears when the future is abandoned.
/// Release needs only a shared borrow of the store, which readers never block.
struct LoadingGuard<'a> {
    in_flight: &'a Cell<usize>,
    store: &'a RefCell<ReviewStore>,
}

impl<'a> LoadingGuard<'a> {
    fn acquire(in_flight: &'a Cell<usize>, store: &'a RefCell<ReviewStore>) -> Self {
        in_flight.set(in_flight.get() + 1);
        store.borrow().set_loading(true);
        Self { in_flight, store }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let remaining = self.in_flight.get().saturating_sub(1);
        self.in_flight.set(remaining);
        if remaining > 0 {
            return;
        }
        match self.store.try_borrow() {
            Ok(state) => state.set_loading(false),
            // Only a controller holds the store mutably, and never across an await
            Err(_) => warn!("Store mutably borrowed while releasing loading flag"),
        }
    }
}
