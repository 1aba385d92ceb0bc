use std::cell::{Ref, RefCell};

use tracing::debug;

use crate::api::ReviewApi;
use crate::config::Config;
use crate::controllers::{HistoryController, LoadOutcome, SubmissionController, SubmitOutcome};
use crate::store::ReviewStore;

/// One user session: the API client, the store, and the controllers that drive it.
///
/// Single-threaded. Operations take `&self`, so several may be in flight at
/// once on the same task; the store is only borrowed between suspension points.
pub struct ReviewSession<A> {
    api: A,
    store: RefCell<ReviewStore>,
    submissions: SubmissionController,
    history: HistoryController,
}

impl<A: ReviewApi> ReviewSession<A> {
    pub fn new(api: A, config: &Config) -> Self {
        Self {
            api,
            store: RefCell::new(ReviewStore::new(config.history.page_size)),
            submissions: SubmissionController::new(config.submission.min_length),
            history: HistoryController::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Read access to the current state
    pub fn store(&self) -> Ref<'_, ReviewStore> {
        self.store.borrow()
    }

    /// A copy of the current state
    pub fn snapshot(&self) -> ReviewStore {
        self.store.borrow().clone()
    }

    pub fn can_submit(&self, text: &str) -> bool {
        self.submissions.can_submit(text)
    }

    pub fn submissions_in_flight(&self) -> usize {
        self.submissions.in_flight()
    }

    pub fn history_loaded(&self) -> bool {
        self.history.is_loaded()
    }

    /// Submit a review. The first successful submission also loads page 1 of
    /// the history if it was never loaded; later ones rely on the prepend.
    pub async fn submit(&self, text: &str) -> SubmitOutcome {
        let outcome = self.submissions.submit(&self.api, &self.store, text).await;

        if outcome == SubmitOutcome::Applied && !self.history.is_loaded() {
            debug!("History not loaded yet, fetching first page after submission");
            self.history.load_initial(&self.api, &self.store).await;
        }

        outcome
    }

    pub async fn load_initial(&self) -> LoadOutcome {
        self.history.load_initial(&self.api, &self.store).await
    }

    pub async fn load_page(&self, page: i64) -> LoadOutcome {
        self.history.load_page(&self.api, &self.store, page).await
    }

    pub async fn next_page(&self) -> LoadOutcome {
        self.history.next_page(&self.api, &self.store).await
    }

    pub async fn previous_page(&self) -> LoadOutcome {
        self.history.previous_page(&self.api, &self.store).await
    }

    pub fn clear_error(&self) {
        self.store.borrow_mut().clear_error();
    }

    pub fn clear_current_analysis(&self) {
        self.store.borrow_mut().clear_current_analysis();
    }
}
