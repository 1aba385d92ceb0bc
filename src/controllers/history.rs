use std::cell::{Cell, RefCell};

use tracing::{debug, info, warn};

use crate::api::ReviewApi;
use crate::sequence::RequestSequencer;
use crate::store::ReviewStore;

/// What happened to a page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Page outside the known range; no request was issued
    Skipped,
    /// Reviews and pagination replaced with the server's page
    Applied,
    /// A newer page request settled first; the result was dropped
    Stale,
    /// The call failed and the store carries the error message
    Failed,
}

/// Loads pages of review history into the store
#[derive(Debug, Default)]
pub struct HistoryController {
    sequencer: RequestSequencer,
    loaded: Cell<bool>,
}

impl HistoryController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a page has been applied at least once
    pub fn is_loaded(&self) -> bool {
        self.loaded.get()
    }

    /// First load: always requests page 1
    pub async fn load_initial<A: ReviewApi + ?Sized>(
        &self,
        api: &A,
        store: &RefCell<ReviewStore>,
    ) -> LoadOutcome {
        self.fetch(api, store, 1).await
    }

    /// Load `page` if it is within the known page range
    pub async fn load_page<A: ReviewApi + ?Sized>(
        &self,
        api: &A,
        store: &RefCell<ReviewStore>,
        page: i64,
    ) -> LoadOutcome {
        let Some(page) = self.accept(store, page) else {
            return LoadOutcome::Skipped;
        };
        self.fetch(api, store, page).await
    }

    pub async fn next_page<A: ReviewApi + ?Sized>(
        &self,
        api: &A,
        store: &RefCell<ReviewStore>,
    ) -> LoadOutcome {
        let current = i64::from(store.borrow().pagination().page);
        self.load_page(api, store, current + 1).await
    }

    pub async fn previous_page<A: ReviewApi + ?Sized>(
        &self,
        api: &A,
        store: &RefCell<ReviewStore>,
    ) -> LoadOutcome {
        let current = i64::from(store.borrow().pagination().page);
        self.load_page(api, store, current - 1).await
    }

    fn accept(&self, store: &RefCell<ReviewStore>, page: i64) -> Option<u32> {
        let pagination = store.borrow().pagination();
        let in_range = if self.loaded.get() {
            pagination.contains(page)
        } else {
            page >= 1
        };

        if !in_range {
            warn!(
                page,
                total_pages = pagination.total_pages,
                "Requested page out of range, not loading"
            );
            return None;
        }

        u32::try_from(page).ok()
    }

    async fn fetch<A: ReviewApi + ?Sized>(
        &self,
        api: &A,
        store: &RefCell<ReviewStore>,
        page: u32,
    ) -> LoadOutcome {
        let seq = self.sequencer.issue();
        let limit = store.borrow().pagination().limit;

        info!(seq, page, limit, "Loading review history");
        let result = api.fetch_reviews(page, limit).await;

        if !self.sequencer.try_apply(seq) {
            warn!(
                seq,
                latest = self.sequencer.last_applied(),
                "Stale history page discarded"
            );
            return LoadOutcome::Stale;
        }

        let mut state = store.borrow_mut();
        match result {
            Ok(page) => {
                debug!(
                    seq,
                    count = page.reviews.len(),
                    total = page.total,
                    "History page applied"
                );
                state.set_pagination(page.pagination());
                state.set_reviews(page.reviews);
                self.loaded.set(true);
                LoadOutcome::Applied
            }
            Err(e) => {
                warn!(seq, error = %e, "Failed to load review history");
                state.set_error(Some(e.to_string()));
                LoadOutcome::Failed
            }
        }
    }
}
