use std::cell::Cell;

use tracing::debug;

use crate::models::{AnalysisResult, Pagination, Review};

/// Client-side state for one session.
///
/// Every mutation replaces a whole slice of state, so readers never see a
/// partially updated list or cursor. The loading flag is a `Cell` so it can
/// be released through a shared borrow.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewStore {
    reviews: Vec<Review>,
    current_analysis: Option<AnalysisResult>,
    loading: Cell<bool>,
    error: Option<String>,
    pagination: Pagination,
}

impl Default for ReviewStore {
    fn default() -> Self {
        Self::new(Pagination::default().limit)
    }
}

impl ReviewStore {
    pub fn new(page_size: u32) -> Self {
        Self {
            reviews: Vec::new(),
            current_analysis: None,
            loading: Cell::new(false),
            error: None,
            pagination: Pagination::empty(page_size),
        }
    }

    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    pub fn current_analysis(&self) -> Option<&AnalysisResult> {
        self.current_analysis.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub fn set_reviews(&mut self, reviews: Vec<Review>) {
        self.reviews = reviews;
    }

    pub fn set_pagination(&mut self, pagination: Pagination) {
        self.pagination = pagination;
    }

    pub fn set_current_analysis(&mut self, result: AnalysisResult) {
        self.current_analysis = Some(result);
    }

    pub fn set_loading(&self, loading: bool) {
        self.loading.set(loading);
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn clear_current_analysis(&mut self) {
        self.current_analysis = None;
    }

    /// Prepend a freshly analyzed review and bump the total.
    ///
    /// `total_pages` is left as is; the next page fetch resynchronises it.
    pub fn add_review(&mut self, review: Review) {
        debug!(id = review.id, "Prepending review to history");

        self.reviews.insert(0, review);
        self.pagination.total += 1;
    }
}
