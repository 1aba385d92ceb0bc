pub mod client;

pub use client::ReviewApiClient;

use async_trait::async_trait;

use crate::error::ApiResult;
use crate::models::{AnalysisResult, HealthStatus, ReviewPage};

/// Operations the controllers need from the review backend.
///
/// Each call is a single round trip: no retries, caching or deduplication.
#[async_trait]
pub trait ReviewApi: Send + Sync {
    /// Submit review text for analysis
    async fn submit_review(&self, text: &str) -> ApiResult<AnalysisResult>;

    /// Fetch one page of history, newest first
    async fn fetch_reviews(&self, page: u32, limit: u32) -> ApiResult<ReviewPage>;

    /// Check that the backend is up
    async fn health(&self) -> ApiResult<HealthStatus>;
}
