use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use super::ReviewApi;
use crate::config::{ApiConfig, Config};
use crate::error::{ApiError, ApiResult};
use crate::models::{
    AnalysisResult, Envelope, EnvelopeStatus, HealthStatus, Review, ReviewPage, SubmitRequest,
};

/// HTTP client for the review analysis backend
#[derive(Clone)]
pub struct ReviewApiClient {
    client: Client,
    api: ApiConfig,
    min_length: usize,
}

impl ReviewApiClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            api: config.api.clone(),
            min_length: config.submission.min_length,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.api.base_url
    }

    async fn read_envelope<T: DeserializeOwned>(response: Response) -> ApiResult<Envelope<T>> {
        let status = response.status();
        let body = response.text().await?;

        debug!(status = %status, bytes = body.len(), "Received response");

        let envelope = serde_json::from_str::<Envelope<T>>(&body);

        if !status.is_success() {
            let message = envelope
                .ok()
                .and_then(|e| e.failure_message().map(str::to_string))
                .filter(|m| !m.is_empty())
                .or_else(|| Some(body.trim().to_string()).filter(|b| !b.is_empty()))
                .unwrap_or_else(|| {
                    format!(
                        "Request failed with status {}",
                        status.canonical_reason().unwrap_or(status.as_str())
                    )
                });
            warn!(status = %status, message = %message, "Service returned an error");
            return Err(ApiError::service(Some(status.as_u16()), message));
        }

        let envelope = envelope.map_err(|e| {
            ApiError::service(Some(status.as_u16()), format!("Invalid response body: {}", e))
        })?;

        if envelope.status == EnvelopeStatus::Error {
            let message = envelope
                .failure_message()
                .unwrap_or("Service reported an error")
                .to_string();
            warn!(message = %message, "Service reported an error");
            return Err(ApiError::service(Some(status.as_u16()), message));
        }

        Ok(envelope)
    }

    fn require_data<T>(envelope: Envelope<T>) -> ApiResult<T> {
        envelope
            .data
            .ok_or_else(|| ApiError::service(None, "Response missing data"))
    }
}

#[async_trait]
impl ReviewApi for ReviewApiClient {
    #[instrument(skip(self, text), fields(chars = text.chars().count()))]
    async fn submit_review(&self, text: &str) -> ApiResult<AnalysisResult> {
        let trimmed = text.trim();
        if trimmed.chars().count() < self.min_length {
            return Err(ApiError::Validation {
                min_length: self.min_length,
            });
        }

        info!("Submitting review for analysis");

        let response = self
            .client
            .post(self.api.url(&self.api.submit_path))
            .json(&SubmitRequest {
                review_text: trimmed,
            })
            .send()
            .await?;

        let envelope = Self::read_envelope::<Review>(response).await?;
        let review = Self::require_data(envelope)?;

        info!(id = review.id, sentiment = ?review.sentiment, "Review analyzed");

        Ok(AnalysisResult::success(review))
    }

    #[instrument(skip(self))]
    async fn fetch_reviews(&self, page: u32, limit: u32) -> ApiResult<ReviewPage> {
        info!("Fetching review history");

        let response = self
            .client
            .get(self.api.url(&self.api.reviews_path))
            .query(&[("page", page), ("limit", limit)])
            .send()
            .await?;

        let envelope = Self::read_envelope::<ReviewPage>(response).await?;
        let page = Self::require_data(envelope)?;

        debug!(
            count = page.reviews.len(),
            total = page.total,
            total_pages = page.total_pages,
            "Fetched review page"
        );

        Ok(page)
    }

    #[instrument(skip(self))]
    async fn health(&self) -> ApiResult<HealthStatus> {
        let response = self
            .client
            .get(self.api.url(&self.api.health_path))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::service(
                Some(status.as_u16()),
                format!("Health check failed ({}): {}", status, body.trim()),
            ));
        }

        let health: HealthStatus = response.json().await.map_err(|e| {
            ApiError::service(
                Some(status.as_u16()),
                format!("Invalid health response: {}", e),
            )
        })?;

        debug!(status = %health.status, "Health check complete");

        Ok(health)
    }
}
