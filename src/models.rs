use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

/// Sentiment label assigned by the inference service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    #[default]
    Neutral,
}

impl Sentiment {
    /// Parse a label case-insensitively. Unknown labels map to neutral.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "positive" => Sentiment::Positive,
            "negative" => Sentiment::Negative,
            _ => Sentiment::Neutral,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        }
    }
}

impl<'de> Deserialize<'de> for Sentiment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = Option::<String>::deserialize(deserializer)?;
        Ok(label.map(|l| Sentiment::from_label(&l)).unwrap_or_default())
    }
}

/// An analyzed review as returned by the backend. Never mutated after receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    pub review_text: String,
    #[serde(default)]
    pub sentiment: Sentiment,
    #[serde(default, deserialize_with = "clamped_confidence")]
    pub confidence_score: f64,
    /// JSON-encoded array of strings, kept as received
    #[serde(default, deserialize_with = "nullable_string")]
    pub key_points: String,
    /// Missing, null or unreadable timestamps decode as `None`
    #[serde(default, deserialize_with = "iso_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Review {
    /// Decode the key points. Text that is not a JSON array becomes a single point.
    pub fn key_points(&self) -> Vec<String> {
        parse_key_points(&self.key_points)
    }
}

/// Decode a `key_points` wire value into a list of points
pub fn parse_key_points(raw: &str) -> Vec<String> {
    if raw.trim().is_empty() {
        return Vec::new();
    }

    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            })
            .collect(),
        _ => vec![raw.to_string()],
    }
}

fn clamped_confidence<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0);
    if value.is_nan() {
        return Ok(0.0);
    }
    Ok(value.clamp(0.0, 1.0))
}

fn nullable_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts RFC 3339 timestamps and offset-less ISO-8601 ones (read as UTC).
/// A bad timestamp on one row must not fail the whole page.
fn iso_timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let parsed = parse_timestamp(&raw);
    if parsed.is_none() {
        warn!(created_at = %raw, "Ignoring unreadable review timestamp");
    }
    Ok(parsed)
}

pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Outcome marker carried by an analysis result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisStatus {
    Success,
    Error,
}

/// The result of one submission, held for the current session only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub status: AnalysisStatus,
    pub data: Review,
}

impl AnalysisResult {
    pub fn success(review: Review) -> Self {
        Self {
            status: AnalysisStatus::Success,
            data: review,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == AnalysisStatus::Success
    }
}

/// Pagination cursor for the history list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::empty(10)
    }
}

impl Pagination {
    /// Starting cursor before anything has been loaded
    pub fn empty(limit: u32) -> Self {
        Self {
            page: 1,
            limit,
            total: 0,
            total_pages: 0,
        }
    }

    /// `ceil(total / limit)`, zero when `limit` is zero
    pub fn pages_for(total: u64, limit: u32) -> u64 {
        if limit == 0 {
            return 0;
        }
        total.div_ceil(u64::from(limit))
    }

    /// Whether `page` lies within `1..=max(total_pages, 1)`
    pub fn contains(&self, page: i64) -> bool {
        page >= 1 && page as u64 <= self.total_pages.max(1)
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.page) < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// One page of history as returned by the backend
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReviewPage {
    /// Newest first
    pub reviews: Vec<Review>,
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u64,
}

impl ReviewPage {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            limit: self.limit,
            total: self.total,
            total_pages: self.total_pages,
        }
    }
}

/// Service health report
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub service: Option<String>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}

/// Request body for a submission
#[derive(Debug, Serialize)]
pub(crate) struct SubmitRequest<'a> {
    pub review_text: &'a str,
}

/// Response envelope status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum EnvelopeStatus {
    Success,
    Error,
}

/// `{ status, data?, message? }` wrapper used by every endpoint
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub status: EnvelopeStatus,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    pub fn failure_message(&self) -> Option<&str> {
        self.message.as_deref().or(self.error.as_deref())
    }
}
