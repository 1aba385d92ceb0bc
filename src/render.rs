use chrono::{DateTime, Utc};

use crate::models::{AnalysisResult, Review};
use crate::store::ReviewStore;

/// Render an analysis result as plain text
pub fn render_analysis(analysis: &AnalysisResult) -> String {
    let review = &analysis.data;
    let mut out = String::new();

    out.push_str("Sentiment Analysis\n");
    out.push_str("==================\n\n");
    out.push_str(&format!("Sentiment:  {}\n", review.sentiment.label()));
    out.push_str(&format!(
        "Confidence: {:.1}%\n\n",
        review.confidence_score * 100.0
    ));
    out.push_str(&format!("Review Text:\n  \"{}\"\n\n", review.review_text));

    out.push_str("Key Points\n");
    out.push_str("----------\n");

    let points = review.key_points();
    if points.is_empty() {
        out.push_str("No key points extracted.\n");
    } else {
        for (i, point) in points.iter().enumerate() {
            out.push_str(&format!("{:>2}. {}\n", i + 1, point));
        }
    }

    out
}

/// Render the loaded history page as plain text
pub fn render_history(store: &ReviewStore) -> String {
    let pagination = store.pagination();
    let mut out = String::new();

    out.push_str("Review History\n");
    out.push_str("==============\n");

    if pagination.total == 0 {
        out.push_str("No reviews yet. Submit your first review!\n");
        return out;
    }

    out.push_str(&format!(
        "{} review{} analyzed\n\n",
        pagination.total,
        if pagination.total == 1 { "" } else { "s" }
    ));

    if store.reviews().is_empty() {
        out.push_str("No reviews on this page.\n");
        return out;
    }

    for review in store.reviews() {
        out.push_str(&history_line(review));
    }

    if pagination.total_pages > 1 {
        out.push_str(&format!(
            "\nPage {} of {}\n",
            pagination.page, pagination.total_pages
        ));
    }

    out
}

fn history_line(review: &Review) -> String {
    format!(
        "[{}] {:<8} {:>3.0}%  {}\n",
        format_date(review.created_at.as_ref()),
        review.sentiment.label(),
        review.confidence_score * 100.0,
        truncate(&review.review_text, 60)
    )
}

fn format_date(date: Option<&DateTime<Utc>>) -> String {
    match date {
        Some(date) => date.format("%b %-d, %Y, %I:%M %p").to_string(),
        None => "unknown date".to_string(),
    }
}

/// Shorten `text` to at most `max` characters, marking the cut with "..."
fn truncate(text: &str, max: usize) -> String {
    let single_line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if single_line.chars().count() <= max {
        return single_line;
    }
    let cut: String = single_line.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", cut)
}
