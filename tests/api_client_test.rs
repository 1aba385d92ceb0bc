//! Integration tests for the review API client
//!
//! Tests HTTP behavior using wiremock for request/response mocking.

use serde_json::json;
use tokio_test::{assert_err, assert_ok};
use wiremock::{
    matchers::{body_json, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

use review_analyzer::{ApiError, Config, ReviewApi, ReviewApiClient, Sentiment};

fn create_test_client(base_url: &str) -> ReviewApiClient {
    ReviewApiClient::new(&Config::default().with_base_url(base_url))
}

fn review_json(id: i64, text: &str) -> serde_json::Value {
    json!({
        "id": id,
        "review_text": text,
        "sentiment": "positive",
        "confidence_score": 0.92,
        "key_points": "[\"fast shipping\",\"great quality\"]",
        "created_at": "2024-03-01T10:15:30.123456"
    })
}

#[cfg(test)]
mod submit_tests {
    use super::*;

    #[tokio::test]
    async fn test_successful_submission() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/reviews"))
            .and(body_json(json!({ "review_text": "Great product, fast shipping!" })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "status": "success",
                "data": review_json(1, "Great product, fast shipping!")
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let result = client.submit_review("Great product, fast shipping!").await;

        let analysis = assert_ok!(result);
        assert!(analysis.is_success());
        assert_eq!(analysis.data.id, 1);
        assert_eq!(analysis.data.sentiment, Sentiment::Positive);
        assert_eq!(
            analysis.data.key_points(),
            vec!["fast shipping", "great quality"]
        );
    }

    #[tokio::test]
    async fn test_text_is_trimmed_before_sending() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/reviews"))
            .and(body_json(json!({ "review_text": "Works as advertised" })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "status": "success",
                "data": review_json(2, "Works as advertised")
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        assert_ok!(client.submit_review("   Works as advertised \n").await);
    }

    #[tokio::test]
    async fn test_short_text_is_not_sent() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let err = assert_err!(client.submit_review("  too short  ").await);

        assert!(err.is_validation());
        assert!(matches!(err, ApiError::Validation { min_length: 10 }));
    }

    #[tokio::test]
    async fn test_service_error_uses_backend_message() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/reviews"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "status": "error",
                "error": "Sentiment analysis failed: model unavailable"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let err = assert_err!(client.submit_review("This product is amazing!").await);

        match err {
            ApiError::Service { status, message } => {
                assert_eq!(status, Some(500));
                assert_eq!(message, "Sentiment analysis failed: model unavailable");
            }
            other => panic!("expected service error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_service_error_prefers_message_field() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "status": "error",
                "message": "Review text rejected"
            })))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let err = assert_err!(client.submit_review("This product is amazing!").await);
        assert_eq!(err.to_string(), "Review text rejected");
    }

    #[tokio::test]
    async fn test_non_json_error_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let err = assert_err!(client.submit_review("This product is amazing!").await);
        assert!(err.is_service());
        assert_eq!(err.to_string(), "Bad Gateway");
    }

    #[tokio::test]
    async fn test_error_status_in_success_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "error",
                "message": "Quota exceeded"
            })))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let err = assert_err!(client.submit_review("This product is amazing!").await);
        assert!(err.is_service());
        assert_eq!(err.to_string(), "Quota exceeded");
    }

    #[tokio::test]
    async fn test_success_without_data() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "status": "success" })))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let err = assert_err!(client.submit_review("This product is amazing!").await);
        assert_eq!(err.to_string(), "Response missing data");
    }

    #[tokio::test]
    async fn test_network_error() {
        // Nothing listens on port 1
        let client = create_test_client("http://127.0.0.1:1");
        let err = assert_err!(client.submit_review("This product is amazing!").await);
        assert!(err.is_network());
    }
}

#[cfg(test)]
mod fetch_tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_page() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/reviews"))
            .and(query_param("page", "2"))
            .and(query_param("limit", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "data": {
                    "reviews": [review_json(5, "Fifth review text"), review_json(4, "Fourth review text")],
                    "page": 2,
                    "limit": 10,
                    "total": 15,
                    "total_pages": 2
                }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let page = assert_ok!(client.fetch_reviews(2, 10).await);

        assert_eq!(page.reviews.len(), 2);
        assert_eq!(page.reviews[0].id, 5);
        assert_eq!(page.page, 2);
        assert_eq!(page.total, 15);
        assert_eq!(page.total_pages, 2);
    }

    #[tokio::test]
    async fn test_fetch_page_with_null_timestamp() {
        let mock_server = MockServer::start().await;

        let mut undated = review_json(3, "Third review text");
        undated["created_at"] = serde_json::Value::Null;

        Mock::given(method("GET"))
            .and(path("/reviews"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "data": {
                    "reviews": [review_json(4, "Fourth review text"), undated],
                    "page": 1,
                    "limit": 10,
                    "total": 2,
                    "total_pages": 1
                }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let page = assert_ok!(client.fetch_reviews(1, 10).await);

        assert_eq!(page.reviews.len(), 2);
        assert!(page.reviews[0].created_at.is_some());
        assert_eq!(page.reviews[1].id, 3);
        assert!(page.reviews[1].created_at.is_none());
    }

    #[tokio::test]
    async fn test_fetch_uses_configured_path() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/reviews"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "data": { "reviews": [], "page": 1, "limit": 10, "total": 0, "total_pages": 0 }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&format!("{}/api/", mock_server.uri()));
        let page = assert_ok!(client.fetch_reviews(1, 10).await);
        assert!(page.reviews.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_invalid_parameters() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/reviews"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "status": "error",
                "error": "Invalid page or limit parameter"
            })))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let err = assert_err!(client.fetch_reviews(1, 10).await);
        assert_eq!(err.to_string(), "Invalid page or limit parameter");
    }

    #[tokio::test]
    async fn test_fetch_malformed_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/reviews"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let err = assert_err!(client.fetch_reviews(1, 10).await);
        assert!(err.is_service());
        assert!(err.to_string().starts_with("Invalid response body"));
    }
}

#[cfg(test)]
mod health_tests {
    use super::*;

    #[tokio::test]
    async fn test_health_check() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "healthy",
                "service": "Product Review Analyzer API"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let health = assert_ok!(client.health().await);
        assert!(health.is_healthy());
        assert_eq!(health.service.as_deref(), Some("Product Review Analyzer API"));
    }

    #[tokio::test]
    async fn test_health_check_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let err = assert_err!(client.health().await);
        assert!(err.is_service());
    }
}
