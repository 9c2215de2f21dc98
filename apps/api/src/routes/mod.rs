pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

/// Headroom for JSON/multipart framing on top of the encoded photo.
const BODY_OVERHEAD_BYTES: usize = 64 * 1024;

/// Largest request body accepted for a photo of `max_photo_bytes`.
fn body_limit(max_photo_bytes: usize) -> usize {
    // base64 inflates the photo by 4/3 in the JSON variant
    (max_photo_bytes / 3)
        .saturating_mul(4)
        .saturating_add(4)
        .saturating_add(BODY_OVERHEAD_BYTES)
}

pub fn build_router(state: AppState) -> Router {
    let body_limit = body_limit(state.config.max_photo_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/report", post(handlers::handle_create_report))
        .route(
            "/api/v1/report/upload",
            post(handlers::handle_upload_report),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde_json::{json, Value};
    use tower::ServiceExt; // for `oneshot`

    use super::*;
    use crate::analysis::testing::{Behavior, MockTasks, TINY_PNG_B64};
    use crate::config::{Config, DEFAULT_MAX_PHOTO_BYTES};

    const BOUNDARY: &str = "nipalja-test-boundary";

    fn app(mock: MockTasks) -> Router {
        let config = Config {
            gemini_api_key: "test-key".to_string(),
            port: 0,
            rust_log: "debug".to_string(),
            max_photo_bytes: DEFAULT_MAX_PHOTO_BYTES,
            llm_max_retries: 0,
            llm_timeout_secs: None,
        };
        build_router(AppState {
            tasks: Arc::new(mock),
            config,
        })
    }

    fn json_request(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/report")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn valid_body() -> Value {
        json!({
            "name": "Kim",
            "birthDate": "1990-05-05",
            "birthTime": "14:30",
            "birthLocation": "Seoul",
            "photoDataUri": format!("data:image/png;base64,{TINY_PNG_B64}")
        })
    }

    fn multipart_request(fields: &[(&str, &str)], photo: Option<&[u8]>) -> Request<Body> {
        let mut body: Vec<u8> = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        if let Some(bytes) = photo {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"photo\"; filename=\"me.png\"\r\nContent-Type: image/png\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/api/v1/report/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn extract_json(body: Body) -> Value {
        let bytes = axum::body::to_bytes(body, usize::MAX)
            .await
            .expect("Should read body");
        serde_json::from_slice(&bytes).expect("Should parse JSON")
    }

    const FORM_FIELDS: [(&str, &str); 4] = [
        ("name", "Kim"),
        ("birthDate", "1990-05-05"),
        ("birthTime", "9:05"),
        ("birthLocation", "Seoul"),
    ];

    #[test]
    fn test_body_limit_covers_encoded_photo() {
        let limit = body_limit(DEFAULT_MAX_PHOTO_BYTES);
        assert!(limit >= DEFAULT_MAX_PHOTO_BYTES / 3 * 4 + BODY_OVERHEAD_BYTES);
    }

    #[test]
    fn test_body_limit_saturates_for_huge_photo_limit() {
        assert_eq!(body_limit(usize::MAX), usize::MAX);
        assert_eq!(body_limit(usize::MAX - 1), usize::MAX);
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let response = app(MockTasks::all_succeed())
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = extract_json(response.into_body()).await;
        assert_eq!(body["status"], "ok");
        assert!(body["version"].is_string());
    }

    #[tokio::test]
    async fn test_report_success_returns_full_view() {
        let response = app(MockTasks::all_succeed())
            .oneshot(json_request(valid_body()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = extract_json(response.into_body()).await;
        assert_eq!(body["report"]["match"]["status"], "found");
        assert_eq!(body["report"]["match"]["celebrityMatch"], "아이유");
        assert_eq!(body["report"]["personality"]["personalityAnalysis"].as_array().unwrap().len(), 5);
        assert_eq!(body["sections"]["charts"], true);
        assert!(body["notices"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_report_partial_failure_is_still_ok() {
        let mock = MockTasks {
            match_behavior: Behavior::Fail,
            visualization_behavior: Behavior::Fail,
            ..MockTasks::all_succeed()
        };
        let response = app(mock).oneshot(json_request(valid_body())).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = extract_json(response.into_body()).await;
        assert_eq!(body["report"]["match"]["status"], "notFound");
        assert!(body["report"]["visualization"].is_null());
        assert_eq!(body["sections"]["celebrityCard"], false);
        assert_eq!(body["notices"][0]["title"], "얼굴 인식 실패");
    }

    #[tokio::test]
    async fn test_report_invalid_birth_time_is_400() {
        let mut body = valid_body();
        body["birthTime"] = json!("25:99");
        let response = app(MockTasks::all_succeed())
            .oneshot(json_request(body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = extract_json(response.into_body()).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_report_hard_failure_is_502() {
        let mock = MockTasks {
            match_behavior: Behavior::Panic,
            ..MockTasks::all_succeed()
        };
        let response = app(mock).oneshot(json_request(valid_body())).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = extract_json(response.into_body()).await;
        assert_eq!(body["error"]["code"], "REPORT_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_upload_builds_report_from_multipart() {
        let png = STANDARD.decode(TINY_PNG_B64).unwrap();
        let response = app(MockTasks::all_succeed())
            .oneshot(multipart_request(&FORM_FIELDS, Some(&png)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = extract_json(response.into_body()).await;
        assert_eq!(body["report"]["userInput"]["birthTime"], "09:05");
        assert_eq!(
            body["report"]["userInput"]["photoDataUri"],
            format!("data:image/png;base64,{TINY_PNG_B64}")
        );
    }

    #[tokio::test]
    async fn test_upload_without_photo_is_400() {
        let response = app(MockTasks::all_succeed())
            .oneshot(multipart_request(&FORM_FIELDS, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
