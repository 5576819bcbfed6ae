use crate::infra::{deserialize_optional_date, today_or_local, AppState};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::NaiveDate;
use job_scout::assessment::{export_file_name, RecordError};
use job_scout::error::AppError;
use job_scout::{render_text, Assessment, RawJobRecord, UserPreferences};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Deserialize)]
pub(crate) struct AssessRequest {
    /// Decoded after the envelope so a malformed record is reported as a record error.
    pub(crate) record: serde_json::Value,
    #[serde(default)]
    pub(crate) preferences: Option<UserPreferences>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) today: Option<NaiveDate>,
    #[serde(default)]
    pub(crate) include_report: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct AssessResponse {
    pub(crate) today: NaiveDate,
    pub(crate) preferences: UserPreferences,
    pub(crate) assessment: Assessment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) report: Option<ExportedReport>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ExportedReport {
    pub(crate) file_name: String,
    pub(crate) text: String,
}

pub(crate) fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/jobs/assess", post(assess_endpoint))
        .layer(Extension(state))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn assess_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<AssessRequest>,
) -> Result<Json<AssessResponse>, AppError> {
    let AssessRequest {
        record,
        preferences,
        today,
        include_report,
    } = payload;

    let record: RawJobRecord = serde_json::from_value(record).map_err(RecordError::from)?;
    let preferences = preferences.unwrap_or_else(|| state.preferences.as_ref().clone());
    let today = today_or_local(today);

    let assessment = state.engine.assess(&record, &preferences, today);
    let report = include_report.then(|| ExportedReport {
        file_name: export_file_name(&assessment.job_title),
        text: render_text(&record, &assessment),
    });

    Ok(Json(AssessResponse {
        today,
        preferences,
        assessment,
        report,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use job_scout::{AssessmentEngine, ClientStatus, Dimension, ExperienceLevel};
    use metrics_exporter_prometheus::PrometheusBuilder;
    use serde_json::Value;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn state(ready: bool, preferences: UserPreferences) -> AppState {
        AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
            engine: Arc::new(AssessmentEngine::default()),
            preferences: Arc::new(preferences),
        }
    }

    fn record() -> Value {
        json!({
            "jobTitle": "Rust CLI tooling",
            "jobType": "Hourly",
            "budgetOrRate": "$40.00",
            "experienceLevel": "Expert",
            "paymentVerified": "Yes",
            "clientRating": "4.9",
            "clientReviewsCount": "(30 reviews)",
            "totalSpent": "$60K",
            "clientJobsPosted": "25",
            "clientHireRate": "88%",
            "avgHourlyRate": "$45.00",
            "memberSince": "Member since Jan 10, 2020"
        })
    }

    async fn read_json_body(response: axum::response::Response) -> Value {
        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        serde_json::from_slice(&body).expect("json")
    }

    #[tokio::test]
    async fn assess_endpoint_uses_stored_preferences_by_default() {
        let stored = UserPreferences {
            experience_level: Some(ExperienceLevel::Entry),
            ..UserPreferences::default()
        };
        let request = AssessRequest {
            record: record(),
            preferences: None,
            today: NaiveDate::from_ymd_opt(2025, 6, 15),
            include_report: false,
        };

        let Json(body) = assess_endpoint(Extension(state(true, stored.clone())), Json(request))
            .await
            .expect("assessment builds");

        assert_eq!(body.preferences, stored);
        assert_eq!(body.assessment.client.status, ClientStatus::Normal);
        let experience = body
            .assessment
            .verdict(Dimension::ExperienceMatch)
            .expect("experience verdict");
        assert_eq!(experience.tier, job_scout::AdvisoryTier::Red);
        assert!(body.report.is_none());
    }

    #[tokio::test]
    async fn assess_endpoint_can_include_text_report() {
        let request = AssessRequest {
            record: record(),
            preferences: Some(UserPreferences::default()),
            today: NaiveDate::from_ymd_opt(2025, 6, 15),
            include_report: true,
        };

        let Json(body) = assess_endpoint(
            Extension(state(true, UserPreferences::default())),
            Json(request),
        )
        .await
        .expect("assessment builds");

        let report = body.report.expect("report included");
        assert_eq!(report.file_name, "Rust_CLI_tooling.txt");
        assert!(report.text.contains("--- ASSESSMENT ---"));
    }

    #[tokio::test]
    async fn assess_route_round_trips_json() {
        let app = router(state(true, UserPreferences::default()));
        let payload = json!({
            "record": record(),
            "preferences": { "min_hourly_rate": 50.0 },
            "today": "2025-06-15"
        });

        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/jobs/assess")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::to_vec(&payload).expect("serialize payload"),
            ))
            .expect("request");

        let response = app.oneshot(request).await.expect("router dispatch");
        assert_eq!(response.status(), StatusCode::OK);

        let body = read_json_body(response).await;
        assert_eq!(body["today"], "2025-06-15");
        assert_eq!(body["assessment"]["client"]["status"], "normal");
        assert_eq!(
            body["assessment"]["indicators"]["job_rate"]["tier"],
            "red"
        );
    }

    #[tokio::test]
    async fn malformed_record_is_a_bad_request() {
        let app = router(state(true, UserPreferences::default()));
        let payload = json!({ "record": { "jobTitle": ["not", "a", "string"] } });

        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/jobs/assess")
            .header("content-type", "application/json")
            .body(Body::from(payload.to_string()))
            .expect("request");

        let response = app.oneshot(request).await.expect("router dispatch");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = read_json_body(response).await;
        assert!(body["error"]
            .as_str()
            .is_some_and(|message| message.starts_with("invalid job record")));
    }

    #[tokio::test]
    async fn readiness_reports_initializing_until_bound() {
        let app = router(state(false, UserPreferences::default()));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/ready")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = read_json_body(response).await;
        assert_eq!(body["status"], "initializing");
    }

    #[tokio::test]
    async fn health_and_metrics_respond() {
        let app = router(state(true, UserPreferences::default()));

        let health = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");
        assert_eq!(health.status(), StatusCode::OK);

        let metrics = app
            .oneshot(
                Request::builder()
                    .uri("/metrics")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");
        assert_eq!(metrics.status(), StatusCode::OK);
        assert_eq!(
            metrics.headers()[header::CONTENT_TYPE],
            "text/plain; version=0.0.4"
        );
    }
}
