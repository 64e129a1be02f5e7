//! HTTP request handlers for the arqueo engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::compute_totals;
use crate::models::{ShiftRecord, StoredArqueo, DENOMINATIONS};
use crate::report::{build_report, render_pdf};
use crate::store::DEFAULT_LIST_LIMIT;

use super::request::ArqueoRequest;
use super::response::{ApiError, ApiErrorResponse, FormBootstrap, SaveResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/save", post(save_handler))
        .route("/report", post(report_handler))
        .route("/report/:id", get(report_by_id_handler))
        .route("/list", get(list_handler))
        .route("/arqueos/:id", get(fetch_handler))
        .with_state(state)
}

/// Handler for GET / — the data a form client needs to render itself.
async fn index_handler() -> Json<FormBootstrap> {
    Json(FormBootstrap {
        today: chrono::Utc::now().date_naive().to_string(),
        denominations: DENOMINATIONS.to_vec(),
    })
}

/// Handler for POST /save.
///
/// Computes the totals for the submission, persists one immutable row, and
/// returns the assigned id together with the totals.
async fn save_handler(
    State(state): State<AppState>,
    payload: Result<Json<ArqueoRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing save request");

    let record = match extract_record(payload, correlation_id) {
        Ok(record) => record,
        Err(response) => return response,
    };

    match persist(&state, &record, correlation_id) {
        Ok(stored) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            Json(SaveResponse {
                status: "ok".to_string(),
                id: stored.id,
                totals: stored.totals,
            }),
        )
            .into_response(),
        Err(response) => response,
    }
}

/// Handler for POST /report.
///
/// Same as `/save`, then renders the stored record as a PDF and returns the
/// document as a download.
async fn report_handler(
    State(state): State<AppState>,
    payload: Result<Json<ArqueoRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing report request");

    let record = match extract_record(payload, correlation_id) {
        Ok(record) => record,
        Err(response) => return response,
    };

    let stored = match persist(&state, &record, correlation_id) {
        Ok(stored) => stored,
        Err(response) => return response,
    };

    pdf_response(&state, &stored, correlation_id)
}

/// Handler for GET /report/:id — PDF for an already-stored arqueo.
async fn report_by_id_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();

    let stored = match state.store().fetch(id) {
        Ok(stored) => stored,
        Err(err) => {
            warn!(correlation_id = %correlation_id, id, error = %err, "Report lookup failed");
            let api_error: ApiErrorResponse = err.into();
            return api_error.into_response();
        }
    };

    pdf_response(&state, &stored, correlation_id)
}

/// Handler for GET /list — most recent arqueos, newest first.
async fn list_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.store().list_recent(DEFAULT_LIST_LIMIT) {
        Ok(summaries) => Json(summaries).into_response(),
        Err(err) => {
            warn!(error = %err, "Listing failed");
            let api_error: ApiErrorResponse = err.into();
            api_error.into_response()
        }
    }
}

/// Handler for GET /arqueos/:id — stored record and totals as JSON.
async fn fetch_handler(State(state): State<AppState>, Path(id): Path<i64>) -> impl IntoResponse {
    match state.store().fetch(id) {
        Ok(stored) => Json(stored).into_response(),
        Err(err) => {
            warn!(id, error = %err, "Fetch failed");
            let api_error: ApiErrorResponse = err.into();
            api_error.into_response()
        }
    }
}

/// Unwraps the JSON payload, mapping rejections to 400 responses.
fn extract_record(
    payload: Result<Json<ArqueoRequest>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<ShiftRecord, axum::response::Response> {
    match payload {
        Ok(Json(request)) => Ok(request.into()),
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::new("VALIDATION_ERROR", body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            Err((
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response())
        }
    }
}

/// Computes totals and stores the record, logging the outcome.
fn persist(
    state: &AppState,
    record: &ShiftRecord,
    correlation_id: Uuid,
) -> Result<StoredArqueo, axum::response::Response> {
    let totals = compute_totals(record, state.noncash_policy());

    match state.store().insert(record, &totals) {
        Ok(stored) => {
            info!(
                correlation_id = %correlation_id,
                id = stored.id,
                cashier = %record.cashier,
                balance_general = %stored.totals.balance_general,
                diferencia = %stored.totals.diferencia,
                outcome = %stored.totals.outcome(),
                "Arqueo saved"
            );
            Ok(stored)
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Save failed");
            let api_error: ApiErrorResponse = err.into();
            Err(api_error.into_response())
        }
    }
}

/// Renders a stored arqueo as a PDF download response.
fn pdf_response(
    state: &AppState,
    stored: &StoredArqueo,
    correlation_id: Uuid,
) -> axum::response::Response {
    let document = build_report(stored);
    match render_pdf(&document, &state.config().report) {
        Ok(bytes) => {
            info!(
                correlation_id = %correlation_id,
                id = stored.id,
                size = bytes.len(),
                "Report rendered"
            );
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "application/pdf".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", document.filename),
                    ),
                ],
                bytes,
            )
                .into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Render failed");
            let api_error: ApiErrorResponse = err.into();
            api_error.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::store::ArqueoStore;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use rust_decimal::Decimal;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        AppState::new(
            EngineConfig::default(),
            ArqueoStore::open_in_memory().expect("in-memory store"),
        )
    }

    fn json_request(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_save_returns_id_and_totals() {
        let router = create_router(create_test_state());

        let body = r#"{
            "date": "2026-03-01",
            "cashier": "maria",
            "shift": "mañana",
            "counts": {"2000": 2, "100": 1}
        }"#;

        let response = router.oneshot(json_request("/save", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let result: SaveResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(result.status, "ok");
        assert_eq!(result.id, 1);
        assert_eq!(result.totals.cash_total, Decimal::from(4100));
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(json_request("/save", "{invalid json"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_cashier_returns_400_validation_error() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(json_request(
                "/save",
                r#"{"date": "2026-03-01", "shift": "tarde"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert!(
            error.message.contains("missing field")
                || error.message.to_lowercase().contains("cashier"),
            "Expected error message to mention the missing field, got: {}",
            error.message
        );
    }

    #[tokio::test]
    async fn test_bad_numeric_field_is_not_a_request_error() {
        let router = create_router(create_test_state());

        // A malformed quantity is coerced, never rejected.
        let body = r#"{
            "date": "2026-03-01",
            "cashier": "maria",
            "shift": "mañana",
            "counts": {"2000": "x"}
        }"#;

        let response = router.oneshot(json_request("/save", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let result: SaveResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(result.totals.cash_total, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_fetch_missing_id_returns_404() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/arqueos/999")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "ARQUEO_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_report_by_missing_id_returns_404() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/report/42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_index_serves_denominations() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let bootstrap: FormBootstrap = serde_json::from_slice(&body).unwrap();
        assert_eq!(bootstrap.denominations, DENOMINATIONS.to_vec());
        assert!(!bootstrap.today.is_empty());
    }
}
