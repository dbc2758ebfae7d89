use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{AssignmentKey, AssignmentPatch};
use super::repository::{
    AssignmentRepository, CaseDirectory, NotificationPublisher, RepositoryError,
};
use super::service::{AssignmentServiceError, StepAssignmentService};

/// Router builder exposing the step-assignment endpoints.
pub fn assignment_router<R, D, N>(service: Arc<StepAssignmentService<R, D, N>>) -> Router
where
    R: AssignmentRepository + 'static,
    D: CaseDirectory + 'static,
    N: NotificationPublisher + 'static,
{
    Router::new()
        .route("/api/v1/assignments", get(list_handler::<R, D, N>))
        .route(
            "/api/v1/assignments/:module_type/:record_id/:step_index",
            put(upsert_handler::<R, D, N>).delete(delete_handler::<R, D, N>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct AssignmentListQuery {
    module_type: String,
    /// Comma-separated record ids, e.g. `record_ids=12,13,14`.
    record_ids: String,
    #[serde(default)]
    step_index: Option<u32>,
}

pub(crate) async fn list_handler<R, D, N>(
    State(service): State<Arc<StepAssignmentService<R, D, N>>>,
    Query(query): Query<AssignmentListQuery>,
) -> Response
where
    R: AssignmentRepository + 'static,
    D: CaseDirectory + 'static,
    N: NotificationPublisher + 'static,
{
    let record_ids = match parse_record_ids(&query.record_ids) {
        Ok(ids) => ids,
        Err(raw) => {
            let payload = json!({
                "error": format!("record_ids entry '{raw}' is not an integer"),
            });
            return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
        }
    };

    match service.read(&query.module_type, &record_ids, query.step_index) {
        Ok(rows) => (StatusCode::OK, axum::Json(rows)).into_response(),
        Err(err) => storage_failure(err),
    }
}

pub(crate) async fn upsert_handler<R, D, N>(
    State(service): State<Arc<StepAssignmentService<R, D, N>>>,
    Path((module_type, record_id, step_index)): Path<(String, i64, u32)>,
    axum::Json(patch): axum::Json<AssignmentPatch>,
) -> Response
where
    R: AssignmentRepository + 'static,
    D: CaseDirectory + 'static,
    N: NotificationPublisher + 'static,
{
    let key = AssignmentKey::new(module_type, record_id, step_index);
    match service.upsert(&key, patch) {
        Ok(assignment) => (StatusCode::OK, axum::Json(assignment)).into_response(),
        Err(err) => storage_failure(err),
    }
}

pub(crate) async fn delete_handler<R, D, N>(
    State(service): State<Arc<StepAssignmentService<R, D, N>>>,
    Path((module_type, record_id, step_index)): Path<(String, i64, u32)>,
) -> Response
where
    R: AssignmentRepository + 'static,
    D: CaseDirectory + 'static,
    N: NotificationPublisher + 'static,
{
    let key = AssignmentKey::new(module_type, record_id, step_index);
    match service.delete(&key) {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => storage_failure(err),
    }
}

fn parse_record_ids(raw: &str) -> Result<Vec<i64>, String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| entry.parse::<i64>().map_err(|_| entry.to_string()))
        .collect()
}

fn storage_failure(err: AssignmentServiceError) -> Response {
    let status = match err {
        AssignmentServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        AssignmentServiceError::Repository(RepositoryError::WriteRejected(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let payload = json!({ "error": err.to_string() });
    (status, axum::Json(payload)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_ids_parse_with_spaces_and_trailing_commas() {
        assert_eq!(parse_record_ids("12, 13,14,"), Ok(vec![12, 13, 14]));
        assert_eq!(parse_record_ids("7"), Ok(vec![7]));
        assert_eq!(parse_record_ids("1,x"), Err("x".to_string()));
    }
}
