use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use case_flow::workflows::assignments::{
    assignment_router, AssignmentRepository, CaseDirectory, NotificationPublisher,
    StepAssignmentService,
};
use case_flow::workflows::cases::{
    compute_completion, resolve_or_fallback, CaseRecord, CaseTypeAttributes, CompletionReport,
    RequirementCatalogSet,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub(crate) struct CaseProgressRequest {
    pub(crate) category: String,
    #[serde(default)]
    pub(crate) subtype: Option<String>,
    #[serde(default)]
    pub(crate) country: Option<String>,
    /// Raw case record as stored; any field might be a document.
    #[serde(default)]
    pub(crate) record: CaseRecord,
}

#[derive(Debug, Serialize)]
pub(crate) struct CaseProgressResponse {
    pub(crate) category: String,
    pub(crate) fallback_used: bool,
    pub(crate) steps: Vec<&'static str>,
    pub(crate) group_count: usize,
    #[serde(flatten)]
    pub(crate) completion: CompletionReport,
}

pub(crate) fn with_case_routes<R, D, N>(
    service: Arc<StepAssignmentService<R, D, N>>,
    catalogs: Arc<RequirementCatalogSet>,
) -> axum::Router
where
    R: AssignmentRepository + 'static,
    D: CaseDirectory + 'static,
    N: NotificationPublisher + 'static,
{
    assignment_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/cases/progress",
            axum::routing::post(case_progress_endpoint),
        )
        .layer(Extension(catalogs))
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

/// Case detail flow: resolve the requirement groups for the case's type
/// attributes, then match the raw record against them. An unknown category
/// answers with the generic catalog instead of an error.
pub(crate) async fn case_progress_endpoint(
    Extension(catalogs): Extension<Arc<RequirementCatalogSet>>,
    Json(payload): Json<CaseProgressRequest>,
) -> Json<CaseProgressResponse> {
    let CaseProgressRequest {
        category,
        subtype,
        country,
        record,
    } = payload;

    let attrs = CaseTypeAttributes {
        category: category.clone(),
        subtype,
        country,
    };

    let (groups, fallback_used) = resolve_or_fallback(&catalogs, &attrs);
    let completion = compute_completion(&groups, &record);

    let mut steps: Vec<&'static str> = Vec::new();
    for group in &groups {
        if !steps.contains(&group.step) {
            steps.push(group.step);
        }
    }

    Json(CaseProgressResponse {
        category,
        fallback_used,
        steps,
        group_count: groups.len(),
        completion,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn progress_request(category: &str, country: Option<&str>) -> CaseProgressRequest {
        let mut record = CaseRecord::new();
        record.insert("passaporteDoc".to_string(), json!("uploads/passaporte.pdf"));
        record.insert("cpfDoc".to_string(), json!("uploads/cpf.pdf"));
        record.insert("observacoes".to_string(), json!("cliente retorna amanhã"));

        CaseProgressRequest {
            category: category.to_string(),
            subtype: None,
            country: country.map(str::to_string),
            record,
        }
    }

    #[tokio::test]
    async fn brazil_work_visa_progress_counts_pending_documents() {
        let catalogs = Arc::new(RequirementCatalogSet::standard());
        let Json(body) = case_progress_endpoint(
            Extension(catalogs),
            Json(progress_request("work_visa", Some("Brasil"))),
        )
        .await;

        assert!(!body.fallback_used);
        assert_eq!(body.completion.missing_count, body.completion.total_count - 2);
        assert_eq!(body.steps.first().copied(), Some("Cadastro de Documentos"));
        assert!(body
            .completion
            .pending_for_step("Cadastro de Documentos")
            .is_some());
    }

    #[tokio::test]
    async fn unknown_category_answers_with_fallback_catalog() {
        let catalogs = Arc::new(RequirementCatalogSet::standard());
        let Json(body) = case_progress_endpoint(
            Extension(catalogs),
            Json(progress_request("inventario", None)),
        )
        .await;

        assert!(body.fallback_used);
        assert!(body.completion.total_count > 0);
    }

    #[tokio::test]
    async fn composed_router_serves_health_and_progress() {
        use crate::infra::{
            InMemoryAssignmentRepository, InMemoryCaseDirectory, InMemoryNotificationPublisher,
        };
        use axum::body::Body;
        use axum::http::{header, Request, StatusCode};
        use tower::util::ServiceExt;

        let catalogs = Arc::new(RequirementCatalogSet::standard());
        let service = Arc::new(StepAssignmentService::new(
            Arc::new(InMemoryAssignmentRepository::default()),
            Arc::new(InMemoryCaseDirectory::default()),
            Arc::new(InMemoryNotificationPublisher::default()),
            catalogs.clone(),
        ));
        let app = with_case_routes(service, catalogs);

        let response = app
            .clone()
            .oneshot(
                Request::get("/health")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router answers");
        assert_eq!(response.status(), StatusCode::OK);

        let payload = json!({
            "category": "work_visa",
            "country": "Brasil",
            "record": { "passaporteDoc": "uploads/passaporte.pdf" }
        });
        let response = app
            .oneshot(
                Request::post("/api/v1/cases/progress")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(payload.to_string()))
                    .expect("request builds"),
            )
            .await
            .expect("router answers");
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        let body: serde_json::Value = serde_json::from_slice(&bytes).expect("progress payload");
        assert_eq!(body["fallback_used"], json!(false));
        assert_eq!(
            body["missing_count"].as_u64(),
            body["total_count"].as_u64().map(|total| total - 1)
        );
    }
}
