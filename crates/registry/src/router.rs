//! axum route wiring: translates HTTP requests into calls on [`handlers`],
//! which stay free of extractor types so they can be unit-tested directly.

use std::time::Instant;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post, put};
use axum::Router;
use log::info;
use serde_json::Value;

use crate::error::RegistryError;
use crate::handlers;
use crate::state::AppState;

/// Builds the full route table described in spec §4.2, bound to `state`.
#[must_use]
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/-/ping", get(liveness))
        .route("/-/ready", get(liveness))
        .route("/-/pkglab/index", get(index))
        .route("/-/pkglab/publish/status", get(publish_status))
        .route("/-/pkglab/publish", post(enqueue_publish))
        .route("/-/npm/v1/security/advisories/bulk", post(security_noop))
        .route("/-/npm/v1/security/audits/quick", post(security_noop))
        .route("/-/package/:name/dist-tags/:tag", put(set_dist_tag))
        .route("/:name/-/rev/:rev", put(update_rev).delete(delete_package))
        .route("/:name/-/:file", get(get_tarball).head(get_tarball))
        .route("/:name", get(get_packument).head(get_packument).put(publish_version))
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

async fn liveness() -> Json<Value> {
    Json(handlers::liveness())
}

async fn index(State(state): State<AppState>) -> String {
    handlers::index(&state).await
}

async fn publish_status(State(state): State<AppState>) -> Json<Value> {
    let statuses = handlers::publish_status(&state).await;
    Json(serde_json::to_value(statuses).unwrap_or_else(|_| serde_json::json!([])))
}

async fn enqueue_publish(
    State(state): State<AppState>,
    Json(request): Json<crate::queue_handle::PublishRequest>,
) -> impl IntoResponse {
    let outcome = handlers::enqueue_publish(&state, request).await;
    Json(outcome)
}

async fn security_noop() -> StatusCode {
    StatusCode::OK
}

async fn set_dist_tag(
    State(state): State<AppState>,
    Path((name, tag)): Path<(String, String)>,
    body: Bytes,
) -> Result<StatusCode, RegistryError> {
    let version: String = serde_json::from_slice(&body)
        .map_err(|e| RegistryError::BadRequest(format!("dist-tag body must be a JSON string: {e}")))?;
    handlers::set_dist_tag(&state, &name, &tag, version).await?;
    Ok(StatusCode::OK)
}

async fn publish_version(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(body): Json<Value>,
) -> Result<StatusCode, RegistryError> {
    handlers::publish_version(&state, &name, body).await?;
    Ok(StatusCode::CREATED)
}

async fn get_packument(
    method: Method,
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response, RegistryError> {
    let started = Instant::now();
    let doc = handlers::get_packument(&state, &name).await?;
    info!("GET /{name} 200 {}ms", started.elapsed().as_millis());
    if method == Method::HEAD {
        return Ok(StatusCode::OK.into_response());
    }
    Ok(Json(doc).into_response())
}

async fn get_tarball(
    method: Method,
    State(state): State<AppState>,
    Path((name, file)): Path<(String, String)>,
) -> Result<Response, RegistryError> {
    let proxied = handlers::get_tarball(&state, &name, &file).await?;
    if method == Method::HEAD {
        let mut response = StatusCode::OK.into_response();
        if let Some(headers) = proxied.forwarded_headers {
            *response.headers_mut() = headers;
        }
        return Ok(response);
    }
    let mut response = proxied.bytes.into_response();
    if let Some(headers) = proxied.forwarded_headers {
        for (key, value) in &headers {
            response.headers_mut().insert(key.clone(), value.clone());
        }
    }
    Ok(response)
}

async fn update_rev(
    State(state): State<AppState>,
    Path((name, rev)): Path<(String, String)>,
    Json(new_doc): Json<crate::packument::Packument>,
) -> Result<StatusCode, RegistryError> {
    handlers::update_rev(&state, &name, &rev, new_doc).await?;
    Ok(StatusCode::OK)
}

async fn delete_package(
    State(state): State<AppState>,
    Path((name, rev)): Path<(String, String)>,
) -> Result<StatusCode, RegistryError> {
    handlers::delete_package(&state, &name, &rev).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue_handle::{EnqueueOutcome, EnqueueStatus, PublishQueueHandle, WorkspaceQueueStatus};
    use axum::body::Body;
    use axum::http::Request;
    use std::sync::Arc;
    use tower::ServiceExt;

    struct StubQueue;

    #[async_trait::async_trait]
    impl PublishQueueHandle for StubQueue {
        async fn enqueue(&self, _request: crate::queue_handle::PublishRequest) -> EnqueueOutcome {
            EnqueueOutcome { job_id: "job-1".to_string(), status: EnqueueStatus::Queued }
        }
        async fn status(&self) -> Vec<WorkspaceQueueStatus> {
            Vec::new()
        }
    }

    async fn test_router(tmp: &std::path::Path) -> Router {
        let state = AppState {
            storage: Arc::new(crate::storage::Storage::load_all(tmp).await.expect("load_all")),
            http_client: reqwest::Client::new(),
            registry_base_url: "http://127.0.0.1:4873".to_string(),
            upstream_url: None,
            queue: Arc::new(StubQueue),
        };
        build_router(state)
    }

    #[tokio::test]
    async fn ping_returns_ok() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let router = test_router(tmp.path()).await;
        let response =
            router.oneshot(Request::builder().uri("/-/ping").body(Body::empty()).expect("request")).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unknown_package_is_not_found() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let router = test_router(tmp.path()).await;
        let response = router
            .oneshot(Request::builder().uri("/left-pad").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn security_endpoints_are_noop_200() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let router = test_router(tmp.path()).await;
        let response = router
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/-/npm/v1/security/advisories/bulk")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
    }
}
