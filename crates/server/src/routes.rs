pub mod cats;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;
use utoipa::OpenApi;

use common::{metrics, types::Health};
use service::cats::CatService;

use crate::openapi::ApiDoc;

/// Shared handler state. The store is injected here instead of living in a global.
#[derive(Clone)]
pub struct AppState {
    pub cats: CatService,
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn metrics_handler() -> (StatusCode, String) {
    metrics::encode_metrics()
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router: cat API, operational endpoints and static frontend.
pub fn build_router(state: AppState, cors: CorsLayer, static_dir: &str) -> Router {
    let index = format!("{}/index.html", static_dir.trim_end_matches('/'));
    let frontend = ServeDir::new(static_dir).fallback(ServeFile::new(index));

    // Cat resource routes
    let api = Router::new()
        .route("/cat", post(cats::create).put(cats::update))
        .route("/cats", get(cats::list))
        .route("/cat/:id", get(cats::get).delete(cats::delete));

    // Operational routes
    let ops = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics_handler))
        .route("/api-docs/openapi.json", get(openapi_json));

    // Compose; anything unmatched falls through to the static frontend
    api.merge(ops)
        .fallback_service(frontend)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // 响应返回时打点，包含状态码与耗时
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 失败（5xx 等）时以 ERROR 记录
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
