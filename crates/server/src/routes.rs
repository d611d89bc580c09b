use std::path::Path;

use axum::{
    routing::{delete, get, patch, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    services::ServeFile,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;

use crate::openapi::ApiDoc;
use crate::state::ServerState;

pub mod cafes;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK")))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router: landing page, health, docs and the cafe API
pub fn build_router(state: ServerState, cors: CorsLayer, frontend_dir: &str) -> Router {
    let landing = ServeFile::new(Path::new(frontend_dir).join("index.html"));

    let public = Router::new()
        .route_service("/", landing)
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json));

    let api = Router::new()
        .route("/all", get(cafes::all_cafes))
        .route("/search", get(cafes::search))
        .route("/random", get(cafes::random))
        .route("/add", post(cafes::add_cafe))
        .route("/update-price/:cafe_id", patch(cafes::update_price))
        .route("/caffe-closed/:cafe_id", delete(cafes::delete_cafe));

    public
        .merge(api)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // span per request with method and path
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // status code and latency
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
