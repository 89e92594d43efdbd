//! API route definitions

use axum::{http::Uri, middleware, routing::get, Json, Router};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;

use crate::{
    error::ApiError,
    handlers::{health, strings},
    middleware::logging_middleware,
    state::AppState,
};

/// API routes
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/api-docs/openapi.json", get(openapi_json))
        // Strings
        .route(
            "/strings",
            get(strings::list_strings).post(strings::create_string),
        )
        .route(
            "/strings/filter-by-natural-language",
            get(strings::filter_by_natural_language)
                .delete(strings::delete_natural_language_value),
        )
        .route(
            "/strings/:value",
            get(strings::get_string).delete(strings::delete_string),
        )
        .fallback(route_not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            logging_middleware,
        ))
        // CORS
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn route_not_found(uri: Uri) -> ApiError {
    ApiError::RouteNotFound(uri.path().to_string())
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// OpenAPI document for the string API
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        strings::create_string,
        strings::get_string,
        strings::list_strings,
        strings::filter_by_natural_language,
        strings::delete_string,
    ),
    components(schemas(
        crate::models::CreateStringRequest,
        crate::models::StringResponse,
        crate::models::StringListResponse,
        crate::models::NaturalLanguageResponse,
        crate::models::InterpretedQuery,
        crate::models::HealthResponse,
        crate::models::ErrorResponse,
    )),
    info(
        title = "stringlab API",
        version = "1.0.0",
        description = "Analyse, store, filter, and delete strings"
    )
)]
pub struct ApiDoc;
