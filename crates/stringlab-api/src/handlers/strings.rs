//! String analysis API handlers

use axum::{
    extract::{
        path::ErrorKind,
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde_json::Value;
use stringlab_core::{analyse, FilterParams, StoreError};

use crate::{
    error::{ApiError, ApiResult},
    models::{
        CreateStringRequest, ErrorResponse, InterpretedQuery, ListStringsQuery,
        NaturalLanguageQuery, NaturalLanguageResponse, StringListResponse, StringResponse,
    },
    state::AppState,
};

/// Last segment of the natural-language route; a stored string with this
/// exact value is only reachable for deletion
pub const NATURAL_LANGUAGE_SEGMENT: &str = "filter-by-natural-language";

/// Decode the `{value}` segment. Invalid UTF-8 cannot name a stored string.
fn path_value(value: Result<Path<String>, PathRejection>) -> ApiResult<String> {
    match value {
        Ok(Path(value)) => Ok(value),
        Err(PathRejection::FailedToDeserializePathParams(err))
            if matches!(err.kind(), ErrorKind::InvalidUtf8InPathParam { .. }) =>
        {
            Err(StoreError::NotFound(err.body_text()).into())
        }
        Err(rejection) => Err(ApiError::BadRequest(rejection.body_text())),
    }
}

fn remove(state: &AppState, value: &str) -> ApiResult<StatusCode> {
    let removed = state.repository.delete(value)?;
    tracing::info!(sha256 = %removed.analysis.sha256, "string deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Analyse and store a string
#[utoipa::path(
    post,
    path = "/strings",
    request_body = CreateStringRequest,
    responses(
        (status = 201, description = "String analysed and stored", body = StringResponse),
        (status = 400, description = "Missing 'value' or malformed body", body = ErrorResponse),
        (status = 409, description = "String already exists", body = ErrorResponse),
        (status = 422, description = "'value' is not a string", body = ErrorResponse)
    )
)]
pub async fn create_string(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<StringResponse>)> {
    let Json(body) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    let value = match body.get("value") {
        None => {
            return Err(ApiError::BadRequest(
                "Missing 'value' field in request body".to_string(),
            ))
        }
        Some(Value::String(value)) => value,
        Some(_) => {
            return Err(ApiError::Unprocessable(
                "Invalid data type for 'value' (must be string)".to_string(),
            ))
        }
    };

    let stored = state.repository.insert(analyse(value))?;
    tracing::info!(sha256 = %stored.analysis.sha256, "string created");

    Ok((StatusCode::CREATED, Json(StringResponse::from(&*stored))))
}

/// Get a stored string by its exact value
#[utoipa::path(
    get,
    path = "/strings/{value}",
    params(("value" = String, Path, description = "Exact string value, URL-encoded")),
    responses(
        (status = 200, description = "Stored string", body = StringResponse),
        (status = 404, description = "String not found", body = ErrorResponse)
    )
)]
pub async fn get_string(
    State(state): State<AppState>,
    value: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<StringResponse>> {
    let value = path_value(value)?;
    let stored = state.repository.get(&value)?;
    Ok(Json(StringResponse::from(&*stored)))
}

/// List stored strings matching structured filters
#[utoipa::path(
    get,
    path = "/strings",
    params(ListStringsQuery),
    responses(
        (status = 200, description = "Matching strings", body = StringListResponse),
        (status = 400, description = "Invalid filter value", body = ErrorResponse)
    )
)]
pub async fn list_strings(
    State(state): State<AppState>,
    query: Result<Query<ListStringsQuery>, QueryRejection>,
) -> ApiResult<Json<StringListResponse>> {
    let Query(query) = query.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let filters = FilterParams::from(query).into_filter_set()?;

    let records = state.repository.list_all();
    let outcome = filters.apply(records.iter().map(|stored| &**stored));

    Ok(Json(StringListResponse {
        count: outcome.count,
        data: outcome.data.into_iter().map(StringResponse::from).collect(),
        filters_applied: serde_json::to_value(&filters).unwrap_or_default(),
    }))
}

/// Filter stored strings with a natural-language query
#[utoipa::path(
    get,
    path = "/strings/filter-by-natural-language",
    params(NaturalLanguageQuery),
    responses(
        (status = 200, description = "Matching strings", body = NaturalLanguageResponse),
        (status = 400, description = "Missing or uninterpretable query", body = ErrorResponse),
        (status = 422, description = "Invalid number in a recognised query", body = ErrorResponse)
    )
)]
pub async fn filter_by_natural_language(
    State(state): State<AppState>,
    query: Result<Query<NaturalLanguageQuery>, QueryRejection>,
) -> ApiResult<Json<NaturalLanguageResponse>> {
    let Query(query) = query.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let interpretation = state.interpreter.interpret(query.q.as_deref())?;

    let records = state.repository.list_all();
    let outcome = interpretation
        .parsed_filters
        .apply(records.iter().map(|stored| &**stored));

    Ok(Json(NaturalLanguageResponse {
        count: outcome.count,
        data: outcome.data.into_iter().map(StringResponse::from).collect(),
        interpreted_query: InterpretedQuery {
            parsed_filters: serde_json::to_value(&interpretation.parsed_filters)
                .unwrap_or_default(),
            original: interpretation.original,
        },
    }))
}

/// Delete a stored string
#[utoipa::path(
    delete,
    path = "/strings/{value}",
    params(("value" = String, Path, description = "Exact string value, URL-encoded")),
    responses(
        (status = 204, description = "String deleted"),
        (status = 404, description = "String not found", body = ErrorResponse)
    )
)]
pub async fn delete_string(
    State(state): State<AppState>,
    value: Result<Path<String>, PathRejection>,
) -> ApiResult<StatusCode> {
    let value = path_value(value)?;
    remove(&state, &value)
}

/// Delete the stored string whose value collides with the natural-language route
pub async fn delete_natural_language_value(State(state): State<AppState>) -> ApiResult<StatusCode> {
    remove(&state, NATURAL_LANGUAGE_SEGMENT)
}
