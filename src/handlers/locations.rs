// src/handlers/locations.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{i18n::Locale, tenancy::TenantContext},
    models::locations::{Location, LocationDraft, LocationKind},
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListLocationsParams {
    // "loading" | "unloading"; ausente devolve os dois
    pub kind: Option<LocationKind>,
}

// GET /api/locations
#[utoipa::path(
    get,
    path = "/api/locations",
    tag = "Locations",
    params(
        ListLocationsParams,
        ("x-company-id" = Uuid, Header, description = "ID da firma")
    ),
    responses((status = 200, description = "Locais guardados, mais usados primeiro", body = Vec<Location>)),
    security(("api_jwt" = []))
)]
pub async fn list_locations(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Query(params): Query<ListLocationsParams>,
) -> Result<impl IntoResponse, ApiError> {
    let locations = app_state
        .locations_service
        .list(tenant.0, params.kind)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(locations)))
}

// POST /api/locations
#[utoipa::path(
    post,
    path = "/api/locations",
    tag = "Locations",
    request_body = LocationDraft,
    params(("x-company-id" = Uuid, Header, description = "ID da firma")),
    responses((status = 201, description = "Local criado", body = Location)),
    security(("api_jwt" = []))
)]
pub async fn create_location(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Json(payload): Json<LocationDraft>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let location = app_state
        .locations_service
        .create(tenant.0, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(location)))
}

// POST /api/locations/{location_id}/usage
#[utoipa::path(
    post,
    path = "/api/locations/{location_id}/usage",
    tag = "Locations",
    params(
        ("location_id" = Uuid, Path, description = "ID do local"),
        ("x-company-id" = Uuid, Header, description = "ID da firma")
    ),
    responses(
        (status = 200, description = "Contador de utilizações incrementado", body = Location),
        (status = 404, description = "Referência obsoleta")
    ),
    security(("api_jwt" = []))
)]
pub async fn mark_location_used(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Path(location_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let location = app_state
        .locations_service
        .mark_used(tenant.0, location_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(location)))
}

// DELETE /api/locations/{location_id}
#[utoipa::path(
    delete,
    path = "/api/locations/{location_id}",
    tag = "Locations",
    params(
        ("location_id" = Uuid, Path, description = "ID do local"),
        ("x-company-id" = Uuid, Header, description = "ID da firma")
    ),
    responses(
        (status = 204, description = "Local removido"),
        (status = 404, description = "Referência obsoleta")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_location(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Path(location_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .locations_service
        .delete(tenant.0, location_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}
