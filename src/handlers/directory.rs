// src/handlers/directory.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{i18n::Locale, tenancy::TenantContext},
    models::directory::{
        Carrier, CarrierDraft, CarrierRating, Customer, CustomerDraft, CustomerRating,
    },
};

// =============================================================================
//  1. ZÁKAZNÍCI (CLIENTES)
// =============================================================================

// GET /api/customers
#[utoipa::path(
    get,
    path = "/api/customers",
    tag = "Directory",
    params(("x-company-id" = Uuid, Header, description = "ID da firma")),
    responses((status = 200, description = "Clientes do tenant", body = Vec<Customer>)),
    security(("api_jwt" = []))
)]
pub async fn list_customers(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
) -> Result<impl IntoResponse, ApiError> {
    let customers = app_state
        .directory_service
        .list_customers(tenant.0)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(customers)))
}

// POST /api/customers
#[utoipa::path(
    post,
    path = "/api/customers",
    tag = "Directory",
    request_body = CustomerDraft,
    params(("x-company-id" = Uuid, Header, description = "ID da firma")),
    responses((status = 201, description = "Cliente criado (prazo por omissão: 30 dias)", body = Customer)),
    security(("api_jwt" = []))
)]
pub async fn create_customer(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Json(payload): Json<CustomerDraft>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let customer = app_state
        .directory_service
        .create_customer(tenant.0, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(customer)))
}

// PUT /api/customers/{customer_id}
#[utoipa::path(
    put,
    path = "/api/customers/{customer_id}",
    tag = "Directory",
    request_body = CustomerDraft,
    params(
        ("customer_id" = Uuid, Path, description = "ID do cliente"),
        ("x-company-id" = Uuid, Header, description = "ID da firma")
    ),
    responses(
        (status = 200, description = "Cliente atualizado", body = Customer),
        (status = 404, description = "Referência obsoleta")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_customer(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Path(customer_id): Path<Uuid>,
    Json(payload): Json<CustomerDraft>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let customer = app_state
        .directory_service
        .update_customer(tenant.0, customer_id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(customer)))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RateCustomerPayload {
    #[validate(range(min = 0, max = 5))]
    pub payment_reliability: Option<i16>,
    #[validate(range(min = 0, max = 5))]
    pub communication: Option<i16>,
    #[validate(range(min = 0, max = 5))]
    pub overall_satisfaction: Option<i16>,
}

// POST /api/customers/{customer_id}/rating
#[utoipa::path(
    post,
    path = "/api/customers/{customer_id}/rating",
    tag = "Directory",
    request_body = RateCustomerPayload,
    params(
        ("customer_id" = Uuid, Path, description = "ID do cliente"),
        ("x-company-id" = Uuid, Header, description = "ID da firma")
    ),
    responses(
        (status = 200, description = "Avaliação gravada", body = Customer),
        (status = 404, description = "Referência obsoleta")
    ),
    security(("api_jwt" = []))
)]
pub async fn rate_customer(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Path(customer_id): Path<Uuid>,
    Json(payload): Json<RateCustomerPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let rating = CustomerRating {
        payment_reliability: payload.payment_reliability,
        communication: payload.communication,
        overall_satisfaction: payload.overall_satisfaction,
    };

    let customer = app_state
        .directory_service
        .rate_customer(tenant.0, customer_id, &rating)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(customer)))
}

// DELETE /api/customers/{customer_id}
#[utoipa::path(
    delete,
    path = "/api/customers/{customer_id}",
    tag = "Directory",
    params(
        ("customer_id" = Uuid, Path, description = "ID do cliente"),
        ("x-company-id" = Uuid, Header, description = "ID da firma")
    ),
    responses(
        (status = 204, description = "Cliente removido"),
        (status = 404, description = "Referência obsoleta")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_customer(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Path(customer_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .directory_service
        .delete_customer(tenant.0, customer_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  2. DOPRAVCOVIA (TRANSPORTADORES)
// =============================================================================

// GET /api/carriers
#[utoipa::path(
    get,
    path = "/api/carriers",
    tag = "Directory",
    params(("x-company-id" = Uuid, Header, description = "ID da firma")),
    responses((status = 200, description = "Transportadores do tenant", body = Vec<Carrier>)),
    security(("api_jwt" = []))
)]
pub async fn list_carriers(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
) -> Result<impl IntoResponse, ApiError> {
    let carriers = app_state
        .directory_service
        .list_carriers(tenant.0)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(carriers)))
}

// POST /api/carriers
#[utoipa::path(
    post,
    path = "/api/carriers",
    tag = "Directory",
    request_body = CarrierDraft,
    params(("x-company-id" = Uuid, Header, description = "ID da firma")),
    responses((status = 201, description = "Transportador criado (prazo por omissão: 60 dias)", body = Carrier)),
    security(("api_jwt" = []))
)]
pub async fn create_carrier(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Json(payload): Json<CarrierDraft>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let carrier = app_state
        .directory_service
        .create_carrier(tenant.0, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(carrier)))
}

// PUT /api/carriers/{carrier_id}
#[utoipa::path(
    put,
    path = "/api/carriers/{carrier_id}",
    tag = "Directory",
    request_body = CarrierDraft,
    params(
        ("carrier_id" = Uuid, Path, description = "ID do transportador"),
        ("x-company-id" = Uuid, Header, description = "ID da firma")
    ),
    responses(
        (status = 200, description = "Transportador atualizado", body = Carrier),
        (status = 404, description = "Referência obsoleta")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_carrier(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Path(carrier_id): Path<Uuid>,
    Json(payload): Json<CarrierDraft>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let carrier = app_state
        .directory_service
        .update_carrier(tenant.0, carrier_id, &payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(carrier)))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RateCarrierPayload {
    #[validate(range(min = 0, max = 5))]
    pub reliability: Option<i16>,
    #[validate(range(min = 0, max = 5))]
    pub communication: Option<i16>,
    #[validate(range(min = 0, max = 5))]
    pub service_quality: Option<i16>,
    #[validate(range(min = 0, max = 5))]
    pub time_management: Option<i16>,
}

// POST /api/carriers/{carrier_id}/rating
#[utoipa::path(
    post,
    path = "/api/carriers/{carrier_id}/rating",
    tag = "Directory",
    request_body = RateCarrierPayload,
    params(
        ("carrier_id" = Uuid, Path, description = "ID do transportador"),
        ("x-company-id" = Uuid, Header, description = "ID da firma")
    ),
    responses(
        (status = 200, description = "Avaliação gravada", body = Carrier),
        (status = 404, description = "Referência obsoleta")
    ),
    security(("api_jwt" = []))
)]
pub async fn rate_carrier(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Path(carrier_id): Path<Uuid>,
    Json(payload): Json<RateCarrierPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let rating = CarrierRating {
        reliability: payload.reliability,
        communication: payload.communication,
        service_quality: payload.service_quality,
        time_management: payload.time_management,
    };

    let carrier = app_state
        .directory_service
        .rate_carrier(tenant.0, carrier_id, &rating)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(carrier)))
}

// DELETE /api/carriers/{carrier_id}
#[utoipa::path(
    delete,
    path = "/api/carriers/{carrier_id}",
    tag = "Directory",
    params(
        ("carrier_id" = Uuid, Path, description = "ID do transportador"),
        ("x-company-id" = Uuid, Header, description = "ID da firma")
    ),
    responses(
        (status = 204, description = "Transportador removido"),
        (status = 404, description = "Referência obsoleta")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_carrier(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Path(carrier_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .directory_service
        .delete_carrier(tenant.0, carrier_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}
