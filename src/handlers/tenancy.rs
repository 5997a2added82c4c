// src/handlers/tenancy.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::tenancy::Company,
};

#[derive(Debug, serde::Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCompanyPayload {
    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres"))]
    #[schema(example = "Dispo Trans s.r.o.")]
    pub name: String,

    #[schema(example = "SK2021234567")]
    pub vat_id: Option<String>,

    pub address: Option<String>,
}

// POST /api/companies
#[utoipa::path(
    post,
    path = "/api/companies",
    tag = "Tenancy",
    request_body = CreateCompanyPayload,
    responses(
        (status = 201, description = "Empresa criada; o criador fica membro", body = Company)
    ),
    security(("api_jwt" = []))
)]
pub async fn create_company(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Json(payload): Json<CreateCompanyPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let company = app_state
        .tenancy_service
        .create_company(
            user.0.id,
            &payload.name,
            payload.vat_id.as_deref(),
            payload.address.as_deref(),
        )
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(company)))
}

// GET /api/users/me/companies
#[utoipa::path(
    get,
    path = "/api/users/me/companies",
    tag = "Tenancy",
    responses(
        (status = 200, description = "Empresas a que o usuário tem acesso", body = Vec<Company>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_my_companies(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let companies = app_state
        .tenancy_service
        .list_my_companies(user.0.id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(companies)))
}
