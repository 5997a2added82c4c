// src/handlers/preferences.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    db::preferences_repo::{PREF_ORDERS_SORT_DIRECTION, PREF_ORDERS_SORT_FIELD},
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    sync::view::SortState,
};

// As duas chaves persistidas da ordenação, lidas uma vez quando a tabela
// abre e escritas a cada clique no cabeçalho.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SortPreferences {
    #[schema(example = "orderNumber")]
    pub field: Option<String>,
    #[schema(example = "desc")]
    pub direction: Option<String>,
}

// GET /api/preferences/orders-sort
#[utoipa::path(
    get,
    path = "/api/preferences/orders-sort",
    tag = "Preferences",
    responses(
        (status = 200, description = "Estado de ordenação persistido", body = SortPreferences)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_orders_sort(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let store = &app_state.i18n_store;
    let repo = &app_state.preferences_repo;

    let field = repo
        .get(user.0.id, PREF_ORDERS_SORT_FIELD)
        .await
        .map_err(|e| e.to_api_error(&locale, store))?;
    let direction = repo
        .get(user.0.id, PREF_ORDERS_SORT_DIRECTION)
        .await
        .map_err(|e| e.to_api_error(&locale, store))?;

    // Normaliza: só um par completo e válido conta como estado restaurável.
    let state = SortState::restore(field.as_deref(), direction.as_deref());
    let (field, direction) = match state.persisted() {
        Some((f, d)) => (Some(f.to_string()), Some(d.to_string())),
        None => (None, None),
    };

    Ok((StatusCode::OK, Json(SortPreferences { field, direction })))
}

// PUT /api/preferences/orders-sort
#[utoipa::path(
    put,
    path = "/api/preferences/orders-sort",
    tag = "Preferences",
    request_body = SortPreferences,
    responses(
        (status = 200, description = "Estado de ordenação gravado", body = SortPreferences),
        (status = 400, description = "Campo/direção desconhecidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn put_orders_sort(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    Json(payload): Json<SortPreferences>,
) -> Result<impl IntoResponse, ApiError> {
    let store = &app_state.i18n_store;
    let repo = &app_state.preferences_repo;

    // Pedido de limpeza: o ciclo voltou a "sem ordenação".
    if payload.field.is_none() && payload.direction.is_none() {
        repo.delete(user.0.id, PREF_ORDERS_SORT_FIELD)
            .await
            .map_err(|e| e.to_api_error(&locale, store))?;
        repo.delete(user.0.id, PREF_ORDERS_SORT_DIRECTION)
            .await
            .map_err(|e| e.to_api_error(&locale, store))?;
        return Ok((
            StatusCode::OK,
            Json(SortPreferences {
                field: None,
                direction: None,
            }),
        ));
    }

    let state = SortState::restore(payload.field.as_deref(), payload.direction.as_deref());
    let Some((field, direction)) = state.persisted() else {
        return Err(AppError::ValidationError(validator::ValidationErrors::new())
            .to_api_error(&locale, store));
    };

    repo.set(user.0.id, PREF_ORDERS_SORT_FIELD, field)
        .await
        .map_err(|e| e.to_api_error(&locale, store))?;
    repo.set(user.0.id, PREF_ORDERS_SORT_DIRECTION, direction)
        .await
        .map_err(|e| e.to_api_error(&locale, store))?;

    Ok((
        StatusCode::OK,
        Json(SortPreferences {
            field: Some(field.to_string()),
            direction: Some(direction.to_string()),
        }),
    ))
}
