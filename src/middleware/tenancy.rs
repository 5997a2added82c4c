// src/middleware/tenancy.rs

use axum::{
    extract::{FromRequestParts, State},
    http::{StatusCode, request::Parts},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::authenticate, i18n::Locale},
};

// O nome do nosso cabeçalho HTTP customizado
const COMPANY_ID_HEADER: &str = "x-company-id";

// O contexto do tenant resolvido. Todas as queries do núcleo levam este UUID;
// sem ele nenhuma operação chega ao banco.
#[derive(Debug, Clone, Copy)]
pub struct TenantContext(pub Uuid);

// Autentica, resolve o tenant do cabeçalho e verifica a associação
// utilizador-empresa. É a barreira que torna impossível o acesso cruzado
// entre tenants.
pub async fn tenant_guard(
    State(app_state): State<AppState>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let locale = Locale::from_headers(request.headers());
    let store = &app_state.i18n_store;

    let user = authenticate(&app_state, request.headers())
        .await
        .map_err(|e| e.to_api_error(&locale, store))?;

    // Cabeçalho em falta = condição "sem tenant": responde já, sem tocar no banco.
    let company_id = match request.headers().get(COMPANY_ID_HEADER) {
        None => return Err(AppError::MissingTenant.to_api_error(&locale, store)),
        Some(value) => value
            .to_str()
            .ok()
            .and_then(|raw| Uuid::parse_str(raw).ok())
            .ok_or_else(|| ApiError {
                status: StatusCode::BAD_REQUEST,
                message: "Cabeçalho x-company-id inválido (não é um UUID).".to_string(),
            })?,
    };

    let is_member = app_state
        .company_repo
        .check_user_membership(user.id, company_id)
        .await
        .map_err(|e| e.to_api_error(&locale, store))?;

    if !is_member {
        return Err(AppError::TenantAccessDenied.to_api_error(&locale, store));
    }

    request.extensions_mut().insert(user);
    request.extensions_mut().insert(TenantContext(company_id));
    Ok(next.run(request).await)
}

impl<S> FromRequestParts<S> for TenantContext
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<TenantContext>()
            .copied()
            .ok_or(ApiError {
                status: StatusCode::BAD_REQUEST,
                message: "O cabeçalho x-company-id é obrigatório.".to_string(),
            })
    }
}
