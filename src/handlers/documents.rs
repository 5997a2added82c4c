// src/handlers/documents.rs

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    common::error::ApiError,
    common::i18n::I18nStore,
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale, tenancy::TenantContext},
    models::documents::{DocumentKind, OrderDocument},
};

// =============================================================================
//  1. ANEXOS
// =============================================================================

// POST /api/orders/{order_id}/documents
//
// Multipart: um campo "docType" (invoice|cmr|delivery_note|contract|other)
// e um campo "file" com o conteúdo.
#[utoipa::path(
    post,
    path = "/api/orders/{order_id}/documents",
    tag = "Documents",
    params(
        ("order_id" = Uuid, Path, description = "ID da objednávka"),
        ("x-company-id" = Uuid, Header, description = "ID da firma")
    ),
    responses(
        (status = 201, description = "Documento anexado", body = OrderDocument),
        (status = 404, description = "Objednávka já não existe")
    ),
    security(("api_jwt" = []))
)]
pub async fn upload_document(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Path(order_id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let store = &app_state.i18n_store;

    let mut doc_type = DocumentKind::Other;
    let mut file_name: Option<String> = None;
    let mut bytes: Option<Vec<u8>> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| ApiError {
        status: StatusCode::BAD_REQUEST,
        message: format!("Multipart inválido: {}", e),
    })? {
        match field.name() {
            Some("docType") => {
                let value = field.text().await.map_err(|e| ApiError {
                    status: StatusCode::BAD_REQUEST,
                    message: format!("Campo docType ilegível: {}", e),
                })?;
                doc_type = DocumentKind::parse(&value);
            }
            Some("file") => {
                file_name = field.file_name().map(|n| n.to_string());
                bytes = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| ApiError {
                            status: StatusCode::BAD_REQUEST,
                            message: format!("Ficheiro ilegível: {}", e),
                        })?
                        .to_vec(),
                );
            }
            _ => {}
        }
    }

    let Some(bytes) = bytes else {
        return Err(ApiError {
            status: StatusCode::BAD_REQUEST,
            message: "O campo \"file\" é obrigatório.".to_string(),
        });
    };
    let file_name = file_name.unwrap_or_else(|| "dokument.pdf".to_string());

    let document = app_state
        .documents_service
        .attach(
            tenant.0,
            order_id,
            doc_type,
            &file_name,
            &bytes,
            Some(user.0.id),
        )
        .await
        .map_err(|e| e.to_api_error(&locale, store))?;

    Ok((StatusCode::CREATED, Json(document)))
}

// GET /api/orders/{order_id}/documents
#[utoipa::path(
    get,
    path = "/api/orders/{order_id}/documents",
    tag = "Documents",
    params(
        ("order_id" = Uuid, Path, description = "ID da objednávka"),
        ("x-company-id" = Uuid, Header, description = "ID da firma")
    ),
    responses((status = 200, description = "Documentos da objednávka", body = Vec<OrderDocument>)),
    security(("api_jwt" = []))
)]
pub async fn list_order_documents(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Path(order_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let documents = app_state
        .documents_service
        .list_for_order(tenant.0, order_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(documents)))
}

// GET /api/documents
#[utoipa::path(
    get,
    path = "/api/documents",
    tag = "Documents",
    params(("x-company-id" = Uuid, Header, description = "ID da firma")),
    responses((status = 200, description = "Todos os documentos do tenant", body = Vec<OrderDocument>)),
    security(("api_jwt" = []))
)]
pub async fn list_documents(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
) -> Result<impl IntoResponse, ApiError> {
    let documents = app_state
        .documents_service
        .list(tenant.0)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(documents)))
}

// DELETE /api/documents/{document_id}
#[utoipa::path(
    delete,
    path = "/api/documents/{document_id}",
    tag = "Documents",
    params(
        ("document_id" = Uuid, Path, description = "ID do documento"),
        ("x-company-id" = Uuid, Header, description = "ID da firma")
    ),
    responses(
        (status = 204, description = "Documento e blob removidos"),
        (status = 404, description = "Referência obsoleta")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_document(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Path(document_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .documents_service
        .delete(tenant.0, document_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  2. PDF DA OBJEDNÁVKA
// =============================================================================

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateOrderPdfPayload {
    // sk | en | de | cs | pl
    #[schema(example = "sk")]
    pub language: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateOrderPdfResponse {
    pub pdf_base64: String,
    #[schema(example = "objednavka_2026_0042.pdf")]
    pub file_name: String,
}

// POST /api/orders/{order_id}/pdf
#[utoipa::path(
    post,
    path = "/api/orders/{order_id}/pdf",
    tag = "Documents",
    request_body = GenerateOrderPdfPayload,
    params(
        ("order_id" = Uuid, Path, description = "ID da objednávka"),
        ("x-company-id" = Uuid, Header, description = "ID da firma")
    ),
    responses(
        (status = 200, description = "PDF gerado no idioma pedido", body = GenerateOrderPdfResponse),
        (status = 400, description = "Idioma não suportado"),
        (status = 404, description = "Objednávka já não existe")
    ),
    security(("api_jwt" = []))
)]
pub async fn generate_order_pdf(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Path(order_id): Path<Uuid>,
    Json(payload): Json<GenerateOrderPdfPayload>,
) -> Result<impl IntoResponse, ApiError> {
    if !I18nStore::is_supported(&payload.language) {
        return Err(ApiError {
            status: StatusCode::BAD_REQUEST,
            message: format!("Idioma não suportado: {}", payload.language),
        });
    }

    let (pdf_bytes, file_name) = app_state
        .pdf_service
        .generate_order_pdf(tenant.0, order_id, &payload.language)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    use base64::Engine;
    let pdf_base64 = base64::engine::general_purpose::STANDARD.encode(pdf_bytes);

    Ok((
        StatusCode::OK,
        Json(GenerateOrderPdfResponse {
            pdf_base64,
            file_name,
        }),
    ))
}
