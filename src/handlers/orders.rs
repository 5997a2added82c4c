// src/handlers/orders.rs

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale, tenancy::TenantContext},
    models::orders::{Order, OrderDraft},
    sync::view::{self, OrderFilter, SortState, TablePager},
    sync::window::DateWindow,
};

// =============================================================================
//  1. CRUD
// =============================================================================

// POST /api/orders
#[utoipa::path(
    post,
    path = "/api/orders",
    tag = "Orders",
    request_body = OrderDraft,
    responses(
        (status = 201, description = "Objednávka criada com número sequencial", body = Order)
    ),
    params(
        ("x-company-id" = Uuid, Header, description = "ID da firma")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_order(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Json(payload): Json<OrderDraft>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let order = app_state
        .orders_service
        .create(
            tenant.0,
            &payload,
            user.0.id,
            user.0.display_name.as_deref(),
        )
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(order)))
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListOrdersParams {
    // Janela inclusiva com granularidade de dia; os dois juntos ou nenhum
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl ListOrdersParams {
    fn window(&self) -> Option<DateWindow> {
        match (self.from, self.to) {
            (Some(from), Some(to)) => Some(DateWindow::new(from, to)),
            _ => None,
        }
    }
}

// GET /api/orders
#[utoipa::path(
    get,
    path = "/api/orders",
    tag = "Orders",
    params(
        ListOrdersParams,
        ("x-company-id" = Uuid, Header, description = "ID da firma")
    ),
    responses(
        (status = 200, description = "Objednávky do tenant, mais recentes primeiro", body = Vec<Order>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_orders(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Query(params): Query<ListOrdersParams>,
) -> Result<impl IntoResponse, ApiError> {
    let orders = app_state
        .orders_service
        .list(tenant.0, params.window())
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(orders)))
}

// GET /api/orders/{order_id}
#[utoipa::path(
    get,
    path = "/api/orders/{order_id}",
    tag = "Orders",
    params(
        ("order_id" = Uuid, Path, description = "ID da objednávka"),
        ("x-company-id" = Uuid, Header, description = "ID da firma")
    ),
    responses(
        (status = 200, description = "Detalhe da objednávka", body = Order),
        (status = 404, description = "Já não existe")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_order(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Path(order_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let order = app_state
        .orders_service
        .get(tenant.0, order_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(order)))
}

// PUT /api/orders/{order_id}
#[utoipa::path(
    put,
    path = "/api/orders/{order_id}",
    tag = "Orders",
    request_body = OrderDraft,
    params(
        ("order_id" = Uuid, Path, description = "ID da objednávka"),
        ("x-company-id" = Uuid, Header, description = "ID da firma")
    ),
    responses(
        (status = 200, description = "Objednávka atualizada", body = Order),
        (status = 404, description = "Referência obsoleta")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_order(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Path(order_id): Path<Uuid>,
    Json(payload): Json<OrderDraft>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let order = app_state
        .orders_service
        .update(tenant.0, order_id, &payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(order)))
}

// DELETE /api/orders/{order_id}
#[utoipa::path(
    delete,
    path = "/api/orders/{order_id}",
    tag = "Orders",
    params(
        ("order_id" = Uuid, Path, description = "ID da objednávka"),
        ("x-company-id" = Uuid, Header, description = "ID da firma")
    ),
    responses(
        (status = 204, description = "Objednávka removida"),
        (status = 404, description = "Referência obsoleta")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_order(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Path(order_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .orders_service
        .delete(tenant.0, order_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  2. AVALIAÇÃO
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RateOrderPayload {
    #[validate(range(min = 1, max = 5))]
    #[schema(example = 5)]
    pub punctuality: i16,

    #[validate(range(min = 1, max = 5))]
    #[schema(example = 4)]
    pub communication: i16,

    #[validate(range(min = 1, max = 5))]
    #[schema(example = 5)]
    pub cargo_care: i16,
}

// POST /api/orders/{order_id}/rating
#[utoipa::path(
    post,
    path = "/api/orders/{order_id}/rating",
    tag = "Orders",
    request_body = RateOrderPayload,
    params(
        ("order_id" = Uuid, Path, description = "ID da objednávka"),
        ("x-company-id" = Uuid, Header, description = "ID da firma")
    ),
    responses(
        (status = 200, description = "Avaliação gravada; overall é a média em float", body = Order),
        (status = 404, description = "Referência obsoleta")
    ),
    security(("api_jwt" = []))
)]
pub async fn rate_order(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Path(order_id): Path<Uuid>,
    Json(payload): Json<RateOrderPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let order = app_state
        .orders_service
        .rate(
            tenant.0,
            order_id,
            payload.punctuality,
            payload.communication,
            payload.cargo_care,
        )
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(order)))
}

// =============================================================================
//  3. VISTA FILTRADA/ORDENADA/PAGINADA
// =============================================================================

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct OrdersViewParams {
    // Texto livre (OR sobre os campos enumerados)
    pub q: Option<String>,
    // Filtro por rótulo do tipo de documento anexado (AND com o texto livre)
    pub doc_type: Option<String>,
    // "orderNumber" | "createdAt"; presente = subconjunto de cliente ordenado
    pub sort_field: Option<String>,
    // "desc" | "asc"
    pub sort_dir: Option<String>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

#[derive(Debug, serde::Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrdersViewResponse {
    // Total DEPOIS dos filtros, antes da paginação
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub orders: Vec<Order>,
}

// GET /api/orders/view
//
// A mesma pipeline pura que a tabela usa no cliente: filtro de texto livre,
// filtro por tipo de documento, ordenação (só sobre o subconjunto com
// zákazník) e paginação offset/limit.
#[utoipa::path(
    get,
    path = "/api/orders/view",
    tag = "Orders",
    params(
        OrdersViewParams,
        ("x-company-id" = Uuid, Header, description = "ID da firma")
    ),
    responses(
        (status = 200, description = "Página filtrada e ordenada", body = OrdersViewResponse)
    ),
    security(("api_jwt" = []))
)]
pub async fn orders_view(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Query(params): Query<OrdersViewParams>,
) -> Result<impl IntoResponse, ApiError> {
    let store = &app_state.i18n_store;

    let window = match (params.from, params.to) {
        (Some(from), Some(to)) => Some(DateWindow::new(from, to)),
        _ => None,
    };

    let orders = app_state
        .orders_service
        .list(tenant.0, window)
        .await
        .map_err(|e| e.to_api_error(&locale, store))?;

    // Mapa lateral de documentos: só é carregado quando o filtro o consome.
    let documents_by_order = match params.doc_type {
        Some(_) => app_state
            .documents_service
            .map_by_order(tenant.0)
            .await
            .map_err(|e| e.to_api_error(&locale, store))?,
        None => HashMap::new(),
    };

    // Lookup de nomes dos dispečeri para o texto livre.
    let mut author_ids: Vec<Uuid> = orders.iter().filter_map(|o| o.created_by).collect();
    author_ids.sort_unstable();
    author_ids.dedup();
    let mut dispatcher_names: HashMap<Uuid, String> = HashMap::new();
    if !author_ids.is_empty() {
        let users = app_state
            .users_repo
            .list_by_ids(&app_state.db_pool, &author_ids)
            .await
            .map_err(|e| e.to_api_error(&locale, store))?;
        for user in users {
            dispatcher_names.insert(user.id, user.display_name.unwrap_or(user.email));
        }
    }

    let filter = OrderFilter {
        query: params.q.unwrap_or_default(),
        document_type: params.doc_type,
    };
    let filtered = view::filter_orders(&orders, &filter, &documents_by_order, &dispatcher_names);

    let sort_state = SortState::restore(params.sort_field.as_deref(), params.sort_dir.as_deref());
    let visible = match sort_state.0 {
        Some(_) => {
            // A ordenação existe só na tabela de clientes
            let mut subset = view::customer_orders(&filtered);
            view::sort_orders(&mut subset, sort_state);
            subset
        }
        None => filtered,
    };

    let mut pager = TablePager::new(params.page_size.unwrap_or(25));
    pager.set_page(params.page.unwrap_or(0));
    let page: Vec<Order> = pager.slice(&visible).iter().map(|o| (*o).clone()).collect();

    Ok((
        StatusCode::OK,
        Json(OrdersViewResponse {
            total: visible.len(),
            page: pager.page_index(),
            page_size: pager.page_size(),
            orders: page,
        }),
    ))
}
