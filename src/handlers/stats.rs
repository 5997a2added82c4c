// src/handlers/stats.rs

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{i18n::Locale, tenancy::TenantContext},
    models::stats::DispatcherRollup,
    sync::window::{DateWindow, StatsWindow},
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct RollupParams {
    // all | thisMonth | thisYear | custom
    #[param(example = "thisMonth")]
    pub mode: Option<String>,
    // Obrigatórios com mode=custom
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl RollupParams {
    fn window(&self) -> Result<StatsWindow, String> {
        match self.mode.as_deref() {
            None | Some("all") => Ok(StatsWindow::All),
            Some("thisMonth") => Ok(StatsWindow::ThisMonth),
            Some("thisYear") => Ok(StatsWindow::ThisYear),
            Some("custom") => match (self.from, self.to) {
                (Some(from), Some(to)) => Ok(StatsWindow::Custom(DateWindow::new(from, to))),
                _ => Err("mode=custom exige from e to".to_string()),
            },
            Some(other) => Err(format!("Modo de janela desconhecido: {}", other)),
        }
    }
}

// GET /api/stats/dispatchers
//
// Rollup por dispečer: contagens e somas monetárias na janela pedida,
// recalculadas do zero a cada chamada.
#[utoipa::path(
    get,
    path = "/api/stats/dispatchers",
    tag = "Stats",
    params(
        RollupParams,
        ("x-company-id" = Uuid, Header, description = "ID da firma")
    ),
    responses(
        (status = 200, description = "Rollups por dispečer (sem ordem garantida)", body = Vec<DispatcherRollup>),
        (status = 400, description = "Janela inválida")
    ),
    security(("api_jwt" = []))
)]
pub async fn dispatcher_rollups(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Query(params): Query<RollupParams>,
) -> Result<impl IntoResponse, ApiError> {
    let window = params.window().map_err(|message| ApiError {
        status: StatusCode::BAD_REQUEST,
        message,
    })?;

    let rollups = app_state
        .stats_service
        .dispatcher_rollups(tenant.0, window)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(rollups)))
}
