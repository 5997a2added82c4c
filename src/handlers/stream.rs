// src/handlers/stream.rs

use std::sync::Arc;

use axum::{
    extract::{
        Query, State, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::IntoResponse,
};
use chrono::NaiveDate;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use serde_json::json;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::{
    config::AppState,
    middleware::tenancy::TenantContext,
    sync::{DateWindow, OrderFeed},
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct StreamParams {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

// GET /api/orders/stream
//
// Faz o upgrade para WebSocket e liga a conexão a um feed de objednávky:
// cada snapshot que o reconciliador der como "mudou de verdade" desce como
// uma mensagem JSON com o conjunto completo.
#[utoipa::path(
    get,
    path = "/api/orders/stream",
    tag = "Orders",
    params(
        StreamParams,
        ("x-company-id" = Uuid, Header, description = "ID da firma")
    ),
    responses((status = 101, description = "Stream ao vivo do conjunto de objednávky")),
    security(("api_jwt" = []))
)]
pub async fn orders_stream(
    ws: WebSocketUpgrade,
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Query(params): Query<StreamParams>,
) -> impl IntoResponse {
    let window = match (params.from, params.to) {
        (Some(from), Some(to)) => Some(DateWindow::new(from, to)),
        _ => None,
    };

    ws.on_upgrade(move |socket| handle_socket(socket, app_state, tenant, window))
}

async fn handle_socket(
    socket: WebSocket,
    app_state: AppState,
    tenant: TenantContext,
    window: Option<DateWindow>,
) {
    tracing::info!(company_id = %tenant.0, "Stream de objednávky ligado");

    let source = Arc::new(app_state.orders_repo.clone());
    let (mut feed_rx, handle) =
        OrderFeed::spawn(source, &app_state.change_bus, Some(tenant.0), window);

    let (mut sink, mut stream) = socket.split();

    // Task de envio: estado atual primeiro, depois cada mudança real.
    let send_task = tokio::spawn(async move {
        loop {
            let payload = {
                let state = feed_rx.borrow_and_update();
                json!({
                    "orders": &*state.orders,
                    "loading": state.loading,
                    "failed": state.failed,
                    "missingTenant": state.missing_tenant,
                })
            };
            let text = match serde_json::to_string(&payload) {
                Ok(text) => text,
                Err(e) => {
                    tracing::error!("Falha ao serializar o snapshot: {}", e);
                    break;
                }
            };
            if sink.send(Message::Text(text.into())).await.is_err() {
                break;
            }
            if feed_rx.changed().await.is_err() {
                // O feed terminou (falha definitiva); nada mais a enviar.
                break;
            }
        }
    });

    // Loop de receção: só nos interessa o Close.
    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Close(_)) | Err(_) => break,
            Ok(_) => {}
        }
    }

    // Teardown da vista: cancela a subscrição antes de soltar a conexão.
    handle.cancel();
    send_task.abort();
    tracing::info!(company_id = %tenant.0, "Stream de objednávky desligado");
}
