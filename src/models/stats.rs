// src/models/stats.rs

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

// Nome usado quando nem a objednávka nem a tabela de utilizadores
// conseguem resolver o autor.
pub const UNKNOWN_DISPATCHER: &str = "Neznámy";

// Rollup derivado por dispečer. Nunca persistido: função pura de
// (objednávky, janela, lookup de nomes), recalculada do zero.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DispatcherRollup {
    pub user_id: Uuid,
    #[schema(example = "Ján Novák")]
    pub name: String,
    pub email: Option<String>,
    #[schema(example = 17)]
    pub total_orders: u32,
    #[schema(example = "21300.00")]
    pub total_revenue: Decimal,
    #[schema(example = "17940.00")]
    pub total_costs: Decimal,
    #[schema(example = "3360.00")]
    pub total_profit: Decimal,
    pub avg_profit: Decimal,
    // Em percentagem (profit / revenue * 100); 0 quando revenue é 0
    pub avg_profit_margin: Decimal,
}

// Entrada da tabela de lookup user-id -> nome/email.
#[derive(Debug, Clone)]
pub struct DispatcherInfo {
    pub name: Option<String>,
    pub email: Option<String>,
}
