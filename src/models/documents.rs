// src/models/documents.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Tipo de documento anexado a uma objednávka.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum DocumentKind {
    Invoice,
    Cmr,
    DeliveryNote,
    Contract,
    Other,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Invoice => "invoice",
            DocumentKind::Cmr => "cmr",
            DocumentKind::DeliveryNote => "delivery_note",
            DocumentKind::Contract => "contract",
            DocumentKind::Other => "other",
        }
    }

    pub fn parse(raw: &str) -> Self {
        match raw {
            "invoice" => DocumentKind::Invoice,
            "cmr" => DocumentKind::Cmr,
            "delivery_note" => DocumentKind::DeliveryNote,
            "contract" => DocumentKind::Contract,
            _ => DocumentKind::Other,
        }
    }

    // Rótulo exibido nas tabelas; é sobre este texto que o filtro
    // por tipo de documento faz o substring match.
    pub fn label(&self) -> &'static str {
        match self {
            DocumentKind::Invoice => "Faktúra",
            DocumentKind::Cmr => "CMR",
            DocumentKind::DeliveryNote => "Dodací list",
            DocumentKind::Contract => "Zmluva",
            DocumentKind::Other => "Iné",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderDocument {
    pub id: Uuid,
    #[schema(ignore)]
    pub company_id: Uuid,
    pub order_id: Uuid,
    pub doc_type: DocumentKind,
    #[schema(example = "faktura_2026_0042.pdf")]
    pub file_name: String,
    pub file_url: String,
    #[schema(ignore)]
    pub storage_path: String,
    pub uploaded_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
pub struct OrderDocumentRow {
    pub id: Uuid,
    pub company_id: Uuid,
    pub order_id: Uuid,
    pub doc_type: String,
    pub file_name: String,
    pub file_url: String,
    pub storage_path: String,
    pub uploaded_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<OrderDocumentRow> for OrderDocument {
    fn from(row: OrderDocumentRow) -> Self {
        OrderDocument {
            id: row.id,
            company_id: row.company_id,
            order_id: row.order_id,
            doc_type: DocumentKind::parse(&row.doc_type),
            file_name: row.file_name,
            file_url: row.file_url,
            storage_path: row.storage_path,
            uploaded_by: row.uploaded_by,
            created_at: row.created_at,
        }
    }
}
