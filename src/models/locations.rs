// src/models/locations.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Tipo do local guardado: nakládka ou vykládka.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LocationKind {
    Loading,
    Unloading,
}

impl LocationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationKind::Loading => "loading",
            LocationKind::Unloading => "unloading",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "loading" => Some(LocationKind::Loading),
            "unloading" => Some(LocationKind::Unloading),
            _ => None,
        }
    }
}

// Endereço reutilizável com contador de utilizações.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: Uuid,
    #[schema(ignore)]
    pub company_id: Uuid,
    pub kind: LocationKind,
    pub name: Option<String>,
    pub street: Option<String>,
    #[schema(example = "Košice")]
    pub city: String,
    pub zip: Option<String>,
    pub country: Option<String>,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    #[schema(example = 12)]
    pub usage_count: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, validator::Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocationDraft {
    pub kind: LocationKind,
    pub name: Option<String>,
    pub street: Option<String>,
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Košice")]
    pub city: String,
    pub zip: Option<String>,
    pub country: Option<String>,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
}

#[derive(Debug, FromRow)]
pub struct LocationRow {
    pub id: Uuid,
    pub company_id: Uuid,
    pub kind: String,
    pub name: Option<String>,
    pub street: Option<String>,
    pub city: String,
    pub zip: Option<String>,
    pub country: Option<String>,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub usage_count: i32,
    pub created_at: DateTime<Utc>,
}

impl From<LocationRow> for Location {
    fn from(row: LocationRow) -> Self {
        Location {
            id: row.id,
            company_id: row.company_id,
            // O CHECK do banco só permite os dois valores; o fallback nunca dispara.
            kind: LocationKind::parse(&row.kind).unwrap_or(LocationKind::Loading),
            name: row.name,
            street: row.street,
            city: row.city,
            zip: row.zip,
            country: row.country,
            contact_name: row.contact_name,
            contact_phone: row.contact_phone,
            usage_count: row.usage_count,
            created_at: row.created_at,
        }
    }
}
