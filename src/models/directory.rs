// src/models/directory.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use utoipa::ToSchema;
use uuid::Uuid;

// Prazos de pagamento por omissão (em dias)
pub const DEFAULT_CUSTOMER_PAYMENT_TERM: i32 = 30;
pub const DEFAULT_CARRIER_PAYMENT_TERM: i32 = 60;

// --- Avaliações ---

// Sub-notas 0..=5; cada dimensão pode estar ausente.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRating {
    pub payment_reliability: Option<i16>,
    pub communication: Option<i16>,
    pub overall_satisfaction: Option<i16>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CarrierRating {
    pub reliability: Option<i16>,
    pub communication: Option<i16>,
    pub service_quality: Option<i16>,
    pub time_management: Option<i16>,
}

// Média sem pesos das sub-notas presentes, arredondada ao inteiro mais próximo.
fn rounded_average(scores: &[Option<i16>]) -> Option<i32> {
    let present: Vec<i16> = scores.iter().filter_map(|s| *s).collect();
    if present.is_empty() {
        return None;
    }
    let sum: i32 = present.iter().map(|s| *s as i32).sum();
    let avg = sum as f64 / present.len() as f64;
    Some(avg.round() as i32)
}

impl CustomerRating {
    pub fn average(&self) -> Option<i32> {
        rounded_average(&[
            self.payment_reliability,
            self.communication,
            self.overall_satisfaction,
        ])
    }
}

impl CarrierRating {
    pub fn average(&self) -> Option<i32> {
        rounded_average(&[
            self.reliability,
            self.communication,
            self.service_quality,
            self.time_management,
        ])
    }
}

// --- Cliente ---

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: Uuid,
    #[schema(ignore)]
    pub company_id: Uuid,
    #[schema(example = "Pekáreň Tatry s.r.o.")]
    pub company: String,
    pub contact_name: Option<String>,
    pub contact_surname: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub vat_id: Option<String>,
    pub reg_id: Option<String>,
    #[schema(example = 30)]
    pub payment_term_days: i32,
    pub rating: Option<CustomerRating>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- Transportador ---

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Carrier {
    pub id: Uuid,
    #[schema(ignore)]
    pub company_id: Uuid,
    #[schema(example = "Kamión Expres s.r.o.")]
    pub company: String,
    pub contact_name: Option<String>,
    pub contact_surname: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub vat_id: Option<String>,
    pub reg_id: Option<String>,
    pub vehicle_types: Option<Vec<String>>,
    pub notes: Option<String>,
    #[schema(example = 60)]
    pub payment_term_days: i32,
    pub rating: Option<CarrierRating>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- Payloads de criação/edição ---

#[derive(Debug, Clone, Deserialize, validator::Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDraft {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Pekáreň Tatry s.r.o.")]
    pub company: String,
    pub contact_name: Option<String>,
    pub contact_surname: Option<String>,
    #[validate(email(message = "invalid_email"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub vat_id: Option<String>,
    pub reg_id: Option<String>,
    // Ausente = prazo por omissão de 30 dias
    pub payment_term_days: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, validator::Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CarrierDraft {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Kamión Expres s.r.o.")]
    pub company: String,
    pub contact_name: Option<String>,
    pub contact_surname: Option<String>,
    #[validate(email(message = "invalid_email"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub vat_id: Option<String>,
    pub reg_id: Option<String>,
    pub vehicle_types: Option<Vec<String>>,
    pub notes: Option<String>,
    // Ausente = prazo por omissão de 60 dias
    pub payment_term_days: Option<i32>,
}

// --- Linhas cruas ---

#[derive(Debug, FromRow)]
pub struct CustomerRow {
    pub id: Uuid,
    pub company_id: Uuid,
    pub company: String,
    pub contact_name: Option<String>,
    pub contact_surname: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub vat_id: Option<String>,
    pub reg_id: Option<String>,
    pub payment_term_days: i32,
    pub rating: Option<Json<CustomerRating>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Customer {
            id: row.id,
            company_id: row.company_id,
            company: row.company,
            contact_name: row.contact_name,
            contact_surname: row.contact_surname,
            email: row.email,
            phone: row.phone,
            address: row.address,
            vat_id: row.vat_id,
            reg_id: row.reg_id,
            payment_term_days: row.payment_term_days,
            rating: row.rating.map(|j| j.0),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, FromRow)]
pub struct CarrierRow {
    pub id: Uuid,
    pub company_id: Uuid,
    pub company: String,
    pub contact_name: Option<String>,
    pub contact_surname: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub vat_id: Option<String>,
    pub reg_id: Option<String>,
    pub vehicle_types: Option<Vec<String>>,
    pub notes: Option<String>,
    pub payment_term_days: i32,
    pub rating: Option<Json<CarrierRating>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CarrierRow> for Carrier {
    fn from(row: CarrierRow) -> Self {
        Carrier {
            id: row.id,
            company_id: row.company_id,
            company: row.company,
            contact_name: row.contact_name,
            contact_surname: row.contact_surname,
            email: row.email,
            phone: row.phone,
            address: row.address,
            vat_id: row.vat_id,
            reg_id: row.reg_id,
            vehicle_types: row.vehicle_types,
            notes: row.notes,
            payment_term_days: row.payment_term_days,
            rating: row.rating.map(|j| j.0),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn customer_average_rounds_to_nearest() {
        let rating = CustomerRating {
            payment_reliability: Some(5),
            communication: Some(4),
            overall_satisfaction: Some(4),
        };
        // 13/3 = 4.33 -> 4
        assert_eq!(rating.average(), Some(4));
    }

    #[test]
    fn customer_average_ignores_absent_scores() {
        let rating = CustomerRating {
            payment_reliability: Some(5),
            communication: None,
            overall_satisfaction: Some(2),
        };
        // 7/2 = 3.5 -> 4
        assert_eq!(rating.average(), Some(4));
    }

    #[test]
    fn customer_average_empty_is_none() {
        let rating = CustomerRating {
            payment_reliability: None,
            communication: None,
            overall_satisfaction: None,
        };
        assert_eq!(rating.average(), None);
    }

    #[test]
    fn carrier_average_all_dimensions() {
        let rating = CarrierRating {
            reliability: Some(5),
            communication: Some(5),
            service_quality: Some(4),
            time_management: Some(3),
        };
        // 17/4 = 4.25 -> 4
        assert_eq!(rating.average(), Some(4));
    }
}
