// src/models/orders.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Rota ---

// Paragem da rota (nakládka ou vykládka), guardada em JSONB na ordem do wizard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RouteStop {
    pub street: Option<String>,
    #[schema(example = "Žilina")]
    pub city: String,
    pub zip: Option<String>,
    #[schema(example = "SK")]
    pub country: Option<String>,
    // Data/hora agendada da paragem
    pub date_time: Option<DateTime<Utc>>,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub goods: Vec<GoodsItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GoodsItem {
    #[schema(example = "Palety s pečivom")]
    pub name: String,
    pub quantity: Option<String>,
    pub weight: Option<String>,
}

// --- Avaliação ---

// Sub-notas 1..=5; overall é a média mantida como float.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderRating {
    #[schema(example = 5)]
    pub punctuality: i16,
    #[schema(example = 4)]
    pub communication: i16,
    #[schema(example = 5)]
    pub cargo_care: i16,
    #[schema(example = 4.67)]
    pub overall: f32,
}

impl OrderRating {
    pub fn new(punctuality: i16, communication: i16, cargo_care: i16) -> Self {
        let overall = (punctuality + communication + cargo_care) as f32 / 3.0;
        Self {
            punctuality,
            communication,
            cargo_care,
            overall,
        }
    }
}

// --- Objednávka ---

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    #[schema(ignore)]
    pub company_id: Uuid,

    #[schema(example = "2026-0042")]
    pub order_number_formatted: String,

    // Lado do cliente
    pub customer_company: Option<String>,
    pub customer_contact_name: Option<String>,
    pub customer_contact_surname: Option<String>,
    // Campo combinado explícito; tem prioridade sobre nome+apelido
    pub customer_contact_person: Option<String>,
    // Preço como string decimal; ver parse_price
    #[schema(example = "1250.00")]
    pub customer_price: Option<String>,
    pub customer_vat_id: Option<String>,
    pub customer_address: Option<String>,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,

    // Lado do transportador
    pub carrier_company: Option<String>,
    pub carrier_contact: Option<String>,
    pub carrier_vehicle_reg: Option<String>,
    #[schema(example = "980.00")]
    pub carrier_price: Option<String>,
    pub carrier_address: Option<String>,
    pub carrier_vat_id: Option<String>,
    pub carrier_reg_id: Option<String>,
    pub carrier_vehicle_types: Option<Vec<String>>,
    pub carrier_notes: Option<String>,

    pub loading_places: Vec<RouteStop>,
    pub unloading_places: Vec<RouteStop>,

    pub rating: Option<OrderRating>,

    pub created_by: Option<Uuid>,
    pub created_by_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    // Pessoa de contacto resolvida: campo combinado, senão nome+apelido.
    pub fn contact_person(&self) -> Option<String> {
        if let Some(p) = &self.customer_contact_person {
            if !p.trim().is_empty() {
                return Some(p.trim().to_string());
            }
        }
        let joined = format!(
            "{} {}",
            self.customer_contact_name.as_deref().unwrap_or(""),
            self.customer_contact_surname.as_deref().unwrap_or("")
        );
        let joined = joined.trim();
        if joined.is_empty() {
            None
        } else {
            Some(joined.to_string())
        }
    }

    // Número da objednávka como inteiro: só os dígitos de "2026-0042" -> 20260042.
    pub fn order_number_numeric(&self) -> i64 {
        let digits: String = self
            .order_number_formatted
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect();
        digits.parse().unwrap_or(0)
    }
}

// O corpo do wizard de objednávka (criação e edição em pleno).
#[derive(Debug, Clone, Deserialize, validator::Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub customer_company: Option<String>,
    pub customer_contact_name: Option<String>,
    pub customer_contact_surname: Option<String>,
    pub customer_contact_person: Option<String>,
    #[schema(example = "1250.00")]
    pub customer_price: Option<String>,
    pub customer_vat_id: Option<String>,
    pub customer_address: Option<String>,
    #[validate(email(message = "invalid_email"))]
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,

    pub carrier_company: Option<String>,
    pub carrier_contact: Option<String>,
    pub carrier_vehicle_reg: Option<String>,
    #[schema(example = "980.00")]
    pub carrier_price: Option<String>,
    pub carrier_address: Option<String>,
    pub carrier_vat_id: Option<String>,
    pub carrier_reg_id: Option<String>,
    pub carrier_vehicle_types: Option<Vec<String>>,
    pub carrier_notes: Option<String>,

    #[serde(default)]
    pub loading_places: Vec<RouteStop>,
    #[serde(default)]
    pub unloading_places: Vec<RouteStop>,
}

// Preço em string decimal. Inválido ou negativo conta como zero:
// os agregados nunca podem virar NaN nem descer abaixo de zero por lixo no campo.
pub fn parse_price(raw: Option<&str>) -> Decimal {
    raw.and_then(|s| s.trim().parse::<Decimal>().ok())
        .filter(|d| !d.is_sign_negative())
        .unwrap_or(Decimal::ZERO)
}

// --- Linha crua do banco ---

// A forma JSONB/array vinda do sqlx. A normalização para Order acontece
// aqui, na fronteira do repositório, e em mais lado nenhum.
#[derive(Debug, FromRow)]
pub struct OrderRow {
    pub id: Uuid,
    pub company_id: Uuid,
    pub order_number_formatted: String,

    pub customer_company: Option<String>,
    pub customer_contact_name: Option<String>,
    pub customer_contact_surname: Option<String>,
    pub customer_contact_person: Option<String>,
    pub customer_price: Option<String>,
    pub customer_vat_id: Option<String>,
    pub customer_address: Option<String>,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,

    pub carrier_company: Option<String>,
    pub carrier_contact: Option<String>,
    pub carrier_vehicle_reg: Option<String>,
    pub carrier_price: Option<String>,
    pub carrier_address: Option<String>,
    pub carrier_vat_id: Option<String>,
    pub carrier_reg_id: Option<String>,
    pub carrier_vehicle_types: Option<Vec<String>>,
    pub carrier_notes: Option<String>,

    pub loading_places: Json<Vec<RouteStop>>,
    pub unloading_places: Json<Vec<RouteStop>>,

    pub rating: Option<Json<OrderRating>>,

    pub created_by: Option<Uuid>,
    pub created_by_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Order {
            id: row.id,
            company_id: row.company_id,
            order_number_formatted: row.order_number_formatted,
            customer_company: row.customer_company,
            customer_contact_name: row.customer_contact_name,
            customer_contact_surname: row.customer_contact_surname,
            customer_contact_person: row.customer_contact_person,
            customer_price: row.customer_price,
            customer_vat_id: row.customer_vat_id,
            customer_address: row.customer_address,
            customer_email: row.customer_email,
            customer_phone: row.customer_phone,
            carrier_company: row.carrier_company,
            carrier_contact: row.carrier_contact,
            carrier_vehicle_reg: row.carrier_vehicle_reg,
            carrier_price: row.carrier_price,
            carrier_address: row.carrier_address,
            carrier_vat_id: row.carrier_vat_id,
            carrier_reg_id: row.carrier_reg_id,
            carrier_vehicle_types: row.carrier_vehicle_types,
            carrier_notes: row.carrier_notes,
            loading_places: row.loading_places.0,
            unloading_places: row.unloading_places.0,
            rating: row.rating.map(|j| j.0),
            created_by: row.created_by,
            created_by_name: row.created_by_name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

// Fábrica de objednávky vazias para os testes do núcleo de sync.
#[cfg(test)]
pub(crate) fn test_order() -> Order {
    Order {
        id: Uuid::new_v4(),
        company_id: Uuid::new_v4(),
        order_number_formatted: "2026-0001".to_string(),
        customer_company: None,
        customer_contact_name: None,
        customer_contact_surname: None,
        customer_contact_person: None,
        customer_price: None,
        customer_vat_id: None,
        customer_address: None,
        customer_email: None,
        customer_phone: None,
        carrier_company: None,
        carrier_contact: None,
        carrier_vehicle_reg: None,
        carrier_price: None,
        carrier_address: None,
        carrier_vat_id: None,
        carrier_reg_id: None,
        carrier_vehicle_types: None,
        carrier_notes: None,
        loading_places: vec![],
        unloading_places: vec![],
        rating: None,
        created_by: None,
        created_by_name: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn parse_price_valid() {
        assert_eq!(parse_price(Some("100.50")), Decimal::new(10050, 2));
    }

    #[test]
    fn parse_price_garbage_is_zero() {
        assert_eq!(parse_price(Some("abc")), Decimal::ZERO);
    }

    #[test]
    fn parse_price_negative_is_zero() {
        assert_eq!(parse_price(Some("-10")), Decimal::ZERO);
    }

    #[test]
    fn parse_price_none_is_zero() {
        assert_eq!(parse_price(None), Decimal::ZERO);
    }

    #[test]
    fn order_number_numeric_strips_non_digits() {
        let mut order = test_order();
        order.order_number_formatted = "2026-0042".to_string();
        assert_eq!(order.order_number_numeric(), 2026_0042);

        order.order_number_formatted = "bez čísla".to_string();
        assert_eq!(order.order_number_numeric(), 0);
    }

    #[test]
    fn contact_person_prefers_combined_field() {
        let mut order = test_order();
        order.customer_contact_person = Some("Peter Malý".to_string());
        order.customer_contact_name = Some("Jana".to_string());
        order.customer_contact_surname = Some("Veľká".to_string());
        assert_eq!(order.contact_person().as_deref(), Some("Peter Malý"));
    }

    #[test]
    fn contact_person_joins_and_trims() {
        let mut order = test_order();
        order.customer_contact_name = Some("Jana".to_string());
        order.customer_contact_surname = None;
        assert_eq!(order.contact_person().as_deref(), Some("Jana"));

        order.customer_contact_name = None;
        assert_eq!(order.contact_person(), None);
    }
}
