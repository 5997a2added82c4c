// src/db/directory_repo.rs

use sqlx::types::Json;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::directory::{
        Carrier, CarrierDraft, CarrierRating, CarrierRow, Customer, CustomerDraft, CustomerRating,
        CustomerRow, DEFAULT_CARRIER_PAYMENT_TERM, DEFAULT_CUSTOMER_PAYMENT_TERM,
    },
};

// Clientes e transportadores partilham o mesmo repositório: é o diretório
// da firma, sempre isolado por company_id.
#[derive(Clone)]
pub struct DirectoryRepository {
    pool: PgPool,
}

impl DirectoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  CLIENTES
    // =========================================================================

    pub async fn list_customers<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
    ) -> Result<Vec<Customer>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as::<_, CustomerRow>(
            "SELECT * FROM customers WHERE company_id = $1 ORDER BY company",
        )
        .bind(company_id)
        .fetch_all(executor)
        .await?;

        Ok(rows.into_iter().map(Customer::from).collect())
    }

    pub async fn find_customer<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
        customer_id: Uuid,
    ) -> Result<Option<Customer>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row = sqlx::query_as::<_, CustomerRow>(
            "SELECT * FROM customers WHERE company_id = $1 AND id = $2",
        )
        .bind(company_id)
        .bind(customer_id)
        .fetch_optional(executor)
        .await?;

        Ok(row.map(Customer::from))
    }

    pub async fn create_customer<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
        draft: &CustomerDraft,
    ) -> Result<Customer, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row = sqlx::query_as::<_, CustomerRow>(
            r#"
            INSERT INTO customers (
                company_id, company, contact_name, contact_surname, email,
                phone, address, vat_id, reg_id, payment_term_days
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(company_id)
        .bind(&draft.company)
        .bind(&draft.contact_name)
        .bind(&draft.contact_surname)
        .bind(&draft.email)
        .bind(&draft.phone)
        .bind(&draft.address)
        .bind(&draft.vat_id)
        .bind(&draft.reg_id)
        .bind(draft.payment_term_days.unwrap_or(DEFAULT_CUSTOMER_PAYMENT_TERM))
        .fetch_one(executor)
        .await?;

        Ok(row.into())
    }

    pub async fn update_customer<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
        customer_id: Uuid,
        draft: &CustomerDraft,
    ) -> Result<Option<Customer>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row = sqlx::query_as::<_, CustomerRow>(
            r#"
            UPDATE customers SET
                company = $3, contact_name = $4, contact_surname = $5,
                email = $6, phone = $7, address = $8, vat_id = $9, reg_id = $10,
                payment_term_days = $11, updated_at = NOW()
            WHERE company_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(company_id)
        .bind(customer_id)
        .bind(&draft.company)
        .bind(&draft.contact_name)
        .bind(&draft.contact_surname)
        .bind(&draft.email)
        .bind(&draft.phone)
        .bind(&draft.address)
        .bind(&draft.vat_id)
        .bind(&draft.reg_id)
        .bind(draft.payment_term_days.unwrap_or(DEFAULT_CUSTOMER_PAYMENT_TERM))
        .fetch_optional(executor)
        .await?;

        Ok(row.map(Customer::from))
    }

    pub async fn rate_customer<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
        customer_id: Uuid,
        rating: &CustomerRating,
    ) -> Result<Option<Customer>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row = sqlx::query_as::<_, CustomerRow>(
            r#"
            UPDATE customers SET rating = $3, updated_at = NOW()
            WHERE company_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(company_id)
        .bind(customer_id)
        .bind(Json(rating))
        .fetch_optional(executor)
        .await?;

        Ok(row.map(Customer::from))
    }

    pub async fn delete_customer<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
        customer_id: Uuid,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM customers WHERE company_id = $1 AND id = $2")
            .bind(company_id)
            .bind(customer_id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }

    // =========================================================================
    //  TRANSPORTADORES
    // =========================================================================

    pub async fn list_carriers<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
    ) -> Result<Vec<Carrier>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as::<_, CarrierRow>(
            "SELECT * FROM carriers WHERE company_id = $1 ORDER BY company",
        )
        .bind(company_id)
        .fetch_all(executor)
        .await?;

        Ok(rows.into_iter().map(Carrier::from).collect())
    }

    pub async fn find_carrier<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
        carrier_id: Uuid,
    ) -> Result<Option<Carrier>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row = sqlx::query_as::<_, CarrierRow>(
            "SELECT * FROM carriers WHERE company_id = $1 AND id = $2",
        )
        .bind(company_id)
        .bind(carrier_id)
        .fetch_optional(executor)
        .await?;

        Ok(row.map(Carrier::from))
    }

    pub async fn create_carrier<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
        draft: &CarrierDraft,
    ) -> Result<Carrier, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row = sqlx::query_as::<_, CarrierRow>(
            r#"
            INSERT INTO carriers (
                company_id, company, contact_name, contact_surname, email,
                phone, address, vat_id, reg_id, vehicle_types, notes,
                payment_term_days
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(company_id)
        .bind(&draft.company)
        .bind(&draft.contact_name)
        .bind(&draft.contact_surname)
        .bind(&draft.email)
        .bind(&draft.phone)
        .bind(&draft.address)
        .bind(&draft.vat_id)
        .bind(&draft.reg_id)
        .bind(&draft.vehicle_types)
        .bind(&draft.notes)
        .bind(draft.payment_term_days.unwrap_or(DEFAULT_CARRIER_PAYMENT_TERM))
        .fetch_one(executor)
        .await?;

        Ok(row.into())
    }

    pub async fn update_carrier<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
        carrier_id: Uuid,
        draft: &CarrierDraft,
    ) -> Result<Option<Carrier>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row = sqlx::query_as::<_, CarrierRow>(
            r#"
            UPDATE carriers SET
                company = $3, contact_name = $4, contact_surname = $5,
                email = $6, phone = $7, address = $8, vat_id = $9, reg_id = $10,
                vehicle_types = $11, notes = $12, payment_term_days = $13,
                updated_at = NOW()
            WHERE company_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(company_id)
        .bind(carrier_id)
        .bind(&draft.company)
        .bind(&draft.contact_name)
        .bind(&draft.contact_surname)
        .bind(&draft.email)
        .bind(&draft.phone)
        .bind(&draft.address)
        .bind(&draft.vat_id)
        .bind(&draft.reg_id)
        .bind(&draft.vehicle_types)
        .bind(&draft.notes)
        .bind(draft.payment_term_days.unwrap_or(DEFAULT_CARRIER_PAYMENT_TERM))
        .fetch_optional(executor)
        .await?;

        Ok(row.map(Carrier::from))
    }

    pub async fn rate_carrier<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
        carrier_id: Uuid,
        rating: &CarrierRating,
    ) -> Result<Option<Carrier>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row = sqlx::query_as::<_, CarrierRow>(
            r#"
            UPDATE carriers SET rating = $3, updated_at = NOW()
            WHERE company_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(company_id)
        .bind(carrier_id)
        .bind(Json(rating))
        .fetch_optional(executor)
        .await?;

        Ok(row.map(Carrier::from))
    }

    pub async fn delete_carrier<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
        carrier_id: Uuid,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM carriers WHERE company_id = $1 AND id = $2")
            .bind(company_id)
            .bind(carrier_id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }
}
