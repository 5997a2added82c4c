// src/db/orders_repo.rs

use async_trait::async_trait;
use chrono::{Datelike, Utc};
use sqlx::types::Json;
use sqlx::{Acquire, Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::orders::{Order, OrderDraft, OrderRating, OrderRow},
    sync::feed::SnapshotSource,
    sync::window::DateWindow,
};

#[derive(Clone)]
pub struct OrdersRepository {
    pool: PgPool,
}

impl OrdersRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  CRIAÇÃO
    // =========================================================================

    // Aloca o número sequencial e insere numa única transação; o UNIQUE
    // em (company_id, order_number_formatted) apanha qualquer corrida.
    pub async fn create<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
        draft: &OrderDraft,
        created_by: Uuid,
        created_by_name: Option<&str>,
    ) -> Result<Order, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        // A sequência recomeça a cada ano; o prefixo do número formatado
        // já carrega o ano, por isso serve de filtro.
        let year = Utc::now().year();
        let next_seq = sqlx::query_scalar::<_, i32>(
            r#"
            SELECT COALESCE(MAX(order_seq), 0) + 1 FROM orders
            WHERE company_id = $1 AND order_number_formatted LIKE $2
            "#,
        )
        .bind(company_id)
        .bind(format!("{}-%", year))
        .fetch_one(&mut *tx)
        .await?;

        let order_number = format!("{}-{:04}", year, next_seq);

        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            INSERT INTO orders (
                company_id, order_seq, order_number_formatted,
                customer_company, customer_contact_name, customer_contact_surname,
                customer_contact_person, customer_price, customer_vat_id,
                customer_address, customer_email, customer_phone,
                carrier_company, carrier_contact, carrier_vehicle_reg,
                carrier_price, carrier_address, carrier_vat_id, carrier_reg_id,
                carrier_vehicle_types, carrier_notes,
                loading_places, unloading_places,
                created_by, created_by_name
            )
            VALUES (
                $1, $2, $3,
                $4, $5, $6, $7, $8, $9, $10, $11, $12,
                $13, $14, $15, $16, $17, $18, $19, $20, $21,
                $22, $23,
                $24, $25
            )
            RETURNING *
            "#,
        )
        .bind(company_id)
        .bind(next_seq)
        .bind(&order_number)
        .bind(&draft.customer_company)
        .bind(&draft.customer_contact_name)
        .bind(&draft.customer_contact_surname)
        .bind(&draft.customer_contact_person)
        .bind(&draft.customer_price)
        .bind(&draft.customer_vat_id)
        .bind(&draft.customer_address)
        .bind(&draft.customer_email)
        .bind(&draft.customer_phone)
        .bind(&draft.carrier_company)
        .bind(&draft.carrier_contact)
        .bind(&draft.carrier_vehicle_reg)
        .bind(&draft.carrier_price)
        .bind(&draft.carrier_address)
        .bind(&draft.carrier_vat_id)
        .bind(&draft.carrier_reg_id)
        .bind(&draft.carrier_vehicle_types)
        .bind(&draft.carrier_notes)
        .bind(Json(&draft.loading_places))
        .bind(Json(&draft.unloading_places))
        .bind(created_by)
        .bind(created_by_name)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(row.into())
    }

    // =========================================================================
    //  LEITURA
    // =========================================================================

    // A query do feed: tenant + janela inclusiva, mais recente primeiro.
    pub async fn list_window<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
        window: Option<DateWindow>,
    ) -> Result<Vec<Order>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = match window {
            Some(window) => {
                let (start, end) = window.bounds_utc();
                sqlx::query_as::<_, OrderRow>(
                    r#"
                    SELECT * FROM orders
                    WHERE company_id = $1 AND created_at >= $2 AND created_at <= $3
                    ORDER BY created_at DESC
                    "#,
                )
                .bind(company_id)
                .bind(start)
                .bind(end)
                .fetch_all(executor)
                .await?
            }
            None => {
                sqlx::query_as::<_, OrderRow>(
                    r#"
                    SELECT * FROM orders
                    WHERE company_id = $1
                    ORDER BY created_at DESC
                    "#,
                )
                .bind(company_id)
                .fetch_all(executor)
                .await?
            }
        };

        Ok(rows.into_iter().map(Order::from).collect())
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
        order_id: Uuid,
    ) -> Result<Option<Order>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row = sqlx::query_as::<_, OrderRow>(
            "SELECT * FROM orders WHERE company_id = $1 AND id = $2",
        )
        .bind(company_id)
        .bind(order_id)
        .fetch_optional(executor)
        .await?;

        Ok(row.map(Order::from))
    }

    // =========================================================================
    //  MUTAÇÃO
    // =========================================================================

    pub async fn update<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
        order_id: Uuid,
        draft: &OrderDraft,
    ) -> Result<Option<Order>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            UPDATE orders SET
                customer_company = $3, customer_contact_name = $4,
                customer_contact_surname = $5, customer_contact_person = $6,
                customer_price = $7, customer_vat_id = $8, customer_address = $9,
                customer_email = $10, customer_phone = $11,
                carrier_company = $12, carrier_contact = $13,
                carrier_vehicle_reg = $14, carrier_price = $15,
                carrier_address = $16, carrier_vat_id = $17, carrier_reg_id = $18,
                carrier_vehicle_types = $19, carrier_notes = $20,
                loading_places = $21, unloading_places = $22,
                updated_at = NOW()
            WHERE company_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(company_id)
        .bind(order_id)
        .bind(&draft.customer_company)
        .bind(&draft.customer_contact_name)
        .bind(&draft.customer_contact_surname)
        .bind(&draft.customer_contact_person)
        .bind(&draft.customer_price)
        .bind(&draft.customer_vat_id)
        .bind(&draft.customer_address)
        .bind(&draft.customer_email)
        .bind(&draft.customer_phone)
        .bind(&draft.carrier_company)
        .bind(&draft.carrier_contact)
        .bind(&draft.carrier_vehicle_reg)
        .bind(&draft.carrier_price)
        .bind(&draft.carrier_address)
        .bind(&draft.carrier_vat_id)
        .bind(&draft.carrier_reg_id)
        .bind(&draft.carrier_vehicle_types)
        .bind(&draft.carrier_notes)
        .bind(Json(&draft.loading_places))
        .bind(Json(&draft.unloading_places))
        .fetch_optional(executor)
        .await?;

        Ok(row.map(Order::from))
    }

    pub async fn set_rating<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
        order_id: Uuid,
        rating: &OrderRating,
    ) -> Result<Option<Order>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            UPDATE orders SET rating = $3, updated_at = NOW()
            WHERE company_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(company_id)
        .bind(order_id)
        .bind(Json(rating))
        .fetch_optional(executor)
        .await?;

        Ok(row.map(Order::from))
    }

    // Devolve quantas linhas desapareceram; 0 = referência obsoleta.
    pub async fn delete<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
        order_id: Uuid,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM orders WHERE company_id = $1 AND id = $2")
            .bind(company_id)
            .bind(order_id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }
}

// O repositório é a fonte de snapshots do feed ao vivo.
#[async_trait]
impl SnapshotSource for OrdersRepository {
    async fn fetch(
        &self,
        company_id: Uuid,
        window: Option<DateWindow>,
    ) -> Result<Vec<Order>, AppError> {
        self.list_window(&self.pool, company_id, window).await
    }
}
