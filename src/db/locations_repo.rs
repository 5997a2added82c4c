// src/db/locations_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::locations::{Location, LocationDraft, LocationKind, LocationRow},
};

#[derive(Clone)]
pub struct LocationsRepository {
    pool: PgPool,
}

impl LocationsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Mais usados primeiro: é a ordem em que o wizard os sugere.
    pub async fn list<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
        kind: Option<LocationKind>,
    ) -> Result<Vec<Location>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = match kind {
            Some(kind) => {
                sqlx::query_as::<_, LocationRow>(
                    r#"
                    SELECT * FROM locations
                    WHERE company_id = $1 AND kind = $2
                    ORDER BY usage_count DESC, city
                    "#,
                )
                .bind(company_id)
                .bind(kind.as_str())
                .fetch_all(executor)
                .await?
            }
            None => {
                sqlx::query_as::<_, LocationRow>(
                    r#"
                    SELECT * FROM locations
                    WHERE company_id = $1
                    ORDER BY usage_count DESC, city
                    "#,
                )
                .bind(company_id)
                .fetch_all(executor)
                .await?
            }
        };

        Ok(rows.into_iter().map(Location::from).collect())
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
        draft: &LocationDraft,
    ) -> Result<Location, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row = sqlx::query_as::<_, LocationRow>(
            r#"
            INSERT INTO locations (
                company_id, kind, name, street, city, zip, country,
                contact_name, contact_phone
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(company_id)
        .bind(draft.kind.as_str())
        .bind(&draft.name)
        .bind(&draft.street)
        .bind(&draft.city)
        .bind(&draft.zip)
        .bind(&draft.country)
        .bind(&draft.contact_name)
        .bind(&draft.contact_phone)
        .fetch_one(executor)
        .await?;

        Ok(row.into())
    }

    // O wizard marca o local como usado sempre que o escolhe.
    pub async fn increment_usage<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
        location_id: Uuid,
    ) -> Result<Option<Location>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row = sqlx::query_as::<_, LocationRow>(
            r#"
            UPDATE locations SET usage_count = usage_count + 1
            WHERE company_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(company_id)
        .bind(location_id)
        .fetch_optional(executor)
        .await?;

        Ok(row.map(Location::from))
    }

    pub async fn delete<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
        location_id: Uuid,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM locations WHERE company_id = $1 AND id = $2")
            .bind(company_id)
            .bind(location_id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }
}
