// src/db/documents_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::documents::{DocumentKind, OrderDocument, OrderDocumentRow},
};

#[derive(Clone)]
pub struct DocumentsRepository {
    pool: PgPool,
}

impl DocumentsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
        order_id: Uuid,
        doc_type: DocumentKind,
        file_name: &str,
        file_url: &str,
        storage_path: &str,
        uploaded_by: Option<Uuid>,
    ) -> Result<OrderDocument, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row = sqlx::query_as::<_, OrderDocumentRow>(
            r#"
            INSERT INTO order_documents (
                company_id, order_id, doc_type, file_name, file_url,
                storage_path, uploaded_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(company_id)
        .bind(order_id)
        .bind(doc_type.as_str())
        .bind(file_name)
        .bind(file_url)
        .bind(storage_path)
        .bind(uploaded_by)
        .fetch_one(executor)
        .await?;

        Ok(row.into())
    }

    // O mapa lateral inteiro do tenant; os consumidores agrupam por order_id.
    pub async fn list_by_company<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
    ) -> Result<Vec<OrderDocument>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as::<_, OrderDocumentRow>(
            "SELECT * FROM order_documents WHERE company_id = $1 ORDER BY created_at DESC",
        )
        .bind(company_id)
        .fetch_all(executor)
        .await?;

        Ok(rows.into_iter().map(OrderDocument::from).collect())
    }

    pub async fn list_by_order<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
        order_id: Uuid,
    ) -> Result<Vec<OrderDocument>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as::<_, OrderDocumentRow>(
            r#"
            SELECT * FROM order_documents
            WHERE company_id = $1 AND order_id = $2
            ORDER BY created_at DESC
            "#,
        )
        .bind(company_id)
        .bind(order_id)
        .fetch_all(executor)
        .await?;

        Ok(rows.into_iter().map(OrderDocument::from).collect())
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
        document_id: Uuid,
    ) -> Result<Option<OrderDocument>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row = sqlx::query_as::<_, OrderDocumentRow>(
            "SELECT * FROM order_documents WHERE company_id = $1 AND id = $2",
        )
        .bind(company_id)
        .bind(document_id)
        .fetch_optional(executor)
        .await?;

        Ok(row.map(OrderDocument::from))
    }

    pub async fn delete<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
        document_id: Uuid,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM order_documents WHERE company_id = $1 AND id = $2")
            .bind(company_id)
            .bind(document_id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }
}
