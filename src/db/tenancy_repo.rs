// src/db/tenancy_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::tenancy::{Company, CompanyMember};

#[derive(Clone)]
pub struct CompanyRepository {
    pool: PgPool,
}

impl CompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Verifica se um utilizador tem permissão para aceder a uma empresa.
    /// Esta é a verificação de segurança de autorização mais importante.
    pub async fn check_user_membership(
        &self,
        user_id: Uuid,
        company_id: Uuid,
    ) -> Result<bool, AppError> {
        // SELECT EXISTS para a consulta mais rápida possível.
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM company_members
                WHERE user_id = $1 AND company_id = $2
            )
            "#,
        )
        .bind(user_id)
        .bind(company_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    pub async fn create_company<'e, E>(
        &self,
        executor: E,
        name: &str,
        vat_id: Option<&str>,
        address: Option<&str>,
    ) -> Result<Company, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let company = sqlx::query_as::<_, Company>(
            r#"
            INSERT INTO companies (name, vat_id, address)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(vat_id)
        .bind(address)
        .fetch_one(executor)
        .await?;

        Ok(company)
    }

    // Atribui um utilizador a uma empresa (na tabela-ponte).
    pub async fn assign_member<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        company_id: Uuid,
    ) -> Result<CompanyMember, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let member = sqlx::query_as::<_, CompanyMember>(
            r#"
            INSERT INTO company_members (user_id, company_id)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(company_id)
        .fetch_one(executor)
        .await?;

        Ok(member)
    }

    pub async fn list_companies_for_user(&self, user_id: Uuid) -> Result<Vec<Company>, AppError> {
        let companies = sqlx::query_as::<_, Company>(
            r#"
            SELECT c.* FROM companies c
            JOIN company_members m ON m.company_id = c.id
            WHERE m.user_id = $1
            ORDER BY c.name
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(companies)
    }
}
