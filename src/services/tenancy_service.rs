// src/services/tenancy_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, db::CompanyRepository, models::tenancy::Company};

#[derive(Clone)]
pub struct TenancyService {
    repo: CompanyRepository,
    pool: PgPool,
}

impl TenancyService {
    pub fn new(repo: CompanyRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    // Criar a empresa e ligar o criador têm de acontecer juntos.
    pub async fn create_company(
        &self,
        creator: Uuid,
        name: &str,
        vat_id: Option<&str>,
        address: Option<&str>,
    ) -> Result<Company, AppError> {
        let mut tx = self.pool.begin().await?;

        let company = self
            .repo
            .create_company(&mut *tx, name, vat_id, address)
            .await?;
        self.repo.assign_member(&mut *tx, creator, company.id).await?;

        tx.commit().await?;
        Ok(company)
    }

    pub async fn list_my_companies(&self, user_id: Uuid) -> Result<Vec<Company>, AppError> {
        self.repo.list_companies_for_user(user_id).await
    }
}
