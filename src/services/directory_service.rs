// src/services/directory_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::DirectoryRepository,
    models::directory::{
        Carrier, CarrierDraft, CarrierRating, Customer, CustomerDraft, CustomerRating,
    },
    sync::{ChangeBus, Collection},
};

#[derive(Clone)]
pub struct DirectoryService {
    repo: DirectoryRepository,
    bus: ChangeBus,
    pool: PgPool,
}

impl DirectoryService {
    pub fn new(repo: DirectoryRepository, bus: ChangeBus, pool: PgPool) -> Self {
        Self { repo, bus, pool }
    }

    // --- CLIENTES ---

    pub async fn list_customers(&self, company_id: Uuid) -> Result<Vec<Customer>, AppError> {
        self.repo.list_customers(&self.pool, company_id).await
    }

    pub async fn create_customer(
        &self,
        company_id: Uuid,
        draft: &CustomerDraft,
    ) -> Result<Customer, AppError> {
        let customer = self.repo.create_customer(&self.pool, company_id, draft).await?;
        self.bus.publish(company_id, Collection::Customers);
        Ok(customer)
    }

    pub async fn update_customer(
        &self,
        company_id: Uuid,
        customer_id: Uuid,
        draft: &CustomerDraft,
    ) -> Result<Customer, AppError> {
        let updated = self
            .repo
            .update_customer(&self.pool, company_id, customer_id, draft)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("zákazník {}", customer_id)))?;

        self.bus.publish(company_id, Collection::Customers);
        Ok(updated)
    }

    pub async fn rate_customer(
        &self,
        company_id: Uuid,
        customer_id: Uuid,
        rating: &CustomerRating,
    ) -> Result<Customer, AppError> {
        let rated = self
            .repo
            .rate_customer(&self.pool, company_id, customer_id, rating)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("zákazník {}", customer_id)))?;

        self.bus.publish(company_id, Collection::Customers);
        Ok(rated)
    }

    pub async fn delete_customer(
        &self,
        company_id: Uuid,
        customer_id: Uuid,
    ) -> Result<(), AppError> {
        let deleted = self
            .repo
            .delete_customer(&self.pool, company_id, customer_id)
            .await?;
        if deleted == 0 {
            return Err(AppError::ResourceNotFound(format!(
                "zákazník {}",
                customer_id
            )));
        }

        self.bus.publish(company_id, Collection::Customers);
        Ok(())
    }

    // --- TRANSPORTADORES ---

    pub async fn list_carriers(&self, company_id: Uuid) -> Result<Vec<Carrier>, AppError> {
        self.repo.list_carriers(&self.pool, company_id).await
    }

    pub async fn create_carrier(
        &self,
        company_id: Uuid,
        draft: &CarrierDraft,
    ) -> Result<Carrier, AppError> {
        let carrier = self.repo.create_carrier(&self.pool, company_id, draft).await?;
        self.bus.publish(company_id, Collection::Carriers);
        Ok(carrier)
    }

    pub async fn update_carrier(
        &self,
        company_id: Uuid,
        carrier_id: Uuid,
        draft: &CarrierDraft,
    ) -> Result<Carrier, AppError> {
        let updated = self
            .repo
            .update_carrier(&self.pool, company_id, carrier_id, draft)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("dopravca {}", carrier_id)))?;

        self.bus.publish(company_id, Collection::Carriers);
        Ok(updated)
    }

    pub async fn rate_carrier(
        &self,
        company_id: Uuid,
        carrier_id: Uuid,
        rating: &CarrierRating,
    ) -> Result<Carrier, AppError> {
        let rated = self
            .repo
            .rate_carrier(&self.pool, company_id, carrier_id, rating)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("dopravca {}", carrier_id)))?;

        self.bus.publish(company_id, Collection::Carriers);
        Ok(rated)
    }

    pub async fn delete_carrier(&self, company_id: Uuid, carrier_id: Uuid) -> Result<(), AppError> {
        let deleted = self
            .repo
            .delete_carrier(&self.pool, company_id, carrier_id)
            .await?;
        if deleted == 0 {
            return Err(AppError::ResourceNotFound(format!(
                "dopravca {}",
                carrier_id
            )));
        }

        self.bus.publish(company_id, Collection::Carriers);
        Ok(())
    }
}
