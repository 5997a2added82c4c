// src/services/locations_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::LocationsRepository,
    models::locations::{Location, LocationDraft, LocationKind},
    sync::{ChangeBus, Collection},
};

#[derive(Clone)]
pub struct LocationsService {
    repo: LocationsRepository,
    bus: ChangeBus,
    pool: PgPool,
}

impl LocationsService {
    pub fn new(repo: LocationsRepository, bus: ChangeBus, pool: PgPool) -> Self {
        Self { repo, bus, pool }
    }

    pub async fn list(
        &self,
        company_id: Uuid,
        kind: Option<LocationKind>,
    ) -> Result<Vec<Location>, AppError> {
        self.repo.list(&self.pool, company_id, kind).await
    }

    pub async fn create(
        &self,
        company_id: Uuid,
        draft: &LocationDraft,
    ) -> Result<Location, AppError> {
        let location = self.repo.create(&self.pool, company_id, draft).await?;
        self.bus.publish(company_id, Collection::Locations);
        Ok(location)
    }

    pub async fn mark_used(&self, company_id: Uuid, location_id: Uuid) -> Result<Location, AppError> {
        let location = self
            .repo
            .increment_usage(&self.pool, company_id, location_id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("miesto {}", location_id)))?;

        self.bus.publish(company_id, Collection::Locations);
        Ok(location)
    }

    pub async fn delete(&self, company_id: Uuid, location_id: Uuid) -> Result<(), AppError> {
        let deleted = self.repo.delete(&self.pool, company_id, location_id).await?;
        if deleted == 0 {
            return Err(AppError::ResourceNotFound(format!("miesto {}", location_id)));
        }

        self.bus.publish(company_id, Collection::Locations);
        Ok(())
    }
}
