// src/services/orders_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::OrdersRepository,
    models::orders::{Order, OrderDraft, OrderRating},
    sync::{ChangeBus, Collection, DateWindow},
};

#[derive(Clone)]
pub struct OrdersService {
    repo: OrdersRepository,
    bus: ChangeBus,
    pool: PgPool,
}

impl OrdersService {
    pub fn new(repo: OrdersRepository, bus: ChangeBus, pool: PgPool) -> Self {
        Self { repo, bus, pool }
    }

    // As escritas são fire-and-forget do ponto de vista do chamador: quem
    // observa o resultado é o feed, através do evento publicado no fim.
    pub async fn create(
        &self,
        company_id: Uuid,
        draft: &OrderDraft,
        created_by: Uuid,
        created_by_name: Option<&str>,
    ) -> Result<Order, AppError> {
        let order = self
            .repo
            .create(&self.pool, company_id, draft, created_by, created_by_name)
            .await?;

        self.bus.publish(company_id, Collection::Orders);
        Ok(order)
    }

    pub async fn list(
        &self,
        company_id: Uuid,
        window: Option<DateWindow>,
    ) -> Result<Vec<Order>, AppError> {
        self.repo.list_window(&self.pool, company_id, window).await
    }

    pub async fn get(&self, company_id: Uuid, order_id: Uuid) -> Result<Order, AppError> {
        self.repo
            .find_by_id(&self.pool, company_id, order_id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("objednávka {}", order_id)))
    }

    pub async fn update(
        &self,
        company_id: Uuid,
        order_id: Uuid,
        draft: &OrderDraft,
    ) -> Result<Order, AppError> {
        // UPDATE ... RETURNING faz o re-fetch e a escrita num passo só:
        // se a linha desapareceu entretanto, sai ResourceNotFound e o
        // chamador limpa a seleção pendurada.
        let updated = self
            .repo
            .update(&self.pool, company_id, order_id, draft)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("objednávka {}", order_id)))?;

        self.bus.publish(company_id, Collection::Orders);
        Ok(updated)
    }

    pub async fn rate(
        &self,
        company_id: Uuid,
        order_id: Uuid,
        punctuality: i16,
        communication: i16,
        cargo_care: i16,
    ) -> Result<Order, AppError> {
        let rating = OrderRating::new(punctuality, communication, cargo_care);
        let rated = self
            .repo
            .set_rating(&self.pool, company_id, order_id, &rating)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("objednávka {}", order_id)))?;

        self.bus.publish(company_id, Collection::Orders);
        Ok(rated)
    }

    pub async fn delete(&self, company_id: Uuid, order_id: Uuid) -> Result<(), AppError> {
        let deleted = self.repo.delete(&self.pool, company_id, order_id).await?;
        if deleted == 0 {
            return Err(AppError::ResourceNotFound(format!(
                "objednávka {}",
                order_id
            )));
        }

        self.bus.publish(company_id, Collection::Orders);
        Ok(())
    }
}
