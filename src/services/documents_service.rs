// src/services/documents_service.rs

use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{DocumentsRepository, OrdersRepository},
    models::documents::{DocumentKind, OrderDocument},
    services::storage::FileStorage,
    sync::{ChangeBus, Collection},
};

#[derive(Clone)]
pub struct DocumentsService {
    repo: DocumentsRepository,
    orders_repo: OrdersRepository,
    storage: FileStorage,
    bus: ChangeBus,
    pool: PgPool,
}

impl DocumentsService {
    pub fn new(
        repo: DocumentsRepository,
        orders_repo: OrdersRepository,
        storage: FileStorage,
        bus: ChangeBus,
        pool: PgPool,
    ) -> Self {
        Self {
            repo,
            orders_repo,
            storage,
            bus,
            pool,
        }
    }

    // Upload + registro do documento. A objednávka é re-verificada antes de
    // gravar fosse o que fosse: anexar a um id pendurado não pode acontecer.
    pub async fn attach(
        &self,
        company_id: Uuid,
        order_id: Uuid,
        doc_type: DocumentKind,
        file_name: &str,
        bytes: &[u8],
        uploaded_by: Option<Uuid>,
    ) -> Result<OrderDocument, AppError> {
        self.orders_repo
            .find_by_id(&self.pool, company_id, order_id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("objednávka {}", order_id)))?;

        let (file_url, storage_path) = self.storage.save(file_name, bytes).await?;

        let document = self
            .repo
            .insert(
                &self.pool,
                company_id,
                order_id,
                doc_type,
                file_name,
                &file_url,
                &storage_path,
                uploaded_by,
            )
            .await?;

        self.bus.publish(company_id, Collection::Documents);
        Ok(document)
    }

    pub async fn list(&self, company_id: Uuid) -> Result<Vec<OrderDocument>, AppError> {
        self.repo.list_by_company(&self.pool, company_id).await
    }

    pub async fn list_for_order(
        &self,
        company_id: Uuid,
        order_id: Uuid,
    ) -> Result<Vec<OrderDocument>, AppError> {
        self.repo.list_by_order(&self.pool, company_id, order_id).await
    }

    // O mapa lateral que o filtro por tipo de documento consome.
    pub async fn map_by_order(
        &self,
        company_id: Uuid,
    ) -> Result<HashMap<Uuid, Vec<OrderDocument>>, AppError> {
        let documents = self.list(company_id).await?;
        let mut map: HashMap<Uuid, Vec<OrderDocument>> = HashMap::new();
        for document in documents {
            map.entry(document.order_id).or_default().push(document);
        }
        Ok(map)
    }

    pub async fn delete(&self, company_id: Uuid, document_id: Uuid) -> Result<(), AppError> {
        // Re-fetch antes de agir: referência obsoleta devolve not-found.
        let document = self
            .repo
            .find_by_id(&self.pool, company_id, document_id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("dokument {}", document_id)))?;

        self.storage.delete(&document.storage_path).await?;
        self.repo.delete(&self.pool, company_id, document_id).await?;

        self.bus.publish(company_id, Collection::Documents);
        Ok(())
    }
}
