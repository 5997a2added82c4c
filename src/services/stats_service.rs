// src/services/stats_service.rs

use std::collections::HashMap;

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{OrdersRepository, UserRepository},
    models::stats::{DispatcherInfo, DispatcherRollup},
    sync::StatsWindow,
    sync::rollup::dispatcher_rollups,
};

#[derive(Clone)]
pub struct StatsService {
    orders_repo: OrdersRepository,
    user_repo: UserRepository,
    pool: PgPool,
}

impl StatsService {
    pub fn new(orders_repo: OrdersRepository, user_repo: UserRepository, pool: PgPool) -> Self {
        Self {
            orders_repo,
            user_repo,
            pool,
        }
    }

    // Carrega as objednávky do tenant + o lookup de nomes e delega no
    // cálculo puro. A janela é resolvida contra o relógio de agora.
    pub async fn dispatcher_rollups(
        &self,
        company_id: Uuid,
        window: StatsWindow,
    ) -> Result<Vec<DispatcherRollup>, AppError> {
        let orders = self
            .orders_repo
            .list_window(&self.pool, company_id, None)
            .await?;

        let mut author_ids: Vec<Uuid> = orders.iter().filter_map(|o| o.created_by).collect();
        author_ids.sort_unstable();
        author_ids.dedup();

        let mut dispatchers: HashMap<Uuid, DispatcherInfo> = HashMap::new();
        if !author_ids.is_empty() {
            for user in self.user_repo.list_by_ids(&self.pool, &author_ids).await? {
                dispatchers.insert(
                    user.id,
                    DispatcherInfo {
                        name: user.display_name.clone(),
                        email: Some(user.email.clone()),
                    },
                );
            }
        }

        Ok(dispatcher_rollups(&orders, window, &dispatchers, Utc::now()))
    }
}
