// src/db/preferences_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::common::error::AppError;

// Chaves persistidas da ordenação da tabela de objednávky.
pub const PREF_ORDERS_SORT_FIELD: &str = "ordersSortField";
pub const PREF_ORDERS_SORT_DIRECTION: &str = "ordersSortDirection";

#[derive(Clone)]
pub struct PreferencesRepository {
    pool: PgPool,
}

impl PreferencesRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, user_id: Uuid, key: &str) -> Result<Option<String>, AppError> {
        let value = sqlx::query_scalar::<_, String>(
            "SELECT pref_value FROM user_preferences WHERE user_id = $1 AND pref_key = $2",
        )
        .bind(user_id)
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;
        Ok(value)
    }

    pub async fn set(&self, user_id: Uuid, key: &str, value: &str) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO user_preferences (user_id, pref_key, pref_value)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, pref_key)
            DO UPDATE SET pref_value = EXCLUDED.pref_value, updated_at = NOW()
            "#,
        )
        .bind(user_id)
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn delete(&self, user_id: Uuid, key: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM user_preferences WHERE user_id = $1 AND pref_key = $2")
            .bind(user_id)
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
