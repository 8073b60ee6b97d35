//! Repository for the `types` table.

use sqlx::PgPool;

use crate::models::scale_type::{CreateScaleType, ScaleType};

const COLUMNS: &str = "id, name, is_active, created_at";

/// Writes scale types.
pub struct TypeRepo;

impl TypeRepo {
    /// Insert a type with its name trimmed. A missing `active` stores `true`.
    pub async fn create(pool: &PgPool, input: &CreateScaleType) -> Result<ScaleType, sqlx::Error> {
        let query = format!(
            "INSERT INTO types (name, is_active) \
             VALUES ($1, COALESCE($2, TRUE)) \
             RETURNING {COLUMNS}"
        );
        let created = sqlx::query_as::<_, ScaleType>(&query)
            .bind(input.name.trim())
            .bind(input.active)
            .fetch_one(pool)
            .await?;
        tracing::info!(type_id = created.id, name = %created.name, "Created type");
        Ok(created)
    }
}
