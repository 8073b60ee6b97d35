//! Repository for the `items` table.

use scale_core::item_tree::{build_item_tree, ItemTree};
use scale_core::types::DbId;
use sqlx::PgPool;

use crate::models::item::Item;

const COLUMNS: &str =
    "id, part_id, serial_number, bridge_name, is_active, created_at, updated_at";

/// Read access to items.
pub struct ItemRepo;

impl ItemRepo {
    /// Active items in tree order: part, then serial, then bridge name.
    pub async fn list_active_sorted(pool: &PgPool) -> Result<Vec<Item>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM items \
             WHERE is_active = true \
             ORDER BY part_id, serial_number, bridge_name"
        );
        sqlx::query_as::<_, Item>(&query).fetch_all(pool).await
    }

    /// Find an item by ID, active or not.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Item>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM items WHERE id = $1");
        sqlx::query_as::<_, Item>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Distinct part ids among active items, ascending.
    pub async fn list_part_ids(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT DISTINCT part_id FROM items WHERE is_active = true ORDER BY part_id",
        )
        .fetch_all(pool)
        .await
    }

    /// Fold all active items into the Part -> Serial -> Bridge tree.
    pub async fn tree(pool: &PgPool) -> Result<ItemTree, sqlx::Error> {
        let items = Self::list_active_sorted(pool).await?;
        let tree = build_item_tree(&items);
        tracing::debug!(
            items = items.len(),
            parts = tree.part_count(),
            serials = tree.serial_count(),
            "Built item tree"
        );
        Ok(tree)
    }
}
