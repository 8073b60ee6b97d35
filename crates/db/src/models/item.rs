//! Item model.
//!
//! Items are read-only here; they are maintained by the plant systems.

use scale_core::item_tree::HierarchyRow;
use scale_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: DbId,
    pub part_id: String,
    pub serial_number: String,
    pub bridge_name: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl HierarchyRow for Item {
    fn item_id(&self) -> DbId {
        self.id
    }

    fn part_id(&self) -> &str {
        &self.part_id
    }

    fn serial_number(&self) -> &str {
        &self.serial_number
    }

    fn bridge_name(&self) -> &str {
        &self.bridge_name
    }
}
