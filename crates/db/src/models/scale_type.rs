//! Scale type model.

use scale_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `types` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleType {
    pub id: DbId,
    pub name: String,
    pub is_active: bool,
    pub created_at: Timestamp,
}

/// DTO for creating a type. `active` defaults to true when omitted.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateScaleType {
    pub name: String,
    #[serde(default)]
    pub active: Option<bool>,
}
