//! Sheet model and DTOs.

use scale_core::sheet::SheetKind;
use scale_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Sheet header columns from the `sheets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sheet {
    pub id: DbId,
    pub item_id: DbId,
    pub template_id: DbId,
    #[sqlx(try_from = "String")]
    pub kind: SheetKind,
    pub parent_sheet_id: Option<DbId>,
    pub output_template_id: Option<DbId>,
    pub sheet_date: Option<Date>,
    pub created_at: Timestamp,
}

/// A sheet together with its recorded values, keyed by field key.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SheetDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub sheet: Sheet,
    #[sqlx(rename = "values_json")]
    pub values: serde_json::Value,
}

/// DTO for recording a sheet. The kind follows from `parent_sheet_id`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSheet {
    pub item_id: DbId,
    pub template_id: DbId,
    #[serde(default)]
    pub sheet_date: Option<Date>,
    #[serde(default)]
    pub parent_sheet_id: Option<DbId>,
    #[serde(default)]
    pub output_template_id: Option<DbId>,
    #[serde(default)]
    pub values: serde_json::Map<String, serde_json::Value>,
}

/// Filter for listing an item's sheets (`?item_id=&kind=`).
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ItemSheetFilter {
    pub item_id: DbId,
    pub kind: SheetKind,
}
