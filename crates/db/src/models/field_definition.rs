//! Field definition row mapping.
//!
//! Rows are flat; the typed [`FieldDefinition`] is rebuilt from them through
//! [`FieldDocument`]. List columns are JSONB arrays and never NULL, the table
//! schema column is NULL for non-table fields.

use scale_core::error::CoreError;
use scale_core::field_schema::{parse_table_schema, FieldDefinition, FieldDocument};
use scale_core::types::DbId;
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `field_definitions` table.
#[derive(Debug, Clone, FromRow)]
pub struct FieldDefinitionRow {
    pub id: DbId,
    pub template_id: DbId,
    pub key: String,
    pub label: String,
    #[sqlx(rename = "type")]
    pub field_type: String,
    pub required: bool,
    pub order_no: i32,
    pub group_key: Option<String>,
    pub is_multi: bool,
    pub multi_keys: Json<Vec<String>>,
    pub unit_mode: String,
    pub unit_options: Json<Vec<String>>,
    pub dropdown_options: Json<Vec<String>>,
    pub table_schema: Option<serde_json::Value>,
}

impl TryFrom<FieldDefinitionRow> for FieldDefinition {
    type Error = CoreError;

    fn try_from(row: FieldDefinitionRow) -> Result<Self, Self::Error> {
        let table_schema = row
            .table_schema
            .filter(|v| !v.is_null())
            .map(parse_table_schema)
            .transpose()?;

        let document = FieldDocument {
            key: row.key,
            label: row.label,
            field_type: row.field_type.parse()?,
            required: row.required,
            order_no: row.order_no,
            group_key: row.group_key,
            is_multi: row.is_multi,
            multi_keys: row.multi_keys.0,
            unit_mode: row.unit_mode.parse()?,
            unit_options: row.unit_options.0,
            dropdown_options: row.dropdown_options.0,
            table_schema,
        };

        Ok(FieldDefinition {
            id: row.id,
            template_id: row.template_id,
            schema: document.into(),
        })
    }
}
