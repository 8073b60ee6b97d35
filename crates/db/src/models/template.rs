//! Sheet template model and DTOs.

use scale_core::field_schema::FieldSchema;
use scale_core::template_version::TemplateKind;
use scale_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `sheet_templates` table. Never updated after insert.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: DbId,
    pub code: String,
    pub name: String,
    #[sqlx(try_from = "String")]
    pub kind: TemplateKind,
    pub version: i32,
    pub created_at: Timestamp,
}

/// DTO for creating the next version of a template code.
///
/// With `base_template_id` set, the base template's fields are copied into
/// the new version.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTemplateVersion {
    pub code: String,
    pub name: String,
    pub kind: TemplateKind,
    #[serde(default)]
    pub base_template_id: Option<DbId>,
}

/// DTO for saving an edited field list as a new version of a template.
///
/// Any `orderNo` in the payload is ignored; fields are renumbered in list
/// order.
#[derive(Debug, Clone, Deserialize)]
pub struct SaveTemplateFields {
    pub fields: Vec<FieldSchema>,
}

/// Optional filter for template listings.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct TemplateFilter {
    pub kind: Option<TemplateKind>,
}
