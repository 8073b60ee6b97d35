//! Part to template mapping model and DTOs.

use scale_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `part_template_mappings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartTemplateMapping {
    pub part_id: String,
    pub input_template_ids: Vec<DbId>,
    pub output_template_ids: Vec<DbId>,
    pub updated_at: Timestamp,
}

/// The two template lists for a part. Empty when the part has no mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplatesForPart {
    pub input_template_ids: Vec<DbId>,
    pub output_template_ids: Vec<DbId>,
}

/// DTO for replacing a part's mapping. Both lists are replaced wholesale.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertPartTemplateMapping {
    #[serde(default)]
    pub input_template_ids: Vec<DbId>,
    #[serde(default)]
    pub output_template_ids: Vec<DbId>,
}
