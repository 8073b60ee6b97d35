//! Repository for the `part_template_mappings` table.
//!
//! A mapping is keyed by part id and holds two ordered template id lists.
//! Saving always replaces both lists; there is no partial update.

use sqlx::PgPool;

use crate::models::part_template_mapping::{
    PartTemplateMapping, TemplatesForPart, UpsertPartTemplateMapping,
};

/// Column list for part_template_mappings queries.
const COLUMNS: &str = "part_id, input_template_ids, output_template_ids, updated_at";

pub struct PartTemplateMappingRepo;

impl PartTemplateMappingRepo {
    /// Insert or fully replace the mapping for `part_id`.
    ///
    /// Ids are stored in the order given, duplicates included.
    pub async fn upsert(
        pool: &PgPool,
        part_id: &str,
        input: &UpsertPartTemplateMapping,
    ) -> Result<PartTemplateMapping, sqlx::Error> {
        let query = format!(
            "INSERT INTO part_template_mappings (part_id, input_template_ids, output_template_ids) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (part_id) DO UPDATE SET \
                input_template_ids = EXCLUDED.input_template_ids, \
                output_template_ids = EXCLUDED.output_template_ids, \
                updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        let mapping = sqlx::query_as::<_, PartTemplateMapping>(&query)
            .bind(part_id)
            .bind(&input.input_template_ids)
            .bind(&input.output_template_ids)
            .fetch_one(pool)
            .await?;

        tracing::info!(
            part_id = %mapping.part_id,
            inputs = mapping.input_template_ids.len(),
            outputs = mapping.output_template_ids.len(),
            "Saved part template mapping"
        );
        Ok(mapping)
    }

    /// Template lists for a part; both empty when the part has no mapping.
    pub async fn get_for_part(
        pool: &PgPool,
        part_id: &str,
    ) -> Result<TemplatesForPart, sqlx::Error> {
        let found = sqlx::query_as::<_, TemplatesForPart>(
            "SELECT input_template_ids, output_template_ids \
             FROM part_template_mappings WHERE part_id = $1",
        )
        .bind(part_id)
        .fetch_optional(pool)
        .await?;
        Ok(found.unwrap_or_default())
    }

    /// All stored mappings ordered by part id.
    pub async fn list(pool: &PgPool) -> Result<Vec<PartTemplateMapping>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM part_template_mappings ORDER BY part_id");
        sqlx::query_as::<_, PartTemplateMapping>(&query)
            .fetch_all(pool)
            .await
    }
}
