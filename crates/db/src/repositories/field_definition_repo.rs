//! Repository for the `field_definitions` table.
//!
//! Field rows belong to exactly one template version and are never updated.
//! Writes only happen inside a template-version transaction, so the write
//! helpers take a transaction rather than a pool.

use scale_core::field_schema::{FieldDefinition, FieldDocument, FieldSchema};
use scale_core::types::DbId;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, Transaction};

use crate::error::DbResult;
use crate::models::field_definition::FieldDefinitionRow;

/// Column list for field_definitions queries.
const COLUMNS: &str = "id, template_id, key, label, type, required, order_no, group_key, \
    is_multi, multi_keys, unit_mode, unit_options, dropdown_options, table_schema";

/// Columns copied verbatim when a version is based on another.
const COPY_COLUMNS: &str = "key, label, type, required, order_no, group_key, \
    is_multi, multi_keys, unit_mode, unit_options, dropdown_options, table_schema";

pub struct FieldDefinitionRepo;

impl FieldDefinitionRepo {
    /// Fields of one template version in display order.
    ///
    /// An unknown template simply has no fields.
    pub async fn list_for_template(
        pool: &PgPool,
        template_id: DbId,
    ) -> DbResult<Vec<FieldDefinition>> {
        let query = format!(
            "SELECT {COLUMNS} FROM field_definitions \
             WHERE template_id = $1 \
             ORDER BY order_no, id"
        );
        let rows = sqlx::query_as::<_, FieldDefinitionRow>(&query)
            .bind(template_id)
            .fetch_all(pool)
            .await?;

        let fields = rows
            .into_iter()
            .map(FieldDefinition::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(fields)
    }

    /// Insert `fields` under `template_id` exactly as given.
    pub(crate) async fn insert_all(
        tx: &mut Transaction<'_, Postgres>,
        template_id: DbId,
        fields: &[FieldSchema],
    ) -> DbResult<()> {
        for field in fields {
            let doc = FieldDocument::from(field.clone());
            sqlx::query(
                "INSERT INTO field_definitions \
                    (template_id, key, label, type, required, order_no, group_key, \
                     is_multi, multi_keys, unit_mode, unit_options, dropdown_options, table_schema) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)",
            )
            .bind(template_id)
            .bind(&doc.key)
            .bind(&doc.label)
            .bind(doc.field_type.as_str())
            .bind(doc.required)
            .bind(doc.order_no)
            .bind(&doc.group_key)
            .bind(doc.is_multi)
            .bind(Json(&doc.multi_keys))
            .bind(doc.unit_mode.as_str())
            .bind(Json(&doc.unit_options))
            .bind(Json(&doc.dropdown_options))
            .bind(doc.table_schema.as_ref().map(Json))
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }

    /// Copy every field of `source_template_id` into `target_template_id`.
    ///
    /// New rows get new ids in the source's display order. Returns the number
    /// of rows copied.
    pub(crate) async fn copy_all(
        tx: &mut Transaction<'_, Postgres>,
        source_template_id: DbId,
        target_template_id: DbId,
    ) -> DbResult<u64> {
        let query = format!(
            "INSERT INTO field_definitions (template_id, {COPY_COLUMNS}) \
             SELECT $1, {COPY_COLUMNS} FROM field_definitions \
             WHERE template_id = $2 \
             ORDER BY order_no, id"
        );
        let result = sqlx::query(&query)
            .bind(target_template_id)
            .bind(source_template_id)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected())
    }
}
