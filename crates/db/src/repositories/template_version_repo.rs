//! Creation of new template versions.
//!
//! Every call produces exactly one new `sheet_templates` row plus its field
//! rows, inside a single transaction. Either the base template's fields are
//! copied, or an explicit field list is inserted, never both.
//!
//! Version numbers are allocated as `MAX(version) + 1` per code while holding
//! a transaction-scoped advisory lock keyed on the code, so two writers for
//! the same code serialize instead of racing to the same number. The
//! `uq_sheet_templates_code_version` constraint stays as a backstop and
//! surfaces as a conflict.

use scale_core::error::CoreError;
use scale_core::field_schema::FieldSchema;
use scale_core::template_version::{next_version, renumber_fields};
use scale_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use super::field_definition_repo::FieldDefinitionRepo;
use super::template_repo::COLUMNS;
use crate::error::DbResult;
use crate::models::template::{CreateTemplateVersion, Template};

/// Writes new template versions.
pub struct TemplateVersionRepo;

impl TemplateVersionRepo {
    /// Create the next version of `input.code`.
    ///
    /// When `base_template_id` is set, the base template's fields are
    /// deep-copied into the new version. A base id with no matching template
    /// copies nothing: the version is still created, with no fields.
    pub async fn create_version(
        pool: &PgPool,
        input: &CreateTemplateVersion,
    ) -> DbResult<Template> {
        let mut tx = pool.begin().await?;
        let template = Self::create_version_inner(&mut tx, input).await?;
        tx.commit().await?;
        Ok(template)
    }

    /// Save `fields` as a new version of the template `template_id` belongs to.
    ///
    /// The new version takes code, name and kind from `template_id`. Fields
    /// are renumbered 10, 20, 30, ... in the order given.
    pub async fn save_fields_as_new_version(
        pool: &PgPool,
        template_id: DbId,
        fields: Vec<FieldSchema>,
    ) -> DbResult<Template> {
        let mut tx = pool.begin().await?;

        let query = format!("SELECT {COLUMNS} FROM sheet_templates WHERE id = $1");
        let current = sqlx::query_as::<_, Template>(&query)
            .bind(template_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Template",
                id: template_id,
            })?;

        let request = CreateTemplateVersion {
            code: current.code,
            name: current.name,
            kind: current.kind,
            base_template_id: None,
        };
        let created = Self::create_version_inner(&mut tx, &request).await?;

        let fields = renumber_fields(fields)?;
        FieldDefinitionRepo::insert_all(&mut tx, created.id, &fields).await?;

        tx.commit().await?;
        tracing::info!(
            from_template_id = template_id,
            template_id = created.id,
            code = %created.code,
            version = created.version,
            fields = fields.len(),
            "Saved fields as new template version"
        );
        Ok(created)
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Allocate the next version for the code, insert it and copy base fields.
    async fn create_version_inner(
        tx: &mut Transaction<'_, Postgres>,
        input: &CreateTemplateVersion,
    ) -> DbResult<Template> {
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1)::BIGINT)")
            .bind(&input.code)
            .execute(&mut **tx)
            .await?;

        let current_max: Option<i32> =
            sqlx::query_scalar("SELECT MAX(version) FROM sheet_templates WHERE code = $1")
                .bind(&input.code)
                .fetch_one(&mut **tx)
                .await?;
        let version = next_version(current_max)?;

        let query = format!(
            "INSERT INTO sheet_templates (code, name, kind, version) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        let template = sqlx::query_as::<_, Template>(&query)
            .bind(&input.code)
            .bind(&input.name)
            .bind(input.kind.as_str())
            .bind(version)
            .fetch_one(&mut **tx)
            .await?;

        let copied = match input.base_template_id {
            Some(base_id) => FieldDefinitionRepo::copy_all(tx, base_id, template.id).await?,
            None => 0,
        };

        tracing::info!(
            template_id = template.id,
            code = %template.code,
            version = template.version,
            base_template_id = ?input.base_template_id,
            copied_fields = copied,
            "Created template version"
        );
        Ok(template)
    }
}
