//! Repository for reading the `sheet_templates` table.
//!
//! Templates are only ever inserted by [`TemplateVersionRepo`]; nothing here
//! writes.
//!
//! [`TemplateVersionRepo`]: super::TemplateVersionRepo

use scale_core::template_version::TemplateKind;
use scale_core::types::DbId;
use sqlx::PgPool;

use crate::models::template::Template;

/// Column list for sheet_templates queries.
pub(crate) const COLUMNS: &str = "id, code, name, kind, version, created_at";

/// Read access to templates.
pub struct TemplateRepo;

impl TemplateRepo {
    /// Find a template version by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Template>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sheet_templates WHERE id = $1");
        sqlx::query_as::<_, Template>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List templates, newest version first within each code.
    pub async fn list(
        pool: &PgPool,
        kind: Option<TemplateKind>,
    ) -> Result<Vec<Template>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sheet_templates \
             WHERE ($1::TEXT IS NULL OR kind = $1) \
             ORDER BY code ASC, version DESC"
        );
        sqlx::query_as::<_, Template>(&query)
            .bind(kind.map(TemplateKind::as_str))
            .fetch_all(pool)
            .await
    }

    /// All versions of one code, newest first.
    pub async fn list_versions(pool: &PgPool, code: &str) -> Result<Vec<Template>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sheet_templates WHERE code = $1 ORDER BY version DESC"
        );
        sqlx::query_as::<_, Template>(&query)
            .bind(code)
            .fetch_all(pool)
            .await
    }
}
