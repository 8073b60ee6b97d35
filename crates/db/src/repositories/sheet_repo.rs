//! Repository for the `sheets` table.

use scale_core::sheet::SheetKind;
use scale_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::sheet::{CreateSheet, Sheet, SheetDetail};

/// Header columns, without the recorded values.
const COLUMNS: &str = "id, item_id, template_id, kind, parent_sheet_id, output_template_id, \
    sheet_date, created_at";

/// Newest first: by sheet date when present, otherwise creation time.
const NEWEST_FIRST: &str = "ORDER BY COALESCE(sheet_date::TIMESTAMPTZ, created_at) DESC, id DESC";

pub struct SheetRepo;

impl SheetRepo {
    /// Record a sheet. The kind is derived from `parent_sheet_id`.
    ///
    /// Missing item, template or parent rows surface as foreign-key
    /// violations.
    pub async fn create(pool: &PgPool, input: &CreateSheet) -> Result<Sheet, sqlx::Error> {
        let kind = SheetKind::for_parent(input.parent_sheet_id);
        let query = format!(
            "INSERT INTO sheets \
                (item_id, template_id, kind, parent_sheet_id, output_template_id, sheet_date, values_json) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        let sheet = sqlx::query_as::<_, Sheet>(&query)
            .bind(input.item_id)
            .bind(input.template_id)
            .bind(kind.as_str())
            .bind(input.parent_sheet_id)
            .bind(input.output_template_id)
            .bind(input.sheet_date)
            .bind(Json(&input.values))
            .fetch_one(pool)
            .await?;

        tracing::info!(
            sheet_id = sheet.id,
            item_id = sheet.item_id,
            template_id = sheet.template_id,
            kind = %sheet.kind,
            "Created sheet"
        );
        Ok(sheet)
    }

    /// Find a sheet header by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Sheet>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sheets WHERE id = $1");
        sqlx::query_as::<_, Sheet>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a sheet together with its values.
    pub async fn find_detail(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<SheetDetail>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS}, values_json FROM sheets WHERE id = $1");
        sqlx::query_as::<_, SheetDetail>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Sheets of one kind recorded against an item, newest first.
    pub async fn list_for_item(
        pool: &PgPool,
        item_id: DbId,
        kind: SheetKind,
    ) -> Result<Vec<Sheet>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sheets WHERE item_id = $1 AND kind = $2 {NEWEST_FIRST}"
        );
        sqlx::query_as::<_, Sheet>(&query)
            .bind(item_id)
            .bind(kind.as_str())
            .fetch_all(pool)
            .await
    }

    /// OUTPUT sheets hanging off an input sheet, newest first.
    pub async fn list_outputs(
        pool: &PgPool,
        input_sheet_id: DbId,
    ) -> Result<Vec<Sheet>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sheets \
             WHERE parent_sheet_id = $1 AND kind = 'OUTPUT' {NEWEST_FIRST}"
        );
        sqlx::query_as::<_, Sheet>(&query)
            .bind(input_sheet_id)
            .fetch_all(pool)
            .await
    }
}
