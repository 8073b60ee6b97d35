//! Integration tests for template versioning.
//!
//! Exercises the repository layer against a real database:
//! - Version allocation per code (1, 2, ...; codes are independent)
//! - Copying a base template's fields into a new version
//! - Saving an edited field list as a new version (renumbered 10, 20, 30)
//! - Failure paths leave nothing behind
//! - Concurrent writers for one code get distinct, gap-free versions
//! - Stored documents that cannot be parsed surface as `Malformed`

use assert_matches::assert_matches;
use scale_core::error::CoreError;
use scale_core::field_schema::{
    ColumnConfig, FieldConfig, FieldSchema, RowLayout, TableColumn, TableSchema, UnitConfig,
    UnitMode,
};
use scale_core::template_version::TemplateKind;
use scale_db::models::template::CreateTemplateVersion;
use scale_db::repositories::{FieldDefinitionRepo, TemplateRepo, TemplateVersionRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_version(code: &str, base_template_id: Option<i64>) -> CreateTemplateVersion {
    CreateTemplateVersion {
        code: code.to_string(),
        name: format!("{code} sheet"),
        kind: TemplateKind::Input,
        base_template_id,
    }
}

fn field(key: &str, config: FieldConfig) -> FieldSchema {
    FieldSchema {
        key: key.to_string(),
        label: key.to_uppercase(),
        required: false,
        order_no: 999,
        group_key: None,
        is_multi: false,
        multi_keys: vec![],
        config,
    }
}

fn sample_fields() -> Vec<FieldSchema> {
    vec![
        field(
            "ambient_temp",
            FieldConfig::Number(UnitConfig {
                unit_mode: UnitMode::Required,
                unit_options: vec!["C".to_string(), "K".to_string()],
            }),
        ),
        field(
            "result",
            FieldConfig::Dropdown {
                options: vec!["OK".to_string(), "NG".to_string()],
            },
        ),
        field(
            "readings",
            FieldConfig::Table(TableSchema {
                rows: RowLayout::Fixed {
                    default_rows: vec!["1".to_string(), "2".to_string()],
                },
                columns: vec![TableColumn {
                    key: "load".to_string(),
                    label: "Load".to_string(),
                    config: ColumnConfig::Number(UnitConfig {
                        unit_mode: UnitMode::Optional,
                        unit_options: vec!["kg".to_string()],
                    }),
                }],
            }),
        ),
    ]
}

async fn template_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM sheet_templates")
        .fetch_one(pool)
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Test: version allocation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_versions_increase_per_code(pool: PgPool) {
    let v1 = TemplateVersionRepo::create_version(&pool, &new_version("LOAD-TEST", None))
        .await
        .unwrap();
    let v2 = TemplateVersionRepo::create_version(&pool, &new_version("LOAD-TEST", None))
        .await
        .unwrap();
    let other = TemplateVersionRepo::create_version(&pool, &new_version("VISUAL", None))
        .await
        .unwrap();

    assert_eq!(v1.version, 1);
    assert_eq!(v2.version, 2);
    assert_ne!(v1.id, v2.id);
    assert_eq!(other.version, 1);
    assert_eq!(v2.kind, TemplateKind::Input);

    let versions = TemplateRepo::list_versions(&pool, "LOAD-TEST").await.unwrap();
    let numbers: Vec<i32> = versions.iter().map(|t| t.version).collect();
    assert_eq!(numbers, [2, 1]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_new_version_without_base_has_no_fields(pool: PgPool) {
    let template = TemplateVersionRepo::create_version(&pool, &new_version("EMPTY", None))
        .await
        .unwrap();
    let fields = FieldDefinitionRepo::list_for_template(&pool, template.id)
        .await
        .unwrap();
    assert!(fields.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_filters_by_kind(pool: PgPool) {
    TemplateVersionRepo::create_version(&pool, &new_version("IN-A", None))
        .await
        .unwrap();
    let mut output = new_version("OUT-A", None);
    output.kind = TemplateKind::Output;
    TemplateVersionRepo::create_version(&pool, &output).await.unwrap();

    let all = TemplateRepo::list(&pool, None).await.unwrap();
    assert_eq!(all.len(), 2);

    let outputs = TemplateRepo::list(&pool, Some(TemplateKind::Output))
        .await
        .unwrap();
    assert_eq!(outputs.len(), 1);
    assert_eq!(outputs[0].code, "OUT-A");
}

// ---------------------------------------------------------------------------
// Test: saving fields and copying from a base
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_save_fields_creates_new_version_with_renumbered_fields(pool: PgPool) {
    let v1 = TemplateVersionRepo::create_version(&pool, &new_version("LOAD-TEST", None))
        .await
        .unwrap();

    let v2 = TemplateVersionRepo::save_fields_as_new_version(&pool, v1.id, sample_fields())
        .await
        .unwrap();
    assert_eq!(v2.code, "LOAD-TEST");
    assert_eq!(v2.name, v1.name);
    assert_eq!(v2.version, 2);

    let fields = FieldDefinitionRepo::list_for_template(&pool, v2.id)
        .await
        .unwrap();
    let orders: Vec<i32> = fields.iter().map(|f| f.schema.order_no).collect();
    let keys: Vec<&str> = fields.iter().map(|f| f.schema.key.as_str()).collect();
    assert_eq!(orders, [10, 20, 30]);
    assert_eq!(keys, ["ambient_temp", "result", "readings"]);

    // The typed configuration survives storage unchanged.
    let expected = sample_fields();
    for (stored, original) in fields.iter().zip(&expected) {
        assert_eq!(stored.template_id, v2.id);
        assert_eq!(stored.schema.config, original.config);
    }

    // The previous version is untouched.
    let old = FieldDefinitionRepo::list_for_template(&pool, v1.id)
        .await
        .unwrap();
    assert!(old.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_base_fields_are_deep_copied(pool: PgPool) {
    let v1 = TemplateVersionRepo::create_version(&pool, &new_version("LOAD-TEST", None))
        .await
        .unwrap();
    let v2 = TemplateVersionRepo::save_fields_as_new_version(&pool, v1.id, sample_fields())
        .await
        .unwrap();

    let v3 = TemplateVersionRepo::create_version(&pool, &new_version("LOAD-TEST", Some(v2.id)))
        .await
        .unwrap();
    assert_eq!(v3.version, 3);

    let source = FieldDefinitionRepo::list_for_template(&pool, v2.id)
        .await
        .unwrap();
    let copied = FieldDefinitionRepo::list_for_template(&pool, v3.id)
        .await
        .unwrap();

    assert_eq!(copied.len(), source.len());
    for (c, s) in copied.iter().zip(&source) {
        assert_ne!(c.id, s.id);
        assert_eq!(c.template_id, v3.id);
        assert_eq!(c.schema, s.schema);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_empty_dropdown_options_round_trip(pool: PgPool) {
    let v1 = TemplateVersionRepo::create_version(&pool, &new_version("DD", None))
        .await
        .unwrap();
    let fields = vec![field("choice", FieldConfig::Dropdown { options: vec![] })];
    let v2 = TemplateVersionRepo::save_fields_as_new_version(&pool, v1.id, fields)
        .await
        .unwrap();

    let stored = FieldDefinitionRepo::list_for_template(&pool, v2.id)
        .await
        .unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].schema.config, FieldConfig::Dropdown { options: vec![] });
}

// ---------------------------------------------------------------------------
// Test: failure paths
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_base_creates_version_without_fields(pool: PgPool) {
    let template = TemplateVersionRepo::create_version(&pool, &new_version("LOAD-TEST", Some(9999)))
        .await
        .unwrap();
    assert_eq!(template.version, 1);
    assert_eq!(template.code, "LOAD-TEST");

    let fields = FieldDefinitionRepo::list_for_template(&pool, template.id)
        .await
        .unwrap();
    assert!(fields.is_empty());
    assert_eq!(template_count(&pool).await, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_failed_field_insert_rolls_back_new_version(pool: PgPool) {
    let v1 = TemplateVersionRepo::create_version(&pool, &new_version("LOAD-TEST", None))
        .await
        .unwrap();
    sqlx::query(
        "ALTER TABLE field_definitions \
         ADD CONSTRAINT ck_field_definitions_no_rejected CHECK (key <> 'rejected')",
    )
    .execute(&pool)
    .await
    .unwrap();

    // The version row and the first field are written before the second
    // field violates the constraint.
    let mut fields = sample_fields();
    fields.push(field("rejected", FieldConfig::Text));
    let err = TemplateVersionRepo::save_fields_as_new_version(&pool, v1.id, fields)
        .await
        .unwrap_err();
    assert_matches!(
        CoreError::from(err),
        CoreError::Conflict(msg) if msg.contains("ck_field_definitions_no_rejected")
    );

    assert_eq!(template_count(&pool).await, 1);
    let field_rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM field_definitions")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(field_rows, 0);

    // The next successful save still gets version 2.
    let v2 = TemplateVersionRepo::save_fields_as_new_version(&pool, v1.id, sample_fields())
        .await
        .unwrap();
    assert_eq!(v2.version, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_save_fields_for_unknown_template_is_not_found(pool: PgPool) {
    let err = TemplateVersionRepo::save_fields_as_new_version(&pool, 4242, sample_fields())
        .await
        .unwrap_err();
    assert_matches!(
        CoreError::from(err),
        CoreError::NotFound { entity: "Template", id: 4242 }
    );
    assert_eq!(template_count(&pool).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unparseable_table_schema_is_malformed(pool: PgPool) {
    let template = TemplateVersionRepo::create_version(&pool, &new_version("BROKEN", None))
        .await
        .unwrap();
    sqlx::query(
        "INSERT INTO field_definitions (template_id, key, label, type, table_schema) \
         VALUES ($1, 'grid', 'Grid', 'TABLE', '\"not a schema\"'::jsonb)",
    )
    .bind(template.id)
    .execute(&pool)
    .await
    .unwrap();

    let err = FieldDefinitionRepo::list_for_template(&pool, template.id)
        .await
        .unwrap_err();
    assert_matches!(CoreError::from(err), CoreError::Malformed(_));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_code_version_is_conflict(pool: PgPool) {
    TemplateVersionRepo::create_version(&pool, &new_version("DUP", None))
        .await
        .unwrap();
    let err = sqlx::query(
        "INSERT INTO sheet_templates (code, name, kind, version) VALUES ('DUP', 'x', 'INPUT', 1)",
    )
    .execute(&pool)
    .await
    .unwrap_err();
    assert_matches!(
        scale_db::error::classify_sqlx_error(&err),
        CoreError::Conflict(msg) if msg.contains("uq_sheet_templates_code_version")
    );
}

// ---------------------------------------------------------------------------
// Test: concurrent writers
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_versions_for_one_code_are_distinct(pool: PgPool) {
    const WRITERS: i32 = 8;

    let handles: Vec<_> = (0..WRITERS)
        .map(|_| {
            let pool = pool.clone();
            tokio::spawn(async move {
                TemplateVersionRepo::create_version(&pool, &new_version("RACE", None)).await
            })
        })
        .collect();

    let mut versions = Vec::new();
    for handle in handles {
        let template = handle.await.unwrap().unwrap();
        versions.push(template.version);
    }
    versions.sort_unstable();
    assert_eq!(versions, (1..=WRITERS).collect::<Vec<_>>());

    let stored = TemplateRepo::list_versions(&pool, "RACE").await.unwrap();
    assert_eq!(stored.len(), WRITERS as usize);
}
