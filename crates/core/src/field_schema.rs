//! Per-field configuration for sheet templates.
//!
//! A field's configuration is a closed union keyed by [`FieldType`]: a TEXT
//! field cannot carry a table schema and a TABLE field cannot carry unit
//! options. On the wire and in storage the same data travels as a flat
//! [`FieldDocument`] in which every list block is always present. Blocks that
//! do not apply to the field's type are written as empty lists, so an absent
//! list and an empty list read back identically.
//!
//! Tables nest exactly one level: a [`TableColumn`] has its own type, unit and
//! dropdown configuration but no way to hold another [`TableSchema`].
//!
//! No type-specific validation happens here (a DROPDOWN with no options is
//! stored as given).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Discriminants
// ---------------------------------------------------------------------------

/// Field type discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldType {
    Text,
    Number,
    Date,
    Dropdown,
    Boolean,
    Table,
}

impl FieldType {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::Text => "TEXT",
            FieldType::Number => "NUMBER",
            FieldType::Date => "DATE",
            FieldType::Dropdown => "DROPDOWN",
            FieldType::Boolean => "BOOLEAN",
            FieldType::Table => "TABLE",
        }
    }
}

impl FromStr for FieldType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TEXT" => Ok(FieldType::Text),
            "NUMBER" => Ok(FieldType::Number),
            "DATE" => Ok(FieldType::Date),
            "DROPDOWN" => Ok(FieldType::Dropdown),
            "BOOLEAN" => Ok(FieldType::Boolean),
            "TABLE" => Ok(FieldType::Table),
            other => Err(CoreError::Malformed(format!("unknown field type '{other}'"))),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Column type discriminant. A column can never be a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ColumnType {
    Number,
    Text,
    Dropdown,
    Boolean,
}

/// Whether a numeric value carries a unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnitMode {
    #[default]
    None,
    Optional,
    Required,
}

impl UnitMode {
    pub fn as_str(self) -> &'static str {
        match self {
            UnitMode::None => "NONE",
            UnitMode::Optional => "OPTIONAL",
            UnitMode::Required => "REQUIRED",
        }
    }
}

impl FromStr for UnitMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NONE" => Ok(UnitMode::None),
            "OPTIONAL" => Ok(UnitMode::Optional),
            "REQUIRED" => Ok(UnitMode::Required),
            other => Err(CoreError::Malformed(format!("unknown unit mode '{other}'"))),
        }
    }
}

/// How a table's rows are laid out.
///
/// `CONFIGURABLE` is accepted on input as a synonym for `FIXED`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RowMode {
    #[serde(alias = "CONFIGURABLE")]
    Fixed,
    #[default]
    Dynamic,
}

// ---------------------------------------------------------------------------
// Typed configuration
// ---------------------------------------------------------------------------

/// Unit mode plus the ordered list of selectable units.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitConfig {
    #[serde(default)]
    pub unit_mode: UnitMode,
    #[serde(default)]
    pub unit_options: Vec<String>,
}

/// Type-specific configuration of a top-level field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldConfig {
    Text,
    Number(UnitConfig),
    Date,
    Dropdown { options: Vec<String> },
    Boolean,
    Table(TableSchema),
}

impl FieldConfig {
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldConfig::Text => FieldType::Text,
            FieldConfig::Number(_) => FieldType::Number,
            FieldConfig::Date => FieldType::Date,
            FieldConfig::Dropdown { .. } => FieldType::Dropdown,
            FieldConfig::Boolean => FieldType::Boolean,
            FieldConfig::Table(_) => FieldType::Table,
        }
    }
}

/// Type-specific configuration of a table column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnConfig {
    Number(UnitConfig),
    Text,
    Dropdown { options: Vec<String> },
    Boolean,
}

impl ColumnConfig {
    pub fn column_type(&self) -> ColumnType {
        match self {
            ColumnConfig::Number(_) => ColumnType::Number,
            ColumnConfig::Text => ColumnType::Text,
            ColumnConfig::Dropdown { .. } => ColumnType::Dropdown,
            ColumnConfig::Boolean => ColumnType::Boolean,
        }
    }
}

/// Row layout of a table. Default rows only exist for fixed tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RowLayout {
    Fixed { default_rows: Vec<String> },
    #[default]
    Dynamic,
}

/// One column of a TABLE field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "ColumnDocument", from = "ColumnDocument")]
pub struct TableColumn {
    pub key: String,
    pub label: String,
    pub config: ColumnConfig,
}

/// Schema of a TABLE field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "TableDocument", from = "TableDocument")]
pub struct TableSchema {
    pub rows: RowLayout,
    pub columns: Vec<TableColumn>,
}

impl TableSchema {
    pub fn row_mode(&self) -> RowMode {
        match self.rows {
            RowLayout::Fixed { .. } => RowMode::Fixed,
            RowLayout::Dynamic => RowMode::Dynamic,
        }
    }
}

/// Complete configuration of one field, without storage identity.
///
/// `multi_keys` names the sibling keys combined into one logical value and is
/// only kept when `is_multi` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "FieldDocument", from = "FieldDocument")]
pub struct FieldSchema {
    pub key: String,
    pub label: String,
    pub required: bool,
    pub order_no: i32,
    pub group_key: Option<String>,
    pub is_multi: bool,
    pub multi_keys: Vec<String>,
    pub config: FieldConfig,
}

impl FieldSchema {
    pub fn field_type(&self) -> FieldType {
        self.config.field_type()
    }
}

/// A field as stored: schema plus its own id and owning template version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    pub id: DbId,
    pub template_id: DbId,
    #[serde(flatten)]
    pub schema: FieldSchema,
}

// ---------------------------------------------------------------------------
// Flat documents
// ---------------------------------------------------------------------------

/// Flat form of a [`FieldSchema`], with every block present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDocument {
    pub key: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub order_no: i32,
    #[serde(default)]
    pub group_key: Option<String>,
    #[serde(default)]
    pub is_multi: bool,
    #[serde(default)]
    pub multi_keys: Vec<String>,
    #[serde(default)]
    pub unit_mode: UnitMode,
    #[serde(default)]
    pub unit_options: Vec<String>,
    #[serde(default)]
    pub dropdown_options: Vec<String>,
    #[serde(default)]
    pub table_schema: Option<TableSchema>,
}

impl From<FieldDocument> for FieldSchema {
    fn from(doc: FieldDocument) -> Self {
        let config = match doc.field_type {
            FieldType::Text => FieldConfig::Text,
            FieldType::Number => FieldConfig::Number(UnitConfig {
                unit_mode: doc.unit_mode,
                unit_options: doc.unit_options,
            }),
            FieldType::Date => FieldConfig::Date,
            FieldType::Dropdown => FieldConfig::Dropdown {
                options: doc.dropdown_options,
            },
            FieldType::Boolean => FieldConfig::Boolean,
            FieldType::Table => FieldConfig::Table(doc.table_schema.unwrap_or_default()),
        };
        let multi_keys = if doc.is_multi { doc.multi_keys } else { Vec::new() };

        FieldSchema {
            key: doc.key,
            label: doc.label,
            required: doc.required,
            order_no: doc.order_no,
            group_key: doc.group_key,
            is_multi: doc.is_multi,
            multi_keys,
            config,
        }
    }
}

impl From<FieldSchema> for FieldDocument {
    fn from(schema: FieldSchema) -> Self {
        let field_type = schema.field_type();
        let mut doc = FieldDocument {
            key: schema.key,
            label: schema.label,
            field_type,
            required: schema.required,
            order_no: schema.order_no,
            group_key: schema.group_key,
            is_multi: schema.is_multi,
            multi_keys: schema.multi_keys,
            unit_mode: UnitMode::None,
            unit_options: Vec::new(),
            dropdown_options: Vec::new(),
            table_schema: None,
        };
        match schema.config {
            FieldConfig::Number(units) => {
                doc.unit_mode = units.unit_mode;
                doc.unit_options = units.unit_options;
            }
            FieldConfig::Dropdown { options } => doc.dropdown_options = options,
            FieldConfig::Table(table) => doc.table_schema = Some(table),
            FieldConfig::Text | FieldConfig::Date | FieldConfig::Boolean => {}
        }
        doc
    }
}

/// Flat form of a [`TableColumn`]. Has no slot for a nested table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDocument {
    pub key: String,
    pub label: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    #[serde(default)]
    pub unit_mode: UnitMode,
    #[serde(default)]
    pub unit_options: Vec<String>,
    #[serde(default)]
    pub dropdown_options: Vec<String>,
}

impl From<ColumnDocument> for TableColumn {
    fn from(doc: ColumnDocument) -> Self {
        let config = match doc.column_type {
            ColumnType::Number => ColumnConfig::Number(UnitConfig {
                unit_mode: doc.unit_mode,
                unit_options: doc.unit_options,
            }),
            ColumnType::Text => ColumnConfig::Text,
            ColumnType::Dropdown => ColumnConfig::Dropdown {
                options: doc.dropdown_options,
            },
            ColumnType::Boolean => ColumnConfig::Boolean,
        };
        TableColumn {
            key: doc.key,
            label: doc.label,
            config,
        }
    }
}

impl From<TableColumn> for ColumnDocument {
    fn from(column: TableColumn) -> Self {
        let column_type = column.config.column_type();
        let mut doc = ColumnDocument {
            key: column.key,
            label: column.label,
            column_type,
            unit_mode: UnitMode::None,
            unit_options: Vec::new(),
            dropdown_options: Vec::new(),
        };
        match column.config {
            ColumnConfig::Number(units) => {
                doc.unit_mode = units.unit_mode;
                doc.unit_options = units.unit_options;
            }
            ColumnConfig::Dropdown { options } => doc.dropdown_options = options,
            ColumnConfig::Text | ColumnConfig::Boolean => {}
        }
        doc
    }
}

/// Flat form of a [`TableSchema`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableDocument {
    #[serde(default)]
    pub row_mode: RowMode,
    #[serde(default, deserialize_with = "string_list_lenient")]
    pub default_rows: Vec<String>,
    #[serde(default)]
    pub columns: Vec<TableColumn>,
}

impl From<TableDocument> for TableSchema {
    fn from(doc: TableDocument) -> Self {
        let rows = match doc.row_mode {
            RowMode::Fixed => RowLayout::Fixed {
                default_rows: doc.default_rows,
            },
            RowMode::Dynamic => RowLayout::Dynamic,
        };
        TableSchema {
            rows,
            columns: doc.columns,
        }
    }
}

impl From<TableSchema> for TableDocument {
    fn from(schema: TableSchema) -> Self {
        let (row_mode, default_rows) = match schema.rows {
            RowLayout::Fixed { default_rows } => (RowMode::Fixed, default_rows),
            RowLayout::Dynamic => (RowMode::Dynamic, Vec::new()),
        };
        TableDocument {
            row_mode,
            default_rows,
            columns: schema.columns,
        }
    }
}

/// Accepts default row labels written either as strings or as bare numbers.
fn string_list_lenient<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?;
    raw.unwrap_or_default()
        .into_iter()
        .map(|value| match value {
            serde_json::Value::String(s) => Ok(s),
            serde_json::Value::Number(n) => Ok(n.to_string()),
            other => Err(serde::de::Error::custom(format!(
                "expected string or number row label, got {other}"
            ))),
        })
        .collect()
}

/// Parse a stored table schema document.
pub fn parse_table_schema(value: serde_json::Value) -> Result<TableSchema, CoreError> {
    serde_json::from_value(value)
        .map_err(|e| CoreError::Malformed(format!("table schema: {e}")))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
