//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` DTOs for the writes that entity supports
//!
//! All payloads serialize with camelCase keys.

pub mod field_definition;
pub mod item;
pub mod part_template_mapping;
pub mod scale_type;
pub mod sheet;
pub mod template;
