//! Domain types and pure logic for the scale inspection backend.
//!
//! Nothing in this crate performs I/O. Storage lives in `scale-db`, the HTTP
//! surface in `scale-api`.

pub mod error;
pub mod field_schema;
pub mod item_tree;
pub mod sheet;
pub mod template_version;
pub mod types;
