//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! `&PgPool` as the first argument. Multi-statement writes open their own
//! transaction.

pub mod field_definition_repo;
pub mod item_repo;
pub mod part_template_mapping_repo;
pub mod sheet_repo;
pub mod template_repo;
pub mod template_version_repo;
pub mod type_repo;

pub use field_definition_repo::FieldDefinitionRepo;
pub use item_repo::ItemRepo;
pub use part_template_mapping_repo::PartTemplateMappingRepo;
pub use sheet_repo::SheetRepo;
pub use template_repo::TemplateRepo;
pub use template_version_repo::TemplateVersionRepo;
pub use type_repo::TypeRepo;
