pub mod items;
pub mod part_template_mappings;
pub mod sheets;
pub mod templates;
pub mod types;
