use crate::types::DbId;

/// Failure kinds surfaced by every operation in the workspace.
///
/// Carries no user-facing wording beyond a diagnostic message; presentation
/// is chosen by the caller.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Conflict: {0}")]
    Conflict(String),

    /// A stored nested document (field schema, option list) could not be parsed.
    #[error("Malformed document: {0}")]
    Malformed(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
