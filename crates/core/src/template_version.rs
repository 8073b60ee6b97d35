//! Template versioning rules (pure part).
//!
//! A template is identified by `(code, version)`. Versions of one code start
//! at 1 and increase by one per new version. Field layouts are never edited in
//! place: saving fields always produces a new version with fresh field rows.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::field_schema::FieldSchema;

/// First version number assigned to a new code.
pub const FIRST_VERSION: i32 = 1;

/// Spacing between consecutive `order_no` values of saved fields.
pub const ORDER_NO_STEP: i32 = 10;

/// Whether a template describes an input sheet or an output sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TemplateKind {
    Input,
    Output,
}

impl TemplateKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TemplateKind::Input => "INPUT",
            TemplateKind::Output => "OUTPUT",
        }
    }
}

impl FromStr for TemplateKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INPUT" => Ok(TemplateKind::Input),
            "OUTPUT" => Ok(TemplateKind::Output),
            other => Err(CoreError::Malformed(format!("unknown template kind '{other}'"))),
        }
    }
}

impl TryFrom<String> for TemplateKind {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Version number following the current maximum for a code.
///
/// Fails once a code has used up the `i32` version range.
pub fn next_version(current_max: Option<i32>) -> Result<i32, CoreError> {
    match current_max {
        None => Ok(FIRST_VERSION),
        Some(v) => v
            .checked_add(1)
            .ok_or_else(|| CoreError::Internal(format!("version overflow after {v}"))),
    }
}

/// `order_no` for the field at `index` in a saved list: 10, 20, 30, ...
pub fn order_no_for_index(index: usize) -> Result<i32, CoreError> {
    index
        .checked_add(1)
        .and_then(|n| i32::try_from(n).ok())
        .and_then(|n| n.checked_mul(ORDER_NO_STEP))
        .ok_or_else(|| CoreError::Validation(format!("too many fields to number ({index})")))
}

/// Renumber fields in input order, discarding caller-supplied `order_no`.
pub fn renumber_fields(fields: Vec<FieldSchema>) -> Result<Vec<FieldSchema>, CoreError> {
    fields
        .into_iter()
        .enumerate()
        .map(|(i, mut field)| {
            field.order_no = order_no_for_index(i)?;
            Ok(field)
        })
        .collect()
}
