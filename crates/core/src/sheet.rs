//! Sheet kinds.
//!
//! A sheet with no parent is an INPUT sheet; a sheet hanging off another sheet
//! is an OUTPUT sheet. The kind is derived, never chosen by the caller.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SheetKind {
    Input,
    Output,
}

impl SheetKind {
    /// Kind implied by a sheet's parent link.
    pub fn for_parent(parent_sheet_id: Option<DbId>) -> Self {
        match parent_sheet_id {
            None => SheetKind::Input,
            Some(_) => SheetKind::Output,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SheetKind::Input => "INPUT",
            SheetKind::Output => "OUTPUT",
        }
    }
}

impl FromStr for SheetKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INPUT" => Ok(SheetKind::Input),
            "OUTPUT" => Ok(SheetKind::Output),
            other => Err(CoreError::Malformed(format!("unknown sheet kind '{other}'"))),
        }
    }
}

impl TryFrom<String> for SheetKind {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for SheetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_follows_parent() {
        assert_eq!(SheetKind::for_parent(None), SheetKind::Input);
        assert_eq!(SheetKind::for_parent(Some(12)), SheetKind::Output);
    }

    #[test]
    fn parses_stored_text() {
        assert_eq!(SheetKind::try_from("OUTPUT".to_string()).unwrap(), SheetKind::Output);
        assert!(matches!("output".parse::<SheetKind>(), Err(CoreError::Malformed(_))));
    }
}
