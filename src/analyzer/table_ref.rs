use std::fmt::Display;

use serde::Serialize;

/// A table referenced in the FROM/JOIN tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRef {
    pub name: String,
    pub alias: Option<String>,
}

impl TableRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), alias: None }
    }

    pub fn with_alias(name: impl Into<String>, alias: impl Into<String>) -> Self {
        Self { name: name.into(), alias: Some(alias.into()) }
    }

    /// The string columns are attributed under: the alias if present,
    /// else the table name.
    pub fn identity(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

impl Display for TableRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.alias {
            Some(alias) => write!(f, "{} (alias: {})", self.name, alias),
            None => write!(f, "{}", self.name),
        }
    }
}
