use std::fmt::Display;

use serde::{Serialize, Serializer};

/// Key used to attribute column references to a table.
///
/// `Unknown` covers unqualified references whose owning table cannot be
/// determined syntactically. A dedicated variant rather than a sentinel
/// string, so a table literally named "unknown" cannot collide with it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TableKey {
    Known(String),
    Unknown,
}

impl TableKey {
    pub fn known(name: impl Into<String>) -> Self {
        TableKey::Known(name.into())
    }
}

impl Display for TableKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableKey::Known(name) => write!(f, "{}", name),
            TableKey::Unknown => write!(f, "unknown"),
        }
    }
}

impl Serialize for TableKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
