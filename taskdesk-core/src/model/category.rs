use serde::{Deserialize, Serialize};

/// A user-defined task status or priority.
///
/// Both sets are open-ended; names like "Completed" or "High" are
/// conventions, not fixed values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    #[serde(default)]
    pub name: String,
}

pub type Status = Category;
pub type Priority = Category;

/// A status/priority field as the server sends it: either a bare foreign
/// key or the expanded record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryRef {
    Embedded(Category),
    Id(i64),
}

impl CategoryRef {
    pub fn id(&self) -> i64 {
        match self {
            CategoryRef::Embedded(category) => category.id,
            CategoryRef::Id(id) => *id,
        }
    }

    /// The embedded name, if the server expanded the record and it has one.
    pub fn embedded_name(&self) -> Option<&str> {
        match self {
            CategoryRef::Embedded(category) if !category.name.is_empty() => Some(&category.name),
            _ => None,
        }
    }
}

/// Which category endpoint a request goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryKind {
    Status,
    Priority,
}

impl CategoryKind {
    pub fn path(&self) -> &'static str {
        match self {
            CategoryKind::Status => "status/",
            CategoryKind::Priority => "priority/",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CategoryKind::Status => "status",
            CategoryKind::Priority => "priority",
        }
    }
}

/// Body for creating or renaming a status/priority.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryDraft {
    pub name: String,
}
