//! Group and person models.
//!
//! Groups are the audience dimension: each group is one row of a day on the
//! grid, in the order the caller configured them. People are opaque to the
//! core and only passed through to rule evaluators.

use serde::{Deserialize, Serialize};

/// Group identifier.
pub type GroupId = String;

/// An audience group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Unique group identifier.
    #[serde(rename = "_id")]
    pub id: GroupId,
    /// Display name.
    #[serde(default)]
    pub name: String,
}

impl Group {
    /// Creates a group whose name equals its id.
    pub fn new(id: impl Into<GroupId>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// A participant that programs reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Unique person identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
}

impl Person {
    /// Creates a person.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
