//! Domain entities and the flat projection returned to callers

use serde::{Deserialize, Serialize};

/// A person in the directory.
///
/// A person references at most one group by id. The reference is
/// one-directional: groups do not hold a member collection, the membership
/// view of a group is derived on demand from the datastore
/// (`Datastore::members_of`). Reassigning a person's group therefore cannot
/// leave two sides out of sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Unique identifier
    pub id: u64,

    /// Display name
    pub name: String,

    /// Age in whole years
    pub age: u32,

    /// Group this person belongs to, if any
    pub group_id: Option<u64>,
}

impl Person {
    /// Create a person without a group affiliation
    pub fn new(id: u64, name: impl Into<String>, age: u32) -> Self {
        Self {
            id,
            name: name.into(),
            age,
            group_id: None,
        }
    }

    /// Create a person affiliated with a group
    pub fn with_group(id: u64, name: impl Into<String>, age: u32, group_id: u64) -> Self {
        Self {
            id,
            name: name.into(),
            age,
            group_id: Some(group_id),
        }
    }
}

/// A named group that persons can belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Unique identifier
    pub id: u64,

    /// Group name
    pub name: String,
}

impl Group {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Flat read-only projection of a person joined with its group.
///
/// This is the row shape returned by search queries: the person's display
/// fields plus the group name, absent when the person has no group (outer
/// join semantics, a groupless person still produces a row). Never
/// persisted, never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonGroupRow {
    pub person_id: u64,
    pub name: String,
    pub age: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
}

impl PersonGroupRow {
    /// Project a person and its resolved group into the flat row shape
    pub fn project(person: &Person, group: Option<&Group>) -> Self {
        Self {
            person_id: person.id,
            name: person.name.clone(),
            age: person.age,
            group_id: group.map(|g| g.id),
            group_name: group.map(|g| g.name.clone()),
        }
    }
}
