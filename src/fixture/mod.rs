//! One-time batch import of persons and groups from a fixture file
//!
//! The loader runs before any query traffic is served: groups first, then
//! persons, so every group reference can be validated on insert. The search
//! core never triggers loading itself; it only assumes the data exists.

use serde::Deserialize;

use crate::core::entity::{Group, Person};
use crate::core::error::{FixtureError, RosterError};
use crate::core::service::Datastore;

/// On-disk fixture shape
#[derive(Debug, Deserialize)]
pub struct FixtureFile {
    #[serde(default)]
    pub groups: Vec<GroupRecord>,
    #[serde(default)]
    pub persons: Vec<PersonRecord>,
}

#[derive(Debug, Deserialize)]
pub struct GroupRecord {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct PersonRecord {
    pub id: u64,
    pub name: String,
    pub age: u32,
    #[serde(default)]
    pub group_id: Option<u64>,
}

/// Counts reported after a successful import
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadSummary {
    pub groups: usize,
    pub persons: usize,
}

/// Parse a fixture from YAML text
pub fn parse(yaml: &str) -> Result<FixtureFile, FixtureError> {
    serde_yaml::from_str(yaml).map_err(|e| FixtureError::Parse {
        path: "<inline>".to_string(),
        message: e.to_string(),
    })
}

/// Import a parsed fixture into the datastore
pub async fn load(store: &dyn Datastore, fixture: FixtureFile) -> Result<LoadSummary, RosterError> {
    let summary = LoadSummary {
        groups: fixture.groups.len(),
        persons: fixture.persons.len(),
    };

    for record in fixture.groups {
        store.insert_group(Group::new(record.id, record.name)).await?;
    }
    for record in fixture.persons {
        let person = Person {
            id: record.id,
            name: record.name,
            age: record.age,
            group_id: record.group_id,
        };
        store.insert_person(person).await?;
    }

    tracing::info!(
        groups = summary.groups,
        persons = summary.persons,
        "fixture loaded"
    );
    Ok(summary)
}

/// Read, parse, and import a fixture file
pub async fn load_path(store: &dyn Datastore, path: &str) -> Result<LoadSummary, RosterError> {
    let content = std::fs::read_to_string(path).map_err(|e| FixtureError::Io {
        path: path.to_string(),
        message: e.to_string(),
    })?;
    let fixture = serde_yaml::from_str(&content).map_err(|e| FixtureError::Parse {
        path: path.to_string(),
        message: e.to_string(),
    })?;

    load(store, fixture).await
}
