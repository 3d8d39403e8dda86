//! In-memory implementation of the Datastore trait
//!
//! Backed by insertion-ordered tables behind an `RwLock`, so any number of
//! search requests can read concurrently. Useful for testing, development,
//! and fixture-backed deployments.

use std::cmp::Ordering;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use indexmap::IndexMap;

use crate::core::entity::{Group, Person, PersonGroupRow};
use crate::core::error::{QueryError, StorageError};
use crate::core::page::{SortDirection, SortField, SortSpec};
use crate::core::predicate::{Predicate, matches_all};
use crate::core::service::Datastore;

#[derive(Default)]
struct Tables {
    groups: IndexMap<u64, Group>,
    persons: IndexMap<u64, Person>,
}

/// In-memory person/group datastore
#[derive(Clone, Default)]
pub struct InMemoryDatastore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryDatastore {
    /// Create an empty datastore
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Tables>, QueryError> {
        self.tables.read().map_err(|e| QueryError::Execution {
            message: format!("failed to acquire read lock: {}", e),
        })
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Tables>, StorageError> {
        self.tables.write().map_err(|e| StorageError::LockPoisoned {
            message: e.to_string(),
        })
    }
}

/// Project every person through the left join and keep the matching rows
fn matching_rows(tables: &Tables, predicates: &[Predicate]) -> Vec<PersonGroupRow> {
    tables
        .persons
        .values()
        .map(|person| {
            let group = person.group_id.and_then(|id| tables.groups.get(&id));
            PersonGroupRow::project(person, group)
        })
        .filter(|row| matches_all(predicates, row))
        .collect()
}

/// Order rows by the requested sort, person id ascending when unspecified.
///
/// Ties always fall back to person id so the ordering is total and page
/// windows never overlap between requests.
fn sort_rows(rows: &mut [PersonGroupRow], sort: Option<SortSpec>) {
    rows.sort_by(|a, b| {
        let by_id = a.person_id.cmp(&b.person_id);
        let Some(spec) = sort else {
            return by_id;
        };

        let ordering = match spec.field {
            SortField::Id => by_id,
            SortField::Name => a.name.cmp(&b.name),
            SortField::Age => a.age.cmp(&b.age),
            // None sorts before Some: groupless persons come first ascending
            SortField::GroupName => a.group_name.cmp(&b.group_name),
        };
        let ordering = match spec.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        };
        if ordering == Ordering::Equal { by_id } else { ordering }
    });
}

#[async_trait]
impl Datastore for InMemoryDatastore {
    async fn fetch_joined(
        &self,
        predicates: &[Predicate],
        sort: Option<SortSpec>,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<PersonGroupRow>, QueryError> {
        let tables = self.read()?;
        let mut rows = matching_rows(&tables, predicates);
        drop(tables);

        sort_rows(&mut rows, sort);

        Ok(rows.into_iter().skip(offset).take(limit).collect())
    }

    async fn count(&self, predicates: &[Predicate]) -> Result<u64, QueryError> {
        let tables = self.read()?;
        Ok(matching_rows(&tables, predicates).len() as u64)
    }

    async fn insert_group(&self, group: Group) -> Result<(), StorageError> {
        let mut tables = self.write()?;
        tables.groups.insert(group.id, group);
        Ok(())
    }

    async fn insert_person(&self, person: Person) -> Result<(), StorageError> {
        let mut tables = self.write()?;
        if let Some(group_id) = person.group_id {
            if !tables.groups.contains_key(&group_id) {
                return Err(StorageError::UnknownGroup {
                    person_id: person.id,
                    group_id,
                });
            }
        }
        tables.persons.insert(person.id, person);
        Ok(())
    }

    async fn assign_group(
        &self,
        person_id: u64,
        group_id: Option<u64>,
    ) -> Result<(), StorageError> {
        let mut tables = self.write()?;
        if let Some(group_id) = group_id {
            if !tables.groups.contains_key(&group_id) {
                return Err(StorageError::UnknownGroup {
                    person_id,
                    group_id,
                });
            }
        }

        let person = tables
            .persons
            .get_mut(&person_id)
            .ok_or(StorageError::UnknownPerson { person_id })?;
        person.group_id = group_id;
        Ok(())
    }

    async fn members_of(&self, group_id: u64) -> Result<Vec<Person>, QueryError> {
        let tables = self.read()?;
        let mut members: Vec<Person> = tables
            .persons
            .values()
            .filter(|p| p.group_id == Some(group_id))
            .cloned()
            .collect();
        members.sort_by_key(|p| p.id);
        Ok(members)
    }

    async fn person(&self, id: u64) -> Result<Option<Person>, QueryError> {
        Ok(self.read()?.persons.get(&id).cloned())
    }

    async fn group(&self, id: u64) -> Result<Option<Group>, QueryError> {
        Ok(self.read()?.groups.get(&id).cloned())
    }

    async fn counts(&self) -> Result<(u64, u64), QueryError> {
        let tables = self.read()?;
        Ok((tables.persons.len() as u64, tables.groups.len() as u64))
    }
}
