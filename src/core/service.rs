//! Datastore trait: the persisted-dataset access boundary

use async_trait::async_trait;

use crate::core::entity::{Group, Person, PersonGroupRow};
use crate::core::error::{QueryError, StorageError};
use crate::core::page::SortSpec;
use crate::core::predicate::Predicate;

/// Access to the persisted person/group dataset.
///
/// Implementations must support the left join from person to group,
/// conjunctive filtering by predicate fragments, offset/limit paging, and
/// count-only execution, all safe under concurrent readers. The search core
/// is strictly read-only over this trait; the write surface below exists
/// for the fixture loader and for tests.
///
/// Query timeouts and retry policy belong to the implementation, not to the
/// callers in the query layer.
#[async_trait]
pub trait Datastore: Send + Sync {
    /// Fetch one page of joined rows.
    ///
    /// Left-join semantics: a person without a group still produces a row,
    /// with the group fields absent. Rows are filtered by the conjunction
    /// of `predicates` (an empty slice matches everything), ordered by
    /// `sort` (person id ascending when `None`), and windowed by
    /// `offset`/`limit`.
    async fn fetch_joined(
        &self,
        predicates: &[Predicate],
        sort: Option<SortSpec>,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<PersonGroupRow>, QueryError>;

    /// Count all rows matching the conjunction of `predicates`, without
    /// paging. The person→group reference is many-to-one, so the join can
    /// never duplicate a person and this count is exact for the joined
    /// result set as well.
    async fn count(&self, predicates: &[Predicate]) -> Result<u64, QueryError>;

    /// Insert or replace a group
    async fn insert_group(&self, group: Group) -> Result<(), StorageError>;

    /// Insert or replace a person. Fails when the person references a group
    /// id that has not been inserted.
    async fn insert_person(&self, person: Person) -> Result<(), StorageError>;

    /// Reassign a person's group reference (or clear it with `None`).
    /// Because the reference is the single source of truth, this is the
    /// whole reassignment: there is no second collection to update.
    async fn assign_group(&self, person_id: u64, group_id: Option<u64>)
    -> Result<(), StorageError>;

    /// Derived membership view: every person currently referencing the
    /// group, in stable id order.
    async fn members_of(&self, group_id: u64) -> Result<Vec<Person>, QueryError>;

    /// Look up a single person
    async fn person(&self, id: u64) -> Result<Option<Person>, QueryError>;

    /// Look up a single group
    async fn group(&self, id: u64) -> Result<Option<Group>, QueryError>;

    /// Number of persons and groups currently stored
    async fn counts(&self) -> Result<(u64, u64), QueryError>;
}
