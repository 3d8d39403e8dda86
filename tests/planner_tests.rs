//! Behavioral tests for the two page planners.
//!
//! A counting wrapper around the datastore records how many fetch and count
//! queries each strategy actually issues, so count elision is verified
//! against the collaborator rather than inferred from totals.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use roster::core::entity::{Group, Person, PersonGroupRow};
use roster::core::error::{QueryError, StorageError};
use roster::core::page::{PageRequest, SortSpec};
use roster::core::predicate::Predicate;
use roster::core::service::Datastore;
use roster::core::SearchCondition;
use roster::query::{ComplexPlanner, PagePlanner, SearchExecutor, SimplePlanner};
use roster::storage::InMemoryDatastore;

/// Datastore wrapper that counts the queries passing through it
struct CountingDatastore {
    inner: InMemoryDatastore,
    fetch_calls: AtomicUsize,
    count_calls: AtomicUsize,
}

impl CountingDatastore {
    fn new(inner: InMemoryDatastore) -> Self {
        Self {
            inner,
            fetch_calls: AtomicUsize::new(0),
            count_calls: AtomicUsize::new(0),
        }
    }

    fn fetches(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    fn count_queries(&self) -> usize {
        self.count_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Datastore for CountingDatastore {
    async fn fetch_joined(
        &self,
        predicates: &[Predicate],
        sort: Option<SortSpec>,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<PersonGroupRow>, QueryError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch_joined(predicates, sort, offset, limit).await
    }

    async fn count(&self, predicates: &[Predicate]) -> Result<u64, QueryError> {
        self.count_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.count(predicates).await
    }

    async fn insert_group(&self, group: Group) -> Result<(), StorageError> {
        self.inner.insert_group(group).await
    }

    async fn insert_person(&self, person: Person) -> Result<(), StorageError> {
        self.inner.insert_person(person).await
    }

    async fn assign_group(
        &self,
        person_id: u64,
        group_id: Option<u64>,
    ) -> Result<(), StorageError> {
        self.inner.assign_group(person_id, group_id).await
    }

    async fn members_of(&self, group_id: u64) -> Result<Vec<Person>, QueryError> {
        self.inner.members_of(group_id).await
    }

    async fn person(&self, id: u64) -> Result<Option<Person>, QueryError> {
        self.inner.person(id).await
    }

    async fn group(&self, id: u64) -> Result<Option<Group>, QueryError> {
        self.inner.group(id).await
    }

    async fn counts(&self) -> Result<(u64, u64), QueryError> {
        self.inner.counts().await
    }
}

/// Datastore whose count query always fails while fetches succeed
struct CountFailsDatastore {
    inner: InMemoryDatastore,
}

#[async_trait]
impl Datastore for CountFailsDatastore {
    async fn fetch_joined(
        &self,
        predicates: &[Predicate],
        sort: Option<SortSpec>,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<PersonGroupRow>, QueryError> {
        self.inner.fetch_joined(predicates, sort, offset, limit).await
    }

    async fn count(&self, _predicates: &[Predicate]) -> Result<u64, QueryError> {
        Err(QueryError::Execution {
            message: "count backend down".to_string(),
        })
    }

    async fn insert_group(&self, group: Group) -> Result<(), StorageError> {
        self.inner.insert_group(group).await
    }

    async fn insert_person(&self, person: Person) -> Result<(), StorageError> {
        self.inner.insert_person(person).await
    }

    async fn assign_group(
        &self,
        person_id: u64,
        group_id: Option<u64>,
    ) -> Result<(), StorageError> {
        self.inner.assign_group(person_id, group_id).await
    }

    async fn members_of(&self, group_id: u64) -> Result<Vec<Person>, QueryError> {
        self.inner.members_of(group_id).await
    }

    async fn person(&self, id: u64) -> Result<Option<Person>, QueryError> {
        self.inner.person(id).await
    }

    async fn group(&self, id: u64) -> Result<Option<Group>, QueryError> {
        self.inner.group(id).await
    }

    async fn counts(&self) -> Result<(u64, u64), QueryError> {
        self.inner.counts().await
    }
}

/// Two groups, members aged 10/20 in groupA and 30/40 in groupB
async fn two_group_store() -> InMemoryDatastore {
    let store = InMemoryDatastore::new();
    store.insert_group(Group::new(1, "groupA")).await.unwrap();
    store.insert_group(Group::new(2, "groupB")).await.unwrap();
    store
        .insert_person(Person::with_group(1, "person1", 10, 1))
        .await
        .unwrap();
    store
        .insert_person(Person::with_group(2, "person2", 20, 1))
        .await
        .unwrap();
    store
        .insert_person(Person::with_group(3, "person3", 30, 2))
        .await
        .unwrap();
    store
        .insert_person(Person::with_group(4, "person4", 40, 2))
        .await
        .unwrap();
    store
}

/// `total` persons, ids 1..=total, ages equal to their id
async fn ramp_store(total: u64) -> InMemoryDatastore {
    let store = InMemoryDatastore::new();
    store.insert_group(Group::new(1, "groupA")).await.unwrap();
    for id in 1..=total {
        store
            .insert_person(Person::with_group(id, format!("person{}", id), id as u32, 1))
            .await
            .unwrap();
    }
    store
}

fn planners(store: Arc<dyn Datastore>) -> (SimplePlanner, ComplexPlanner) {
    let executor = SearchExecutor::new(store);
    (
        SimplePlanner::new(executor.clone()),
        ComplexPlanner::new(executor),
    )
}

#[tokio::test]
async fn complex_elides_count_on_short_first_page() {
    let store = Arc::new(CountingDatastore::new(two_group_store().await));
    let (_, complex) = planners(store.clone());

    let condition = SearchCondition::any().with_min_age(15);
    let request = PageRequest::new(0, 10).unwrap();
    let page = complex.search_page(&condition, &request).await.unwrap();

    let ages: Vec<u32> = page.content.iter().map(|r| r.age).collect();
    assert_eq!(ages, vec![20, 30, 40]);
    assert_eq!(page.page.total_elements, 3);
    assert!(page.page.last);
    assert_eq!(store.fetches(), 1);
    assert_eq!(store.count_queries(), 0);
}

#[tokio::test]
async fn age_band_across_groups_elides_count() {
    // groupA members aged 10 and 20, groupB members aged 30 and 40;
    // min_age 15 with max_age 35 leaves exactly ages 20 and 30
    let store = Arc::new(CountingDatastore::new(two_group_store().await));
    let (_, complex) = planners(store.clone());

    let condition = SearchCondition::any().with_min_age(15).with_max_age(35);
    let request = PageRequest::new(0, 10).unwrap();
    let page = complex.search_page(&condition, &request).await.unwrap();

    let ages: Vec<u32> = page.content.iter().map(|r| r.age).collect();
    assert_eq!(ages, vec![20, 30]);
    assert_eq!(page.page.total_elements, 2);
    assert_eq!(store.count_queries(), 0, "2 < 10, the count must be elided");
}

#[tokio::test]
async fn simple_always_issues_exactly_one_count() {
    let store = Arc::new(CountingDatastore::new(two_group_store().await));
    let (simple, _) = planners(store.clone());

    let condition = SearchCondition::any().with_min_age(15);
    let request = PageRequest::new(0, 10).unwrap();
    let page = simple.search_page(&condition, &request).await.unwrap();

    assert_eq!(page.page.total_elements, 3);
    assert_eq!(store.fetches(), 1);
    assert_eq!(store.count_queries(), 1, "the simple strategy always counts");
}

#[tokio::test]
async fn complex_counts_on_full_pages_and_elides_on_the_last() {
    let store = Arc::new(CountingDatastore::new(ramp_store(25).await));
    let (_, complex) = planners(store.clone());
    let condition = SearchCondition::any();

    // pages 0 and 1 come back full: ambiguous, so a real count runs
    for index in [0, 1] {
        let request = PageRequest::new(index, 10).unwrap();
        let before = store.count_queries();
        let page = complex.search_page(&condition, &request).await.unwrap();

        assert_eq!(page.content.len(), 10);
        assert_eq!(page.page.total_elements, 25);
        assert_eq!(store.count_queries(), before + 1, "full page needs a count");
    }

    // page 2 holds 5 of 10: the short page proves the total
    let request = PageRequest::new(2, 10).unwrap();
    let before = store.count_queries();
    let page = complex.search_page(&condition, &request).await.unwrap();

    assert_eq!(page.content.len(), 5);
    assert_eq!(page.page.total_elements, 25);
    assert!(page.page.last);
    assert_eq!(store.count_queries(), before, "short final page elides the count");
}

#[tokio::test]
async fn complex_inferred_total_is_offset_plus_fetched() {
    let store = Arc::new(CountingDatastore::new(ramp_store(17).await));
    let (_, complex) = planners(store.clone());

    let request = PageRequest::new(3, 5).unwrap();
    let page = complex
        .search_page(&SearchCondition::any(), &request)
        .await
        .unwrap();

    assert_eq!(page.content.len(), 2);
    assert_eq!(page.page.total_elements, 3 * 5 + 2);
    assert_eq!(store.count_queries(), 0);
}

#[tokio::test]
async fn complex_does_not_infer_from_an_empty_overshoot_page() {
    // an empty page past the end proves nothing about the total, so the
    // planner must fall back to a real count instead of reporting offset+0
    let store = Arc::new(CountingDatastore::new(ramp_store(25).await));
    let (_, complex) = planners(store.clone());

    let request = PageRequest::new(5, 10).unwrap();
    let page = complex
        .search_page(&SearchCondition::any(), &request)
        .await
        .unwrap();

    assert!(page.content.is_empty());
    assert_eq!(page.page.total_elements, 25);
    assert_eq!(store.count_queries(), 1);
}

#[tokio::test]
async fn no_matches_is_an_empty_page_not_an_error() {
    let store: Arc<dyn Datastore> = Arc::new(two_group_store().await);
    let (simple, complex) = planners(store);
    let request = PageRequest::new(0, 10).unwrap();

    for planner in [&simple as &dyn PagePlanner, &complex] {
        let condition = SearchCondition::any().with_min_age(100);
        let page = planner.search_page(&condition, &request).await.unwrap();
        assert!(page.content.is_empty());
        assert_eq!(page.page.total_elements, 0);
        assert!(page.page.last);
    }
}

#[tokio::test]
async fn contradictory_bounds_yield_an_empty_page() {
    let store: Arc<dyn Datastore> = Arc::new(two_group_store().await);
    let (_, complex) = planners(store);

    let condition = SearchCondition::any().with_min_age(50).with_max_age(10);
    let request = PageRequest::new(0, 10).unwrap();
    let page = complex.search_page(&condition, &request).await.unwrap();

    assert!(page.content.is_empty());
    assert_eq!(page.page.total_elements, 0);
}

#[tokio::test]
async fn fetch_never_exceeds_page_size() {
    let store: Arc<dyn Datastore> = Arc::new(ramp_store(25).await);
    let executor = SearchExecutor::new(store);

    for (index, size) in [(0i64, 1i64), (0, 7), (1, 10), (2, 10), (0, 100)] {
        let request = PageRequest::new(index, size).unwrap();
        let rows = executor
            .fetch_page(&SearchCondition::any(), &request)
            .await
            .unwrap();
        assert!(rows.len() <= size as usize);
    }
}

#[tokio::test]
async fn strategies_agree_on_totals_for_every_page_shape() {
    let store: Arc<dyn Datastore> = Arc::new(ramp_store(25).await);
    let (simple, complex) = planners(store);

    let conditions = [
        SearchCondition::any(),
        SearchCondition::any().with_min_age(8),
        SearchCondition::any().with_min_age(8).with_max_age(19),
        SearchCondition::any().with_name("person1"),
        SearchCondition::any().with_group_name("groupA"),
        SearchCondition::any().with_min_age(100),
    ];

    for condition in &conditions {
        for size in [1i64, 3, 10, 30] {
            for index in 0..5i64 {
                let request = PageRequest::new(index, size).unwrap();
                let a = simple.search_page(condition, &request).await.unwrap();
                let b = complex.search_page(condition, &request).await.unwrap();

                assert_eq!(
                    a.page.total_elements, b.page.total_elements,
                    "totals diverged for {:?} index={} size={}",
                    condition, index, size
                );
                assert_eq!(a.content, b.content);
                assert_eq!(a.page.last, b.page.last);
            }
        }
    }
}

#[tokio::test]
async fn simple_fails_whole_request_when_count_fails() {
    let store: Arc<dyn Datastore> = Arc::new(CountFailsDatastore {
        inner: two_group_store().await,
    });
    let (simple, _) = planners(store);

    let request = PageRequest::new(0, 10).unwrap();
    let result = simple.search_page(&SearchCondition::any(), &request).await;

    // the fetch succeeded, but a page is never returned with a missing total
    assert!(matches!(result, Err(QueryError::Execution { .. })));
}

#[tokio::test]
async fn complex_survives_count_failure_when_elision_applies() {
    let store: Arc<dyn Datastore> = Arc::new(CountFailsDatastore {
        inner: two_group_store().await,
    });
    let (_, complex) = planners(store);

    // 4 rows < size 10 on page 0: no count query runs, so the broken count
    // backend is never touched
    let request = PageRequest::new(0, 10).unwrap();
    let page = complex
        .search_page(&SearchCondition::any(), &request)
        .await
        .unwrap();
    assert_eq!(page.page.total_elements, 4);
}
