//! Composable predicate fragments over joined person/group rows

use std::fmt;

use crate::core::entity::PersonGroupRow;

/// One independent boolean condition derived from a single search filter.
///
/// Fragments are only ever built for filters that are actually present: an
/// absent filter is structurally omitted rather than turned into an
/// always-true comparison. Backends translate fragments to their own query
/// capability; `matches` is the reference evaluation the in-memory backend
/// uses directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Name contains the given string (an exact value also matches)
    NameContains(String),

    /// Age is at least the given bound, inclusive
    MinAge(u32),

    /// Age is at most the given bound, inclusive
    MaxAge(u32),

    /// Group name equals the given string; rows without a group never match
    GroupNameEquals(String),
}

impl Predicate {
    /// Evaluate this fragment against a joined row
    pub fn matches(&self, row: &PersonGroupRow) -> bool {
        match self {
            Predicate::NameContains(name) => row.name.contains(name.as_str()),
            Predicate::MinAge(min) => row.age >= *min,
            Predicate::MaxAge(max) => row.age <= *max,
            Predicate::GroupNameEquals(group) => row.group_name.as_deref() == Some(group.as_str()),
        }
    }
}

/// True when the row satisfies every fragment.
///
/// Zero fragments means no constraint: every row matches.
pub fn matches_all(predicates: &[Predicate], row: &PersonGroupRow) -> bool {
    predicates.iter().all(|p| p.matches(row))
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::NameContains(name) => write!(f, "name~'{}'", name),
            Predicate::MinAge(min) => write!(f, "age>={}", min),
            Predicate::MaxAge(max) => write!(f, "age<={}", max),
            Predicate::GroupNameEquals(group) => write!(f, "group='{}'", group),
        }
    }
}
