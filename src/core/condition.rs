//! Optional search filters over the joined person/group rows

use serde::{Deserialize, Serialize};

use crate::core::predicate::Predicate;

/// A bag of optional filters describing a search.
///
/// Every field is independently optional: an absent field contributes no
/// constraint at all. Present fields combine with logical AND. The fields
/// are `Option` rather than sentinel values so "absent" and
/// "present-but-empty" stay distinguishable at the type level; blank
/// strings are then folded into "absent" when predicates are built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchCondition {
    /// Substring-or-exact match on the person's display name
    pub name: Option<String>,

    /// Minimum age, inclusive
    pub min_age: Option<u32>,

    /// Maximum age, inclusive
    pub max_age: Option<u32>,

    /// Exact match on the group name; never matches a groupless person
    pub group_name: Option<String>,
}

impl SearchCondition {
    /// A condition with no filters: matches every row
    pub fn any() -> Self {
        Self::default()
    }

    /// Build the predicate fragments for the present filters.
    ///
    /// One fragment per present filter, in declaration order. Absent fields
    /// produce no fragment, and blank or whitespace-only string filters are
    /// treated identically to absent ones. An empty vector means "match
    /// every row". `min_age > max_age` is not rejected here: both fragments
    /// are emitted and the conjunction simply matches nothing.
    pub fn predicates(&self) -> Vec<Predicate> {
        let mut fragments = Vec::new();

        if let Some(name) = present(&self.name) {
            fragments.push(Predicate::NameContains(name.to_string()));
        }
        if let Some(min) = self.min_age {
            fragments.push(Predicate::MinAge(min));
        }
        if let Some(max) = self.max_age {
            fragments.push(Predicate::MaxAge(max));
        }
        if let Some(group) = present(&self.group_name) {
            fragments.push(Predicate::GroupNameEquals(group.to_string()));
        }

        fragments
    }

    /// Builder-style setters, mostly for tests and fixtures
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_min_age(mut self, min_age: u32) -> Self {
        self.min_age = Some(min_age);
        self
    }

    pub fn with_max_age(mut self, max_age: u32) -> Self {
        self.max_age = Some(max_age);
        self
    }

    pub fn with_group_name(mut self, group_name: impl Into<String>) -> Self {
        self.group_name = Some(group_name.into());
        self
    }
}

/// Trimmed view of a string filter, `None` when absent or blank
fn present(field: &Option<String>) -> Option<&str> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
}
