//! List filters shared by the count and list queries.

use crate::user::User;

/// Case-insensitive substring filters. An empty value disables the filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    first_name: String,
    last_name: String,
}

impl Filters {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Active first name filter, lowercased
    pub fn first_name(&self) -> Option<String> {
        active(&self.first_name)
    }

    /// Active last name filter, lowercased
    pub fn last_name(&self) -> Option<String> {
        active(&self.last_name)
    }

    pub fn is_empty(&self) -> bool {
        self.first_name.is_empty() && self.last_name.is_empty()
    }

    /// In-process form of the predicate the SQL store builds from the same filters.
    pub fn matches(&self, user: &User) -> bool {
        contains(&user.first_name, self.first_name())
            && contains(&user.last_name, self.last_name())
    }
}

fn active(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_lowercase())
}

fn contains(haystack: &str, needle: Option<String>) -> bool {
    match needle {
        Some(needle) => haystack.to_lowercase().contains(&needle),
        None => true,
    }
}
