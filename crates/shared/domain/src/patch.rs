//! Partial update values.
//!
//! A field of an update request is either absent (leave unchanged), present
//! but empty, or present with a value. JSON `null` counts as absent.

use serde::{Deserialize, Deserializer};

use crate::error::{DomainError, DomainResult};

/// Three-state field of a partial update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Patch {
    /// Field not supplied by the client, or supplied as `null`
    #[default]
    Absent,
    /// Field supplied as `""`
    Empty,
    /// Field supplied with a non-empty value
    Value(String),
}

impl Patch {
    pub fn is_absent(&self) -> bool {
        matches!(self, Patch::Absent)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Patch::Empty)
    }

    /// The new column value, if the field is present at all.
    pub fn as_change(&self) -> Option<&str> {
        match self {
            Patch::Absent => None,
            Patch::Empty => Some(""),
            Patch::Value(value) => Some(value),
        }
    }
}

impl From<Option<String>> for Patch {
    fn from(value: Option<String>) -> Self {
        match value {
            None => Patch::Absent,
            Some(value) if value.is_empty() => Patch::Empty,
            Some(value) => Patch::Value(value),
        }
    }
}

impl From<&str> for Patch {
    fn from(value: &str) -> Self {
        Patch::from(Some(value.to_string()))
    }
}

// Missing fields never reach this impl; `#[serde(default)]` yields `Absent`.
impl<'de> Deserialize<'de> for Patch {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer).map(Patch::from)
    }
}

/// Set of field changes for one user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub first_name: Patch,
    pub last_name: Patch,
    pub email: Patch,
    pub phone: Patch,
}

impl UserPatch {
    /// True when no field is present
    pub fn is_noop(&self) -> bool {
        self.first_name.is_absent()
            && self.last_name.is_absent()
            && self.email.is_absent()
            && self.phone.is_absent()
    }

    /// Required fields may be omitted but never cleared.
    pub fn validate_required(&self) -> DomainResult<()> {
        if self.first_name.is_empty() {
            return Err(DomainError::FirstNameRequired);
        }
        if self.last_name.is_empty() {
            return Err(DomainError::LastNameRequired);
        }
        Ok(())
    }
}
