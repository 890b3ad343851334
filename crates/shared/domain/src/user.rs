//! User domain entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::patch::UserPatch;

/// User domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct User {
    /// Unique user identifier (assigned by the store when empty)
    pub id: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Contact email address; `null` when never set
    #[serde(default)]
    pub email: Option<String>,
    /// Contact phone number; `null` when never set
    #[serde(default)]
    pub phone: Option<String>,
    /// Creation timestamp, default list ordering key
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Build a not-yet-persisted user, enforcing the required name fields.
    ///
    /// The id is left empty so the store assigns one on insert.
    pub fn new(
        first_name: String,
        last_name: String,
        email: Option<String>,
        phone: Option<String>,
    ) -> DomainResult<Self> {
        if first_name.is_empty() {
            return Err(DomainError::FirstNameRequired);
        }
        if last_name.is_empty() {
            return Err(DomainError::LastNameRequired);
        }

        let now = Utc::now();
        Ok(Self {
            id: String::new(),
            first_name,
            last_name,
            email,
            phone,
            created_at: now,
            updated_at: now,
        })
    }

    /// Whether the store still has to assign an id
    pub fn needs_id(&self) -> bool {
        self.id.is_empty()
    }

    /// Apply the present fields of a patch.
    ///
    /// Returns `false` and leaves the user untouched when every field is absent.
    pub fn apply(&mut self, patch: &UserPatch) -> bool {
        if patch.is_noop() {
            return false;
        }

        if let Some(first_name) = patch.first_name.as_change() {
            self.first_name = first_name.to_string();
        }
        if let Some(last_name) = patch.last_name.as_change() {
            self.last_name = last_name.to_string();
        }
        if let Some(email) = patch.email.as_change() {
            self.email = Some(email.to_string());
        }
        if let Some(phone) = patch.phone.as_change() {
            self.phone = Some(phone.to_string());
        }
        self.updated_at = Utc::now();

        true
    }
}
