//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// User Fields
// =============================================================================

/// Wire and column name of the first name field
pub const FIELD_FIRST_NAME: &str = "first_name";

/// Wire and column name of the last name field
pub const FIELD_LAST_NAME: &str = "last_name";

/// Wire and column name of the email field
pub const FIELD_EMAIL: &str = "email";

/// Wire and column name of the phone field
pub const FIELD_PHONE: &str = "phone";

// =============================================================================
// Validation
// =============================================================================

/// Message returned when a first name is missing or empty
pub const FIRST_NAME_REQUIRED: &str = "first name is required";

/// Message returned when a last name is missing or empty
pub const LAST_NAME_REQUIRED: &str = "last name is required";
