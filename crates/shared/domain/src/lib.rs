//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.

pub mod constants;
pub mod error;
pub mod filters;
pub mod patch;
pub mod user;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use filters::Filters;
pub use patch::{Patch, UserPatch};
pub use user::User;
