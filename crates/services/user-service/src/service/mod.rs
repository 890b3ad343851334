//! Service layer - business rules over the repository.

mod user_service;

pub use user_service::{UserManager, UserService};

#[cfg(any(test, feature = "test-utils"))]
pub use user_service::MockUserService;
