//! User service - Handles user-related business logic.
//!
//! Stateless apart from the repository handle. Repository errors pass
//! through unchanged; the only classification added here is the
//! required-name check on creation.

use async_trait::async_trait;
use std::sync::Arc;

use common::{AppResult, RequestContext};
use domain::{Filters, User, UserPatch};

use crate::repository::UserRepository;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserService: Send + Sync {
    /// Create a new user; both names are required
    async fn create(
        &self,
        ctx: &RequestContext,
        first_name: String,
        last_name: String,
        email: Option<String>,
        phone: Option<String>,
    ) -> AppResult<User>;

    /// Get user by id
    async fn get(&self, ctx: &RequestContext, id: &str) -> AppResult<User>;

    /// One page of users matching `filters`
    async fn get_all(
        &self,
        ctx: &RequestContext,
        filters: &Filters,
        offset: u64,
        limit: u64,
    ) -> AppResult<Vec<User>>;

    /// Total users matching `filters`
    async fn count(&self, ctx: &RequestContext, filters: &Filters) -> AppResult<u64>;

    /// Apply a partial update
    async fn update(&self, ctx: &RequestContext, id: &str, patch: &UserPatch) -> AppResult<()>;

    /// Delete user by id
    async fn delete(&self, ctx: &RequestContext, id: &str) -> AppResult<()>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn create(
        &self,
        ctx: &RequestContext,
        first_name: String,
        last_name: String,
        email: Option<String>,
        phone: Option<String>,
    ) -> AppResult<User> {
        tracing::debug!("create user service");
        let user = User::new(first_name, last_name, email, phone)?;
        self.repo.create(ctx, user).await
    }

    async fn get(&self, ctx: &RequestContext, id: &str) -> AppResult<User> {
        tracing::debug!(user_id = %id, "get user service");
        self.repo.get(ctx, id).await
    }

    async fn get_all(
        &self,
        ctx: &RequestContext,
        filters: &Filters,
        offset: u64,
        limit: u64,
    ) -> AppResult<Vec<User>> {
        tracing::debug!(offset, limit, "get all users service");
        self.repo.get_all(ctx, filters, offset, limit).await
    }

    async fn count(&self, ctx: &RequestContext, filters: &Filters) -> AppResult<u64> {
        tracing::debug!("count users service");
        self.repo.count(ctx, filters).await
    }

    async fn update(&self, ctx: &RequestContext, id: &str, patch: &UserPatch) -> AppResult<()> {
        tracing::debug!(user_id = %id, "update user service");
        self.repo.update(ctx, id, patch).await
    }

    async fn delete(&self, ctx: &RequestContext, id: &str) -> AppResult<()> {
        tracing::debug!(user_id = %id, "delete user service");
        self.repo.delete(ctx, id).await
    }
}
