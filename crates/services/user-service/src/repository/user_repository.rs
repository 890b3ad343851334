//! User repository contract and its SeaORM implementation.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, Func, LikeExpr, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select, Set,
};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use common::{AppResult, RequestContext};
use domain::{DomainError, Filters, User, UserPatch};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Every call runs under the caller's [`RequestContext`]; a cancelled or
/// expired context fails the call with a storage error. Nothing is retried.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user, assigning an id when the caller left it empty
    async fn create(&self, ctx: &RequestContext, user: User) -> AppResult<User>;

    /// Find a user by id; `NotFound` when absent
    async fn get(&self, ctx: &RequestContext, id: &str) -> AppResult<User>;

    /// One page of matching users, newest first
    async fn get_all(
        &self,
        ctx: &RequestContext,
        filters: &Filters,
        offset: u64,
        limit: u64,
    ) -> AppResult<Vec<User>>;

    /// Number of matching users, ignoring pagination
    async fn count(&self, ctx: &RequestContext, filters: &Filters) -> AppResult<u64>;

    /// Apply the present fields of `patch`; `NotFound` when no row matches
    async fn update(&self, ctx: &RequestContext, id: &str, patch: &UserPatch) -> AppResult<()>;

    /// Remove a user; `NotFound` when absent
    async fn delete(&self, ctx: &RequestContext, id: &str) -> AppResult<()>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Narrow a query by the active filters. Shared by `get_all` and `count`.
pub(crate) fn apply_filters(mut query: Select<UserEntity>, filters: &Filters) -> Select<UserEntity> {
    if let Some(first_name) = filters.first_name() {
        query = query.filter(lower_contains(user::Column::FirstName, &first_name));
    }
    if let Some(last_name) = filters.last_name() {
        query = query.filter(lower_contains(user::Column::LastName, &last_name));
    }
    query
}

/// `lower(column) LIKE '%needle%'`, with LIKE wildcards in `needle` escaped
fn lower_contains(column: user::Column, needle: &str) -> SimpleExpr {
    let escaped = needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");

    Expr::expr(Func::lower(Expr::col(column)))
        .like(LikeExpr::new(format!("%{escaped}%")).escape('\\'))
}

#[async_trait]
impl UserRepository for UserStore {
    async fn create(&self, ctx: &RequestContext, mut user: User) -> AppResult<User> {
        if user.needs_id() {
            user.id = Uuid::new_v4().to_string();
        }

        let active_model = ActiveModel {
            id: Set(user.id),
            first_name: Set(user.first_name),
            last_name: Set(user.last_name),
            email: Set(user.email),
            phone: Set(user.phone),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        };

        let model = ctx.run("create", active_model.insert(&self.db)).await?;

        tracing::info!(user_id = %model.id, "User created");
        Ok(User::from(model))
    }

    async fn get(&self, ctx: &RequestContext, id: &str) -> AppResult<User> {
        let model = ctx
            .run("get", UserEntity::find_by_id(id).one(&self.db))
            .await?
            .ok_or_else(|| DomainError::user_not_found(id))?;

        Ok(User::from(model))
    }

    async fn get_all(
        &self,
        ctx: &RequestContext,
        filters: &Filters,
        offset: u64,
        limit: u64,
    ) -> AppResult<Vec<User>> {
        let query = apply_filters(UserEntity::find(), filters)
            .order_by_desc(user::Column::CreatedAt)
            .offset(offset)
            .limit(limit);

        let models = ctx.run("get_all", query.all(&self.db)).await?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn count(&self, ctx: &RequestContext, filters: &Filters) -> AppResult<u64> {
        let query = apply_filters(UserEntity::find(), filters);
        ctx.run("count", query.count(&self.db)).await
    }

    async fn update(&self, ctx: &RequestContext, id: &str, patch: &UserPatch) -> AppResult<()> {
        if patch.is_noop() {
            // Nothing to write, but an unknown id is still reported.
            let matches = ctx
                .run("update", UserEntity::find_by_id(id).count(&self.db))
                .await?;
            if matches == 0 {
                return Err(DomainError::user_not_found(id).into());
            }
            return Ok(());
        }

        let mut query = UserEntity::update_many().filter(user::Column::Id.eq(id));
        if let Some(first_name) = patch.first_name.as_change() {
            query = query.col_expr(user::Column::FirstName, Expr::value(first_name));
        }
        if let Some(last_name) = patch.last_name.as_change() {
            query = query.col_expr(user::Column::LastName, Expr::value(last_name));
        }
        if let Some(email) = patch.email.as_change() {
            query = query.col_expr(user::Column::Email, Expr::value(email));
        }
        if let Some(phone) = patch.phone.as_change() {
            query = query.col_expr(user::Column::Phone, Expr::value(phone));
        }
        query = query.col_expr(user::Column::UpdatedAt, Expr::value(Utc::now()));

        // Single statement: a cancelled update is never partially applied.
        let result = ctx.run("update", query.exec(&self.db)).await?;
        if result.rows_affected == 0 {
            return Err(DomainError::user_not_found(id).into());
        }

        tracing::info!(user_id = %id, "User updated");
        Ok(())
    }

    async fn delete(&self, ctx: &RequestContext, id: &str) -> AppResult<()> {
        let result = ctx
            .run("delete", UserEntity::delete_by_id(id).exec(&self.db))
            .await?;

        if result.rows_affected == 0 {
            return Err(DomainError::user_not_found(id).into());
        }

        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }
}
