//! In-memory implementation of UserRepository (for development/testing).

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use common::{AppError, AppResult, RequestContext};
use domain::{DomainError, Filters, User, UserPatch};

use super::UserRepository;

/// Users kept in insertion order behind a shared lock.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserStore {
    users: Arc<RwLock<Vec<User>>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Matching users, newest first; equal timestamps keep the later insert first.
    async fn matching(&self, filters: &Filters) -> Vec<User> {
        let users = self.users.read().await;
        let mut result: Vec<User> = users
            .iter()
            .rev()
            .filter(|u| filters.matches(u))
            .cloned()
            .collect();

        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        result
    }
}

#[async_trait]
impl UserRepository for InMemoryUserStore {
    async fn create(&self, ctx: &RequestContext, mut user: User) -> AppResult<User> {
        if user.needs_id() {
            user.id = Uuid::new_v4().to_string();
        }

        ctx.run("create", async {
            let mut users = self.users.write().await;
            if users.iter().any(|u| u.id == user.id) {
                return Err(AppError::conflict("User"));
            }
            users.push(user.clone());
            Ok(())
        })
        .await?;

        tracing::info!(user_id = %user.id, "User created");
        Ok(user)
    }

    async fn get(&self, ctx: &RequestContext, id: &str) -> AppResult<User> {
        let found = ctx
            .run("get", async {
                let users = self.users.read().await;
                Ok::<_, AppError>(users.iter().find(|u| u.id == id).cloned())
            })
            .await?;

        found.ok_or_else(|| DomainError::user_not_found(id).into())
    }

    async fn get_all(
        &self,
        ctx: &RequestContext,
        filters: &Filters,
        offset: u64,
        limit: u64,
    ) -> AppResult<Vec<User>> {
        let users = ctx
            .run("get_all", async { Ok::<_, AppError>(self.matching(filters).await) })
            .await?;

        Ok(users
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count(&self, ctx: &RequestContext, filters: &Filters) -> AppResult<u64> {
        ctx.run("count", async {
            Ok::<_, AppError>(self.matching(filters).await.len() as u64)
        })
        .await
    }

    async fn update(&self, ctx: &RequestContext, id: &str, patch: &UserPatch) -> AppResult<()> {
        ctx.run("update", async {
            let mut users = self.users.write().await;
            let Some(user) = users.iter_mut().find(|u| u.id == id) else {
                return Err(AppError::from(DomainError::user_not_found(id)));
            };
            if user.apply(patch) {
                tracing::info!(user_id = %id, "User updated");
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, ctx: &RequestContext, id: &str) -> AppResult<()> {
        ctx.run("delete", async {
            let mut users = self.users.write().await;
            let before = users.len();
            users.retain(|u| u.id != id);
            if users.len() == before {
                return Err(AppError::from(DomainError::user_not_found(id)));
            }
            Ok(())
        })
        .await?;

        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }
}
