//! Transport-independent controllers.
//!
//! Each operation takes its typed request, validates what the service does
//! not, calls the [`UserService`] and returns a typed result. The HTTP layer
//! is one adapter over [`Endpoints::dispatch`] and the per-operation methods.

mod requests;

use std::sync::Arc;

use validator::Validate;

use common::{AppError, AppResult, PageMeta, RequestContext};
use domain::{Filters, User, FIELD_FIRST_NAME, FIELD_LAST_NAME};

use crate::service::UserService;

pub use requests::{
    CreateRequest, DeleteRequest, GetAllRequest, GetRequest, Operation, Request, Response,
    UpdateRequest, UserPage,
};

/// Controllers for every user operation, sharing one service handle.
#[derive(Clone)]
pub struct Endpoints {
    service: Arc<dyn UserService>,
    default_page_limit: u64,
}

impl Endpoints {
    pub fn new(service: Arc<dyn UserService>, default_page_limit: u64) -> Self {
        Self {
            service,
            default_page_limit,
        }
    }

    /// Route a request to its controller.
    pub async fn dispatch(&self, ctx: &RequestContext, request: Request) -> AppResult<Response> {
        let operation = request.operation();
        tracing::debug!(?operation, "dispatching request");

        match request {
            Request::Create(req) => self.create(ctx, req).await.map(Response::Created),
            Request::Get(req) => self.get(ctx, req).await.map(Response::Found),
            Request::GetAll(req) => self.get_all(ctx, req).await.map(Response::Listed),
            Request::Update(req) => self.update(ctx, req).await.map(|()| Response::Updated),
            Request::Delete(req) => self.delete(ctx, req).await.map(|()| Response::Deleted),
        }
    }

    pub async fn create(&self, ctx: &RequestContext, req: CreateRequest) -> AppResult<User> {
        req.validate()
            .map_err(|e| AppError::from_validation(&e, &[FIELD_FIRST_NAME, FIELD_LAST_NAME]))?;

        let user = self
            .service
            .create(ctx, req.first_name, req.last_name, req.email, req.phone)
            .await?;

        tracing::info!(user_id = %user.id, "create user request served");
        Ok(user)
    }

    pub async fn get(&self, ctx: &RequestContext, req: GetRequest) -> AppResult<User> {
        let user = self.service.get(ctx, &req.id).await?;

        tracing::info!(user_id = %user.id, "get user request served");
        Ok(user)
    }

    /// Count first so the page can be clamped, then fetch that page.
    ///
    /// The two reads are not a snapshot: rows written in between can make
    /// the page disagree with `total_count`.
    pub async fn get_all(&self, ctx: &RequestContext, req: GetAllRequest) -> AppResult<UserPage> {
        let filters = Filters::new(req.first_name, req.last_name);

        let total = self.service.count(ctx, &filters).await?;
        let meta = PageMeta::new(req.page, req.limit, total, self.default_page_limit)?;
        let users = self
            .service
            .get_all(ctx, &filters, meta.offset(), meta.limit())
            .await?;

        tracing::info!(
            page = meta.page,
            per_page = meta.per_page,
            total = meta.total_count,
            returned = users.len(),
            "get all users request served"
        );
        Ok(UserPage { users, meta })
    }

    pub async fn update(&self, ctx: &RequestContext, req: UpdateRequest) -> AppResult<()> {
        let patch = req.patch();
        patch.validate_required()?;

        self.service.update(ctx, &req.id, &patch).await?;

        tracing::info!(user_id = %req.id, "update user request served");
        Ok(())
    }

    pub async fn delete(&self, ctx: &RequestContext, req: DeleteRequest) -> AppResult<()> {
        self.service.delete(ctx, &req.id).await?;

        tracing::info!(user_id = %req.id, "delete user request served");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use common::ErrorKind;
    use domain::Patch;

    use crate::repository::MockUserRepository;
    use crate::service::{MockUserService, UserManager};

    fn user(id: &str) -> User {
        User {
            id: id.to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            email: None,
            phone: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    /// Real service over a repository that must never be reached.
    fn endpoints_with_untouched_repo() -> Endpoints {
        let mut repo = MockUserRepository::new();
        repo.expect_create().never();
        repo.expect_update().never();
        repo.expect_count().never();
        repo.expect_get_all().never();
        Endpoints::new(Arc::new(UserManager::new(Arc::new(repo))), 10)
    }

    #[tokio::test]
    async fn test_create_with_both_names_empty_reports_first_name() {
        let endpoints = endpoints_with_untouched_repo();
        let err = endpoints
            .create(&RequestContext::new(), CreateRequest::default())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.to_string(), "first name is required");
    }

    #[tokio::test]
    async fn test_create_without_last_name() {
        let endpoints = endpoints_with_untouched_repo();
        let req = CreateRequest {
            first_name: "Ada".to_string(),
            ..Default::default()
        };

        let err = endpoints.create(&RequestContext::new(), req).await.unwrap_err();
        assert_eq!(err.to_string(), "last name is required");
    }

    #[tokio::test]
    async fn test_update_with_empty_first_name_never_reaches_repository() {
        let endpoints = endpoints_with_untouched_repo();
        let req = UpdateRequest {
            id: "abc".to_string(),
            first_name: Patch::Empty,
            ..Default::default()
        };

        let err = endpoints.update(&RequestContext::new(), req).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.to_string(), "first name is required");
    }

    #[tokio::test]
    async fn test_get_all_negative_page_is_rejected_after_count() {
        let mut service = MockUserService::new();
        service.expect_count().times(1).returning(|_, _| Ok(5));
        service.expect_get_all().never();

        let endpoints = Endpoints::new(Arc::new(service), 10);
        let req = GetAllRequest {
            page: -1,
            ..Default::default()
        };

        let err = endpoints.get_all(&RequestContext::new(), req).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_get_all_uses_count_to_derive_window() {
        let mut service = MockUserService::new();
        service.expect_count().times(1).returning(|_, _| Ok(23));
        service
            .expect_get_all()
            .withf(|_, filters, offset, limit| {
                filters.first_name().as_deref() == Some("jo") && *offset == 20 && *limit == 10
            })
            .times(1)
            .returning(|_, _, _, _| Ok(vec![user("a"), user("b"), user("c")]));

        let endpoints = Endpoints::new(Arc::new(service), 10);
        let req = GetAllRequest {
            first_name: "Jo".to_string(),
            page: 3,
            ..Default::default()
        };

        let page = endpoints.get_all(&RequestContext::new(), req).await.unwrap();
        assert_eq!(page.users.len(), 3);
        assert_eq!(page.meta.total_count, 23);
        assert_eq!(page.meta.page, 3);
        assert_eq!(page.meta.page_count, 3);
    }

    #[tokio::test]
    async fn test_get_all_page_past_end_is_clamped() {
        let mut service = MockUserService::new();
        service.expect_count().returning(|_, _| Ok(4));
        service
            .expect_get_all()
            .withf(|_, _, offset, limit| *offset == 2 && *limit == 2)
            .returning(|_, _, _, _| Ok(vec![user("a"), user("b")]));

        let endpoints = Endpoints::new(Arc::new(service), 10);
        let req = GetAllRequest {
            page: 99,
            limit: 2,
            ..Default::default()
        };

        let page = endpoints.get_all(&RequestContext::new(), req).await.unwrap();
        assert_eq!(page.meta.page, 2);
    }

    #[tokio::test]
    async fn test_dispatch_routes_by_operation() {
        let mut service = MockUserService::new();
        service
            .expect_get()
            .withf(|_, id| id == "abc")
            .returning(|_, id| Ok(user(id)));
        service
            .expect_delete()
            .withf(|_, id| id == "abc")
            .returning(|_, _| Ok(()));

        let endpoints = Endpoints::new(Arc::new(service), 10);
        let ctx = RequestContext::new();

        let found = endpoints
            .dispatch(&ctx, Request::Get(GetRequest { id: "abc".into() }))
            .await
            .unwrap();
        assert_eq!(found.operation(), Operation::Get);
        assert!(matches!(found, Response::Found(u) if u.id == "abc"));

        let deleted = endpoints
            .dispatch(&ctx, Request::Delete(DeleteRequest { id: "abc".into() }))
            .await
            .unwrap();
        assert!(matches!(deleted, Response::Deleted));
    }

    #[tokio::test]
    async fn test_get_not_found_passes_through() {
        let mut service = MockUserService::new();
        service
            .expect_get()
            .returning(|_, id| Err(AppError::NotFound(format!("user '{id}' doesn't exist"))));

        let endpoints = Endpoints::new(Arc::new(service), 10);
        let err = endpoints
            .get(&RequestContext::new(), GetRequest { id: "x".into() })
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "user 'x' doesn't exist");
    }
}
