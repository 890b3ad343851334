//! User handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::IntoParams;

use common::{ApiResponse, AppResult, Created, MessageResponse};
use domain::User;

use super::extractors::JsonBody;
use super::state::AppState;
use crate::endpoint::{CreateRequest, DeleteRequest, GetAllRequest, GetRequest, UpdateRequest};

/// Query string accepted by the list endpoint.
///
/// `page` and `limit` are read as text; anything that is not an integer
/// counts as zero.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Case-insensitive substring of the first name
    pub first_name: Option<String>,
    /// Case-insensitive substring of the last name
    pub last_name: Option<String>,
    /// 1-based page number
    #[param(value_type = Option<i64>)]
    pub page: Option<String>,
    /// Page size; zero or missing uses the configured default
    #[param(value_type = Option<i64>)]
    pub limit: Option<String>,
}

impl From<ListQuery> for GetAllRequest {
    fn from(query: ListQuery) -> Self {
        Self {
            first_name: query.first_name.unwrap_or_default(),
            last_name: query.last_name.unwrap_or_default(),
            page: lenient_int(query.page.as_deref()),
            limit: lenient_int(query.limit.as_deref()),
        }
    }
}

fn lenient_int(value: Option<&str>) -> i64 {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(0)
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).patch(update_user).delete(delete_user))
}

/// Create a user
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = CreateRequest,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Missing first or last name, or malformed body"),
        (status = 409, description = "User already exists")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreateRequest>,
) -> AppResult<Created<User>> {
    let ctx = state.request_context();
    let user = state.endpoints.create(&ctx, req).await?;
    Ok(Created(user))
}

/// List users, newest first
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    params(ListQuery),
    responses(
        (status = 200, description = "One page of users with pagination metadata", body = Vec<User>),
        (status = 400, description = "Negative page or limit")
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ApiResponse<Vec<User>>>> {
    let ctx = state.request_context();
    let page = state.endpoints.get_all(&ctx, query.into()).await?;
    Ok(Json(ApiResponse::paginated(page.users, page.meta)))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<User>>> {
    let ctx = state.request_context();
    let user = state.endpoints.get(&ctx, GetRequest { id }).await?;
    Ok(Json(ApiResponse::success(user)))
}

/// Partially update a user
#[utoipa::path(
    patch,
    path = "/users/{id}",
    tag = "Users",
    request_body = UpdateRequest,
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User updated"),
        (status = 400, description = "Required name cleared, or malformed body"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(mut req): JsonBody<UpdateRequest>,
) -> AppResult<Json<ApiResponse<MessageResponse>>> {
    let ctx = state.request_context();
    req.id = id;
    state.endpoints.update(&ctx, req).await?;
    Ok(Json(ApiResponse::success(MessageResponse::new(
        "user updated successfully",
    ))))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<MessageResponse>>> {
    let ctx = state.request_context();
    state.endpoints.delete(&ctx, DeleteRequest { id }).await?;
    Ok(Json(ApiResponse::success(MessageResponse::new(
        "user deleted successfully",
    ))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_numeric_paging_counts_as_zero() {
        let req = GetAllRequest::from(ListQuery {
            page: Some("abc".to_string()),
            limit: Some("".to_string()),
            ..Default::default()
        });
        assert_eq!(req.page, 0);
        assert_eq!(req.limit, 0);
    }

    #[test]
    fn test_numeric_paging_is_kept() {
        let req = GetAllRequest::from(ListQuery {
            first_name: Some("jo".to_string()),
            page: Some("3".to_string()),
            limit: Some("-5".to_string()),
            ..Default::default()
        });
        assert_eq!(req.first_name, "jo");
        assert_eq!(req.page, 3);
        assert_eq!(req.limit, -5);
    }
}
