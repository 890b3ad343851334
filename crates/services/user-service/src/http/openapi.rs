//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::endpoint::{CreateRequest, UpdateRequest};
use domain::User;

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::create_user,
        super::handlers::list_users,
        super::handlers::get_user,
        super::handlers::update_user,
        super::handlers::delete_user,
    ),
    components(schemas(User, CreateRequest, UpdateRequest)),
    tags(
        (name = "Users", description = "User management endpoints"),
    )
)]
pub struct ApiDoc;
