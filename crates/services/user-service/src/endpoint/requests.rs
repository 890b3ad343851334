//! Typed request and response values, one per operation.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use common::PageMeta;
use domain::{Patch, User, UserPatch};

/// Closed set of operations the controller layer serves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Get,
    GetAll,
    Update,
    Delete,
}

/// User creation request
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CreateRequest {
    /// Given name (required)
    #[serde(default)]
    #[validate(length(min = 1, message = "first name is required"))]
    pub first_name: String,
    /// Family name (required)
    #[serde(default)]
    #[validate(length(min = 1, message = "last name is required"))]
    pub last_name: String,
    /// Contact email address
    #[serde(default)]
    pub email: Option<String>,
    /// Contact phone number
    #[serde(default)]
    pub phone: Option<String>,
}

/// Single user lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetRequest {
    pub id: String,
}

/// Filtered, paginated listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetAllRequest {
    pub first_name: String,
    pub last_name: String,
    /// Requested page (1-based); zero means the first page
    pub page: i64,
    /// Requested page size; zero means the configured default
    pub limit: i64,
}

/// Partial update; only present fields are written
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateRequest {
    #[serde(skip)]
    pub id: String,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub first_name: Patch,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub last_name: Patch,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub email: Patch,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub phone: Patch,
}

impl UpdateRequest {
    /// Field changes carried by this request
    pub fn patch(&self) -> UserPatch {
        UserPatch {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
        }
    }
}

/// Single user removal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRequest {
    pub id: String,
}

/// A request for any operation
#[derive(Debug, Clone)]
pub enum Request {
    Create(CreateRequest),
    Get(GetRequest),
    GetAll(GetAllRequest),
    Update(UpdateRequest),
    Delete(DeleteRequest),
}

impl Request {
    pub fn operation(&self) -> Operation {
        match self {
            Request::Create(_) => Operation::Create,
            Request::Get(_) => Operation::Get,
            Request::GetAll(_) => Operation::GetAll,
            Request::Update(_) => Operation::Update,
            Request::Delete(_) => Operation::Delete,
        }
    }
}

/// One page of users with its pagination metadata
#[derive(Debug, Clone, Serialize)]
pub struct UserPage {
    pub users: Vec<User>,
    pub meta: PageMeta,
}

/// Result of any operation
#[derive(Debug, Clone)]
pub enum Response {
    Created(User),
    Found(User),
    Listed(UserPage),
    Updated,
    Deleted,
}

impl Response {
    pub fn operation(&self) -> Operation {
        match self {
            Response::Created(_) => Operation::Create,
            Response::Found(_) => Operation::Get,
            Response::Listed(_) => Operation::GetAll,
            Response::Updated => Operation::Update,
            Response::Deleted => Operation::Delete,
        }
    }
}
