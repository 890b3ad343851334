//! Common utilities shared by the service crates.
//!
//! This crate provides:
//! - Unified error classification and HTTP error mapping
//! - The response envelope and pagination metadata
//! - Per-request cancellation context
//! - Configuration structures

pub mod config;
pub mod context;
pub mod error;
pub mod pagination;
pub mod response;

pub use config::*;
pub use context::RequestContext;
pub use error::{AppError, AppResult, ErrorKind};
pub use pagination::PageMeta;
pub use response::{ApiResponse, Created, ErrorBody, MessageResponse, ResponseStatus};
