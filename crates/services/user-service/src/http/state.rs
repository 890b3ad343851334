//! Application state shared across handlers.

use std::time::Duration;

use common::RequestContext;

use crate::endpoint::Endpoints;
use crate::infra::Database;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub endpoints: Endpoints,
    /// Absent when serving from the in-memory store
    pub database: Option<Database>,
    request_timeout: Duration,
}

impl AppState {
    pub fn new(endpoints: Endpoints, database: Option<Database>, request_timeout: Duration) -> Self {
        Self {
            endpoints,
            database,
            request_timeout,
        }
    }

    /// Fresh context for one inbound request, bounded by the configured timeout.
    pub fn request_context(&self) -> RequestContext {
        RequestContext::with_timeout(self.request_timeout)
    }
}
