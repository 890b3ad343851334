//! HTTP transport over the controller layer.

mod extractors;
pub mod handlers;
mod health;
pub mod openapi;
mod state;

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use extractors::JsonBody;
pub use openapi::ApiDoc;
pub use state::AppState;

use handlers::user_routes;
use health::health_routes;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/users", user_routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
