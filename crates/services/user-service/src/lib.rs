//! User Service Library
//!
//! User CRUD over HTTP: repository, service and controller layers wired
//! behind an axum router. Storage is PostgreSQL via SeaORM, or an
//! in-memory store for development.

pub mod config;
pub mod endpoint;
pub mod http;
pub mod infra;
pub mod repository;
pub mod service;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tracing::info;

use crate::config::UserServiceConfig;
use crate::endpoint::Endpoints;
use crate::http::{create_router, AppState};
use crate::infra::Database;
use crate::repository::{InMemoryUserStore, UserRepository, UserStore};
use crate::service::UserManager;

/// Where user records live while serving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

/// Wire repository, service, controllers and router over `repo`.
pub fn build_app(
    repo: Arc<dyn UserRepository>,
    database: Option<Database>,
    config: &UserServiceConfig,
) -> Router {
    let service = Arc::new(UserManager::new(repo));
    let endpoints = Endpoints::new(service, config.default_page_limit);
    let state = AppState::new(endpoints, database, config.server.request_timeout());

    create_router(state)
}

/// Run the HTTP server with the given configuration.
pub async fn run_server(
    config: UserServiceConfig,
    backend: StorageBackend,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = match backend {
        StorageBackend::Postgres => {
            let db = Database::connect(&config.database).await?;
            let repo = Arc::new(UserStore::new(db.get_connection()));
            build_app(repo, Some(db), &config)
        }
        StorageBackend::Memory => {
            info!("Serving from the in-memory store; data is lost on exit");
            build_app(Arc::new(InMemoryUserStore::new()), None, &config)
        }
    };

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("User service listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("User service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(
    config: &UserServiceConfig,
    action: MigrateAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}
