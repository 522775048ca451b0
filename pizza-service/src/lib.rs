use std::time::Duration;

use axum::Router;
use diesel::{
    connection::SimpleConnection,
    r2d2::{self, ConnectionManager, CustomizeConnection},
    SqliteConnection,
};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod schema;
pub mod seed;
pub mod serializer;
pub mod service;

use handlers::AppState;
use service::ServiceError;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

pub type DbPool = r2d2::Pool<ConnectionManager<SqliteConnection>>;

/// Per-connection SQLite settings. Foreign keys are off by default in SQLite
/// and must be enabled on every connection for cascades to apply.
#[derive(Debug, Clone, Copy)]
struct ConnectionOptions {
    busy_timeout: Duration,
}

impl CustomizeConnection<SqliteConnection, r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), r2d2::Error> {
        conn.batch_execute(&format!(
            "PRAGMA foreign_keys = ON; PRAGMA busy_timeout = {};",
            self.busy_timeout.as_millis()
        ))
        .map_err(r2d2::Error::QueryError)
    }
}

pub fn build_pool(database_url: &str, max_size: u32) -> Result<DbPool, r2d2::PoolError> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    r2d2::Pool::builder()
        .max_size(max_size)
        .connection_customizer(Box::new(ConnectionOptions {
            busy_timeout: Duration::from_secs(5),
        }))
        .build(manager)
}

pub fn run_migrations(pool: &DbPool) -> Result<(), ServiceError> {
    let mut pooled = pool.get()?;
    let conn: &mut SqliteConnection = &mut pooled;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| ServiceError::Migration(e.to_string()))?;
    for version in applied {
        info!(%version, "applied migration");
    }
    Ok(())
}

pub fn app(pool: DbPool) -> Router {
    handlers::router()
        .with_state(AppState { pool })
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
