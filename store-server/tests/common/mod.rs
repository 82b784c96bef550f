//! Shared test setup: tempfile-backed SQLite with real migrations.

#![allow(dead_code)]

use axum::Router;
use sqlx::SqlitePool;
use tempfile::TempDir;

use store_server::auth::JwtConfig;
use store_server::core::{Config, ServerState};
use store_server::db::DbService;

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "correct horse battery staple";

fn test_config() -> Config {
    Config {
        data_dir: "./data".to_string(),
        http_port: 0,
        environment: "development".to_string(),
        frontend_origin: None,
        jwt: JwtConfig {
            secret: "integration-test-secret-32-characters!!".to_string(),
            access_minutes: 15,
            refresh_days: 7,
            issuer: "store-server".to_string(),
            audience: "store-admin".to_string(),
        },
        mail_webhook_url: None,
        admin_email: ADMIN_EMAIL.to_string(),
        admin_password: None,
        log_dir: None,
    }
}

/// Fresh database in a temp directory, migrations applied.
///
/// The TempDir must stay alive for the duration of the test.
pub async fn setup_pool() -> (TempDir, SqlitePool) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("test.db");
    let db = DbService::new(&db_path.to_string_lossy())
        .await
        .expect("Failed to initialize test database");
    (dir, db.pool)
}

/// Server state around a fresh database.
pub async fn setup_state() -> (TempDir, ServerState) {
    let (dir, pool) = setup_pool().await;
    (dir, ServerState::with_pool(test_config(), pool))
}

/// Fully wired application (routes + middleware) for oneshot requests.
pub fn app(state: &ServerState) -> Router {
    store_server::api::build_app(state).with_state(state.clone())
}

/// Create the admin account directly in the database.
pub async fn create_admin(pool: &SqlitePool) -> shared::models::User {
    let hash = store_server::auth::password::hash_password(ADMIN_PASSWORD)
        .expect("Failed to hash password");
    store_server::db::repository::user::create(pool, ADMIN_EMAIL, &hash)
        .await
        .expect("Failed to create admin user")
}
