use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::db::repository;
use crate::services::Mailer;

/// Server state — shared handles for every request handler
///
/// Cloning is cheap (pool and JWT service are reference-counted).
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// SQLite connection pool
    pub pool: SqlitePool,
    /// JWT token service
    pub jwt_service: Arc<JwtService>,
    /// Fire-and-forget mail sender
    pub mailer: Mailer,
}

impl ServerState {
    /// Initialize the server state:
    /// 1. ensure the data directory exists
    /// 2. open the database and run migrations
    /// 3. build the JWT service and mailer
    /// 4. bootstrap the admin account if configured and missing
    ///
    /// # Panics
    ///
    /// Panics when the database cannot be initialized.
    pub async fn initialize(config: &Config) -> Self {
        std::fs::create_dir_all(&config.data_dir).expect("Failed to create data directory");

        let db_path = config.database_path();
        let db_service = DbService::new(&db_path.to_string_lossy())
            .await
            .expect("Failed to initialize database");

        let state = Self::with_pool(config.clone(), db_service.pool);
        state.bootstrap_admin().await;
        state
    }

    /// Build state around an existing pool (used by tests)
    pub fn with_pool(config: Config, pool: SqlitePool) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let mailer = Mailer::new(config.mail_webhook_url.clone(), config.admin_email.clone());
        Self {
            config,
            pool,
            jwt_service,
            mailer,
        }
    }

    /// Create the admin account on first start, when ADMIN_PASSWORD is set
    pub async fn bootstrap_admin(&self) {
        let Some(password) = self.config.admin_password.clone() else {
            return;
        };
        let email = self.config.admin_email.clone();

        match repository::user::find_by_email(&self.pool, &email).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                let hash = match crate::auth::password::hash_password(&password) {
                    Ok(h) => h,
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to hash bootstrap admin password");
                        return;
                    }
                };
                match repository::user::create(&self.pool, &email, &hash).await {
                    Ok(user) => {
                        tracing::info!(user_id = user.id, email = %email, "Admin account created")
                    }
                    Err(e) => tracing::error!(error = %e, "Failed to create admin account"),
                }
            }
            Err(e) => tracing::error!(error = %e, "Failed to check for admin account"),
        }
    }
}
