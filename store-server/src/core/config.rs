use crate::auth::JwtConfig;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Purpose |
/// |----------|---------|---------|
/// | DATA_DIR | ./data | Database and runtime files |
/// | HTTP_PORT | 3000 | HTTP service port |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | FRONTEND_ORIGIN | (unset) | CORS allowed origin |
/// | JWT_SECRET | generated in dev | Token signing secret |
/// | ACCESS_TOKEN_MINUTES | 15 | Access token lifetime |
/// | REFRESH_TOKEN_DAYS | 7 | Refresh token lifetime |
/// | MAIL_WEBHOOK_URL | (unset) | Outbound mail webhook, unset disables mail |
/// | ADMIN_EMAIL | admin@localhost | Bootstrap admin account |
/// | ADMIN_PASSWORD | (unset) | Bootstrap admin password |
/// | LOG_DIR | (unset) | Daily-rolling file logs |
#[derive(Debug, Clone)]
pub struct Config {
    /// Data directory holding the SQLite database
    pub data_dir: String,
    /// HTTP API service port
    pub http_port: u16,
    /// Running environment: development | staging | production
    pub environment: String,
    /// Allowed CORS origin for the storefront/admin frontend
    pub frontend_origin: Option<String>,
    /// JWT configuration (access/refresh lifetimes, secret)
    pub jwt: JwtConfig,
    /// Outbound mail webhook; None disables delivery
    pub mail_webhook_url: Option<String>,
    /// Bootstrap admin account email
    pub admin_email: String,
    /// Bootstrap admin password; None skips bootstrap
    pub admin_password: Option<String>,
    /// Optional directory for daily-rolling log files
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from environment variables, with defaults
    pub fn from_env() -> Self {
        Self {
            data_dir: std::env::var("DATA_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            frontend_origin: std::env::var("FRONTEND_ORIGIN").ok(),
            jwt: JwtConfig::default(),
            mail_webhook_url: std::env::var("MAIL_WEBHOOK_URL").ok(),
            admin_email: std::env::var("ADMIN_EMAIL")
                .unwrap_or_else(|_| "admin@localhost".into()),
            admin_password: std::env::var("ADMIN_PASSWORD").ok(),
            log_dir: std::env::var("LOG_DIR").ok(),
        }
    }

    /// Whether we run in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Whether we run in development
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Path of the SQLite database file
    pub fn database_path(&self) -> std::path::PathBuf {
        std::path::Path::new(&self.data_dir).join("store.db")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
