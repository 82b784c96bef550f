//! Authentication
//!
//! JWT access/refresh pair, argon2 password hashing, and the axum middleware
//! that gates admin routes.

pub mod jwt;
pub mod middleware;
pub mod password;
pub mod session;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::require_auth;
pub use session::{REFRESH_THRESHOLD_SECS, needs_refresh};
