//! User Model (admin account)

use serde::{Deserialize, Serialize};

/// Admin user entity
///
/// The password is stored as an argon2 hash; hashing/verification lives in the
/// server's auth layer. Refresh sessions are normalized into their own table
/// ([`super::Session`]) owned exclusively by this user.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Single-use password reset token, cleared on use/expiry
    #[serde(skip_serializing)]
    pub reset_token: Option<String>,
    pub reset_token_expires_at: Option<i64>,
    pub created_at: i64,
}
