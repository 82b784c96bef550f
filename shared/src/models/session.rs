//! Session Model (refresh token entry)

use serde::{Deserialize, Serialize};

/// One refresh session
///
/// A user may hold several live rows at once (concurrent sessions), each
/// independently revocable. An expired row is rejected by refresh even while
/// it still exists; cleanup is lazy (purged on the next login).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Session {
    /// UUID v4, carried in the refresh JWT
    pub id: String,
    pub user_id: i64,
    pub created_at: i64,
    pub expires_at: i64,
}

impl Session {
    /// Lazy expiry check against a caller-supplied "now"
    pub fn is_expired(&self, now_ms: i64) -> bool {
        self.expires_at <= now_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_expired() {
        let session = Session {
            id: "abc".to_string(),
            user_id: 1,
            created_at: 0,
            expires_at: 1000,
        };
        assert!(!session.is_expired(999));
        assert!(session.is_expired(1000));
        assert!(session.is_expired(1001));
    }
}
