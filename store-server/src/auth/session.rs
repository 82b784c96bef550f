//! Silent refresh policy
//!
//! The admin client proactively refreshes its access token shortly before
//! expiry instead of waiting for a 401. The decision function lives here so
//! the threshold has one definition and its edge cases are tested; clients
//! consume it through the crate root (`store_server::auth::needs_refresh`)
//! together with the `expires_in` field of the login/refresh responses.

/// Refresh when less than this many seconds of access-token lifetime remain
pub const REFRESH_THRESHOLD_SECS: i64 = 60;

/// Whether an access token expiring at `exp_secs` should be refreshed now
pub fn needs_refresh(exp_secs: i64, now_secs: i64) -> bool {
    exp_secs - now_secs < REFRESH_THRESHOLD_SECS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_token_kept() {
        // 10 minutes left
        assert!(!needs_refresh(1_000_600, 1_000_000));
    }

    #[test]
    fn test_near_expiry_refreshed() {
        // 30 seconds left
        assert!(needs_refresh(1_000_030, 1_000_000));
    }

    #[test]
    fn test_already_expired_refreshed() {
        assert!(needs_refresh(999_000, 1_000_000));
    }

    #[test]
    fn test_threshold_boundary() {
        // exactly 60s left: keep
        assert!(!needs_refresh(1_000_060, 1_000_000));
        // 59s left: refresh
        assert!(needs_refresh(1_000_059, 1_000_000));
    }
}
