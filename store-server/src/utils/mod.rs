//! Utility modules

pub mod cookies;
pub mod logger;

// Re-export unified error types from shared
pub use shared::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
