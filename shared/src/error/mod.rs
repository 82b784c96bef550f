//! Unified error handling
//!
//! Mirrors the same structure on both sides of the API:
//!
//! - [`codes`]: the [`ErrorCode`] enum (u16, grouped by domain)
//! - [`category`]: coarse [`ErrorCategory`] classification
//! - [`types`]: [`AppError`] and the [`ApiResponse`] envelope
//! - [`http`]: HTTP status code mapping

pub mod category;
pub mod codes;
pub mod http;
pub mod types;

pub use category::ErrorCategory;
pub use codes::ErrorCode;
pub use types::{ApiResponse, AppError, AppResult};
