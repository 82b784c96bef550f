//! Shared types for the book store backend
//!
//! Contains everything both the server and any future admin client need:
//!
//! - **Error handling** (`error`): unified error codes, [`AppError`] and the
//!   [`ApiResponse`] envelope
//! - **Models** (`models`): database entities and create/update payloads
//! - **Client DTOs** (`client`): request/response bodies for the auth API
//! - **Utilities** (`util`): timestamps and snowflake ID generation

pub mod client;
pub mod error;
pub mod models;
pub mod util;

// Re-export the error surface at the crate root
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
