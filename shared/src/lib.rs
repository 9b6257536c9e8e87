//! Blog API Shared Library
//!
//! Wire types, the declarative request validator, and the authentication
//! error taxonomy shared by the backend and any Rust client.

pub mod errors;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use types::*;
pub use validation::{Check, FieldError, Ruleset, ValidatedInput, ValidationErrors};
