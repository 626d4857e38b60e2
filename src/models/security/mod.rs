//! Security models
//!
//! - `error`: Error types for secret resolution
//! - `secret`: API key sources and zeroization

mod error;
mod secret;

pub use error::{SecurityError, SecurityResult};
pub use secret::{SecretString, SecretValue};
