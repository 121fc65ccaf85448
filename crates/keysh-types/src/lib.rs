//! Foundation types for keysh: key events and error types.

pub mod error;
pub mod key;

pub use error::{KeyshError, Result};
pub use key::Key;
