//! Error types for keysh.

use std::io;

/// Errors produced by the keysh framework.
#[derive(Debug, thiserror::Error)]
pub enum KeyshError {
    #[error("command error: {0}")]
    Command(String),

    #[error("registration error: {0}")]
    Registration(String),

    #[error("terminal error: {0}")]
    Terminal(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, KeyshError>;
