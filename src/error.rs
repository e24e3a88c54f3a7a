//! Crate-level error type.
//!
//! The session core itself has no fatal failure modes (illegal calls are
//! no-ops); errors surface only from the persistence collaborator and from
//! configuration validation. Services tolerate store failures by logging
//! them and keeping in-memory state authoritative.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("store error: {detail}")]
    Store { detail: String },
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("configuration error: {detail}")]
    Config { detail: String },
}

impl CoreError {
    pub fn store(detail: impl Into<String>) -> Self {
        Self::Store {
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }
}
