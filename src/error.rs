//! Crate error type
//!
//! The simulation itself has no recoverable failures: ignored commands are
//! no-ops and audio errors are swallowed. What remains is contract violations
//! (bad stage index) and configuration I/O.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Stage numbers run from 1 to 5
    #[error("invalid stage {0} (expected 1..=5)")]
    InvalidStage(u8),

    #[error("invalid settings: {0}")]
    Settings(#[from] serde_json::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
