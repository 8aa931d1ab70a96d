//! Crate error type
//!
//! The simulation step itself never fails; terminal conditions are reported
//! through [`crate::sim::TickOutcome`]. Errors only come from the surfaces
//! around it: tuning files and level lookup.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid tuning data: {0}")]
    Tuning(#[from] serde_json::Error),

    #[error("unknown level id {0}")]
    UnknownLevel(u32),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
