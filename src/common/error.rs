//! Configuration error types.
//!
//! All errors in this crate surface at configuration time, when the
//! cycle-count timing parameters are derived from the clock frequency.
//! Runtime operation has no error path: protocol misuse by the host is
//! undefined rather than detected, and the refresh margin is designed in
//! at derive time rather than handled reactively.

use thiserror::Error;

/// Error produced while deriving timing parameters from a clock frequency.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The reset hold time rounds down to zero cycles at this frequency.
    #[error("clock frequency {0} Hz derives a zero-cycle reset hold time")]
    ResetHoldTooShort(u64),

    /// The per-row refresh interval rounds down to zero cycles.
    #[error("clock frequency {0} Hz derives a zero-cycle refresh interval")]
    RefreshIntervalTooShort(u64),

    /// The refresh interval leaves no room for the worst-case command path.
    #[error(
        "refresh interval of {interval} cycles does not clear the \
         {margin}-cycle worst-case command path"
    )]
    RefreshMarginExceeded {
        /// Derived refresh interval in cycles.
        interval: u32,
        /// Worst-case cycles to leave and return to idle.
        margin: u32,
    },
}
