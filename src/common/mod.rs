//! Common constants and types used throughout the SDRAM controller simulator.
//!
//! This module provides the device geometry constants, the fixed
//! linear-address decomposition, and the error types shared across the
//! controller, the device model, and the configuration layer.

/// Linear address decomposition into bank, row, and column fields.
pub mod addr;

/// Geometry constants for the simulated device.
pub mod constants;

/// Configuration error types.
pub mod error;

pub use addr::AddressFields;
pub use error::ConfigError;

pub use constants::{NUM_BANKS, NUM_COLS, NUM_ROWS};
