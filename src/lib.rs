//! SDR SDRAM Controller Simulator Library.
//!
//! This crate implements a cycle-accurate simulator of the control logic for
//! a single-data-rate synchronous DRAM device (x16, 4 banks), exposed through
//! a minimal host read/write port. The controller converts a host
//! address/data request into a precisely timed sequence of device commands
//! (reset, mode-register-set, activate, read/write with auto-precharge,
//! periodic refresh) while respecting the manufacturer timing constraints
//! derived from the operating clock frequency.
//!
//! # Architecture
//!
//! * **Controller**: the command state machine and its two supporting
//!   counters, evaluated once per clock tick as a pure transition function.
//! * **Device**: a checking SDRAM device model used as the far side of the
//!   command bus during simulation and testing.
//! * **Sim**: the harness that wires controller and device together on a
//!   shared clock and offers blocking host-level read/write helpers.
//!
//! # Modules
//!
//! * `common`: shared constants, address decomposition, and error types.
//! * `config`: configuration loading and timing derivation.
//! * `controller`: the controller state machine and counters.
//! * `device`: the SDRAM device model.
//! * `sim`: simulation harness.
//! * `stats`: simulation statistics collection.

/// Shared constants, address decomposition, and error types.
///
/// Provides the device geometry constants, the fixed linear-address
/// decomposition, and the configuration error type used at derive time.
pub mod common;

/// Configuration system for clock and simulation settings.
///
/// Loads and parses TOML configuration files and derives the cycle-count
/// timing parameters from the configured clock frequency.
pub mod config;

/// Controller state machine and supporting counters.
///
/// Implements the per-tick transition function that drives the device
/// command bus and the host completion outputs, plus the reloadable cycle
/// counter and the free-running refresh counter it consumes.
pub mod controller;

/// SDRAM device model.
///
/// A checking, lossless model of the memory device: banks, rows, mode
/// register, CAS-latency read pipeline, and byte masking. Protocol
/// violations panic so that controller bugs surface in tests.
pub mod device;

/// Simulation harness and host-level access helpers.
///
/// Wires the controller and the device model on a shared clock and exposes
/// blocking `write_word`/`read_word` helpers that follow the host protocol.
pub mod sim;

/// Simulation statistics collection and reporting.
///
/// Tracks cycle counts, command mix, and host transaction counts during
/// simulation execution.
pub mod stats;
