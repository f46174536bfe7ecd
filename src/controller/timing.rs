//! Manufacturer timing constants and derived cycle counts.
//!
//! The device constants below follow the datasheet of a 256 Mbit x16 SDR
//! part (IS42S16160-class, -7 speed grade, CAS latency 2). Row timings are
//! specified by the manufacturer directly in clock cycles; the reset hold
//! and the refresh interval are specified in time and converted to cycles
//! from the configured clock frequency when [`TimingParams::derive`] runs.
//! Nothing downstream of derivation works in time units: the controller
//! compares cycle counts only.

use crate::common::error::ConfigError;

/// Row cycle time tRC (activate-to-activate minimum), in cycles.
pub const T_RC_CYCLES: u32 = 8;
/// Row precharge time tRP, in cycles.
pub const T_RP_CYCLES: u32 = 2;
/// Row-to-column delay tRCD, in cycles.
pub const T_RCD_CYCLES: u32 = 2;
/// Mode-register-set delay tMRD, in cycles.
pub const T_MRD_CYCLES: u32 = 2;
/// CAS latency, fixed at 2 by the mode register programmed below.
pub const CAS_LATENCY: u32 = 2;

/// Reset hold time after power-up, in nanoseconds.
const RESET_HOLD_NS: u64 = 100_000;
/// Retention window over which every row must be refreshed, in nanoseconds.
const REFRESH_WINDOW_NS: u64 = 64_000_000;
/// Rows covered by one pass of the refresh counter.
const REFRESH_ROWS: u64 = 8192;

// Mode register fields (datasheet p.25).
const BURST_LENGTH_1: u16 = 0x0000;
const BURST_TYPE_SEQUENTIAL: u16 = 0x0000;
const CAS_LATENCY_2: u16 = 0x0020;
const OPERATING_MODE_STANDARD: u16 = 0x0000;
const WRITE_BURST_SINGLE: u16 = 0x0200;

/// Fixed mode register value: burst length 1, sequential, CAS latency 2,
/// standard operation, single-location write.
pub const MODE_REGISTER: u16 = BURST_LENGTH_1
    | BURST_TYPE_SEQUENTIAL
    | CAS_LATENCY_2
    | OPERATING_MODE_STANDARD
    | WRITE_BURST_SINGLE;

/// Cycle-count thresholds for every timed controller state.
///
/// Derived once from the clock frequency; the controller never recomputes
/// or interprets time units afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingParams {
    /// Reset hold time in cycles.
    pub reset_hold: u32,
    /// Interval between refreshes in cycles.
    pub refresh_interval: u32,
    /// Row cycle time in cycles.
    pub t_rc: u32,
    /// Row precharge time in cycles.
    pub t_rp: u32,
    /// Row-to-column delay in cycles.
    pub t_rcd: u32,
    /// Mode-register-set delay in cycles.
    pub t_mrd: u32,
    /// CAS latency in cycles.
    pub cas_latency: u32,
}

impl TimingParams {
    /// Derives all cycle-count thresholds from a clock frequency in Hz.
    ///
    /// # Errors
    ///
    /// Rejects frequencies whose reset hold or refresh interval round down
    /// to zero cycles, and refresh intervals that do not clear the
    /// worst-case command path out of and back to idle.
    pub fn derive(frequency_hz: u64) -> Result<Self, ConfigError> {
        let reset_hold = cycles(RESET_HOLD_NS, frequency_hz);
        if reset_hold == 0 {
            return Err(ConfigError::ResetHoldTooShort(frequency_hz));
        }

        let refresh_interval = cycles(REFRESH_WINDOW_NS / REFRESH_ROWS, frequency_hz);
        if refresh_interval == 0 {
            return Err(ConfigError::RefreshIntervalTooShort(frequency_hz));
        }

        let params = Self {
            reset_hold,
            refresh_interval,
            t_rc: T_RC_CYCLES,
            t_rp: T_RP_CYCLES,
            t_rcd: T_RCD_CYCLES,
            t_mrd: T_MRD_CYCLES,
            cas_latency: CAS_LATENCY,
        };

        let margin = params.max_command_path();
        if refresh_interval <= margin {
            return Err(ConfigError::RefreshMarginExceeded {
                interval: refresh_interval,
                margin,
            });
        }

        Ok(params)
    }

    /// Worst-case cycles to leave idle for a non-refresh operation and
    /// return: row-to-column delay, precharge time, and one guard cycle.
    pub const fn max_command_path(&self) -> u32 {
        self.t_rcd + self.t_rp + 1
    }

    /// The largest threshold any state compares against; sizes the cycle
    /// counter so saturation can never mask a transition.
    pub fn longest_threshold(&self) -> u32 {
        self.reset_hold.max(self.refresh_interval).max(self.t_rc)
    }
}

/// Converts a duration in nanoseconds to whole clock cycles at `hz`.
fn cycles(ns: u64, hz: u64) -> u32 {
    ((u128::from(ns) * u128::from(hz)) / 1_000_000_000) as u32
}
