//! Configuration loading and parsing.
//!
//! The simulator is configured by a single TOML file. The only hardware
//! parameter is the host clock frequency; every cycle-count threshold the
//! controller uses is derived from it at configuration time by
//! [`crate::controller::TimingParams::derive`]. The remaining settings
//! steer the simulation harness, not the hardware.

use serde::Deserialize;

const DEFAULT_FREQUENCY_HZ: u64 = 100_000_000;
const DEFAULT_TEST_WORDS: usize = 256;

/// Top-level simulator configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Clock settings.
    #[serde(default)]
    pub clock: ClockConfig,
    /// Simulation harness settings.
    #[serde(default)]
    pub sim: SimConfig,
}

/// Clock settings.
#[derive(Debug, Deserialize)]
pub struct ClockConfig {
    /// Host clock frequency in Hz. All timing thresholds derive from this.
    #[serde(default = "default_frequency_hz")]
    pub frequency_hz: u64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            frequency_hz: DEFAULT_FREQUENCY_HZ,
        }
    }
}

/// Simulation harness settings.
#[derive(Debug, Deserialize)]
pub struct SimConfig {
    /// Print every non-NOP device command as it is issued.
    #[serde(default)]
    pub trace_commands: bool,

    /// Number of words the built-in verify workload touches.
    #[serde(default = "default_test_words")]
    pub test_words: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            trace_commands: false,
            test_words: DEFAULT_TEST_WORDS,
        }
    }
}

fn default_frequency_hz() -> u64 {
    DEFAULT_FREQUENCY_HZ
}

fn default_test_words() -> usize {
    DEFAULT_TEST_WORDS
}
