//! Controller state and device command enumerations.

/// Controller state.
///
/// Exactly one value is active at a time, owned by the controller. The
/// first five states form the power-up initialization sequence; invalid
/// encodings are unrepresentable in this enum, so the transition match is
/// exhaustive by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Power-up reset hold (about 100 us of NOPs).
    Reset,
    /// Initialization precharge of all banks.
    ResetPrecharge,
    /// First initialization refresh.
    ResetRefresh1,
    /// Second initialization refresh.
    ResetRefresh2,
    /// Mode register programming.
    ModeSet,
    /// Waiting for a host request or a refresh falling due.
    Idle,
    /// Row activation for the latched request.
    Activate,
    /// Read with auto-precharge in flight.
    Read,
    /// Write with auto-precharge in flight.
    Write,
    /// Periodic auto-refresh.
    AutoRefresh,
}

/// Device command, derived from the controller state every cycle.
///
/// Commands are encoded on the CS#, RAS#, CAS#, and WE# control pins;
/// [`Command::pins`] gives the active-low pin levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// No operation.
    Nop,
    /// Burst stop. Never issued by this controller (burst length is fixed
    /// at one) but part of the device command set.
    BurstStop,
    /// Column read.
    Read,
    /// Column write.
    Write,
    /// Row activation.
    Activate,
    /// Row precharge (all banks when A10 is set).
    Precharge,
    /// Auto-refresh.
    Refresh,
    /// Mode register set.
    ModeSet,
}

impl Command {
    /// Active-low control pin levels as a `{CS#, RAS#, CAS#, WE#}` nibble.
    pub const fn pins(self) -> u8 {
        match self {
            Command::Nop => 0b0111,
            Command::BurstStop => 0b0110,
            Command::Read => 0b0101,
            Command::Write => 0b0100,
            Command::Activate => 0b0011,
            Command::Precharge => 0b0010,
            Command::Refresh => 0b0001,
            Command::ModeSet => 0b0000,
        }
    }
}
