//! SDRAM controller state machine.
//!
//! The controller consumes host requests and the outputs of its two
//! counters, and drives the device command/address/bank signals and the
//! host completion outputs. The whole transition function is evaluated
//! exactly once per clock tick; no real clock source is required, which
//! keeps the logic deterministic and unit-testable cycle by cycle.

/// Reloadable cycle counter and free-running refresh counter.
pub mod counters;

/// Controller state and device command enumerations.
pub mod state;

/// Manufacturer timing constants and derived cycle counts.
pub mod timing;

pub use counters::{CycleCounter, RefreshCounter};
pub use state::{Command, State};
pub use timing::TimingParams;

use crate::common::addr::AddressFields;
use crate::common::constants::{AUTO_PRECHARGE_BIT, DQM_MASK, PRECHARGE_ALL_BIT};
use crate::controller::timing::MODE_REGISTER;

/// Host-side request lines, sampled by the controller every idle cycle.
///
/// The host holds these lines stable from the cycle it raises a request
/// until it observes the completion pulse. Changing them mid-transaction
/// is undefined.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostPort {
    /// Linear byte address (31 bits, least-significant bit ignored).
    pub addr: u32,
    /// Write data (16 bits).
    pub data: u16,
    /// Write-enable flag.
    pub we: bool,
    /// Per-byte select mask (2 bits). A request is pending while non-zero.
    pub sel: u8,
}

impl HostPort {
    /// An idle port: no request pending.
    pub const fn idle() -> Self {
        Self {
            addr: 0,
            data: 0,
            we: false,
            sel: 0,
        }
    }

    /// A full-word read request.
    pub const fn read(addr: u32) -> Self {
        Self {
            addr,
            data: 0,
            we: false,
            sel: DQM_MASK,
        }
    }

    /// A write request with an explicit byte select mask.
    pub const fn write(addr: u32, data: u16, sel: u8) -> Self {
        Self {
            addr,
            data,
            we: true,
            sel,
        }
    }
}

/// Device-facing signal group driven by the controller for one cycle.
#[derive(Debug, Clone, Copy)]
pub struct DeviceSignals {
    /// Command asserted this cycle. Exactly one per cycle; `Nop` except on
    /// the first cycle of each state.
    pub command: Command,
    /// Multiplexed row/column address (13 bits, A10 doubles as the
    /// auto-precharge / precharge-all flag).
    pub addr: u16,
    /// Bank select (2 bits).
    pub bank: u8,
    /// Inverted byte enable (2 bits), registered one cycle after the host
    /// byte select.
    pub dqm: u8,
    /// Data driven onto the bidirectional bus, `Some` only while a write is
    /// in flight.
    pub dq: Option<u16>,
    /// Clock enable line.
    pub cke: bool,
}

/// The controller state machine.
///
/// Owns the current [`State`], the two counters, the latched host request,
/// and the registered data-path values. [`Controller::tick`] advances all of
/// them by one clock cycle and returns the device-facing signals for that
/// cycle; the host-facing outputs are exposed through accessors.
#[derive(Debug)]
pub struct Controller {
    timing: TimingParams,
    state: State,
    timer: CycleCounter,
    refresh: RefreshCounter,

    /// Request latched on acceptance; stable for the whole transaction.
    request: HostPort,
    fields: AddressFields,

    /// Write data, captured from the host lines every cycle.
    data_reg: u16,
    /// Complemented byte select, captured from the host lines every cycle.
    dqm_reg: u8,

    read_data: u16,
    done: bool,
    init_done: bool,
}

impl Controller {
    /// Creates a controller in the power-up reset state.
    pub fn new(timing: TimingParams) -> Self {
        Self {
            timing,
            state: State::Reset,
            timer: CycleCounter::new(timing.longest_threshold()),
            refresh: RefreshCounter::new(timing.refresh_interval, timing.max_command_path()),
            request: HostPort::idle(),
            fields: AddressFields::default(),
            data_reg: 0,
            dqm_reg: DQM_MASK,
            read_data: 0,
            done: false,
            init_done: false,
        }
    }

    /// Advances the controller by one clock cycle.
    ///
    /// `host` carries the host request lines for this cycle and `dq_in` the
    /// value currently on the device data bus. Returns the device-facing
    /// signals asserted during this cycle.
    pub fn tick(&mut self, host: &HostPort, dq_in: u16) -> DeviceSignals {
        let elapsed = self.timer.count();
        let entry = elapsed == 0;
        let t = self.timing;

        let mut command = Command::Nop;
        let mut addr: u16 = 0;
        let mut bank: u8 = 0;
        let mut dq = None;
        let mut done = false;
        let mut clear_refresh = false;
        let mut next = self.state;

        match self.state {
            State::Reset => {
                if elapsed == t.reset_hold {
                    next = State::ResetPrecharge;
                }
            }
            State::ResetPrecharge => {
                if entry {
                    command = Command::Precharge;
                    addr = PRECHARGE_ALL_BIT;
                }
                if elapsed == t.t_rp {
                    next = State::ResetRefresh1;
                }
            }
            State::ResetRefresh1 => {
                if entry {
                    command = Command::Refresh;
                }
                if elapsed == t.t_rc {
                    next = State::ResetRefresh2;
                }
            }
            State::ResetRefresh2 => {
                if entry {
                    command = Command::Refresh;
                }
                if elapsed == t.t_rc {
                    next = State::ModeSet;
                }
            }
            State::ModeSet => {
                if entry {
                    command = Command::ModeSet;
                    addr = MODE_REGISTER;
                }
                if elapsed == t.t_mrd - 1 {
                    done = true;
                }
                if elapsed == t.t_mrd {
                    next = State::Idle;
                }
            }
            State::Idle => {
                self.init_done = true;
                // A completion pulsed last cycle: give the host one cycle to
                // deassert its request lines before sampling them again.
                if !self.done {
                    if self.refresh.due() {
                        next = State::AutoRefresh;
                    } else if host.sel != 0 {
                        self.request = *host;
                        self.fields = AddressFields::decompose(host.addr);
                        next = State::Activate;
                    }
                }
            }
            State::Activate => {
                if entry {
                    command = Command::Activate;
                    bank = self.fields.bank;
                    addr = self.fields.row;
                }
                if elapsed == t.t_rcd {
                    next = if self.request.we {
                        State::Write
                    } else {
                        State::Read
                    };
                }
            }
            State::Write => {
                if entry {
                    command = Command::Write;
                    bank = self.fields.bank;
                    addr = self.fields.col | AUTO_PRECHARGE_BIT;
                }
                // Registered one cycle earlier, per the unconditional
                // capture below.
                dq = Some(self.data_reg);
                if elapsed == t.t_rp {
                    done = true;
                    next = State::Idle;
                }
            }
            State::Read => {
                if entry {
                    command = Command::Read;
                    bank = self.fields.bank;
                    addr = self.fields.col | AUTO_PRECHARGE_BIT;
                }
                if elapsed == t.cas_latency {
                    self.read_data = dq_in;
                    done = true;
                    next = State::Idle;
                }
            }
            State::AutoRefresh => {
                if entry {
                    command = Command::Refresh;
                }
                if elapsed == t.t_rc - 1 {
                    clear_refresh = true;
                }
                if elapsed == t.t_rc {
                    next = State::Idle;
                }
            }
        }

        // Outputs drive the values registered on the previous cycle.
        let dqm = self.dqm_reg;

        // Unconditional capture: the write data and byte select registers
        // load from the host lines every cycle, whether or not a write is
        // requested. The write path relies on the value being registered
        // one cycle before use; do not gate this.
        self.data_reg = host.data;
        self.dqm_reg = !host.sel & DQM_MASK;

        self.refresh.tick(clear_refresh);
        let _ = self.timer.tick(next != self.state);
        self.state = next;
        self.done = done;

        DeviceSignals {
            command,
            addr,
            bank,
            dqm,
            dq,
            cke: true,
        }
    }

    /// Current controller state.
    pub fn state(&self) -> State {
        self.state
    }

    /// Completion pulse: high for exactly one cycle per completed operation.
    pub fn done(&self) -> bool {
        self.done
    }

    /// Read-data register. Valid only on completion pulse cycles following
    /// a read.
    pub fn read_data(&self) -> u16 {
        self.read_data
    }

    /// Initialization-complete flag. Transitions false to true exactly once,
    /// on first entry to idle, and never clears.
    pub fn init_done(&self) -> bool {
        self.init_done
    }

    /// Cycles elapsed since the last refresh.
    pub fn refresh_count(&self) -> u32 {
        self.refresh.count()
    }

    /// Whether a refresh is currently due.
    pub fn refresh_due(&self) -> bool {
        self.refresh.due()
    }

    /// The derived timing parameters this controller was built with.
    pub fn timing(&self) -> TimingParams {
        self.timing
    }
}
