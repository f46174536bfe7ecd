//! Checking SDRAM device model.
//!
//! The far side of the command bus during simulation and testing: a
//! lossless model of a 4-bank x16 SDR device. It executes the command
//! stream cycle by cycle, keeps per-bank open-row state, honors the mode
//! register and the A10 auto-precharge flag, applies DQM byte masking on
//! writes, and delays read data by the programmed CAS latency so it
//! appears on the bus exactly where the controller expects to sample it.
//!
//! The model is a test oracle, not production code: protocol violations
//! (activating over an open row, reading with no open row, refreshing with
//! a row open, issuing column commands before the mode register is
//! programmed) panic with a message so controller bugs surface immediately.

use crate::common::constants::{
    AUTO_PRECHARGE_BIT, COL_ADDR_MASK, NUM_BANKS, NUM_COLS, NUM_ROWS, PRECHARGE_ALL_BIT,
    ROW_ADDR_MASK,
};
use crate::controller::{Command, DeviceSignals};

/// One bank: a row/column array plus the currently open row.
#[derive(Clone)]
struct Bank {
    cells: Vec<u16>,
    active_row: Option<u32>,
}

impl Bank {
    fn new() -> Self {
        Self {
            cells: vec![0; (NUM_ROWS * NUM_COLS) as usize],
            active_row: None,
        }
    }

    fn activate(&mut self, row: u32) {
        if self.active_row.is_some() {
            panic!("activate issued to a bank that already has an open row");
        }
        self.active_row = Some(row);
    }

    fn precharge(&mut self) {
        self.active_row = None;
    }

    fn open_row(&self) -> u32 {
        match self.active_row {
            Some(row) => row,
            None => panic!("column access issued to a bank with no open row"),
        }
    }

    fn read(&self, col: u32) -> u16 {
        let row = self.open_row();
        self.cells[(row * NUM_COLS + col) as usize]
    }

    fn write(&mut self, col: u32, data: u16, dqm: u8) {
        let row = self.open_row();
        let mut mask: u16 = 0;
        if dqm & 0b01 == 0 {
            mask |= 0x00FF;
        }
        if dqm & 0b10 == 0 {
            mask |= 0xFF00;
        }
        let cell = &mut self.cells[(row * NUM_COLS + col) as usize];
        *cell = (*cell & !mask) | (data & mask);
    }
}

/// The SDRAM device model.
pub struct SdramModel {
    banks: Vec<Bank>,
    mode_register: Option<u16>,
    /// Read data in flight between column fetch and the data bus. One stage
    /// per CAS-latency cycle beyond the first.
    pipeline: Vec<Option<u16>>,
    dq_out: Option<u16>,
    refreshes: u64,
}

impl SdramModel {
    /// Creates a powered-up device with an unprogrammed mode register.
    pub fn new() -> Self {
        Self {
            banks: vec![Bank::new(); NUM_BANKS as usize],
            mode_register: None,
            pipeline: Vec::new(),
            dq_out: None,
            refreshes: 0,
        }
    }

    /// Value the device drives on the data bus this cycle, if any.
    pub fn dq(&self) -> Option<u16> {
        self.dq_out
    }

    /// Number of refresh commands executed so far.
    pub fn refreshes(&self) -> u64 {
        self.refreshes
    }

    /// Mode register contents, once programmed.
    pub fn mode_register(&self) -> Option<u16> {
        self.mode_register
    }

    /// Executes one cycle of the command bus.
    pub fn clk(&mut self, io: &DeviceSignals) {
        let bank = usize::from(io.bank);

        let fetched = match io.command {
            Command::Nop | Command::BurstStop => None,
            Command::Precharge => {
                if io.addr & PRECHARGE_ALL_BIT != 0 {
                    for bank in &mut self.banks {
                        bank.precharge();
                    }
                } else {
                    self.banks[bank].precharge();
                }
                None
            }
            Command::Refresh => {
                if self.banks.iter().any(|b| b.active_row.is_some()) {
                    panic!("refresh issued while a row is open");
                }
                self.refreshes += 1;
                None
            }
            Command::ModeSet => {
                let cas = u32::from((io.addr >> 4) & 0b111);
                if !(2..=3).contains(&cas) {
                    panic!("unsupported CAS latency {} programmed in mode register", cas);
                }
                self.mode_register = Some(io.addr);
                self.pipeline = vec![None; (cas - 1) as usize];
                None
            }
            Command::Activate => {
                self.banks[bank].activate(u32::from(io.addr) & ROW_ADDR_MASK);
                None
            }
            Command::Read => {
                self.require_mode_register();
                let data = self.banks[bank].read(u32::from(io.addr) & COL_ADDR_MASK);
                if io.addr & AUTO_PRECHARGE_BIT != 0 {
                    self.banks[bank].precharge();
                }
                Some(data)
            }
            Command::Write => {
                self.require_mode_register();
                let data = match io.dq {
                    Some(data) => data,
                    None => panic!("write command issued with no data driven"),
                };
                self.banks[bank].write(u32::from(io.addr) & COL_ADDR_MASK, data, io.dqm);
                if io.addr & AUTO_PRECHARGE_BIT != 0 {
                    self.banks[bank].precharge();
                }
                None
            }
        };

        // Shift the CAS pipeline: data fetched this cycle reaches the bus
        // after the remaining latency stages.
        if self.pipeline.is_empty() {
            self.dq_out = fetched;
        } else {
            let last = self.pipeline[self.pipeline.len() - 1];
            for i in (1..self.pipeline.len()).rev() {
                self.pipeline[i] = self.pipeline[i - 1];
            }
            self.pipeline[0] = fetched;
            self.dq_out = last;
        }
    }

    fn require_mode_register(&self) {
        if self.mode_register.is_none() {
            panic!("column command issued before the mode register was programmed");
        }
    }
}

impl Default for SdramModel {
    fn default() -> Self {
        Self::new()
    }
}
