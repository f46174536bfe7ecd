//! Simulation harness.
//!
//! `System` wires the controller and the device model together on a shared
//! clock. One call to [`System::step`] is one clock cycle: the device's
//! current data-bus drive is sampled, the controller transition function
//! runs, and the resulting command is clocked into the device. On top of
//! the per-cycle step it offers blocking host-level helpers that follow
//! the host protocol: hold the request lines stable, wait for the
//! single-cycle completion pulse, then release.

use crate::common::error::ConfigError;
use crate::config::Config;
use crate::controller::{Command, Controller, DeviceSignals, HostPort, TimingParams};
use crate::device::SdramModel;
use crate::stats::SimStats;

/// The simulated system: controller, device model, and statistics.
pub struct System {
    /// The controller under simulation.
    pub controller: Controller,
    /// The memory device on the far side of the command bus.
    pub device: SdramModel,
    /// Statistics accumulated over the run.
    pub stats: SimStats,
    trace: bool,
    cycle: u64,
}

impl System {
    /// Builds a system from a configuration.
    ///
    /// # Errors
    ///
    /// Fails if the configured clock frequency derives degenerate timing
    /// parameters.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let timing = TimingParams::derive(config.clock.frequency_hz)?;
        Ok(Self::with_timing(timing, config.sim.trace_commands))
    }

    /// Builds a system from already-derived timing parameters.
    pub fn with_timing(timing: TimingParams, trace: bool) -> Self {
        Self {
            controller: Controller::new(timing),
            device: SdramModel::new(),
            stats: SimStats::default(),
            trace,
            cycle: 0,
        }
    }

    /// Advances the whole system by one clock cycle and returns the device
    /// signals the controller asserted during it.
    pub fn step(&mut self, host: &HostPort) -> DeviceSignals {
        let dq_in = self.device.dq().unwrap_or(0);
        let state = self.controller.state();
        let io = self.controller.tick(host, dq_in);

        if self.trace && io.command != Command::Nop {
            println!(
                "[trace] cycle={:<10} state={:?} cmd={:?} bank={} addr={:#06x}",
                self.cycle, state, io.command, io.bank, io.addr
            );
        }

        self.device.clk(&io);
        self.stats.record_command(io.command);
        self.stats.cycles += 1;
        self.cycle += 1;
        io
    }

    /// Runs idle cycles until the controller reports initialization
    /// complete.
    pub fn wait_ready(&mut self) {
        let idle = HostPort::idle();
        while !self.controller.init_done() {
            let _ = self.step(&idle);
        }
    }

    /// Writes one word, blocking until the completion pulse.
    ///
    /// The request lines stay asserted for the whole transaction, matching
    /// the host protocol; a refresh falling due first simply runs ahead of
    /// the write.
    pub fn write_word(&mut self, addr: u32, data: u16, sel: u8) {
        let host = HostPort::write(addr, data, sel);
        loop {
            let _ = self.step(&host);
            if self.controller.done() {
                break;
            }
        }
        self.stats.host_writes += 1;
    }

    /// Reads one word, blocking until the completion pulse, and returns the
    /// captured read data.
    pub fn read_word(&mut self, addr: u32) -> u16 {
        let host = HostPort::read(addr);
        loop {
            let _ = self.step(&host);
            if self.controller.done() {
                break;
            }
        }
        self.stats.host_reads += 1;
        self.controller.read_data()
    }

    /// Runs `n` idle cycles.
    pub fn idle_cycles(&mut self, n: u64) {
        let idle = HostPort::idle();
        for _ in 0..n {
            let _ = self.step(&idle);
        }
    }
}
