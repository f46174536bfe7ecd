//! Simulation statistics collection and reporting.
//!
//! Tracks cycle counts, the device command mix, and host transaction
//! counts during simulation execution.

use crate::controller::Command;
use std::time::Instant;

/// Statistics accumulated over a simulation run.
pub struct SimStats {
    start_time: Instant,
    /// Total clock cycles simulated.
    pub cycles: u64,

    /// NOP commands issued.
    pub cmd_nop: u64,
    /// Read commands issued.
    pub cmd_read: u64,
    /// Write commands issued.
    pub cmd_write: u64,
    /// Activate commands issued.
    pub cmd_activate: u64,
    /// Precharge commands issued.
    pub cmd_precharge: u64,
    /// Refresh commands issued.
    pub cmd_refresh: u64,
    /// Mode-register-set commands issued.
    pub cmd_mode_set: u64,
    /// Burst-stop commands issued.
    pub cmd_burst_stop: u64,

    /// Host read transactions completed.
    pub host_reads: u64,
    /// Host write transactions completed.
    pub host_writes: u64,
}

impl Default for SimStats {
    /// Returns the default value.
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            cmd_nop: 0,
            cmd_read: 0,
            cmd_write: 0,
            cmd_activate: 0,
            cmd_precharge: 0,
            cmd_refresh: 0,
            cmd_mode_set: 0,
            cmd_burst_stop: 0,
            host_reads: 0,
            host_writes: 0,
        }
    }
}

impl SimStats {
    /// Records one cycle's device command.
    pub fn record_command(&mut self, cmd: Command) {
        match cmd {
            Command::Nop => self.cmd_nop += 1,
            Command::BurstStop => self.cmd_burst_stop += 1,
            Command::Read => self.cmd_read += 1,
            Command::Write => self.cmd_write += 1,
            Command::Activate => self.cmd_activate += 1,
            Command::Precharge => self.cmd_precharge += 1,
            Command::Refresh => self.cmd_refresh += 1,
            Command::ModeSet => self.cmd_mode_set += 1,
        }
    }

    /// Prints a formatted summary of the simulation run.
    pub fn print(&self) {
        let duration = self.start_time.elapsed();
        let seconds = duration.as_secs_f64();

        let cyc = if self.cycles == 0 { 1 } else { self.cycles };
        let khz = (self.cycles as f64 / seconds) / 1000.0;

        let pct = |n: u64| (n as f64 / cyc as f64) * 100.0;

        println!("\n==========================================================");
        println!("SDRAM CONTROLLER SIMULATION STATISTICS");
        println!("==========================================================");
        println!("host_seconds             {:.4} s", seconds);
        println!("sim_cycles               {}", self.cycles);
        println!("sim_freq                 {:.2} kHz", khz);
        println!("----------------------------------------------------------");
        println!("COMMAND MIX");
        println!("  cmd.nop                {} ({:.2}%)", self.cmd_nop, pct(self.cmd_nop));
        println!("  cmd.activate           {} ({:.2}%)", self.cmd_activate, pct(self.cmd_activate));
        println!("  cmd.read               {} ({:.2}%)", self.cmd_read, pct(self.cmd_read));
        println!("  cmd.write              {} ({:.2}%)", self.cmd_write, pct(self.cmd_write));
        println!("  cmd.precharge          {} ({:.2}%)", self.cmd_precharge, pct(self.cmd_precharge));
        println!("  cmd.refresh            {} ({:.2}%)", self.cmd_refresh, pct(self.cmd_refresh));
        println!("  cmd.mode_set           {} ({:.2}%)", self.cmd_mode_set, pct(self.cmd_mode_set));
        println!("----------------------------------------------------------");
        println!("HOST TRANSACTIONS");
        println!("  host.reads             {}", self.host_reads);
        println!("  host.writes            {}", self.host_writes);
        let ops = self.host_reads + self.host_writes;
        if ops > 0 {
            println!("  host.cycles_per_op     {:.2}", cyc as f64 / ops as f64);
        }
        println!("==========================================================");
    }
}
