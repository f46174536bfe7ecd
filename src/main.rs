//! SDRAM Controller Simulator CLI.
//!
//! The main executable for the simulator. It loads the TOML configuration,
//! derives the timing parameters from the configured clock frequency, runs
//! the initialization sequence, and then drives a write-then-readback
//! verify workload through the controller and the device model, printing
//! statistics at the end.

use clap::Parser;
use std::{fs, process};

extern crate sdram_controller;

use sdram_controller::common::AddressFields;
use sdram_controller::config::Config;
use sdram_controller::sim::System;

/// Command-line arguments for the SDRAM controller simulator.
#[derive(Parser, Debug)]
#[command(author, version, about = "SDR SDRAM Controller Cycle-Accurate Simulator")]
struct Args {
    #[arg(short, long, default_value = "configs/default.toml")]
    config: String,

    #[arg(long)]
    words: Option<usize>,

    #[arg(long)]
    trace: bool,
}

/// Pattern value written to word `i` of the verify workload.
fn pattern(i: usize) -> u16 {
    (i as u16).wrapping_mul(0x9E37) ^ 0xA5A5
}

/// Address of word `i`: sequential columns, round-robin across the four
/// banks so the workload exercises the whole bank-select path.
fn workload_addr(i: usize) -> u32 {
    let bank = (i as u32 & 0b11) << 23;
    (i as u32 * 2) | bank
}

/// Main entry point for the SDRAM controller simulator.
///
/// # Behavior
///
/// 1. **Configuration**: parses command-line arguments and loads the TOML
///    configuration file; flags override individual settings.
/// 2. **Initialization**: builds the `System` and runs idle cycles until the
///    controller reports initialization complete.
/// 3. **Workload**: writes a pattern over the configured number of words,
///    reads every word back, and counts mismatches.
/// 4. **Teardown**: prints simulation statistics and exits non-zero if any
///    word failed to verify.
fn main() {
    let args = Args::parse();
    let config_content = fs::read_to_string(&args.config).expect("Failed to read config");
    let mut config: Config = toml::from_str(&config_content).expect("Failed to parse config");

    if let Some(words) = args.words {
        config.sim.test_words = words;
    }
    if args.trace {
        config.sim.trace_commands = true;
    }

    let mut system = match System::new(&config) {
        Ok(system) => system,
        Err(e) => {
            eprintln!("Error: invalid configuration: {}", e);
            process::exit(1);
        }
    };
    let timing = system.controller.timing();

    println!("Global Configuration");
    println!("--------------------");
    println!("Clock:");
    println!("  Frequency:          {} Hz", config.clock.frequency_hz);
    println!("Derived timing (cycles):");
    println!("  Reset hold:         {}", timing.reset_hold);
    println!("  Refresh interval:   {}", timing.refresh_interval);
    println!("  tRC / tRP / tRCD:   {} / {} / {}", timing.t_rc, timing.t_rp, timing.t_rcd);
    println!("  tMRD / CAS:         {} / {}", timing.t_mrd, timing.cas_latency);
    println!("Workload:");
    println!("  Words:              {}", config.sim.test_words);
    println!("  Trace commands:     {}", config.sim.trace_commands);
    println!("--------------------");

    println!("[*] Running initialization sequence");
    system.wait_ready();
    println!("[*] Controller ready after {} cycles", system.stats.cycles);

    let words = config.sim.test_words;
    println!("[*] Writing {} words", words);
    for i in 0..words {
        system.write_word(workload_addr(i), pattern(i), 0b11);
    }

    println!("[*] Reading back and verifying");
    let mut mismatches = 0usize;
    for i in 0..words {
        let addr = workload_addr(i);
        let got = system.read_word(addr);
        let want = pattern(i);
        if got != want {
            let fields = AddressFields::decompose(addr);
            eprintln!(
                "[!] Mismatch at {:#010x} (bank {} row {} col {}): got {:#06x}, want {:#06x}",
                addr, fields.bank, fields.row, fields.col, got, want
            );
            mismatches += 1;
        }
    }

    println!(
        "[*] Verify complete: {}/{} words ok, {} refreshes interleaved",
        words - mismatches,
        words,
        system.device.refreshes()
    );
    system.stats.print();

    if mismatches > 0 {
        process::exit(1);
    }
}
