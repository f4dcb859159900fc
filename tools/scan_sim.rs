// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Scan arbitration simulator.
//!
//! Runs a named scenario against the recording radio, acknowledging every
//! enable request as soon as it is issued, and prints the radio request log,
//! client notifications and final instance states.

use std::env;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};
use bredr::config::{load_config, ConfigError, ScanConfig};
use bredr::observability::{debug_flags_help, init_logging, parse_debug_flags};
use bredr::prelude::*;
use tracing::info;

type SimManager = ScanManager<RecordingRadio, RecordingCoordinator>;

const SCENARIOS: &[&str] = &["pairing", "throttle", "disable"];

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: scan_sim [--config <path>] [--debug-<crate>...] [scenario]\n\n\
         Scenarios: {}\n\
         Default scenario: pairing\n\n{}",
        SCENARIOS.join(", "),
        debug_flags_help()
    );
    process::exit(2);
}

fn parse_args() -> (Option<PathBuf>, String) {
    let mut config_path = None;
    let mut scenario = None;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let v = args.next().unwrap_or_else(|| usage_and_exit());
                config_path = Some(PathBuf::from(v));
            }
            "-h" | "--help" => usage_and_exit(),
            flag if flag.starts_with("--debug-") => {}
            other if other.starts_with('-') => {
                eprintln!("Unknown argument: {other}");
                usage_and_exit();
            }
            other => scenario = Some(other.to_string()),
        }
    }

    (config_path, scenario.unwrap_or_else(|| "pairing".to_string()))
}

fn read_config(path: Option<PathBuf>) -> Result<ScanConfig> {
    match path {
        Some(path) => load_config(Some(&path))
            .with_context(|| format!("Failed to load {}", path.display())),
        None => match load_config(None) {
            Err(ConfigError::FileNotFound(_)) => Ok(ScanConfig::default()),
            other => other.context("Failed to load configuration"),
        },
    }
}

/// Client that prints what it is told
fn client(name: &'static str) -> Arc<dyn ScanClient> {
    Arc::new(move |event: ScanEvent| {
        println!("    {name} <- {} {:?}", event.category, event.kind);
    })
}

fn disable_owner(name: &'static str) -> Arc<dyn ScanDisableObserver> {
    Arc::new(move |disabled: bool| {
        println!("    {name} <- scan disable cfm disabled={disabled}");
    })
}

struct Sim {
    manager: SimManager,
}

impl Sim {
    /// Run one operation, then answer requests until the manager settles
    fn step<F>(&mut self, label: &str, op: F) -> Result<()>
    where
        F: FnOnce(&mut SimManager) -> ScanResult<()>,
    {
        println!("> {label}");
        op(&mut self.manager)?;
        self.print_requests();
        while self.manager.transitions_in_flight() > 0 {
            let event = if self.manager.instance(ScanCategory::TruncatedPage).state.is_transitioning() {
                RadioEvent::truncated_scan_enable_success()
            } else {
                RadioEvent::scan_enable_success()
            };
            println!("  radio: {:?}", event);
            self.manager.handle_radio_event(event)?;
            self.print_requests();
        }
        Ok(())
    }

    fn print_requests(&mut self) {
        for request in self.manager.radio_mut().take_requests() {
            println!("  hci: {:?}", request);
        }
    }

    fn print_states(&self) {
        println!("Final state:");
        for category in ScanCategory::ALL {
            let snapshot = self.manager.instance(category);
            println!(
                "  {:<15} {:?} goal={} clients={} paused={} throttled={}",
                category.name(),
                snapshot.state,
                snapshot.resolved,
                snapshot.clients,
                snapshot.paused,
                snapshot.throttled
            );
        }
        println!("  bandwidth: {:?}", self.manager.bandwidth().events());
    }
}

const CONNECTION_MANAGER: ClientId = ClientId(1);
const PAIRING: ClientId = ClientId(2);
const HANDOVER: ClientId = ClientId(3);
const DFU: ClientId = ClientId(4);

fn run_pairing(sim: &mut Sim) -> Result<()> {
    sim.step("connection manager: page scan slow", |m| {
        m.page_scan_request(CONNECTION_MANAGER, client("conn"), ScanIntensity::Slow)
    })?;
    sim.step("pairing: page scan fast", |m| {
        m.page_scan_request(PAIRING, client("pairing"), ScanIntensity::Fast)
    })?;
    sim.step("pairing: inquiry scan fast", |m| {
        m.inquiry_scan_request(PAIRING, client("pairing"), ScanIntensity::Fast)
    })?;
    sim.step("handover: truncated page scan slow", |m| {
        m.truncated_page_scan_request(HANDOVER, client("handover"), ScanIntensity::Slow)
    })?;
    sim.step("pairing done: release inquiry scan", |m| m.inquiry_scan_release(PAIRING))?;
    sim.step("pairing done: release page scan", |m| m.page_scan_release(PAIRING))?;
    sim.step("connected: release page scan", |m| m.page_scan_release(CONNECTION_MANAGER))
}

fn run_throttle(sim: &mut Sim) -> Result<()> {
    sim.step("connection manager: page scan fast", |m| {
        m.page_scan_request(CONNECTION_MANAGER, client("conn"), ScanIntensity::Fast)
    })?;
    sim.step("pairing: inquiry scan slow", |m| {
        m.inquiry_scan_request(PAIRING, client("pairing"), ScanIntensity::Slow)
    })?;
    sim.step("bandwidth: throttle required", |m| m.on_throttle_changed(true))?;
    sim.step("bandwidth: throttle released", |m| m.on_throttle_changed(false))
}

fn run_disable(sim: &mut Sim) -> Result<()> {
    sim.step("connection manager: page scan slow", |m| {
        m.page_scan_request(CONNECTION_MANAGER, client("conn"), ScanIntensity::Slow)
    })?;
    sim.step("pairing: inquiry scan fast", |m| {
        m.inquiry_scan_request(PAIRING, client("pairing"), ScanIntensity::Fast)
    })?;
    sim.step("dfu: scan disable", |m| m.scan_disable(DFU, disable_owner("dfu")))?;
    sim.step("handover: page scan fast while disabled", |m| {
        m.page_scan_request(HANDOVER, client("handover"), ScanIntensity::Fast)
    })?;
    sim.step("dfu: scan enable", |m| m.scan_enable())
}

fn main() -> Result<()> {
    let (config_path, scenario) = parse_args();
    let config = read_config(config_path)?;

    let debug_flags = parse_debug_flags();
    let _logging = init_logging(&debug_flags, &config.logging)?;

    let mut manager = ScanManager::new(RecordingRadio::new(), RecordingCoordinator::new())?;
    config.apply(&mut manager)?;
    manager.radio_mut().take_requests();

    let mut sim = Sim { manager };
    info!(target: "bredr", "Running scan scenario {}", scenario);
    println!("Scenario: {scenario}");
    match scenario.as_str() {
        "pairing" => run_pairing(&mut sim)?,
        "throttle" => run_throttle(&mut sim)?,
        "disable" => run_disable(&mut sim)?,
        other => {
            eprintln!("Unknown scenario: {other}");
            usage_and_exit();
        }
    }
    sim.print_states();
    info!(target: "bredr", "Scenario {} settled, {} transitions in flight", scenario, sim.manager.transitions_in_flight());
    Ok(())
}
