// SPDX-License-Identifier: MPL-2.0

//! Watch program: discover Elgato lights and follow their state.
//!
//! The main thread plays the part of the tray UI. It mirrors controller
//! events into a [`PanelSet`] and submits the periodic refresh task, while
//! the controller runs on its own thread.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example watch -- <host | subnet/24>...
//! ```
//!
//! # Example
//!
//! ```bash
//! # A single light
//! cargo run --example watch -- 192.168.1.40
//!
//! # Sweep a whole subnet
//! cargo run --example watch -- 192.168.1.0/24
//!
//! # More log output
//! RUST_LOG=debug cargo run --example watch -- 192.168.1.0/24
//! ```

use std::env;
use std::net::Ipv4Addr;
use std::thread;

use keylight_lib::controller::{ControllerConfig, LightController};
use keylight_lib::elgato::{ElgatoClient, ElgatoConfig};
use keylight_lib::event::LightEvent;
use keylight_lib::panel::{PanelChange, PanelSet};
use keylight_lib::queue::task_queue;
use tokio::sync::broadcast::error::TryRecvError;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        eprintln!("Usage: watch <host | subnet/24>...");
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  cargo run --example watch -- 192.168.1.40");
        eprintln!("  cargo run --example watch -- 192.168.1.0/24");
        std::process::exit(1);
    }

    let mut elgato = ElgatoConfig::new();
    for arg in args {
        match arg.strip_suffix("/24").map(str::parse::<Ipv4Addr>) {
            Some(Ok(network)) => elgato = elgato.with_subnet(network),
            Some(Err(e)) => return Err(format!("invalid subnet {arg}: {e}").into()),
            None => elgato = elgato.with_host(arg),
        }
    }
    println!("Probing {} candidate host(s)", elgato.candidates().len());

    let config = ControllerConfig::new();
    let (tasks, receiver) = task_queue();
    let controller = LightController::new(ElgatoClient::new(elgato)?, &tasks, config.clone());
    let mut events = controller.subscribe();
    let _worker = controller.spawn(receiver)?;

    let mut panels = PanelSet::new();
    loop {
        tasks.submit(panels.tick(config.discovery_timeout()));
        thread::sleep(config.refresh_interval());

        loop {
            match events.try_recv() {
                Ok(event) => show(&mut panels, &event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Lagged(missed)) => {
                    // Stale panels get Destroyed back for their query.
                    tracing::warn!(missed, "Fell behind the controller, re-querying panels");
                    for panel in panels.panels() {
                        tasks.query(panel.serial().clone());
                    }
                }
                Err(TryRecvError::Closed) => return Ok(()),
            }
        }
    }
}

fn show(panels: &mut PanelSet, event: &LightEvent) {
    match panels.apply(event) {
        PanelChange::Added(index) | PanelChange::Refreshed(index) => {
            let view = panels.panels()[index].view();
            println!(
                "[{index}] {} ({}) at {}: {} {} {}",
                view.name(),
                view.serial(),
                view.address(),
                if view.power() { "on" } else { "off" },
                view.brightness(),
                view.temperature()
            );
        }
        PanelChange::Removed(index) => println!("[{index}] {} removed", event.serial()),
        PanelChange::Ignored => {}
    }
}
