// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `keylight_lib` - Device-state controller for a tray application driving
//! Elgato Key Lights.
//!
//! The presentation layer never talks to a light directly. It submits
//! [`Task`]s to a queue and follows the [`LightEvent`] stream; a single
//! [`LightController`] worker owns the list of known lights, performs every
//! network call and keeps the list in sync with what answers on the network.
//!
//! # Architecture
//!
//! ```text
//!  UI thread                      controller thread
//!  ---------                      -----------------
//!  PanelSet --Task--> queue ----> LightController --> DeviceClient (HTTP)
//!     ^                                 |
//!     +---------- LightEvent <--- EventBus
//! ```
//!
//! - [`queue`]: unbounded FIFO of tasks with a drain barrier
//! - [`controller`]: the worker, its device registry and reconciliation
//! - [`event`]: `Created` / `Updated` / `Destroyed` events on a broadcast bus
//! - [`client`]: the device client seam the controller calls through
//! - [`elgato`]: HTTP implementation of that seam for Elgato lights
//! - [`panel`]: headless model of the tray's control panels
//!
//! # Self-healing
//!
//! A light failing a call is removed at once and a discovery is queued. If it
//! answers that scan it comes back with a fresh `Created` event.
//!
//! # Quick Start
//!
//! ```no_run
//! use keylight_lib::controller::{ControllerConfig, LightController};
//! use keylight_lib::elgato::{ElgatoClient, ElgatoConfig};
//! use keylight_lib::panel::PanelSet;
//! use keylight_lib::queue::task_queue;
//! use std::net::Ipv4Addr;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ElgatoClient::new(
//!         ElgatoConfig::new().with_subnet(Ipv4Addr::new(192, 168, 1, 0)),
//!     )?;
//!     let config = ControllerConfig::new();
//!     let (tasks, receiver) = task_queue();
//!
//!     let controller = LightController::new(client, &tasks, config.clone());
//!     let mut events = controller.subscribe();
//!     let _worker = controller.spawn(receiver)?;
//!
//!     let mut panels = PanelSet::new();
//!     tasks.submit(panels.tick(config.discovery_timeout()));
//!
//!     // In the UI loop:
//!     while let Ok(event) = events.try_recv() {
//!         panels.apply(&event);
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod controller;
#[cfg(feature = "http")]
pub mod elgato;
pub mod error;
pub mod event;
pub mod panel;
pub mod queue;
pub mod state;
pub mod types;

pub use client::{DeviceClient, DeviceHandle, DiscoveredDevice};
pub use controller::{ControllerConfig, LightController, TaskOutcome, WorkerHandle};
#[cfg(feature = "http")]
pub use elgato::{ElgatoClient, ElgatoConfig, ElgatoLight};
pub use error::{DeviceError, DiscoveryError, Error, ProtocolError, Result, ValueError};
pub use event::{EventBus, LightEvent};
pub use panel::{Panel, PanelChange, PanelSet};
pub use queue::{Adjustment, Task, TaskReceiver, TaskSender, task_queue};
pub use state::{DeviceStatus, DeviceView};
pub use types::{Brightness, ColorTemperature, Serial};
