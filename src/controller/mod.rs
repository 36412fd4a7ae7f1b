// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device-state controller.
//!
//! The [`LightController`] is a single worker that owns the ordered list of
//! known lights, drains the task queue one task at a time, calls the device
//! client and publishes lifecycle events.
//!
//! # Task semantics
//!
//! - **Discover**: scan, then reconcile the snapshot with the device list
//!   (see [`DeviceRegistry::reconcile`]). A scan naming exactly the known
//!   lights changes nothing and publishes nothing. A failed scan is logged
//!   and ignored; no light is removed because of it.
//! - **Query**: re-read one light and publish `Updated`.
//! - **Adjust**: write power, brightness, temperature in that order. Success
//!   updates the stored view without publishing, since the requester already
//!   displays the value it asked for.
//!
//! A task naming an unknown light publishes `Destroyed` for it and does
//! nothing else. A failed light call publishes `Destroyed`, drops the light
//! and queues a discovery.
//!
//! # Ordering
//!
//! The device list is kept in "most recently confirmed" order: lights
//! reconfirmed by a scan take the order of that scan, and new lights follow.
//!
//! # Timeouts
//!
//! Only discovery carries an explicit timeout. Queries and adjustments are
//! bounded by the client's own request timeout.

mod config;
mod light_controller;
mod registry;

pub use config::ControllerConfig;
pub use light_controller::{LightController, TaskOutcome, WorkerHandle};
pub use registry::{DeviceEntry, DeviceRegistry};
