// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event system for light lifecycle changes.
//!
//! The controller publishes three kinds of [`LightEvent`] on an
//! [`EventBus`]: a light was created, updated or destroyed. The bus uses
//! tokio's broadcast channel so several listeners (a tray menu, a logger)
//! can follow the same stream.
//!
//! # Examples
//!
//! ```
//! use keylight_lib::event::{EventBus, LightEvent};
//! use keylight_lib::types::Serial;
//!
//! let bus = EventBus::new();
//! let mut rx = bus.subscribe();
//!
//! bus.publish(LightEvent::destroyed(Serial::new("BW33J1A02345")));
//! assert!(rx.try_recv().is_ok());
//! ```

mod event_bus;
mod light_event;

pub use event_bus::EventBus;
pub use light_event::LightEvent;
