// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Headless model of the tray's control panels.
//!
//! A [`PanelSet`] mirrors the controller's device list from the
//! [`LightEvent`](crate::event::LightEvent) stream, one [`Panel`] per light,
//! and turns user interactions into [`Task`](crate::queue::Task)s. It keeps
//! no reference to the controller and can be driven by any UI toolkit.
//!
//! # Examples
//!
//! ```
//! use keylight_lib::event::LightEvent;
//! use keylight_lib::panel::{PanelChange, PanelSet};
//! use keylight_lib::queue::Task;
//! use keylight_lib::state::{DeviceStatus, DeviceView};
//! use keylight_lib::types::Serial;
//! use std::time::Duration;
//!
//! let mut panels = PanelSet::new();
//! let view = DeviceView::new(
//!     "192.168.1.40",
//!     Serial::new("BW33J1A02345"),
//!     "Desk Light",
//!     DeviceStatus::default(),
//! );
//!
//! assert_eq!(panels.apply(&LightEvent::created(view)), PanelChange::Added(0));
//! assert_eq!(
//!     panels.tick(Duration::from_secs(2)),
//!     Task::query(Serial::new("BW33J1A02345"))
//! );
//! ```

mod panel_set;

pub use panel_set::{Panel, PanelChange, PanelSet};
