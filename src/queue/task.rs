// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Work items processed by the controller.

use std::time::Duration;

use crate::types::{Brightness, ColorTemperature, Serial};

/// A unit of work for the controller.
///
/// Tasks are immutable once built. They are processed one at a time, in
/// submission order, by the single controller worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    /// Scan the network and reconcile the device list.
    Discover {
        /// Upper bound for the scan.
        timeout: Duration,
    },

    /// Re-read the status of one light.
    Query {
        /// Light to refresh.
        serial: Serial,
    },

    /// Write one or more fields of one light.
    Adjust(Adjustment),
}

impl Task {
    /// Creates a discovery task.
    #[must_use]
    pub fn discover(timeout: Duration) -> Self {
        Self::Discover { timeout }
    }

    /// Creates a status query task.
    #[must_use]
    pub fn query(serial: impl Into<Serial>) -> Self {
        Self::Query {
            serial: serial.into(),
        }
    }

    /// Returns the serial targeted by this task, if any.
    #[must_use]
    pub fn serial(&self) -> Option<&Serial> {
        match self {
            Self::Discover { .. } => None,
            Self::Query { serial } => Some(serial),
            Self::Adjust(adjustment) => Some(&adjustment.serial),
        }
    }

    /// Short name of the task kind, for logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Discover { .. } => "discover",
            Self::Query { .. } => "query",
            Self::Adjust(_) => "adjust",
        }
    }
}

impl From<Adjustment> for Task {
    fn from(adjustment: Adjustment) -> Self {
        Self::Adjust(adjustment)
    }
}

/// A set of optional writes against one light.
///
/// Fields left as `None` are not written. The controller applies present
/// fields in the order power, brightness, temperature.
///
/// # Examples
///
/// ```
/// use keylight_lib::queue::{Adjustment, Task};
/// use keylight_lib::types::Brightness;
///
/// let task: Task = Adjustment::new("BW33J1A02345")
///     .with_power(true)
///     .with_brightness(Brightness::clamped(40))
///     .into();
/// assert_eq!(task.kind(), "adjust");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adjustment {
    /// Light to adjust.
    pub serial: Serial,
    /// New power state, if any.
    pub power: Option<bool>,
    /// New brightness, if any.
    pub brightness: Option<Brightness>,
    /// New temperature, if any.
    pub temperature: Option<ColorTemperature>,
}

impl Adjustment {
    /// Creates an adjustment that writes nothing yet.
    #[must_use]
    pub fn new(serial: impl Into<Serial>) -> Self {
        Self {
            serial: serial.into(),
            power: None,
            brightness: None,
            temperature: None,
        }
    }

    /// Adds a power write.
    #[must_use]
    pub fn with_power(mut self, on: bool) -> Self {
        self.power = Some(on);
        self
    }

    /// Adds a brightness write.
    #[must_use]
    pub fn with_brightness(mut self, brightness: Brightness) -> Self {
        self.brightness = Some(brightness);
        self
    }

    /// Adds a temperature write.
    #[must_use]
    pub fn with_temperature(mut self, temperature: ColorTemperature) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Returns `true` if no field would be written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.power.is_none() && self.brightness.is_none() && self.temperature.is_none()
    }
}
