// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device status and view snapshots.

use crate::types::{Brightness, ColorTemperature, Serial};

/// The mutable part of a light's state, as read from or written to the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeviceStatus {
    /// Whether the light is on.
    pub power: bool,
    /// Current light output.
    pub brightness: Brightness,
    /// Current white point.
    pub temperature: ColorTemperature,
}

impl DeviceStatus {
    /// Creates a status from its three fields.
    #[must_use]
    pub const fn new(power: bool, brightness: Brightness, temperature: ColorTemperature) -> Self {
        Self {
            power,
            brightness,
            temperature,
        }
    }
}

/// Immutable snapshot of everything the presentation layer shows for a light.
///
/// A view is never changed after it is built. Every state change produces a
/// new view, so a view received with an event can be kept without copying.
///
/// # Examples
///
/// ```
/// use keylight_lib::state::{DeviceStatus, DeviceView};
/// use keylight_lib::types::{Brightness, ColorTemperature, Serial};
///
/// let view = DeviceView::new(
///     "192.168.1.40",
///     Serial::new("BW33J1A02345"),
///     "Desk Light",
///     DeviceStatus::default(),
/// );
///
/// let brighter = view.with_status(DeviceStatus::new(
///     true,
///     Brightness::MAX,
///     ColorTemperature::WARM,
/// ));
/// assert_eq!(brighter.serial(), view.serial());
/// assert!(brighter.power());
/// assert!(!view.power());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceView {
    address: String,
    serial: Serial,
    name: String,
    status: DeviceStatus,
}

impl DeviceView {
    /// Builds a view from identity fields and a status.
    #[must_use]
    pub fn new(
        address: impl Into<String>,
        serial: Serial,
        name: impl Into<String>,
        status: DeviceStatus,
    ) -> Self {
        Self {
            address: address.into(),
            serial,
            name: name.into(),
            status,
        }
    }

    /// Returns a new view with the same identity and the given status.
    #[must_use]
    pub fn with_status(&self, status: DeviceStatus) -> Self {
        Self {
            address: self.address.clone(),
            serial: self.serial.clone(),
            name: self.name.clone(),
            status,
        }
    }

    /// Network address the light was discovered at.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Stable identity of the light.
    #[must_use]
    pub fn serial(&self) -> &Serial {
        &self.serial
    }

    /// Display name of the light.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The full mutable status.
    #[must_use]
    pub fn status(&self) -> DeviceStatus {
        self.status
    }

    /// Whether the light is on.
    #[must_use]
    pub fn power(&self) -> bool {
        self.status.power
    }

    /// Current light output.
    #[must_use]
    pub fn brightness(&self) -> Brightness {
        self.status.brightness
    }

    /// Current white point.
    #[must_use]
    pub fn temperature(&self) -> ColorTemperature {
        self.status.temperature
    }
}
