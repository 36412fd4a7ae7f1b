// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device client abstraction.
//!
//! The controller never speaks a device protocol itself. It consumes a
//! [`DeviceClient`] that can scan the network and hands out one
//! [`DeviceHandle`] per light found. The HTTP implementation for Elgato
//! lights lives in [`crate::elgato`]; tests plug in their own doubles.

use std::future::Future;
use std::time::Duration;

use crate::error::{DeviceError, DiscoveryError};
use crate::state::{DeviceStatus, DeviceView};
use crate::types::{Brightness, ColorTemperature, Serial};

/// Capability bound to one physical light.
///
/// Every call may fail with a [`DeviceError`]; the controller treats any
/// failure as the light having left the network.
pub trait DeviceHandle: Send + Sync + 'static {
    /// Reads the current power, brightness and temperature.
    fn read_status(&self) -> impl Future<Output = Result<DeviceStatus, DeviceError>> + Send;

    /// Turns the light on or off.
    fn set_power(&self, on: bool) -> impl Future<Output = Result<(), DeviceError>> + Send;

    /// Sets the light output.
    fn set_brightness(
        &self,
        brightness: Brightness,
    ) -> impl Future<Output = Result<(), DeviceError>> + Send;

    /// Sets the white point.
    fn set_temperature(
        &self,
        temperature: ColorTemperature,
    ) -> impl Future<Output = Result<(), DeviceError>> + Send;
}

/// Network scanner producing handles for every light it finds.
pub trait DeviceClient: Send + Sync + 'static {
    /// Handle type produced by discovery.
    type Handle: DeviceHandle;

    /// Scans the network for at most `timeout`.
    ///
    /// An empty result means no light answered. An error is reserved for
    /// scans that could not run at all.
    fn discover(
        &self,
        timeout: Duration,
    ) -> impl Future<Output = Result<Vec<DiscoveredDevice<Self::Handle>>, DiscoveryError>> + Send;
}

/// One light found by a discovery scan, with its live status.
#[derive(Debug)]
pub struct DiscoveredDevice<H> {
    /// Handle for later calls against this light.
    pub handle: H,
    /// Address the light answered at.
    pub address: String,
    /// Stable identity.
    pub serial: Serial,
    /// Display name.
    pub name: String,
    /// Status reported during the scan.
    pub status: DeviceStatus,
}

impl<H> DiscoveredDevice<H> {
    /// Builds a fresh view from the discovery payload.
    #[must_use]
    pub fn to_view(&self) -> DeviceView {
        DeviceView::new(
            self.address.clone(),
            self.serial.clone(),
            self.name.clone(),
            self.status,
        )
    }
}
