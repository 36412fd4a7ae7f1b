// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory light network for controller tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use keylight_lib::client::{DeviceClient, DeviceHandle, DiscoveredDevice};
use keylight_lib::error::{DeviceError, DiscoveryError};
use keylight_lib::state::DeviceStatus;
use keylight_lib::types::{Brightness, ColorTemperature, Serial};
use parking_lot::Mutex;

#[derive(Debug, Clone)]
struct FakeLight {
    serial: Serial,
    name: String,
    address: String,
    status: DeviceStatus,
    reachable: bool,
    failing_calls: usize,
}

#[derive(Debug, Default)]
struct Network {
    lights: Vec<FakeLight>,
    discovery_fails: bool,
    calls: Vec<String>,
}

/// Shared, scriptable network of fake lights.
#[derive(Debug, Clone, Default)]
pub struct FakeNetwork {
    inner: Arc<Mutex<Network>>,
}

impl FakeNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a reachable light, or makes a known one reachable again.
    pub fn add(&self, serial: &str) {
        let mut net = self.inner.lock();
        if let Some(light) = net.lights.iter_mut().find(|l| l.serial.as_str() == serial) {
            light.reachable = true;
            return;
        }
        let index = net.lights.len() + 1;
        net.lights.push(FakeLight {
            serial: Serial::new(serial),
            name: format!("Light {serial}"),
            address: format!("10.0.0.{index}"),
            status: DeviceStatus::new(true, Brightness::clamped(50), ColorTemperature::NEUTRAL),
            reachable: true,
            failing_calls: 0,
        });
    }

    /// Removes a light from the network entirely.
    pub fn remove(&self, serial: &str) {
        self.inner
            .lock()
            .lights
            .retain(|l| l.serial.as_str() != serial);
    }

    /// Keeps the light listed but makes every call to it fail.
    pub fn set_reachable(&self, serial: &str, reachable: bool) {
        if let Some(light) = self
            .inner
            .lock()
            .lights
            .iter_mut()
            .find(|l| l.serial.as_str() == serial)
        {
            light.reachable = reachable;
        }
    }

    /// Makes the next `count` calls to the light fail while discovery
    /// still lists it.
    pub fn fail_calls(&self, serial: &str, count: usize) {
        if let Some(light) = self
            .inner
            .lock()
            .lights
            .iter_mut()
            .find(|l| l.serial.as_str() == serial)
        {
            light.failing_calls = count;
        }
    }

    /// Changes the status a light reports, as if adjusted by hand.
    pub fn set_status(&self, serial: &str, status: DeviceStatus) {
        if let Some(light) = self
            .inner
            .lock()
            .lights
            .iter_mut()
            .find(|l| l.serial.as_str() == serial)
        {
            light.status = status;
        }
    }

    pub fn status(&self, serial: &str) -> Option<DeviceStatus> {
        self.inner
            .lock()
            .lights
            .iter()
            .find(|l| l.serial.as_str() == serial)
            .map(|l| l.status)
    }

    pub fn set_discovery_fails(&self, fails: bool) {
        self.inner.lock().discovery_fails = fails;
    }

    /// Calls made so far, like `"discover"` or `"set_power A true"`.
    pub fn calls(&self) -> Vec<String> {
        self.inner.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.inner.lock().calls.clear();
    }

    pub fn client(&self) -> FakeClient {
        FakeClient {
            network: self.clone(),
        }
    }

    fn scan(&self) -> Result<Vec<DiscoveredDevice<FakeHandle>>, DiscoveryError> {
        let mut net = self.inner.lock();
        net.calls.push("discover".to_string());
        if net.discovery_fails {
            return Err(DiscoveryError::Transport("network is down".to_string()));
        }

        Ok(net
            .lights
            .iter()
            .filter(|l| l.reachable)
            .map(|l| DiscoveredDevice {
                handle: FakeHandle {
                    serial: l.serial.clone(),
                    network: self.clone(),
                },
                address: l.address.clone(),
                serial: l.serial.clone(),
                name: l.name.clone(),
                status: l.status,
            })
            .collect())
    }

    fn with_light<T>(
        &self,
        serial: &Serial,
        call: String,
        f: impl FnOnce(&mut FakeLight) -> T,
    ) -> Result<T, DeviceError> {
        let mut net = self.inner.lock();
        net.calls.push(call);
        match net
            .lights
            .iter_mut()
            .find(|l| &l.serial == serial && l.reachable)
        {
            Some(light) if light.failing_calls > 0 => {
                light.failing_calls -= 1;
                Err(DeviceError::Unreachable(format!("{serial} timed out")))
            }
            Some(light) => Ok(f(light)),
            None => Err(DeviceError::Unreachable(format!("{serial} does not answer"))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FakeClient {
    network: FakeNetwork,
}

impl DeviceClient for FakeClient {
    type Handle = FakeHandle;

    async fn discover(
        &self,
        _timeout: Duration,
    ) -> Result<Vec<DiscoveredDevice<FakeHandle>>, DiscoveryError> {
        self.network.scan()
    }
}

#[derive(Debug)]
pub struct FakeHandle {
    serial: Serial,
    network: FakeNetwork,
}

impl DeviceHandle for FakeHandle {
    async fn read_status(&self) -> Result<DeviceStatus, DeviceError> {
        self.network
            .with_light(&self.serial, format!("read_status {}", self.serial), |l| {
                l.status
            })
    }

    async fn set_power(&self, on: bool) -> Result<(), DeviceError> {
        self.network
            .with_light(&self.serial, format!("set_power {} {on}", self.serial), |l| {
                l.status.power = on;
            })
    }

    async fn set_brightness(&self, brightness: Brightness) -> Result<(), DeviceError> {
        self.network.with_light(
            &self.serial,
            format!("set_brightness {} {}", self.serial, brightness.value()),
            |l| l.status.brightness = brightness,
        )
    }

    async fn set_temperature(&self, temperature: ColorTemperature) -> Result<(), DeviceError> {
        self.network.with_light(
            &self.serial,
            format!("set_temperature {} {}", self.serial, temperature.kelvin()),
            |l| l.status.temperature = temperature,
        )
    }
}
