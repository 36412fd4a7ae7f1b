// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JSON bodies of the Elgato light API.

use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;
use crate::state::DeviceStatus;
use crate::types::{Brightness, ColorTemperature};

/// Body of `GET /elgato/accessory-info`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AccessoryInfo {
    pub product_name: String,
    pub serial_number: String,
    #[serde(default)]
    pub display_name: String,
}

impl AccessoryInfo {
    /// The user-assigned name, or the product name when none was set.
    #[must_use]
    pub fn name(&self) -> &str {
        if self.display_name.trim().is_empty() {
            &self.product_name
        } else {
            &self.display_name
        }
    }
}

/// Body of `GET /elgato/lights`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LightsReading {
    pub lights: Vec<LightReading>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub(crate) struct LightReading {
    pub on: u8,
    pub brightness: u8,
    pub temperature: u16,
}

impl LightsReading {
    /// Status of the first light of the accessory.
    pub fn status(&self) -> Result<DeviceStatus, ProtocolError> {
        let light = self.lights.first().ok_or(ProtocolError::EmptyLightList)?;
        Ok(DeviceStatus::new(
            light.on != 0,
            Brightness::clamped(light.brightness),
            ColorTemperature::from_mireds(light.temperature),
        ))
    }
}

/// Body of `PUT /elgato/lights`. Unset fields are left out.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LightsUpdate {
    number_of_lights: usize,
    lights: [LightUpdate; 1],
}

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
struct LightUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    on: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    brightness: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<u16>,
}

impl LightsUpdate {
    fn single(light: LightUpdate) -> Self {
        Self {
            number_of_lights: 1,
            lights: [light],
        }
    }

    #[must_use]
    pub fn power(on: bool) -> Self {
        Self::single(LightUpdate {
            on: Some(u8::from(on)),
            ..LightUpdate::default()
        })
    }

    #[must_use]
    pub fn brightness(brightness: Brightness) -> Self {
        Self::single(LightUpdate {
            brightness: Some(brightness.value()),
            ..LightUpdate::default()
        })
    }

    #[must_use]
    pub fn temperature(temperature: ColorTemperature) -> Self {
        Self::single(LightUpdate {
            temperature: Some(temperature.to_mireds()),
            ..LightUpdate::default()
        })
    }
}
