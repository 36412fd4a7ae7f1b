// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Handle to a single Elgato light.

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::client::DeviceHandle;
use crate::elgato::wire::{AccessoryInfo, LightsReading, LightsUpdate};
use crate::error::{DeviceError, ProtocolError};
use crate::state::DeviceStatus;
use crate::types::{Brightness, ColorTemperature};

const LIGHTS_PATH: &str = "/elgato/lights";
const ACCESSORY_INFO_PATH: &str = "/elgato/accessory-info";

/// HTTP handle bound to one light.
///
/// Cloning is cheap; clones share the connection pool of the
/// [`ElgatoClient`](crate::elgato::ElgatoClient) that created them.
#[derive(Debug, Clone)]
pub struct ElgatoLight {
    http: Client,
    host: String,
    base_url: String,
}

impl ElgatoLight {
    #[must_use]
    pub(crate) fn new(http: Client, host: String, base_url: String) -> Self {
        Self {
            http,
            host,
            base_url,
        }
    }

    /// Host this light was reached at.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Base URL of the light API.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Reads identity and status in one go, as discovery needs both.
    pub(crate) async fn probe(&self) -> Result<(AccessoryInfo, DeviceStatus), DeviceError> {
        let info: AccessoryInfo = self.get(ACCESSORY_INFO_PATH).await?;
        let status = self.read_status().await?;
        Ok((info, status))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, DeviceError> {
        let url = format!("{}{path}", self.base_url);
        tracing::trace!(url = %url, "GET");

        let response = self.http.get(&url).send().await.map_err(classify)?;
        decode(response).await
    }

    async fn put(&self, update: &LightsUpdate) -> Result<(), DeviceError> {
        let url = format!("{}{LIGHTS_PATH}", self.base_url);
        tracing::debug!(url = %url, "Writing light state");

        let response = self
            .http
            .put(&url)
            .json(update)
            .send()
            .await
            .map_err(classify)?;
        check_status(&response)?;
        Ok(())
    }
}

impl DeviceHandle for ElgatoLight {
    async fn read_status(&self) -> Result<DeviceStatus, DeviceError> {
        let reading: LightsReading = self.get(LIGHTS_PATH).await?;
        Ok(reading.status()?)
    }

    async fn set_power(&self, on: bool) -> Result<(), DeviceError> {
        self.put(&LightsUpdate::power(on)).await
    }

    async fn set_brightness(&self, brightness: Brightness) -> Result<(), DeviceError> {
        self.put(&LightsUpdate::brightness(brightness)).await
    }

    async fn set_temperature(&self, temperature: ColorTemperature) -> Result<(), DeviceError> {
        self.put(&LightsUpdate::temperature(temperature)).await
    }
}

/// Connection failures and timeouts mean the light is gone; anything else
/// is a protocol problem.
fn classify(error: reqwest::Error) -> DeviceError {
    if error.is_connect() || error.is_timeout() {
        DeviceError::Unreachable(error.to_string())
    } else {
        DeviceError::Protocol(ProtocolError::Http(error))
    }
}

fn check_status(response: &Response) -> Result<(), ProtocolError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    Err(ProtocolError::Status {
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, DeviceError> {
    check_status(&response)?;
    let body = response.bytes().await.map_err(classify)?;
    let value = serde_json::from_slice(&body).map_err(ProtocolError::Json)?;
    Ok(value)
}
