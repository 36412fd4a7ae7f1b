// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Discovery of Elgato lights by probing candidate hosts.

use std::time::Duration;

use reqwest::{Client, Url};
use tokio::task::JoinSet;
use tokio::time::{Instant, timeout_at};

use crate::client::{DeviceClient, DiscoveredDevice};
use crate::elgato::config::ElgatoConfig;
use crate::elgato::light::ElgatoLight;
use crate::error::{DiscoveryError, ProtocolError};
use crate::types::Serial;

/// [`DeviceClient`] for Elgato Key Lights.
///
/// Discovery probes every candidate of the [`ElgatoConfig`] concurrently
/// and keeps the hosts that answer both `accessory-info` and `lights`
/// before the scan deadline.
///
/// # Examples
///
/// ```no_run
/// use keylight_lib::client::DeviceClient;
/// use keylight_lib::elgato::{ElgatoClient, ElgatoConfig};
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ElgatoClient::new(ElgatoConfig::new().with_host("192.168.1.40"))?;
/// let found = client.discover(Duration::from_secs(2)).await?;
/// for light in &found {
///     println!("{} at {}", light.name, light.address);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ElgatoClient {
    config: ElgatoConfig,
    http: Client,
}

impl ElgatoClient {
    /// Creates a client from its configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new(config: ElgatoConfig) -> Result<Self, ProtocolError> {
        let http = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(Self { config, http })
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ElgatoConfig {
        &self.config
    }

    /// Builds a handle for a known host without probing it.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::InvalidAddress`] if the host does not form
    /// a valid URL.
    pub fn light(&self, host: impl Into<String>) -> Result<ElgatoLight, ProtocolError> {
        let host = host.into();
        let base_url = self.config.base_url(&host);
        if Url::parse(&base_url).is_err() {
            return Err(ProtocolError::InvalidAddress(host));
        }
        Ok(ElgatoLight::new(self.http.clone(), host, base_url))
    }
}

impl DeviceClient for ElgatoClient {
    type Handle = ElgatoLight;

    async fn discover(
        &self,
        timeout: Duration,
    ) -> Result<Vec<DiscoveredDevice<ElgatoLight>>, DiscoveryError> {
        let candidates = self.config.candidates();
        if candidates.is_empty() {
            tracing::debug!("No discovery candidates configured");
            return Ok(Vec::new());
        }

        let lights: Vec<ElgatoLight> = candidates
            .into_iter()
            .filter_map(|host| match self.light(host) {
                Ok(light) => Some(light),
                Err(error) => {
                    tracing::warn!(error = %error, "Skipping discovery candidate");
                    None
                }
            })
            .collect();

        let deadline = Instant::now() + timeout;
        let mut probes = JoinSet::new();
        for (index, light) in lights.into_iter().enumerate() {
            probes.spawn(async move {
                let probed = light.probe().await;
                (index, light, probed)
            });
        }

        let mut found = Vec::new();
        loop {
            match timeout_at(deadline, probes.join_next()).await {
                Ok(Some(Ok((index, light, Ok((info, status)))))) => {
                    tracing::debug!(
                        host = %light.host(),
                        serial = %info.serial_number,
                        "Light answered"
                    );
                    let device = DiscoveredDevice {
                        address: light.host().to_string(),
                        serial: Serial::new(info.serial_number.as_str()),
                        name: info.name().to_string(),
                        status,
                        handle: light,
                    };
                    found.push((index, device));
                }
                Ok(Some(Ok((_, light, Err(error))))) => {
                    tracing::trace!(host = %light.host(), error = %error, "No light");
                }
                Ok(Some(Err(error))) => {
                    return Err(DiscoveryError::Transport(error.to_string()));
                }
                Ok(None) => break,
                Err(_) => {
                    tracing::debug!(pending = probes.len(), "Discovery deadline reached");
                    probes.abort_all();
                    break;
                }
            }
        }

        found.sort_by_key(|(index, _)| *index);
        Ok(found.into_iter().map(|(_, device)| device).collect())
    }
}
